pub mod me_cache;

pub use me_cache::MeCache;

use async_trait::async_trait;

use crate::client::ApiError;
use crate::models::UserProfile;

/// Why the fast path could not produce a profile.
///
/// The resolver treats every variant the same way; the split only helps logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CacheError {
    /// For caches that report a miss instead of fetching. `MeCache` fetches
    /// on a miss and only ever reports `Fetch`.
    #[error("no cached profile")]
    Miss,
    #[error("fetching a fresh profile failed: {0}")]
    Fetch(#[from] ApiError),
}

/// The fast path for "who am I": a cached profile, or a fresh one fetched on miss.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    async fn get_cached_or_fresh_profile(&self) -> Result<UserProfile, CacheError>;

    /// Drops whatever is cached so the next lookup goes to the server.
    fn invalidate(&self);
}
