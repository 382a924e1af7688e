use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use cached::{Cached, TimedCache};
use tracing::{debug, info};

use super::{CacheError, ProfileCache};
use crate::client::SessionApi;
use crate::models::UserProfile;
use crate::utils::log_throttle::LogThrottle;

const CACHE_HIT_LOG_WINDOW: Duration = Duration::from_secs(30);

/// Short-lived cache of the who-am-i answer for the ambient session.
///
/// A hit is served without touching the network. A miss (or an expired
/// entry) fetches a fresh profile and stores it for `ttl_seconds`.
pub struct MeCache {
    api: Arc<dyn SessionApi>,
    entry: Mutex<TimedCache<(), UserProfile>>,
    ttl_seconds: u64,
    hit_logs: LogThrottle,
}

impl MeCache {
    pub fn new(api: Arc<dyn SessionApi>, ttl_seconds: u64) -> Self {
        info!("Creating identity cache with a {}s lifespan", ttl_seconds);
        Self {
            api,
            entry: Mutex::new(TimedCache::with_lifespan(ttl_seconds)),
            ttl_seconds,
            hit_logs: LogThrottle::new(CACHE_HIT_LOG_WINDOW),
        }
    }

    /// The cached profile, if one is present and not expired.
    pub fn cached(&self) -> Option<UserProfile> {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry.cache_get(&()).cloned()
    }
}

#[async_trait]
impl ProfileCache for MeCache {
    async fn get_cached_or_fresh_profile(&self) -> Result<UserProfile, CacheError> {
        if let Some(user) = self.cached() {
            if let Some(suppressed_count) = self.hit_logs.should_emit("identity.cache.hit") {
                debug!(
                    event_name = "identity.cache.hit",
                    event_domain = "identity",
                    username = user.username.as_str(),
                    cache_ttl_seconds = self.ttl_seconds,
                    suppressed_count,
                    "current user served from cache"
                );
            }
            return Ok(user);
        }

        // The lock is not held across the fetch; concurrent misses each fetch.
        let user = self.api.whoami().await?;
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry.cache_set((), user.clone());
        Ok(user)
    }

    fn invalidate(&self) {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry.cache_clear();
        debug!("Identity cache invalidated");
    }
}
