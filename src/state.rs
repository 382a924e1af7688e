//! Shared session bootstrap state.
//!
//! Bundles the collaborators and the two core components so application code
//! has a single handle for identity resolution and auto-login control.

use std::sync::Arc;

use crate::autologin::{AutoLoginGate, AutoLoginState, DisabledFlag};
use crate::cache::{MeCache, ProfileCache};
use crate::client::{ApiError, SessionApi};
use crate::config::ConfigV1;
use crate::identity::{IdentityResolver, SharedSession};
use crate::models::UserProfile;
use crate::storage::{SharedStorage, StorageError};

/// Everything one process needs to bootstrap its session.
///
/// Cloning is cheap and every clone shares the same latch, cache and session.
#[derive(Clone)]
pub struct SessionContext {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    pub cache: Arc<MeCache>,
    /// Process-wide current user.
    pub session: Arc<SharedSession>,
    pub gate: Arc<AutoLoginGate>,
    pub resolver: Arc<IdentityResolver>,
}

impl SessionContext {
    /// Wire the components over already-built collaborators. `storage` is the
    /// medium shared with other processes of the same origin.
    pub fn with_parts(
        config: Arc<ConfigV1>,
        storage: Arc<dyn SharedStorage>,
        api: Arc<dyn SessionApi>,
    ) -> Self {
        let cache = Arc::new(MeCache::new(api.clone(), config.identity_cache.ttl_seconds));
        let session = Arc::new(SharedSession::new());
        let gate = Arc::new(AutoLoginGate::new(
            api.clone(),
            DisabledFlag::new(storage),
            config.auto_login.enabled,
        ));
        let resolver = Arc::new(IdentityResolver::new(
            cache.clone(),
            api,
            session.clone(),
        ));

        Self {
            config,
            cache,
            session,
            gate,
            resolver,
        }
    }

    /// Boot-time auto-login initializer; only the first eligible call does anything.
    pub async fn boot(&self) -> AutoLoginState {
        self.gate.boot().await
    }

    pub async fn resolve_current_user(&self) -> Result<UserProfile, ApiError> {
        self.resolver.resolve_current_user().await
    }

    pub fn is_auto_login_disabled(&self) -> bool {
        self.gate.is_disabled()
    }

    pub fn clear_auto_login_disabled(&self) -> Result<(), StorageError> {
        self.gate.clear_disabled()
    }

    pub fn invalidate_identity_cache(&self) {
        self.cache.invalidate();
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current_user()
    }
}
