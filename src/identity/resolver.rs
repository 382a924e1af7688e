use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session::SessionStore;
use crate::cache::ProfileCache;
use crate::client::{ApiError, SessionApi};
use crate::models::UserProfile;

/// Answers "who is the current user", cache first, then the who-am-i endpoint.
pub struct IdentityResolver {
    cache: Arc<dyn ProfileCache>,
    api: Arc<dyn SessionApi>,
    session: Arc<dyn SessionStore>,
}

impl IdentityResolver {
    pub fn new(
        cache: Arc<dyn ProfileCache>,
        api: Arc<dyn SessionApi>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            cache,
            api,
            session,
        }
    }

    /// Resolves the current user in two sequential stages:
    /// 1) the profile cache; any failure there is swallowed,
    /// 2) exactly one direct who-am-i call, whose error is returned unchanged.
    ///
    /// The session store is updated before this returns, and only on success.
    pub async fn resolve_current_user(&self) -> Result<UserProfile, ApiError> {
        let user = match self.cache.get_cached_or_fresh_profile().await {
            Ok(user) => user,
            Err(e) => {
                debug!(
                    event_name = "identity.fallback",
                    event_domain = "identity",
                    error = %e,
                    "identity cache failed; asking the server directly"
                );
                match self.api.whoami().await {
                    Ok(user) => user,
                    Err(e) => {
                        warn!(
                            event_name = "identity.unresolved",
                            event_domain = "identity",
                            error = %e,
                            "could not resolve current user"
                        );
                        return Err(e);
                    }
                }
            }
        };

        self.session.set_current_user(user.clone());
        info!(
            event_name = "identity.resolved",
            event_domain = "identity",
            username = user.username.as_str(),
            "current user resolved"
        );
        Ok(user)
    }
}
