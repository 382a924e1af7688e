//! Application startup.
//!
//! Builds the session context from configuration and runs the boot sequence:
//! the auto-login gate and the identity resolver side by side.

use std::sync::Arc;

use tracing::{info, warn};

use crate::autologin::AutoLoginState;
use crate::client::{ApiError, HttpSessionApi};
use crate::config::ConfigV1;
use crate::models::UserProfile;
use crate::state::SessionContext;
use crate::storage::create_storage;

/// What the boot sequence ended with.
#[derive(Debug, Clone)]
pub struct BootReport {
    pub auto_login: AutoLoginState,
    /// `None` when the process stays unauthenticated.
    pub user: Option<UserProfile>,
}

/// Creates the storage, HTTP client and components described by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_context(config: Arc<ConfigV1>) -> Result<SessionContext, ApiError> {
    let storage = create_storage(&config.storage);
    let api = Arc::new(HttpSessionApi::new(&config.api)?);
    Ok(SessionContext::with_parts(config, storage, api))
}

/// Runs the boot sequence on an existing context.
///
/// The gate and the resolver run concurrently and never wait on each other.
/// When auto-login succeeded but the concurrent lookup came back empty, one
/// refresh is issued so the freshly established session is picked up.
pub async fn boot(ctx: &SessionContext) -> BootReport {
    let (auto_login, resolved) = futures::join!(ctx.boot(), ctx.resolve_current_user());

    let resolved = match resolved {
        Err(_) if auto_login == AutoLoginState::Succeeded => {
            info!("Auto-login succeeded; refreshing current user");
            ctx.invalidate_identity_cache();
            ctx.resolve_current_user().await
        }
        other => other,
    };

    let user = match resolved {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Continuing unauthenticated: {}", e);
            None
        }
    };

    BootReport { auto_login, user }
}

/// Builds the context from `config` and runs the boot sequence once.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub async fn run(config: Arc<ConfigV1>) -> Result<BootReport, ApiError> {
    let ctx = build_context(config)?;
    info!("Bootstrapping session against {}", ctx.config.api.base_url);
    Ok(boot(&ctx).await)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::client::{SessionApi, WHOAMI_PATH};
    use crate::config::load_config_from_str;
    use crate::storage::MemoryStorage;
    use crate::test_support::{profile, status_error};

    /// Backend where whoami only succeeds once auto-login has opened a session.
    /// Auto-login yields first, so the concurrent lookup always runs before it.
    struct SessionBackend {
        logged_in: AtomicBool,
        whoami_calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionApi for SessionBackend {
        async fn auto_login(&self) -> Result<(), ApiError> {
            tokio::task::yield_now().await;
            self.logged_in.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn whoami(&self) -> Result<UserProfile, ApiError> {
            self.whoami_calls.fetch_add(1, Ordering::SeqCst);
            if self.logged_in.load(Ordering::SeqCst) {
                Ok(profile("langflow"))
            } else {
                Err(status_error(WHOAMI_PATH, 401))
            }
        }
    }

    fn context(api: Arc<SessionBackend>, auto_login: bool) -> SessionContext {
        let config = load_config_from_str(&format!(
            r#"
version: "1.0.0"
api:
  base_url: "http://backend/api"
auto_login:
  enabled: {}
"#,
            auto_login
        ))
        .unwrap();
        SessionContext::with_parts(Arc::new(config), Arc::new(MemoryStorage::new()), api)
    }

    fn backend() -> Arc<SessionBackend> {
        Arc::new(SessionBackend {
            logged_in: AtomicBool::new(false),
            whoami_calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_boot_refreshes_after_successful_auto_login() {
        let api = backend();
        let ctx = context(api.clone(), true);

        let report = boot(&ctx).await;

        assert_eq!(report.auto_login, AutoLoginState::Succeeded);
        assert_eq!(report.user, Some(profile("langflow")));
        assert_eq!(ctx.current_user(), Some(profile("langflow")));
        // Cache fetch and fallback both answered 401, then one refresh.
        assert_eq!(api.whoami_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_boot_without_auto_login_does_not_refresh() {
        let api = backend();
        let ctx = context(api.clone(), false);

        let report = boot(&ctx).await;

        assert_eq!(report.auto_login, AutoLoginState::Skipped);
        assert!(report.user.is_none());
        assert!(ctx.current_user().is_none());
        assert_eq!(api.whoami_calls.load(Ordering::SeqCst), 2);
    }
}
