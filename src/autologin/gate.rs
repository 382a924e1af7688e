use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::flag::DisabledFlag;
use crate::client::SessionApi;
use crate::storage::StorageError;

/// Answers proving the endpoint or feature is categorically absent.
/// Anything else (401, 5xx, transport failures) leaves future attempts allowed.
pub const PERMANENT_DISABLE_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
];

/// Where this process stands with its single auto-login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoLoginState {
    NotAttempted,
    /// Feature toggle off, or the persisted flag was already set at boot.
    Skipped,
    InFlight,
    Succeeded,
    FailedTransient,
    PermanentlyDisabled,
}

/// Runs the zero-interaction login at most once per process and remembers,
/// across processes, when the server says the feature does not exist.
pub struct AutoLoginGate {
    api: Arc<dyn SessionApi>,
    flag: DisabledFlag,
    enabled: bool,
    attempted: AtomicBool,
    state: Mutex<AutoLoginState>,
}

impl AutoLoginGate {
    pub fn new(api: Arc<dyn SessionApi>, flag: DisabledFlag, enabled: bool) -> Self {
        Self {
            api,
            flag,
            enabled,
            attempted: AtomicBool::new(false),
            state: Mutex::new(AutoLoginState::NotAttempted),
        }
    }

    pub fn state(&self) -> AutoLoginState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: AutoLoginState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Moves `NotAttempted` to `Skipped`; any later state is kept.
    /// Fires the latch, so a skipped process stays inert even if the flag
    /// is cleared or the boot runs again.
    fn skip(&self) -> AutoLoginState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.attempted.store(true, Ordering::SeqCst);
        if *state == AutoLoginState::NotAttempted {
            *state = AutoLoginState::Skipped;
        }
        *state
    }

    pub fn is_disabled(&self) -> bool {
        self.flag.is_disabled()
    }

    /// Removes the persisted opt-out. The in-process latch stays fired.
    pub fn clear_disabled(&self) -> Result<(), StorageError> {
        self.flag.clear()
    }

    /// Boot-time initializer. Safe to call any number of times; only the first
    /// eligible call reaches the network. Never fails: every outcome is a state.
    pub async fn boot(&self) -> AutoLoginState {
        if self.flag.is_disabled() {
            info!(
                event_name = "autologin.skipped",
                event_domain = "autologin",
                reason = "disabled_flag",
                "Auto-login disabled - skipping initialization"
            );
            return self.skip();
        }

        if !self.enabled {
            debug!(
                event_name = "autologin.skipped",
                event_domain = "autologin",
                reason = "feature_toggle",
                "Auto-login feature toggle is off"
            );
            return self.skip();
        }

        if self.attempted.swap(true, Ordering::SeqCst) {
            debug!("Auto-login already attempted in this process");
            return self.state();
        }

        self.set_state(AutoLoginState::InFlight);
        debug!(
            event_name = "autologin.attempt",
            event_domain = "autologin",
            "Attempting auto-login"
        );

        let outcome = match self.api.auto_login().await {
            Ok(()) => {
                info!(
                    event_name = "autologin.succeeded",
                    event_domain = "autologin",
                    "Auto-login established a session"
                );
                AutoLoginState::Succeeded
            }
            Err(e) => match e.status() {
                Some(status) if PERMANENT_DISABLE_STATUSES.contains(&status) => {
                    warn!(
                        event_name = "autologin.disabled",
                        event_domain = "autologin",
                        status = status.as_u16(),
                        "Auto-login unsupported by server; disabling for all processes"
                    );
                    if let Err(storage_err) = self.flag.disable() {
                        warn!("Could not persist auto-login disabled flag: {}", storage_err);
                    }
                    AutoLoginState::PermanentlyDisabled
                }
                _ => {
                    info!(
                        event_name = "autologin.failed",
                        event_domain = "autologin",
                        error = %e,
                        "Auto-login failed; continuing unauthenticated"
                    );
                    AutoLoginState::FailedTransient
                }
            },
        };

        self.set_state(outcome);
        outcome
    }
}
