//! Hand-written fakes for the collaborator traits, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::cache::{CacheError, ProfileCache};
use crate::client::{ApiError, SessionApi, AUTO_LOGIN_PATH, WHOAMI_PATH};
use crate::models::UserProfile;

pub(crate) fn status_error(path: &str, status: u16) -> ApiError {
    ApiError::Status {
        url: format!("http://backend{}", path),
        status: StatusCode::from_u16(status).expect("valid status code"),
    }
}

pub(crate) fn timeout_error(path: &str) -> ApiError {
    ApiError::Transport {
        url: format!("http://backend{}", path),
        message: "operation timed out".to_string(),
    }
}

pub(crate) fn profile(username: &str) -> UserProfile {
    UserProfile::new(format!("id-{}", username), username)
}

/// A `SessionApi` answering from canned results and counting calls.
pub(crate) struct FakeApi {
    auto_login_result: Mutex<Result<(), ApiError>>,
    whoami_result: Mutex<Result<UserProfile, ApiError>>,
    auto_login_calls: AtomicUsize,
    whoami_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            auto_login_result: Mutex::new(Ok(())),
            whoami_result: Mutex::new(Err(status_error(WHOAMI_PATH, 401))),
            auto_login_calls: AtomicUsize::new(0),
            whoami_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_auto_login(self, result: Result<(), ApiError>) -> Self {
        *self.auto_login_result.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_auto_login_status(self, status: u16) -> Self {
        self.with_auto_login(Err(status_error(AUTO_LOGIN_PATH, status)))
    }

    pub(crate) fn with_whoami(self, result: Result<UserProfile, ApiError>) -> Self {
        self.set_whoami(result);
        self
    }

    pub(crate) fn set_whoami(&self, result: Result<UserProfile, ApiError>) {
        *self.whoami_result.lock().unwrap() = result;
    }

    pub(crate) fn auto_login_calls(&self) -> usize {
        self.auto_login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn whoami_calls(&self) -> usize {
        self.whoami_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionApi for FakeApi {
    async fn auto_login(&self) -> Result<(), ApiError> {
        self.auto_login_calls.fetch_add(1, Ordering::SeqCst);
        // Let a concurrently polled boot observe the in-flight state.
        tokio::task::yield_now().await;
        self.auto_login_result.lock().unwrap().clone()
    }

    async fn whoami(&self) -> Result<UserProfile, ApiError> {
        self.whoami_calls.fetch_add(1, Ordering::SeqCst);
        self.whoami_result.lock().unwrap().clone()
    }
}

/// A `ProfileCache` answering from a canned result.
pub(crate) struct FakeCache {
    result: Mutex<Result<UserProfile, CacheError>>,
    calls: AtomicUsize,
}

impl FakeCache {
    pub(crate) fn hit(user: UserProfile) -> Self {
        Self {
            result: Mutex::new(Ok(user)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(error: CacheError) -> Self {
        Self {
            result: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileCache for FakeCache {
    async fn get_cached_or_fresh_profile(&self) -> Result<UserProfile, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }

    fn invalidate(&self) {}
}
