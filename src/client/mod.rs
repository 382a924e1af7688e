pub mod api;
pub mod http_api;

// Re-export the primary client items so code outside can do
// "use crate::client::{SessionApi, ApiError};"
pub use api::{ApiError, SessionApi, AUTO_LOGIN_PATH, WHOAMI_PATH};
pub use http_api::HttpSessionApi;
