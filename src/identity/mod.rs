pub mod resolver;
pub mod session;

pub use resolver::IdentityResolver;
pub use session::{SessionStore, SharedSession};
