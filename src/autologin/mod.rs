pub mod flag;
pub mod gate;

pub use flag::{DisabledFlag, AUTO_LOGIN_DISABLED_KEY};
pub use gate::{AutoLoginGate, AutoLoginState, PERMANENT_DISABLE_STATUSES};
