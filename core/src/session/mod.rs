//! Admin session handling: the access gate and the login form

pub mod gate;
pub mod grants;
pub mod login;

pub use gate::{GateOutcome, GateState, SessionGate};
pub use grants::has_admin_grant;
pub use login::{Admitted, LoginError, LoginFlow};
