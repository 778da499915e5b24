//! Authentication module

pub mod context;
pub mod guard;
pub mod keepalive;

pub use context::{AuthAction, AuthContext, AuthProvider, AuthState, use_auth, use_current_user};
pub use guard::Guarded;
pub use keepalive::use_session_keepalive;
