//! EV charging console core types and session rules

pub mod clock;
pub mod envelope;
pub mod guard;
pub mod routes;
pub mod types;

pub use clock::{Clock, SharedClock, SystemClock};
pub use envelope::{ApiEnvelope, EnvelopeError};
pub use guard::{GuardDecision, SessionView};
pub use routes::{AppRoute, Audience, RouteAccess};
pub use types::{CredentialRecord, Role, UserProfile};
