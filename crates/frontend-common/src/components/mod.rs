mod alert;
mod spinner;

pub use alert::{Alert, AlertKind};
pub use spinner::LoadingSpinner as Spinner;
