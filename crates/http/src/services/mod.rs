//! Domain services over the shared client
//!
//! Each service is a thin, cloneable handle that maps one backend resource
//! onto typed calls. Envelope checks and 401 recovery happen in the client.

pub mod bookings;
pub mod dashboard;
pub mod owners;
pub mod stations;
pub mod users;

pub use bookings::BookingService;
pub use dashboard::DashboardService;
pub use owners::EvOwnerService;
pub use stations::StationService;
pub use users::UserService;
