mod bookings;
mod dashboard;
mod login;
mod not_found;
mod owners;
mod portal;
mod stations;
mod users;

pub use bookings::BookingsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use owners::OwnersPage;
pub use portal::{MyBookingsPage, NewBookingPage, PortalHomePage};
pub use stations::{StationDetailPage, StationsPage};
pub use users::UsersPage;
