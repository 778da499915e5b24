//! Router paths for the single-page application

use evcharge_core::AppRoute;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    StaffLogin,
    #[at("/portal/login")]
    PortalLogin,
    #[at("/admin")]
    AdminDashboard,
    #[at("/operator")]
    OperatorDashboard,
    #[at("/stations")]
    Stations,
    #[at("/stations/:id")]
    StationDetail { id: String },
    #[at("/users")]
    Users,
    #[at("/owners")]
    EvOwners,
    #[at("/bookings")]
    Bookings,
    #[at("/portal")]
    PortalHome,
    #[at("/portal/bookings")]
    PortalBookings,
    #[at("/portal/bookings/new")]
    PortalNewBooking,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::StaffLogin => Self::StaffLogin,
            AppRoute::PortalLogin => Self::PortalLogin,
            AppRoute::AdminDashboard => Self::AdminDashboard,
            AppRoute::OperatorDashboard => Self::OperatorDashboard,
            AppRoute::Stations => Self::Stations,
            AppRoute::StationDetail { id } => Self::StationDetail { id },
            AppRoute::Users => Self::Users,
            AppRoute::EvOwners => Self::EvOwners,
            AppRoute::Bookings => Self::Bookings,
            AppRoute::PortalHome => Self::PortalHome,
            AppRoute::PortalBookings => Self::PortalBookings,
            AppRoute::PortalNewBooking => Self::PortalNewBooking,
            AppRoute::NotFound => Self::NotFound,
        }
    }
}

impl From<Route> for AppRoute {
    /// The bare root behaves like the staff login entry
    fn from(route: Route) -> Self {
        match route {
            Route::Root | Route::StaffLogin => Self::StaffLogin,
            Route::PortalLogin => Self::PortalLogin,
            Route::AdminDashboard => Self::AdminDashboard,
            Route::OperatorDashboard => Self::OperatorDashboard,
            Route::Stations => Self::Stations,
            Route::StationDetail { id } => Self::StationDetail { id },
            Route::Users => Self::Users,
            Route::EvOwners => Self::EvOwners,
            Route::Bookings => Self::Bookings,
            Route::PortalHome => Self::PortalHome,
            Route::PortalBookings => Self::PortalBookings,
            Route::PortalNewBooking => Self::PortalNewBooking,
            Route::NotFound => Self::NotFound,
        }
    }
}
