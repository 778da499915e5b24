//! Navigation table for the console and the owner portal
//!
//! Only the parts of routing that matter to the session model live here:
//! which views are public, which audience's login entry point a view falls
//! back to, and which roles may render it.

use crate::types::Role;

/// Who a view is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Back office console (admins and station operators)
    Staff,
    /// EV owner portal
    Portal,
}

/// Every view the front end can navigate to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppRoute {
    StaffLogin,
    PortalLogin,
    AdminDashboard,
    OperatorDashboard,
    Stations,
    StationDetail { id: String },
    Users,
    EvOwners,
    Bookings,
    PortalHome,
    PortalBookings,
    PortalNewBooking,
    NotFound,
}

/// Access rule attached to a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Rendered for anyone
    Public,
    /// A login form; signed-in visitors are sent to their landing page
    LoginEntry(Audience),
    /// Requires a session, and one of `roles` unless the list is empty
    Protected {
        audience: Audience,
        roles: &'static [Role],
    },
}

const ADMIN: &[Role] = &[Role::Admin];
const OPERATOR: &[Role] = &[Role::Operator];
const STAFF: &[Role] = &[Role::Admin, Role::Operator];
const OWNER: &[Role] = &[Role::EvOwner];

impl AppRoute {
    pub fn access(&self) -> RouteAccess {
        use RouteAccess::{LoginEntry, Protected, Public};

        match self {
            Self::StaffLogin => LoginEntry(Audience::Staff),
            Self::PortalLogin => LoginEntry(Audience::Portal),
            Self::AdminDashboard | Self::Users => Protected {
                audience: Audience::Staff,
                roles: ADMIN,
            },
            Self::OperatorDashboard => Protected {
                audience: Audience::Staff,
                roles: OPERATOR,
            },
            Self::Stations | Self::StationDetail { .. } | Self::EvOwners | Self::Bookings => {
                Protected {
                    audience: Audience::Staff,
                    roles: STAFF,
                }
            }
            Self::PortalHome | Self::PortalBookings | Self::PortalNewBooking => Protected {
                audience: Audience::Portal,
                roles: OWNER,
            },
            Self::NotFound => Public,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::StaffLogin => "/login".to_string(),
            Self::PortalLogin => "/portal/login".to_string(),
            Self::AdminDashboard => "/admin".to_string(),
            Self::OperatorDashboard => "/operator".to_string(),
            Self::Stations => "/stations".to_string(),
            Self::StationDetail { id } => format!("/stations/{id}"),
            Self::Users => "/users".to_string(),
            Self::EvOwners => "/owners".to_string(),
            Self::Bookings => "/bookings".to_string(),
            Self::PortalHome => "/portal".to_string(),
            Self::PortalBookings => "/portal/bookings".to_string(),
            Self::PortalNewBooking => "/portal/bookings/new".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Login entry point for an audience
    pub fn login_entry(audience: Audience) -> Self {
        match audience {
            Audience::Staff => Self::StaffLogin,
            Audience::Portal => Self::PortalLogin,
        }
    }

    /// Default authenticated landing page for a role
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Operator => Self::OperatorDashboard,
            Role::EvOwner => Self::PortalHome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_entries_match_audience() {
        assert_eq!(AppRoute::login_entry(Audience::Staff), AppRoute::StaffLogin);
        assert_eq!(AppRoute::login_entry(Audience::Portal), AppRoute::PortalLogin);
        assert_eq!(
            AppRoute::PortalLogin.access(),
            RouteAccess::LoginEntry(Audience::Portal)
        );
    }

    #[test]
    fn test_station_detail_path() {
        let route = AppRoute::StationDetail {
            id: "st-42".to_string(),
        };
        assert_eq!(route.path(), "/stations/st-42");
    }

    #[test]
    fn test_users_view_is_admin_only() {
        match AppRoute::Users.access() {
            RouteAccess::Protected { audience, roles } => {
                assert_eq!(audience, Audience::Staff);
                assert_eq!(roles, &[Role::Admin]);
            }
            other => panic!("unexpected access rule: {other:?}"),
        }
    }
}
