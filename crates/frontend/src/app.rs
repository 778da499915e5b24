use crate::pages::{
    BookingsPage, DashboardPage, LoginPage, MyBookingsPage, NewBookingPage, NotFoundPage,
    OwnersPage, PortalHomePage, StationDetailPage, StationsPage, UsersPage,
};
use evcharge_core::{AppRoute, Audience};
use evcharge_frontend_common::{AuthProvider, Guarded, Route};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <Switch<Route> render={switch} />
            </AuthProvider>
        </BrowserRouter>
    }
}

/// Every view is rendered behind the guards of its route
fn switch(route: Route) -> Html {
    let guarded_as = AppRoute::from(route.clone());

    let page = match route {
        Route::Root => html! { <Redirect<Route> to={Route::StaffLogin} /> },
        Route::StaffLogin => html! { <LoginPage audience={Audience::Staff} /> },
        Route::PortalLogin => html! { <LoginPage audience={Audience::Portal} /> },
        Route::AdminDashboard | Route::OperatorDashboard => html! { <DashboardPage /> },
        Route::Stations => html! { <StationsPage /> },
        Route::StationDetail { id } => html! { <StationDetailPage {id} /> },
        Route::Users => html! { <UsersPage /> },
        Route::EvOwners => html! { <OwnersPage /> },
        Route::Bookings => html! { <BookingsPage /> },
        Route::PortalHome => html! { <PortalHomePage /> },
        Route::PortalBookings => html! { <MyBookingsPage /> },
        Route::PortalNewBooking => html! { <NewBookingPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <Guarded route={guarded_as}>
            {page}
        </Guarded>
    }
}
