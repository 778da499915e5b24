//! Reservation workflow

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::types::{Booking, BookingFilter, CreateBookingRequest, UpdateBookingRequest};

#[derive(Clone)]
pub struct BookingService {
    client: ApiClient,
}

impl BookingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ClientError> {
        let request = ApiRequest::get("/api/bookings")
            .query_opt("status", filter.status)
            .query_opt("stationId", filter.station_id.as_deref());
        self.client.call(&request).await
    }

    /// Bookings belonging to one EV owner
    pub async fn for_owner(&self, nic: &str) -> Result<Vec<Booking>, ClientError> {
        self.client
            .call(&ApiRequest::get("/api/bookings/owner").segment(nic))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Booking, ClientError> {
        self.client
            .call(&ApiRequest::get("/api/bookings").segment(id))
            .await
    }

    /// Availability and reservation windows are validated by the backend
    pub async fn create(&self, booking: &CreateBookingRequest) -> Result<Booking, ClientError> {
        let request = ApiRequest::post("/api/bookings").json(booking)?;
        self.client.call(&request).await
    }

    pub async fn update(
        &self,
        id: &str,
        changes: &UpdateBookingRequest,
    ) -> Result<Booking, ClientError> {
        let request = ApiRequest::put("/api/bookings").segment(id).json(changes)?;
        self.client.call(&request).await
    }

    pub async fn approve(&self, id: &str) -> Result<Booking, ClientError> {
        self.transition(id, "approve").await
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking, ClientError> {
        self.transition(id, "cancel").await
    }

    pub async fn complete(&self, id: &str) -> Result<Booking, ClientError> {
        self.transition(id, "complete").await
    }

    async fn transition(&self, id: &str, action: &str) -> Result<Booking, ClientError> {
        self.client
            .call(&ApiRequest::patch("/api/bookings").segment(id).segment(action))
            .await
    }
}
