//! Charging station management

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::types::{AvailabilitySlot, Station, StationRequest};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct StationService {
    client: ApiClient,
}

impl StationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List stations, optionally only the active ones
    pub async fn list(&self, active_only: bool) -> Result<Vec<Station>, ClientError> {
        let mut request = ApiRequest::get("/api/stations");
        if active_only {
            request = request.query("active", true);
        }
        self.client.call(&request).await
    }

    pub async fn get(&self, id: &str) -> Result<Station, ClientError> {
        self.client
            .call(&ApiRequest::get("/api/stations").segment(id))
            .await
    }

    pub async fn create(&self, station: &StationRequest) -> Result<Station, ClientError> {
        let request = ApiRequest::post("/api/stations").json(station)?;
        self.client.call(&request).await
    }

    pub async fn update(&self, id: &str, station: &StationRequest) -> Result<Station, ClientError> {
        let request = ApiRequest::put("/api/stations").segment(id).json(station)?;
        self.client.call(&request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.client
            .call_unit(&ApiRequest::delete("/api/stations").segment(id))
            .await
    }

    pub async fn activate(&self, id: &str) -> Result<Station, ClientError> {
        self.client
            .call(&ApiRequest::patch("/api/stations").segment(id).segment("activate"))
            .await
    }

    /// Deactivation is refused by the backend while bookings are pending
    pub async fn deactivate(&self, id: &str) -> Result<Station, ClientError> {
        self.client
            .call(&ApiRequest::patch("/api/stations").segment(id).segment("deactivate"))
            .await
    }

    /// Bookable windows for a day, as computed by the backend
    pub async fn availability(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilitySlot>, ClientError> {
        let request = ApiRequest::get("/api/stations")
            .segment(id)
            .segment("availability")
            .query("date", date.format("%Y-%m-%d"));
        self.client.call(&request).await
    }
}
