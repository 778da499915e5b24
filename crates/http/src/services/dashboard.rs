use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::types::DashboardStats;

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ClientError> {
        self.client.call(&ApiRequest::get("/api/dashboard/stats")).await
    }
}
