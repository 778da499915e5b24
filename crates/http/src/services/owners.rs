//! EV owner accounts

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::types::{EvOwner, EvOwnerRequest};

#[derive(Clone)]
pub struct EvOwnerService {
    client: ApiClient,
}

impl EvOwnerService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<EvOwner>, ClientError> {
        self.client.call(&ApiRequest::get("/api/evowners")).await
    }

    pub async fn get(&self, nic: &str) -> Result<EvOwner, ClientError> {
        self.client
            .call(&ApiRequest::get("/api/evowners").segment(nic))
            .await
    }

    pub async fn create(&self, owner: &EvOwnerRequest) -> Result<EvOwner, ClientError> {
        let request = ApiRequest::post("/api/evowners").json(owner)?;
        self.client.call(&request).await
    }

    pub async fn update(&self, nic: &str, owner: &EvOwnerRequest) -> Result<EvOwner, ClientError> {
        let request = ApiRequest::put("/api/evowners").segment(nic).json(owner)?;
        self.client.call(&request).await
    }

    pub async fn delete(&self, nic: &str) -> Result<(), ClientError> {
        self.client
            .call_unit(&ApiRequest::delete("/api/evowners").segment(nic))
            .await
    }

    pub async fn set_active(&self, nic: &str, active: bool) -> Result<EvOwner, ClientError> {
        let action = if active { "activate" } else { "deactivate" };
        self.client
            .call(&ApiRequest::patch("/api/evowners").segment(nic).segment(action))
            .await
    }
}
