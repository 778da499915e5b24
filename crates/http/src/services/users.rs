//! Back office account management

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::types::{CreateUserRequest, StaffUser, UpdateUserRequest};

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<StaffUser>, ClientError> {
        self.client.call(&ApiRequest::get("/api/users")).await
    }

    pub async fn get(&self, id: &str) -> Result<StaffUser, ClientError> {
        self.client
            .call(&ApiRequest::get("/api/users").segment(id))
            .await
    }

    pub async fn create(&self, user: &CreateUserRequest) -> Result<StaffUser, ClientError> {
        let request = ApiRequest::post("/api/users").json(user)?;
        self.client.call(&request).await
    }

    pub async fn update(
        &self,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> Result<StaffUser, ClientError> {
        let request = ApiRequest::put("/api/users").segment(id).json(changes)?;
        self.client.call(&request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.client
            .call_unit(&ApiRequest::delete("/api/users").segment(id))
            .await
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<StaffUser, ClientError> {
        let action = if active { "activate" } else { "deactivate" };
        self.client
            .call(&ApiRequest::patch("/api/users").segment(id).segment(action))
            .await
    }
}
