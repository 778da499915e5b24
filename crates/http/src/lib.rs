//! EV charging backend client
//!
//! Credential storage, the authenticated request pipeline with single-flight
//! token refresh, proactive session renewal and the domain services built
//! on top of them. Compiles natively and for `wasm32`.

pub mod client;
pub mod config;
pub mod services;
pub mod session;
pub mod store;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest, ClientError, SessionEvent};
pub use config::ClientConfig;
pub use session::{CheckTrigger, SessionCheck, SessionController};
pub use store::{CredentialStorage, MemoryStorage, StorageError, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use session::SessionTimer;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStorage;
