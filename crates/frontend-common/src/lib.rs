//! Yew building blocks shared by the console and the owner portal

pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod routes;
pub mod storage;

pub use auth::{AuthContext, AuthProvider, Guarded, use_auth};
pub use client::{api_client, describe_error};
pub use components::{Alert, AlertKind, Spinner};
pub use config::AuthConfig;
pub use routes::Route;
pub use storage::BrowserStorage;
