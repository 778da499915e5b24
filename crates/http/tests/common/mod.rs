#![allow(dead_code)]

use chrono::{DateTime, Utc};
use evcharge_core::{CredentialRecord, Role, UserProfile};
use serde_json::{Value, json};

pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn operator() -> UserProfile {
    UserProfile {
        id: "u-7".into(),
        name: "Nimal Perera".into(),
        email: Some("nimal@example.com".into()),
        role: Role::Operator,
    }
}

pub fn record(access: &str, refresh: &str, expires_at: &str) -> CredentialRecord {
    CredentialRecord {
        access_token: access.into(),
        refresh_token: refresh.into(),
        expires_at: at(expires_at),
        user: operator(),
    }
}

/// Successful envelope around `data`
pub fn ok(data: Value) -> Value {
    json!({ "Success": true, "Data": data, "Message": null })
}

pub fn rejected(message: &str) -> Value {
    json!({ "Success": false, "Data": null, "Message": message })
}

/// Wire form of a credential record
pub fn credentials(access: &str, refresh: &str, expires_at: &str) -> Value {
    serde_json::to_value(record(access, refresh, expires_at)).unwrap()
}
