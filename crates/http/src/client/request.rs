//! Replayable request description

use super::ClientError;
use reqwest::{Method, Url};
use serde::Serialize;

/// Owned description of a backend call.
///
/// Unlike a `reqwest::RequestBuilder` it can be rebuilt any number of times,
/// which is what lets a request be replayed with a refreshed token.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one path segment, such as an identifier; it is percent-encoded
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn build(
        &self,
        client: &reqwest::Client,
        base_url: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let mut url = Url::parse(&format!("{}{}", base_url, self.path))
            .map_err(|err| ClientError::Configuration(format!("Invalid request URL: {err}")))?;
        if !self.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| ClientError::Configuration("Base URL cannot carry a path".into()))?
                .pop_if_empty()
                .extend(&self.segments);
        }

        let mut builder = client.request(self.method.clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        Ok(builder)
    }
}
