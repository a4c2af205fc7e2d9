//! The per-operation contract.
//!
//! Each API operation is a request type implementing [`Endpoint`]: it
//! validates itself, describes the HTTP request it needs, and interprets the
//! response. `PapiClient` supplies everything shared (base URL, headers,
//! logging), so an implementation only holds what is specific to its
//! endpoint.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpResponse};
use crate::query::Query;
use crate::validate::ValidationErrors;

pub trait Endpoint {
    type Response;

    /// Phrase prefixed to every error, e.g. `"fetching activation"`.
    const OPERATION: &'static str;

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Ok(())
    }

    fn request(&self) -> Result<RequestParts>;

    fn response(&self, response: HttpResponse) -> Result<Self::Response>;
}

/// Endpoint-specific part of a request; the client adds base URL and
/// common headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParts {
    pub method: HttpMethod,
    pub path: String,
    pub query: Query,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestParts {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, op: &'static str, body: &T) -> Result<Self> {
        let body = serde_json::to_string(body).map_err(|source| Error::Encode { op, source })?;
        self.body = Some(body);
        Ok(self)
    }
}
