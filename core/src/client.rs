//! Stateless request builder and response parser for the PAPI API.
//!
//! # Design
//! `PapiClient` holds only its [`ClientConfig`]. Each operation is split
//! into [`PapiClient::build`] (validate, then produce an `HttpRequest`) and
//! [`PapiClient::parse`] (consume the `HttpResponse`), so the I/O boundary
//! is explicit. [`PapiClient::execute`] runs both around a [`Transport`].

use tracing::field;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};

const USE_PREFIXES_HEADER: &str = "PAPI-Use-Prefixes";

#[derive(Debug, Clone)]
pub struct PapiClient {
    config: ClientConfig,
}

impl PapiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate `endpoint` and describe the HTTP request it needs.
    pub fn build<E: Endpoint>(&self, endpoint: &E) -> Result<HttpRequest> {
        if let Err(source) = endpoint.validate() {
            tracing::debug!(operation = E::OPERATION, errors = %source, "request failed validation");
            return Err(Error::Validation {
                op: E::OPERATION,
                source,
            });
        }

        let parts = endpoint.request()?;

        let mut path = format!("{}{}", self.config.base_url(), parts.path);
        if !parts.query.is_empty() {
            path.push('?');
            path.push_str(&parts.query.encode());
        }

        let mut headers = vec![(
            USE_PREFIXES_HEADER.to_string(),
            self.config.use_prefixes.to_string(),
        )];
        headers.extend(parts.headers);
        if parts.body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method: parts.method,
            path,
            headers,
            body: parts.body,
        })
    }

    pub fn parse<E: Endpoint>(&self, endpoint: &E, response: HttpResponse) -> Result<E::Response> {
        endpoint.response(response)
    }

    /// Build, send through `transport`, and parse.
    pub fn execute<E, T>(&self, transport: &T, endpoint: &E) -> Result<E::Response>
    where
        E: Endpoint,
        T: Transport + ?Sized,
    {
        let request = self.build(endpoint)?;

        let span = tracing::info_span!(
            "papi_request",
            operation = E::OPERATION,
            http.method = %request.method,
            http.url = %request.path,
            http.status_code = field::Empty,
        );
        let _guard = span.enter();

        let response = transport.execute(&request).map_err(|source| {
            tracing::warn!(error = %source, "transport failed");
            Error::Transport {
                op: E::OPERATION,
                source,
            }
        })?;
        span.record("http.status_code", response.status);
        tracing::debug!("response received");

        self.parse(endpoint, response)
    }
}
