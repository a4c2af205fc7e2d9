//! Synchronous client core for the Property Manager (PAPI) API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip through a [`Transport`], which keeps the core
//! deterministic and testable.
//!
//! # Design
//! - Every operation is a request type implementing [`Endpoint`]: it
//!   validates itself, describes its request, and interprets the response.
//! - [`PapiClient`] is stateless apart from its [`ClientConfig`].
//!   `build` validates and produces the request; `parse` consumes the
//!   response. [`Papi`] wraps both around a transport and names every
//!   operation.
//! - Every failure is an [`Error`] tagged with the operation phrase, so
//!   callers can branch on [`Error::category`] or match variants.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod activations;
pub mod active_hostnames;
pub mod client;
pub mod client_settings;
pub mod compliance;
pub mod config;
pub mod contracts;
pub mod cpcodes;
pub mod edge_hostnames;
pub mod endpoint;
pub mod error;
pub mod groups;
pub mod hostname_activations;
pub mod hostname_buckets;
pub mod http;
pub mod include_activations;
pub mod include_versions;
pub mod includes;
pub mod link;
pub mod papi;
pub mod products;
pub mod properties;
pub mod property_versions;
pub mod query;
mod response;
pub mod rule_formats;
pub mod rule_trees;
pub mod search;
pub mod types;
pub mod validate;
pub mod version_hostnames;

#[cfg(test)]
mod test_support;

pub use client::PapiClient;
pub use compliance::ComplianceRecord;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, RequestParts};
pub use error::{ActivationError, ApiError, Error, ErrorCategory, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use link::LinkError;
pub use papi::Papi;
pub use types::{
    ActivationNetwork, ActivationStatus, ActivationType, CertType, HostnameCnameType, IncludeType,
    Items, Page, SortOrder, VersionStatus,
};
pub use validate::ValidationErrors;
