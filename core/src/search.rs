//! Property version search by name or hostname.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::response::decode_status;
use crate::types::{Items, VersionStatus};
use crate::validate::{required, ValidationErrors, Validator};

/// What the search value is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKey {
    PropertyName,
    Hostname,
    EdgeHostname,
}

impl SearchKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKey::PropertyName => "propertyName",
            SearchKey::Hostname => "hostname",
            SearchKey::EdgeHostname => "edgeHostname",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub key: SearchKey,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub edge_hostname: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<VersionStatus>,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub property_version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_status: Option<VersionStatus>,
    #[serde(default)]
    pub updated_by_user: String,
    #[serde(default)]
    pub updated_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub versions: Items<SearchItem>,
}

impl Endpoint for SearchRequest {
    type Response = SearchResponse;
    const OPERATION: &'static str = "searching properties";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("Value", [required(&self.value)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        let body = serde_json::json!({ self.key.as_str(): self.value });
        RequestParts::post("/papi/v1/search/find-by-value").json(Self::OPERATION, &body)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
