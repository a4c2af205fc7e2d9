//! Hostnames attached to a property version.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::decode_status;
use crate::types::{CertType, HostnameCnameType, Items};
use crate::validate::{required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostname {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_type: Option<HostnameCnameType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub edge_hostname_id: String,
    #[serde(default)]
    pub cname_from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cname_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_provisioning_type: Option<CertType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_status: Option<CertStatusItem>,
}

/// Certificate state of a hostname on each network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertStatusItem {
    #[serde(default)]
    pub validation_cname: ValidationCname,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staging: Vec<StatusItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub production: Vec<StatusItem>,
}

/// The CNAME record used to prove control of the certificate's domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCname {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersionHostnames {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_version: i64,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub hostnames: Items<Hostname>,
}

pub type GetPropertyVersionHostnamesResponse = PropertyVersionHostnames;
pub type UpdatePropertyVersionHostnamesResponse = PropertyVersionHostnames;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyVersionHostnamesRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
    pub validate_hostnames: bool,
    pub include_cert_status: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePropertyVersionHostnamesRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
    pub validate_hostnames: bool,
    pub include_cert_status: bool,
    pub hostnames: Vec<Hostname>,
}

fn hostnames_path(property_id: &str, version: i64) -> String {
    format!("/papi/v1/properties/{property_id}/versions/{version}/hostnames")
}

// Both flags are sent on every call, including when false.
fn hostnames_query(contract_id: &str, group_id: &str, validate: bool, cert_status: bool) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
        .flag("validateHostnames", validate)
        .flag("includeCertStatus", cert_status)
}

impl Endpoint for GetPropertyVersionHostnamesRequest {
    type Response = GetPropertyVersionHostnamesResponse;
    const OPERATION: &'static str = "fetching hostnames";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(hostnames_path(&self.property_id, self.property_version)).query(
                hostnames_query(
                    &self.contract_id,
                    &self.group_id,
                    self.validate_hostnames,
                    self.include_cert_status,
                ),
            ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

impl Endpoint for UpdatePropertyVersionHostnamesRequest {
    type Response = UpdatePropertyVersionHostnamesResponse;
    const OPERATION: &'static str = "updating hostnames";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::put(hostnames_path(&self.property_id, self.property_version))
            .query(hostnames_query(
                &self.contract_id,
                &self.group_id,
                self.validate_hostnames,
                self.include_cert_status,
            ))
            .json(Self::OPERATION, &self.hostnames)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
