//! Edge hostnames: the delivery-network names properties are served on.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode_status, link_id, single};
use crate::types::Items;
use crate::validate::{check, one_of, required, required_when, ValidationErrors, Validator};

pub const SECURE_NETWORK_STANDARD_TLS: &str = "STANDARD_TLS";
pub const SECURE_NETWORK_SHARED_CERT: &str = "SHARED_CERT";
pub const SECURE_NETWORK_ENHANCED_TLS: &str = "ENHANCED_TLS";

pub const IP_VERSION_V4: &str = "IPV4";
pub const IP_VERSION_V6_COMPLIANCE: &str = "IPV6_COMPLIANCE";

pub const USE_CASE_GLOBAL: &str = "GLOBAL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub option: String,
    #[serde(rename = "type")]
    pub use_case_type: String,
    pub use_case: String,
}

impl UseCase {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("Option", [required(&self.option)])
            .field(
                "Type",
                [
                    required(&self.use_case_type),
                    one_of(&self.use_case_type, &[USE_CASE_GLOBAL]),
                ],
            )
            .field("UseCase", [required(&self.use_case)])
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHostname {
    #[serde(rename = "edgeHostnameId")]
    pub id: String,
    #[serde(rename = "edgeHostnameDomain", default)]
    pub domain: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub domain_prefix: String,
    #[serde(default)]
    pub domain_suffix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub ip_version_behavior: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_cases: Vec<UseCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEdgeHostnamesResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub edge_hostnames: Items<EdgeHostname>,
}

fn scope_query(contract_id: &str, group_id: &str, options: &[String]) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
        .list("options", options)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEdgeHostnamesRequest {
    pub contract_id: String,
    pub group_id: String,
    pub options: Vec<String>,
}

impl Endpoint for GetEdgeHostnamesRequest {
    type Response = GetEdgeHostnamesResponse;
    const OPERATION: &'static str = "fetching edge hostnames";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/edgehostnames").query(scope_query(
            &self.contract_id,
            &self.group_id,
            &self.options,
        )))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEdgeHostnameRequest {
    pub edge_hostname_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEdgeHostnameResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub edge_hostnames: Items<EdgeHostname>,
    pub edge_hostname: EdgeHostname,
}

impl Endpoint for GetEdgeHostnameRequest {
    type Response = GetEdgeHostnameResponse;
    const OPERATION: &'static str = "fetching edge hostname";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("EdgeHostnameID", [required(&self.edge_hostname_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/edgehostnames/{}", self.edge_hostname_id))
                .query(scope_query(&self.contract_id, &self.group_id, &self.options)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let list: GetEdgeHostnamesResponse = decode_status(Self::OPERATION, &response, 200)?;
        let edge_hostname = single(
            Self::OPERATION,
            &list.edge_hostnames.items,
            format_args!("EdgeHostnameID: {}", self.edge_hostname_id),
        )?;
        Ok(GetEdgeHostnameResponse {
            account_id: list.account_id,
            contract_id: list.contract_id,
            group_id: list.group_id,
            edge_hostnames: list.edge_hostnames,
            edge_hostname,
        })
    }
}

/// Body of an edge hostname creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHostnameCreate {
    pub product_id: String,
    pub domain_prefix: String,
    pub domain_suffix: String,
    #[serde(skip_serializing_if = "crate::types::is_false")]
    pub secure: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secure_network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_number: Option<i64>,
    pub ip_version_behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_enrollment_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub use_cases: Vec<UseCase>,
}

impl EdgeHostnameCreate {
    fn expected_suffix(&self) -> Option<&'static str> {
        match self.secure_network.as_str() {
            SECURE_NETWORK_STANDARD_TLS => Some("edgesuite.net"),
            SECURE_NETWORK_SHARED_CERT => Some("akamaized.net"),
            SECURE_NETWORK_ENHANCED_TLS => Some("edgekey.net"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateEdgeHostnameRequest {
    pub contract_id: String,
    pub group_id: String,
    pub options: Vec<String>,
    pub edge_hostname: EdgeHostnameCreate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEdgeHostnameResponse {
    pub edge_hostname_link: String,
    pub edge_hostname_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgeHostnameLink {
    edge_hostname_link: String,
}

impl Endpoint for CreateEdgeHostnameRequest {
    type Response = CreateEdgeHostnameResponse;
    const OPERATION: &'static str = "creating edge hostname";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let eh = &self.edge_hostname;
        let suffix = eh
            .expected_suffix()
            .map_or(Ok(()), |suffix| check(eh.domain_suffix == suffix, "must be a valid value"));
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("DomainPrefix", [required(&eh.domain_prefix)])
            .field("DomainSuffix", [required(&eh.domain_suffix), suffix])
            .field("ProductID", [required(&eh.product_id)])
            .field(
                "CertEnrollmentID",
                [required_when(
                    eh.secure_network == SECURE_NETWORK_ENHANCED_TLS,
                    &eh.cert_enrollment_id.unwrap_or_default(),
                )],
            )
            .field(
                "IPVersionBehavior",
                [
                    required(&eh.ip_version_behavior),
                    one_of(
                        &eh.ip_version_behavior,
                        &[IP_VERSION_V4, IP_VERSION_V6_COMPLIANCE],
                    ),
                ],
            )
            .field(
                "SecureNetwork",
                [one_of(
                    &eh.secure_network,
                    &[
                        SECURE_NETWORK_STANDARD_TLS,
                        SECURE_NETWORK_SHARED_CERT,
                        SECURE_NETWORK_ENHANCED_TLS,
                    ],
                )],
            )
            .each("UseCases", &eh.use_cases, UseCase::validate)
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post("/papi/v1/edgehostnames")
            .query(scope_query(&self.contract_id, &self.group_id, &self.options))
            .json(Self::OPERATION, &self.edge_hostname)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: EdgeHostnameLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreateEdgeHostnameResponse {
            edge_hostname_id: link_id(Self::OPERATION, &body.edge_hostname_link)?,
            edge_hostname_link: body.edge_hostname_link,
        })
    }
}
