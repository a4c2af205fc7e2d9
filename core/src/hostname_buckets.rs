//! Hostname buckets: adding and removing property hostnames outside of
//! property versions. Each patch starts a hostname activation.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::decode_status;
use crate::types::{ActivationNetwork, CertType, HostnameCnameType};
use crate::validate::{check, required, ValidationErrors, Validator};
use crate::version_hostnames::CertStatusItem;

pub const HOSTNAME_REQUIRED: &str = "at least one hostname is required in add or remove list";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchPropertyHostnameBucketRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub body: PatchPropertyHostnameBucketBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPropertyHostnameBucketBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<PatchPropertyHostnameBucketAdd>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
    pub network: Option<ActivationNetwork>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notify_emails: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl PatchPropertyHostnameBucketBody {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("Network", [required(&self.network)])
            .each("Add", &self.add, PatchPropertyHostnameBucketAdd::validate)
            .rule(check(
                !(self.add.is_empty() && self.remove.is_empty()),
                HOSTNAME_REQUIRED,
            ))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPropertyHostnameBucketAdd {
    pub edge_hostname_id: String,
    pub cert_provisioning_type: Option<CertType>,
    pub cname_type: Option<HostnameCnameType>,
    pub cname_from: String,
}

impl PatchPropertyHostnameBucketAdd {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("EdgeHostnameID", [required(&self.edge_hostname_id)])
            .field("CertProvisioningType", [required(&self.cert_provisioning_type)])
            .field("CnameType", [required(&self.cname_type)])
            .field("CnameFrom", [required(&self.cname_from)])
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPropertyHostnameBucketResponse {
    #[serde(default)]
    pub activation_link: String,
    #[serde(default)]
    pub activation_id: String,
    #[serde(default)]
    pub hostnames: Vec<PatchHostnameItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchHostnameItem {
    #[serde(default)]
    pub cert_provisioning_type: Option<CertType>,
    #[serde(default)]
    pub cname_from: String,
    #[serde(default)]
    pub cname_to: String,
    #[serde(default)]
    pub cname_type: Option<HostnameCnameType>,
    #[serde(default)]
    pub edge_hostname_id: String,
    #[serde(default)]
    pub cert_status: Option<CertStatusItem>,
    /// `ADD` or `REMOVE`.
    #[serde(default)]
    pub action: String,
}

impl Endpoint for PatchPropertyHostnameBucketRequest {
    type Response = PatchPropertyHostnameBucketResponse;
    const OPERATION: &'static str = "patching property hostname bucket";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .nested("Body", self.body.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::patch(format!("/papi/v1/properties/{}/hostnames", self.property_id))
            .query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            )
            .json(Self::OPERATION, &self.body)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 201)
    }
}
