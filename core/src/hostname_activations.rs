//! Hostname activations started by hostname bucket changes.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::{Error, Result};
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode_status, single};
use crate::types::{ActivationNetwork, ActivationType, CertType, Items, Page};
use crate::validate::{min, required, required_with, ValidationErrors, Validator};
use crate::version_hostnames::CertStatusItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameActivation {
    #[serde(default)]
    pub activation_type: Option<ActivationType>,
    #[serde(default)]
    pub hostname_activation_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub network: Option<ActivationNetwork>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub submit_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notify_emails: Vec<String>,
    /// Only reported by cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_version: Option<i64>,
}

/// A hostname change carried by an activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyHostnameItem {
    #[serde(default)]
    pub cert_provisioning_type: Option<CertType>,
    #[serde(default)]
    pub cname_from: String,
    #[serde(default)]
    pub cname_to: String,
    #[serde(default)]
    pub edge_hostname_id: String,
    #[serde(default)]
    pub cert_status: Option<CertStatusItem>,
    #[serde(default)]
    pub action: String,
}

/// A single activation with its hostnames flattened out of the
/// `{"items": [...]}` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameActivationDetail {
    #[serde(flatten)]
    pub activation: HostnameActivation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<PropertyHostnameItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivationListing<T> {
    #[serde(default)]
    account_id: String,
    #[serde(default)]
    contract_id: String,
    #[serde(default)]
    group_id: String,
    #[serde(default = "Items::default")]
    hostname_activations: Items<T>,
}

#[derive(Clone, Deserialize)]
struct DetailItem {
    #[serde(flatten)]
    activation: HostnameActivation,
    #[serde(default = "Items::default")]
    hostnames: Items<PropertyHostnameItem>,
}

fn activation_path(property_id: &str, activation_id: &str) -> String {
    format!("/papi/v1/properties/{property_id}/hostname-activations/{activation_id}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPropertyHostnameActivationsRequest {
    pub property_id: String,
    pub offset: i64,
    pub limit: i64,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPropertyHostnameActivationsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub hostname_activations: Page<HostnameActivation>,
}

impl Endpoint for ListPropertyHostnameActivationsRequest {
    type Response = ListPropertyHostnameActivationsResponse;
    const OPERATION: &'static str = "fetching hostname activations";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field(
                "ContractID",
                [required_with(&self.contract_id, &self.group_id, "GroupID")],
            )
            .field(
                "GroupID",
                [required_with(&self.group_id, &self.contract_id, "ContractID")],
            )
            .field("Offset", [min(self.offset, 0)])
            .field("Limit", [min(self.limit, 1)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get(format!(
            "/papi/v1/properties/{}/hostname-activations",
            self.property_id
        ))
        .query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id)
                .number("offset", self.offset)
                .number("limit", self.limit),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyHostnameActivationRequest {
    pub property_id: String,
    pub hostname_activation_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub include_hostnames: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyHostnameActivationResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub hostname_activation: HostnameActivationDetail,
}

impl Endpoint for GetPropertyHostnameActivationRequest {
    type Response = GetPropertyHostnameActivationResponse;
    const OPERATION: &'static str = "fetching hostname activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("HostnameActivationID", [required(&self.hostname_activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(activation_path(&self.property_id, &self.hostname_activation_id))
                .query(
                    Query::new()
                        .text("contractId", &self.contract_id)
                        .text("groupId", &self.group_id)
                        .flag_if_true("includeHostnames", self.include_hostnames),
                ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let listing: ActivationListing<DetailItem> = decode_status(Self::OPERATION, &response, 200)?;
        let item = single(
            Self::OPERATION,
            &listing.hostname_activations.items,
            format_args!("HostnameActivationID: {}", self.hostname_activation_id),
        )?;
        Ok(GetPropertyHostnameActivationResponse {
            account_id: listing.account_id,
            contract_id: listing.contract_id,
            group_id: listing.group_id,
            hostname_activation: HostnameActivationDetail {
                activation: item.activation,
                hostnames: item.hostnames.items,
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelPropertyHostnameActivationRequest {
    pub property_id: String,
    pub hostname_activation_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelPropertyHostnameActivationResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub hostname_activation: HostnameActivation,
}

impl Endpoint for CancelPropertyHostnameActivationRequest {
    type Response = CancelPropertyHostnameActivationResponse;
    const OPERATION: &'static str = "canceling hostname activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("HostnameActivationID", [required(&self.hostname_activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::delete(activation_path(&self.property_id, &self.hostname_activation_id))
                .query(
                    Query::new()
                        .text("contractId", &self.contract_id)
                        .text("groupId", &self.group_id),
                ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        // 204 means the activation finished aborting before this call.
        if response.status == 204 {
            return Err(Error::ActivationAlreadyAborted {
                op: Self::OPERATION,
            });
        }
        let listing: ActivationListing<HostnameActivation> =
            decode_status(Self::OPERATION, &response, 200)?;
        let hostname_activation = single(
            Self::OPERATION,
            &listing.hostname_activations.items,
            format_args!("HostnameActivationID: {}", self.hostname_activation_id),
        )?;
        Ok(CancelPropertyHostnameActivationResponse {
            account_id: listing.account_id,
            contract_id: listing.contract_id,
            group_id: listing.group_id,
            hostname_activation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::http::HttpMethod;
    use crate::test_support::{built, client, parse};

    const GET_BODY: &str = r#"{
        "accountId": "act_A-CCT3456",
        "contractId": "ctr_C-0N7RAC7",
        "groupId": "grp_15225",
        "hostnameActivations": {
            "items": [{
                "activationType": "ACTIVATE",
                "hostnameActivationId": "atv_1696985",
                "propertyName": "example.com",
                "propertyId": "prp_173136",
                "network": "STAGING",
                "status": "PENDING",
                "submitDate": "2023-10-25T13:55:33Z",
                "updateDate": "2023-10-25T13:55:37Z",
                "note": "Sample activation",
                "notifyEmails": ["you@example.com"],
                "hostnames": {
                    "items": [{
                        "action": "ADD",
                        "certProvisioningType": "CPS_MANAGED",
                        "cnameFrom": "m.example.com",
                        "cnameTo": "example.com.edgekey.net",
                        "edgeHostnameId": "ehn_895824"
                    }]
                }
            }]
        }
    }"#;

    fn get_request() -> GetPropertyHostnameActivationRequest {
        GetPropertyHostnameActivationRequest {
            property_id: "prp_173136".to_string(),
            hostname_activation_id: "atv_1696985".to_string(),
            contract_id: "ctr_C-0N7RAC7".to_string(),
            group_id: "grp_15225".to_string(),
            include_hostnames: false,
        }
    }

    fn cancel_request() -> CancelPropertyHostnameActivationRequest {
        CancelPropertyHostnameActivationRequest {
            property_id: "prp_173136".to_string(),
            hostname_activation_id: "atv_1696985".to_string(),
            contract_id: "ctr_C-0N7RAC7".to_string(),
            group_id: "grp_15225".to_string(),
        }
    }

    #[test]
    fn list_query_and_page() {
        let req = ListPropertyHostnameActivationsRequest {
            property_id: "prp_1".to_string(),
            offset: 2,
            limit: 5,
            ..Default::default()
        };
        assert_eq!(
            built(&req).path,
            "/papi/v1/properties/prp_1/hostname-activations?limit=5&offset=2"
        );
        let resp = parse(
            &req,
            200,
            r#"{
                "accountId": "act_1",
                "hostnameActivations": {
                    "currentItemCount": 1,
                    "totalItems": 7,
                    "previousLink": "/papi/v1/properties/prp_1/hostname-activations?offset=0&limit=5",
                    "items": [{"hostnameActivationId": "atv_1", "network": "PRODUCTION", "status": "ACTIVE", "activationType": "DEACTIVATE"}]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(resp.hostname_activations.total_items, 7);
        let item = &resp.hostname_activations.items[0];
        assert_eq!(item.network, Some(ActivationNetwork::Production));
        assert_eq!(item.activation_type, Some(ActivationType::Deactivate));
    }

    #[test]
    fn list_contract_and_group_are_paired() {
        let err = client()
            .build(&ListPropertyHostnameActivationsRequest {
                property_id: "prp_1".to_string(),
                group_id: "grp_1".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().reason("ContractID"),
            Some("cannot be blank when GroupID is provided")
        );
    }

    #[test]
    fn get_flattens_hostnames() {
        let req = GetPropertyHostnameActivationRequest {
            include_hostnames: true,
            ..get_request()
        };
        assert_eq!(
            built(&req).path,
            "/papi/v1/properties/prp_173136/hostname-activations/atv_1696985?contractId=ctr_C-0N7RAC7&groupId=grp_15225&includeHostnames=true"
        );
        let resp = parse(&req, 200, GET_BODY).unwrap();
        assert_eq!(resp.account_id, "act_A-CCT3456");
        let detail = resp.hostname_activation;
        assert_eq!(detail.activation.hostname_activation_id, "atv_1696985");
        assert_eq!(detail.activation.note, "Sample activation");
        assert_eq!(detail.hostnames.len(), 1);
        assert_eq!(detail.hostnames[0].cert_provisioning_type, Some(CertType::CpsManaged));
    }

    #[test]
    fn get_without_hostnames_flag() {
        assert!(!built(&get_request()).path.contains("includeHostnames"));
    }

    #[test]
    fn get_empty_listing_is_not_found() {
        let err = parse(&get_request(), 200, r#"{"hostnameActivations":{"items":[]}}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "fetching hostname activation: resource not found: HostnameActivationID: atv_1696985"
        );
    }

    #[test]
    fn cancel() {
        let built = built(&cancel_request());
        assert_eq!(built.method, HttpMethod::Delete);
        let resp = parse(
            &cancel_request(),
            200,
            r#"{
                "accountId": "act_1",
                "contractId": "ctr_C-0N7RAC7",
                "groupId": "grp_15225",
                "hostnameActivations": {"items": [{
                    "hostnameActivationId": "atv_1696985",
                    "status": "PENDING_CANCELLATION",
                    "propertyVersion": 4
                }]}
            }"#,
        )
        .unwrap();
        assert_eq!(resp.hostname_activation.status, "PENDING_CANCELLATION");
        assert_eq!(resp.hostname_activation.property_version, Some(4));
    }

    #[test]
    fn cancel_no_content_is_already_aborted() {
        let err = parse(&cancel_request(), 204, "").unwrap_err();
        assert!(matches!(err, Error::ActivationAlreadyAborted { .. }));
        assert_eq!(err.category(), ErrorCategory::ActivationAlreadyAborted);
        assert_eq!(
            err.to_string(),
            "canceling hostname activation: activation already aborted"
        );
    }

    #[test]
    fn cancel_requires_activation_id() {
        let err = client()
            .build(&CancelPropertyHostnameActivationRequest {
                hostname_activation_id: String::new(),
                ..cancel_request()
            })
            .unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().reason("HostnameActivationID"),
            Some("cannot be blank")
        );
    }
}
