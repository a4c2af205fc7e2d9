//! Hostnames currently active on a property, and the staging/production diff.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::decode_status;
use crate::types::{ActivationNetwork, CertType, HostnameCnameType, Page, SortOrder};
use crate::validate::{max, min, required, required_with, ValidationErrors, Validator};
use crate::version_hostnames::CertStatusItem;

/// Largest page the hostname listings accept.
pub const MAX_HOSTNAMES_PER_PAGE: i64 = 999;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListActivePropertyHostnamesRequest {
    pub property_id: String,
    pub offset: i64,
    pub limit: i64,
    pub sort: Option<SortOrder>,
    pub hostname: String,
    pub cname_to: String,
    pub network: Option<ActivationNetwork>,
    pub contract_id: String,
    pub group_id: String,
    pub include_cert_status: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivePropertyHostnamesResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub available_sort: Vec<SortOrder>,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub current_sort: Option<SortOrder>,
    #[serde(default)]
    pub default_sort: Option<SortOrder>,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub hostnames: Page<HostnameItem>,
}

/// One hostname with what each network currently serves for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameItem {
    #[serde(default)]
    pub cname_from: String,
    #[serde(default)]
    pub cname_type: Option<HostnameCnameType>,
    #[serde(default)]
    pub cert_status: Option<CertStatusItem>,
    #[serde(default)]
    pub production_cert_type: Option<CertType>,
    #[serde(default)]
    pub production_cname_to: String,
    #[serde(default)]
    pub production_edge_hostname_id: String,
    #[serde(default)]
    pub staging_cert_type: Option<CertType>,
    // The listing capitalizes this one key.
    #[serde(default, rename = "StagingCnameTo", alias = "stagingCnameTo")]
    pub staging_cname_to: String,
    #[serde(default)]
    pub staging_edge_hostname_id: String,
}

impl Endpoint for ListActivePropertyHostnamesRequest {
    type Response = ListActivePropertyHostnamesResponse;
    const OPERATION: &'static str = "fetching active property hostnames";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("Offset", [min(self.offset, 0)])
            .field(
                "Limit",
                [min(self.limit, 1), max(self.limit, MAX_HOSTNAMES_PER_PAGE)],
            )
            .field(
                "ContractID",
                [required_with(&self.contract_id, &self.group_id, "GroupID")],
            )
            .field(
                "GroupID",
                [required_with(&self.group_id, &self.contract_id, "ContractID")],
            )
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        let mut query = Query::new()
            .text("contractId", &self.contract_id)
            .text("groupId", &self.group_id)
            .text("hostname", &self.hostname)
            .text("cnameTo", &self.cname_to)
            .number("offset", self.offset)
            .number("limit", self.limit)
            .flag_if_true("includeCertStatus", self.include_cert_status);
        if let Some(sort) = self.sort {
            query = query.set("sort", sort.as_str());
        }
        if let Some(network) = self.network {
            query = query.set("network", network.as_str());
        }
        Ok(
            RequestParts::get(format!("/papi/v1/properties/{}/hostnames", self.property_id))
                .query(query),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetActivePropertyHostnamesDiffRequest {
    pub property_id: String,
    pub offset: i64,
    pub limit: i64,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActivePropertyHostnamesDiffResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub hostnames: Page<HostnameDiffItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostnameDiffItem {
    #[serde(default)]
    pub cname_from: String,
    #[serde(default)]
    pub production_cert_provisioning_type: Option<CertType>,
    #[serde(default)]
    pub production_cname_to: String,
    #[serde(default)]
    pub production_cname_type: Option<HostnameCnameType>,
    #[serde(default)]
    pub production_edge_hostname_id: String,
    #[serde(default)]
    pub staging_cert_provisioning_type: Option<CertType>,
    #[serde(default)]
    pub staging_cname_to: String,
    #[serde(default)]
    pub staging_cname_type: Option<HostnameCnameType>,
    #[serde(default)]
    pub staging_edge_hostname_id: String,
}

impl Endpoint for GetActivePropertyHostnamesDiffRequest {
    type Response = GetActivePropertyHostnamesDiffResponse;
    const OPERATION: &'static str = "fetching active property hostnames diff";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("Offset", [min(self.offset, 0)])
            .field(
                "Limit",
                [min(self.limit, 1), max(self.limit, MAX_HOSTNAMES_PER_PAGE)],
            )
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get(format!(
            "/papi/v1/properties/{}/hostnames/diff",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{built, client, parse};

    const LIST_BODY: &str = r#"{
        "accountId": "act_1-1TJZFB",
        "availableSort": ["hostname:a", "hostname:d"],
        "contractId": "ctr_1-1TJZH5",
        "currentSort": "hostname:a",
        "defaultSort": "hostname:a",
        "groupId": "grp_15225",
        "propertyId": "prp_1",
        "propertyName": "mytestproperty.com",
        "hostnames": {
            "currentItemCount": 1,
            "nextLink": "/papi/v1/properties/prp_1/hostnames?offset=1&limit=1",
            "totalItems": 2,
            "items": [{
                "cnameFrom": "example.com",
                "cnameType": "EDGE_HOSTNAME",
                "productionCertType": "CPS_MANAGED",
                "productionCnameTo": "example.com.edgekey.net",
                "productionEdgeHostnameId": "ehn_895824",
                "stagingCertType": "DEFAULT",
                "StagingCnameTo": "example.com.edgesuite.net",
                "stagingEdgeHostnameId": "ehn_895822"
            }]
        }
    }"#;

    fn list_request() -> ListActivePropertyHostnamesRequest {
        ListActivePropertyHostnamesRequest {
            property_id: "prp_1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn list_with_no_options() {
        assert_eq!(built(&list_request()).path, "/papi/v1/properties/prp_1/hostnames");
    }

    #[test]
    fn list_with_all_options() {
        let req = ListActivePropertyHostnamesRequest {
            offset: 5,
            limit: 10,
            sort: Some(SortOrder::Descending),
            hostname: "example.com".to_string(),
            cname_to: "example.com.edgekey.net".to_string(),
            network: Some(ActivationNetwork::Staging),
            contract_id: "ctr_1".to_string(),
            group_id: "grp_2".to_string(),
            include_cert_status: true,
            ..list_request()
        };
        assert_eq!(
            built(&req).path,
            "/papi/v1/properties/prp_1/hostnames?cnameTo=example.com.edgekey.net&contractId=ctr_1&groupId=grp_2&hostname=example.com&includeCertStatus=true&limit=10&network=STAGING&offset=5&sort=hostname%3Ad"
        );
    }

    #[test]
    fn parse_list_page() {
        let resp = parse(&list_request(), 200, LIST_BODY).unwrap();
        assert_eq!(resp.available_sort, vec![SortOrder::Ascending, SortOrder::Descending]);
        assert_eq!(resp.current_sort, Some(SortOrder::Ascending));
        assert_eq!(resp.hostnames.total_items, 2);
        assert!(resp.hostnames.next_link.is_some());
        let item = &resp.hostnames.items[0];
        assert_eq!(item.staging_cname_to, "example.com.edgesuite.net");
        assert_eq!(item.production_cert_type, Some(CertType::CpsManaged));
        assert_eq!(item.staging_cert_type, Some(CertType::Default));
    }

    #[test]
    fn list_paging_bounds() {
        let err = client()
            .build(&ListActivePropertyHostnamesRequest {
                offset: -1,
                limit: 1000,
                ..list_request()
            })
            .unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.reason("Offset"), Some("must be no less than 0"));
        assert_eq!(errors.reason("Limit"), Some("must be no greater than 999"));

        assert!(client()
            .build(&ListActivePropertyHostnamesRequest {
                limit: MAX_HOSTNAMES_PER_PAGE,
                ..list_request()
            })
            .is_ok());
    }

    #[test]
    fn list_contract_and_group_are_paired() {
        let err = client()
            .build(&ListActivePropertyHostnamesRequest {
                contract_id: "ctr_1".to_string(),
                ..list_request()
            })
            .unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().to_string(),
            "GroupID: cannot be blank when ContractID is provided"
        );
    }

    #[test]
    fn diff() {
        let req = GetActivePropertyHostnamesDiffRequest {
            property_id: "prp_1".to_string(),
            limit: 1,
            contract_id: "ctr_1".to_string(),
            group_id: "grp_2".to_string(),
            ..Default::default()
        };
        assert_eq!(
            built(&req).path,
            "/papi/v1/properties/prp_1/hostnames/diff?contractId=ctr_1&groupId=grp_2&limit=1"
        );

        let resp = parse(
            &req,
            200,
            r#"{
                "accountId": "act_1",
                "contractId": "ctr_1",
                "groupId": "grp_2",
                "propertyId": "prp_1",
                "hostnames": {
                    "currentItemCount": 1,
                    "totalItems": 1,
                    "items": [{
                        "cnameFrom": "m.example.com",
                        "productionCertProvisioningType": "DEFAULT",
                        "productionCnameTo": "m.example.com.edgekey.net",
                        "productionCnameType": "EDGE_HOSTNAME",
                        "productionEdgeHostnameId": "ehn_1",
                        "stagingCnameTo": "m.example.com.edgesuite.net",
                        "stagingEdgeHostnameId": "ehn_2"
                    }]
                }
            }"#,
        )
        .unwrap();
        let item = &resp.hostnames.items[0];
        assert_eq!(item.production_cname_type, Some(HostnameCnameType::EdgeHostname));
        assert_eq!(item.staging_cert_provisioning_type, None);
        assert_eq!(item.staging_cname_to, "m.example.com.edgesuite.net");
    }

    #[test]
    fn diff_requires_property() {
        let err = client()
            .build(&GetActivePropertyHostnamesDiffRequest::default())
            .unwrap_err();
        assert_eq!(err.operation(), "fetching active property hostnames diff");
        assert_eq!(err.validation_errors().unwrap().reason("PropertyID"), Some("cannot be blank"));
    }
}
