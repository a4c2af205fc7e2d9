//! Includes: reusable rule fragments referenced by properties.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::properties::Property;
use crate::query::Query;
use crate::response::{decode_status, link_id, single};
use crate::rule_formats::validate_rule_format;
use crate::types::{IncludeType, Items};
use crate::validate::{required, ValidationErrors, Validator};

pub const INCLUDES_LIMIT_HEADER: &str = "x-limit-includes-per-contract-limit";
pub const INCLUDES_REMAINING_HEADER: &str = "x-limit-includes-per-contract-remaining";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Include {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    pub include_id: String,
    #[serde(default)]
    pub include_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_type: Option<IncludeType>,
    #[serde(default)]
    pub latest_version: i64,
    #[serde(default)]
    pub production_version: Option<i64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub staging_version: Option<i64>,
}

fn scope_query(contract_id: &str, group_id: &str) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludesRequest {
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIncludesResponse {
    #[serde(default)]
    pub includes: Items<Include>,
}

impl Endpoint for ListIncludesRequest {
    type Response = ListIncludesResponse;
    const OPERATION: &'static str = "list Includes";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/includes")
            .query(scope_query(&self.contract_id, &self.group_id)))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludeParentsRequest {
    pub include_id: String,
    pub contract_id: String,
    pub group_id: String,
}

/// Properties that reference an include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIncludeParentsResponse {
    #[serde(default)]
    pub properties: Items<Property>,
}

impl Endpoint for ListIncludeParentsRequest {
    type Response = ListIncludeParentsResponse;
    const OPERATION: &'static str = "list Include Parents";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/includes/{}/parents", self.include_id))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeRequest {
    pub include_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeResponse {
    pub includes: Items<Include>,
    pub include: Include,
}

impl Endpoint for GetIncludeRequest {
    type Response = GetIncludeResponse;
    const OPERATION: &'static str = "get an Include";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("IncludeID", [required(&self.include_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/includes/{}", self.include_id))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let list: ListIncludesResponse = decode_status(Self::OPERATION, &response, 200)?;
        let include = single(
            Self::OPERATION,
            &list.includes.items,
            format_args!("IncludeID: {}", self.include_id),
        )?;
        Ok(GetIncludeResponse {
            includes: list.includes,
            include,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneIncludeFrom {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub clone_from_version_etag: String,
    pub include_id: String,
    pub version: i64,
}

impl CloneIncludeFrom {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("Version", [required(&self.version)])
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncludeRequest {
    #[serde(skip)]
    pub contract_id: String,
    #[serde(skip)]
    pub group_id: String,
    pub include_name: String,
    pub include_type: Option<IncludeType>,
    pub product_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_format: String,
    #[serde(rename = "cloneFrom", skip_serializing_if = "Option::is_none")]
    pub clone_include_from: Option<CloneIncludeFrom>,
}

/// Include quota reported on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludesLimit {
    pub total: String,
    pub remaining: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIncludeResponse {
    pub include_id: String,
    pub include_link: String,
    pub limit: IncludesLimit,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncludeLink {
    include_link: String,
}

impl Endpoint for CreateIncludeRequest {
    type Response = CreateIncludeResponse;
    const OPERATION: &'static str = "create an Include";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let validator = Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("IncludeName", [required(&self.include_name)])
            .field("IncludeType", [required(&self.include_type)])
            .field("ProductID", [required(&self.product_id)])
            .field("RuleFormat", [validate_rule_format(&self.rule_format)]);
        match &self.clone_include_from {
            Some(from) => validator.nested("CloneIncludeFrom", from.validate()),
            None => validator,
        }
        .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post("/papi/v1/includes")
            .query(scope_query(&self.contract_id, &self.group_id))
            .json(Self::OPERATION, self)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: IncludeLink = decode_status(Self::OPERATION, &response, 201)?;
        let header = |name| response.header(name).unwrap_or_default().to_string();
        Ok(CreateIncludeResponse {
            include_id: link_id(Self::OPERATION, &body.include_link)?,
            include_link: body.include_link,
            limit: IncludesLimit {
                total: header(INCLUDES_LIMIT_HEADER),
                remaining: header(INCLUDES_REMAINING_HEADER),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteIncludeRequest {
    pub include_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIncludeResponse {
    #[serde(default)]
    pub message: String,
}

impl Endpoint for DeleteIncludeRequest {
    type Response = DeleteIncludeResponse;
    const OPERATION: &'static str = "delete an Include";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::delete(format!("/papi/v1/includes/{}", self.include_id))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::test_support::{body_json, built, client, parse};

    const LIST_BODY: &str = r#"{
        "includes": {"items": [{
            "accountId": "test_account",
            "contractId": "test_contract",
            "groupId": "test_group",
            "latestVersion": 1,
            "stagingVersion": null,
            "productionVersion": null,
            "propertyType": "INCLUDE",
            "includeId": "inc_123456",
            "includeName": "test_include",
            "includeType": "MICROSERVICES",
            "assetId": "test_asset"
        }]}
    }"#;

    fn create_request() -> CreateIncludeRequest {
        CreateIncludeRequest {
            contract_id: "test_contract".to_string(),
            group_id: "test_group".to_string(),
            include_name: "test_include".to_string(),
            include_type: Some(IncludeType::Microservices),
            product_id: "test_product".to_string(),
            rule_format: "v2020-11-02".to_string(),
            clone_include_from: None,
        }
    }

    #[test]
    fn list_includes() {
        let req = ListIncludesRequest {
            contract_id: "test_contract".to_string(),
            group_id: String::new(),
        };
        assert_eq!(built(&req).path, "/papi/v1/includes?contractId=test_contract");
        let resp = parse(&req, 200, LIST_BODY).unwrap();
        let include = &resp.includes.items[0];
        assert_eq!(include.include_type, Some(IncludeType::Microservices));
        assert_eq!(include.property_type.as_deref(), Some("INCLUDE"));
        assert_eq!(include.staging_version, None);
    }

    #[test]
    fn list_parents() {
        let req = ListIncludeParentsRequest {
            include_id: "inc_456789".to_string(),
            contract_id: "test_contract".to_string(),
            group_id: "test_group".to_string(),
        };
        assert_eq!(
            built(&req).path,
            "/papi/v1/includes/inc_456789/parents?contractId=test_contract&groupId=test_group"
        );
        let resp = parse(
            &req,
            200,
            r#"{"properties":{"items":[{"accountId":"test_account","contractId":"test_contract","groupId":"test_group","propertyId":"prp_123456","propertyName":"test_property","stagingVersion":1,"productionVersion":null,"assetId":"test_asset"}]}}"#,
        )
        .unwrap();
        assert_eq!(resp.properties.items[0].staging_version, Some(1));
    }

    #[test]
    fn get_include() {
        let req = GetIncludeRequest {
            include_id: "inc_123456".to_string(),
            contract_id: "test_contract".to_string(),
            group_id: "test_group".to_string(),
        };
        let resp = parse(&req, 200, LIST_BODY).unwrap();
        assert_eq!(resp.include.include_name, "test_include");

        let err = client().build(&GetIncludeRequest::default()).unwrap_err();
        assert_eq!(err.validation_errors().unwrap().len(), 3);
    }

    #[test]
    fn create_include_reads_limit_headers() {
        let req = create_request();
        let built = built(&req);
        assert_eq!(built.method, HttpMethod::Post);
        assert_eq!(
            built.path,
            "/papi/v1/includes?contractId=test_contract&groupId=test_group"
        );
        assert_eq!(
            body_json(&built),
            serde_json::json!({
                "includeName": "test_include",
                "includeType": "MICROSERVICES",
                "productId": "test_product",
                "ruleFormat": "v2020-11-02"
            })
        );

        let response = HttpResponse::new(
            201,
            r#"{"includeLink":"/papi/v1/includes/inc_123456?contractId=test_contract&groupId=test_group"}"#,
        )
        .with_header(INCLUDES_LIMIT_HEADER, "500")
        .with_header(INCLUDES_REMAINING_HEADER, "499");
        let resp = client().parse(&req, response).unwrap();
        assert_eq!(resp.include_id, "inc_123456");
        assert_eq!(
            resp.limit,
            IncludesLimit {
                total: "500".to_string(),
                remaining: "499".to_string(),
            }
        );
    }

    #[test]
    fn create_include_validation() {
        let mut req = create_request();
        req.include_type = None;
        req.clone_include_from = Some(CloneIncludeFrom::default());
        let err = client().build(&req).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.reason("IncludeType"), Some("cannot be blank"));
        let clone = errors.nested("CloneIncludeFrom").unwrap();
        assert_eq!(clone.reason("IncludeID"), Some("cannot be blank"));
        assert_eq!(clone.reason("Version"), Some("cannot be blank"));
    }

    #[test]
    fn delete_include() {
        let req = DeleteIncludeRequest {
            include_id: "inc_123456".to_string(),
            ..Default::default()
        };
        assert_eq!(built(&req).path, "/papi/v1/includes/inc_123456");
        let resp = parse(&req, 200, r#"{"message":"Deletion Successful."}"#).unwrap();
        assert_eq!(resp.message, "Deletion Successful.");
    }
}
