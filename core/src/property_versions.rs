//! Property versions, their available behaviors and criteria, and the
//! includes a version can reference.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::includes::Include;
use crate::query::Query;
use crate::response::{decode_status, numeric_link_id, single};
use crate::types::{ActivationNetwork, IncludeType, Items, VersionStatus};
use crate::validate::{min, required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersion {
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<VersionStatus>,
    pub property_version: i64,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_status: Option<VersionStatus>,
    #[serde(default)]
    pub updated_by_user: String,
    #[serde(default)]
    pub updated_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPropertyVersionsResponse {
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub versions: Items<PropertyVersion>,
}

/// A version lookup: the listing plus its single item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyVersionResponse {
    pub listing: GetPropertyVersionsResponse,
    pub version: PropertyVersion,
}

impl GetPropertyVersionResponse {
    fn unwrap(
        op: &'static str,
        listing: GetPropertyVersionsResponse,
        resource: std::fmt::Arguments<'_>,
    ) -> Result<Self> {
        let version = single(op, &listing.versions.items, resource)?;
        Ok(Self { listing, version })
    }
}

fn scope_query(contract_id: &str, group_id: &str) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
}

fn version_path(property_id: &str, version: i64, tail: &str) -> String {
    format!("/papi/v1/properties/{property_id}/versions/{version}{tail}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyVersionsRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub limit: i64,
    pub offset: i64,
}

impl Endpoint for GetPropertyVersionsRequest {
    type Response = GetPropertyVersionsResponse;
    const OPERATION: &'static str = "fetching property versions";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("Limit", [min(self.limit, 1)])
            .field("Offset", [min(self.offset, 0)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/properties/{}/versions", self.property_id)).query(
                scope_query(&self.contract_id, &self.group_id)
                    .number("limit", self.limit)
                    .number("offset", self.offset),
            ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyVersionRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for GetPropertyVersionRequest {
    type Response = GetPropertyVersionResponse;
    const OPERATION: &'static str = "fetching property version";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(version_path(&self.property_id, self.property_version, ""))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let listing = decode_status(Self::OPERATION, &response, 200)?;
        GetPropertyVersionResponse::unwrap(
            Self::OPERATION,
            listing,
            format_args!(
                "Version {} for PropertyID: {}",
                self.property_version, self.property_id
            ),
        )
    }
}

/// Latest version overall, or latest activated on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLatestVersionRequest {
    pub property_id: String,
    pub activated_on: Option<ActivationNetwork>,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for GetLatestVersionRequest {
    type Response = GetPropertyVersionResponse;
    const OPERATION: &'static str = "fetching latest property version";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        let mut query = scope_query(&self.contract_id, &self.group_id);
        if let Some(network) = self.activated_on {
            query = query.set("activatedOn", network.as_str());
        }
        Ok(RequestParts::get(format!(
            "/papi/v1/properties/{}/versions/latest",
            self.property_id
        ))
        .query(query))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let listing = decode_status(Self::OPERATION, &response, 200)?;
        GetPropertyVersionResponse::unwrap(
            Self::OPERATION,
            listing,
            format_args!("latest version for PropertyID: {}", self.property_id),
        )
    }
}

/// Body of a version creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyVersionCreate {
    pub create_from_version: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub create_from_version_etag: String,
}

impl PropertyVersionCreate {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field(
                "CreateFromVersion",
                [
                    required(&self.create_from_version),
                    min(self.create_from_version, 1),
                ],
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePropertyVersionRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub version: PropertyVersionCreate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePropertyVersionResponse {
    pub version_link: String,
    pub property_version: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VersionLink {
    pub(crate) version_link: String,
}

impl Endpoint for CreatePropertyVersionRequest {
    type Response = CreatePropertyVersionResponse;
    const OPERATION: &'static str = "creating property version";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .nested("Version", self.version.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post(format!("/papi/v1/properties/{}/versions", self.property_id))
            .query(scope_query(&self.contract_id, &self.group_id))
            .json(Self::OPERATION, &self.version)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: VersionLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreatePropertyVersionResponse {
            property_version: numeric_link_id(Self::OPERATION, &body.version_link)?,
            version_link: body.version_link,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behavior {
    pub name: String,
    #[serde(default)]
    pub schema_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub name: String,
    #[serde(default)]
    pub schema_link: String,
}

/// Behaviors a property or include version may use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableBehaviorsResponse {
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default)]
    pub behaviors: Items<Behavior>,
}

/// Criteria a property or include version may use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCriteriaResponse {
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default)]
    pub criteria: Items<Criteria>,
}

/// Identifies one property version for the catalogue lookups below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyVersionScope {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
}

impl PropertyVersionScope {
    fn validator(&self) -> Validator {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
    }

    fn get(&self, tail: &str) -> RequestParts {
        RequestParts::get(version_path(&self.property_id, self.property_version, tail))
            .query(scope_query(&self.contract_id, &self.group_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAvailableBehaviorsRequest(pub PropertyVersionScope);

impl Endpoint for GetAvailableBehaviorsRequest {
    type Response = AvailableBehaviorsResponse;
    const OPERATION: &'static str = "fetching available behaviors";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validator().finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("/available-behaviors"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAvailableCriteriaRequest(pub PropertyVersionScope);

impl Endpoint for GetAvailableCriteriaRequest {
    type Response = AvailableCriteriaResponse;
    const OPERATION: &'static str = "fetching available criteria";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validator().finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("/available-criteria"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

/// An include that a property version may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalInclude {
    #[serde(rename = "id")]
    pub include_id: String,
    #[serde(rename = "name", default)]
    pub include_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_type: Option<IncludeType>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub rule_format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAvailableIncludesResponse {
    /// Ordered by include identifier.
    pub available_includes: Vec<ExternalInclude>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExternalResources {
    #[serde(default)]
    external_resources: ExternalIncludes,
}

#[derive(Default, Deserialize)]
struct ExternalIncludes {
    #[serde(default)]
    include: BTreeMap<String, ExternalInclude>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAvailableIncludesRequest(pub PropertyVersionScope);

impl Endpoint for ListAvailableIncludesRequest {
    type Response = ListAvailableIncludesResponse;
    const OPERATION: &'static str = "fetching available includes";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validator().finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("/external-resources"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: ExternalResources = decode_status(Self::OPERATION, &response, 200)?;
        Ok(ListAvailableIncludesResponse {
            available_includes: body.external_resources.include.into_values().collect(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReferencedIncludesResponse {
    #[serde(default)]
    pub includes: Items<Include>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReferencedIncludesRequest(pub PropertyVersionScope);

impl Endpoint for ListReferencedIncludesRequest {
    type Response = ListReferencedIncludesResponse;
    const OPERATION: &'static str = "fetching referenced includes";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0
            .validator()
            .field("GroupID", [required(&self.0.group_id)])
            .field("ContractID", [required(&self.0.contract_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("/includes"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
