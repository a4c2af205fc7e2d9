//! Include versions.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::property_versions::{AvailableBehaviorsResponse, AvailableCriteriaResponse, VersionLink};
use crate::query::Query;
use crate::response::{decode_status, numeric_link_id, single};
use crate::types::{IncludeType, Items, VersionStatus};
use crate::validate::{required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeVersion {
    #[serde(default)]
    pub updated_by_user: String,
    #[serde(default)]
    pub updated_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<VersionStatus>,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rule_format: String,
    pub include_version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_status: Option<VersionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIncludeVersionsResponse {
    #[serde(default)]
    pub include_id: String,
    #[serde(default)]
    pub include_name: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_type: Option<IncludeType>,
    #[serde(rename = "versions", default)]
    pub include_versions: Items<IncludeVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeVersionResponse {
    pub listing: ListIncludeVersionsResponse,
    pub include_version: IncludeVersion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeVersionCreate {
    pub create_from_version: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub create_from_version_etag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateIncludeVersionRequest {
    pub include_id: String,
    pub version: IncludeVersionCreate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIncludeVersionResponse {
    pub version_link: String,
    pub version: i64,
}

impl Endpoint for CreateIncludeVersionRequest {
    type Response = CreateIncludeVersionResponse;
    const OPERATION: &'static str = "create an include version";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("CreateFromVersion", [required(&self.version.create_from_version)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post(format!("/papi/v1/includes/{}/versions", self.include_id))
            .json(Self::OPERATION, &self.version)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: VersionLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreateIncludeVersionResponse {
            version: numeric_link_id(Self::OPERATION, &body.version_link)?,
            version_link: body.version_link,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeVersionRequest {
    pub include_id: String,
    pub version: i64,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for GetIncludeVersionRequest {
    type Response = GetIncludeVersionResponse;
    const OPERATION: &'static str = "get an include version";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("Version", [required(&self.version)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get(format!(
            "/papi/v1/includes/{}/versions/{}",
            self.include_id, self.version
        ))
        .query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let listing: ListIncludeVersionsResponse = decode_status(Self::OPERATION, &response, 200)?;
        let include_version = single(
            Self::OPERATION,
            &listing.include_versions.items,
            format_args!("IncludeID: {}", self.include_id),
        )?;
        Ok(GetIncludeVersionResponse {
            listing,
            include_version,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludeVersionsRequest {
    pub include_id: String,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for ListIncludeVersionsRequest {
    type Response = ListIncludeVersionsResponse;
    const OPERATION: &'static str = "list include versions";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/includes/{}/versions", self.include_id)).query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

/// One include version, for the catalogue lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeVersionScope {
    pub include_id: String,
    pub version: i64,
}

impl IncludeVersionScope {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("Version", [required(&self.version)])
            .finish()
    }

    fn get(&self, tail: &str) -> RequestParts {
        RequestParts::get(format!(
            "/papi/v1/includes/{}/versions/{}/{tail}",
            self.include_id, self.version
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludeVersionAvailableCriteriaRequest(pub IncludeVersionScope);

impl Endpoint for ListIncludeVersionAvailableCriteriaRequest {
    type Response = AvailableCriteriaResponse;
    const OPERATION: &'static str = "list include version available criteria";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validate()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("available-criteria"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludeVersionAvailableBehaviorsRequest(pub IncludeVersionScope);

impl Endpoint for ListIncludeVersionAvailableBehaviorsRequest {
    type Response = AvailableBehaviorsResponse;
    const OPERATION: &'static str = "list include version available behaviors";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validate()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(self.0.get("available-behaviors"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
