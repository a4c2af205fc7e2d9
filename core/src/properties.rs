//! Properties: the top-level configuration objects.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::{Error, Result};
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode_status, link_id, single};
use crate::rule_formats::validate_rule_format;
use crate::types::Items;
use crate::validate::{min, required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub latest_version: i64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_version: Option<i64>,
    pub property_id: String,
    #[serde(default)]
    pub property_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_version: Option<i64>,
}

fn scope_query(contract_id: &str, group_id: &str) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertiesRequest {
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPropertiesResponse {
    #[serde(default)]
    pub properties: Items<Property>,
}

impl Endpoint for GetPropertiesRequest {
    type Response = GetPropertiesResponse;
    const OPERATION: &'static str = "fetching properties";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/properties")
            .query(scope_query(&self.contract_id, &self.group_id)))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPropertyResponse {
    pub properties: Items<Property>,
    pub property: Property,
}

impl Endpoint for GetPropertyRequest {
    type Response = GetPropertyResponse;
    const OPERATION: &'static str = "fetching property";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/properties/{}", self.property_id))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let list: GetPropertiesResponse = decode_status(Self::OPERATION, &response, 200)?;
        let property = single(
            Self::OPERATION,
            &list.properties.items,
            format_args!("PropertyID: {}", self.property_id),
        )?;
        Ok(GetPropertyResponse {
            properties: list.properties,
            property,
        })
    }
}

/// Source of a cloned property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCloneFrom {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub clone_from_version_etag: String,
    #[serde(skip_serializing_if = "crate::types::is_false")]
    pub copy_hostnames: bool,
    pub property_id: String,
    pub version: i64,
}

impl PropertyCloneFrom {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("Version", [required(&self.version), min(self.version, 1)])
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_from: Option<PropertyCloneFrom>,
    pub product_id: String,
    pub property_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_format: String,
}

impl PropertyCreate {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let validator = Validator::new()
            .field("ProductID", [required(&self.product_id)])
            .field("PropertyName", [required(&self.property_name)])
            .field("RuleFormat", [validate_rule_format(&self.rule_format)]);
        match &self.clone_from {
            Some(clone_from) => validator.nested("CloneFrom", clone_from.validate()),
            None => validator,
        }
        .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePropertyRequest {
    pub contract_id: String,
    pub group_id: String,
    pub property: PropertyCreate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePropertyResponse {
    pub property_link: String,
    pub property_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyLink {
    property_link: String,
}

impl Endpoint for CreatePropertyRequest {
    type Response = CreatePropertyResponse;
    const OPERATION: &'static str = "creating property";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .nested("Property", self.property.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post("/papi/v1/properties")
            .query(scope_query(&self.contract_id, &self.group_id))
            .json(Self::OPERATION, &self.property)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: PropertyLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreatePropertyResponse {
            property_id: link_id(Self::OPERATION, &body.property_link)?,
            property_link: body.property_link,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovePropertyRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePropertyResponse {
    #[serde(default)]
    pub message: String,
}

impl Endpoint for RemovePropertyRequest {
    type Response = RemovePropertyResponse;
    const OPERATION: &'static str = "removing property";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::delete(format!("/papi/v1/properties/{}", self.property_id))
                .query(scope_query(&self.contract_id, &self.group_id)),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

/// Lookup of a property id by its exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPropertyNameToIdRequest {
    pub name: String,
    pub contract_id: String,
    pub group_id: String,
}

impl MapPropertyNameToIdRequest {
    pub const OPERATION: &'static str = "map property by name";

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("GroupID", [required(&self.group_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("Name", [required(&self.name)])
            .finish()
    }

    /// The id of the first listed property named exactly `name`.
    pub fn find(&self, properties: &GetPropertiesResponse) -> Result<String> {
        properties
            .properties
            .items
            .iter()
            .find(|property| property.property_name == self.name)
            .map(|property| property.property_id.clone())
            .ok_or_else(|| Error::NoProperty {
                op: Self::OPERATION,
                name: self.name.clone(),
            })
    }

    pub fn listing(&self) -> GetPropertiesRequest {
        GetPropertiesRequest {
            contract_id: self.contract_id.clone(),
            group_id: self.group_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPropertyIdToNameRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
}

impl MapPropertyIdToNameRequest {
    pub const OPERATION: &'static str = "map property by ID";

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .finish()
    }

    pub fn lookup(&self) -> GetPropertyRequest {
        GetPropertyRequest {
            property_id: self.property_id.clone(),
            contract_id: self.contract_id.clone(),
            group_id: self.group_id.clone(),
        }
    }
}
