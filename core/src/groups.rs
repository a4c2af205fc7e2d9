//! Groups, which hold properties and map to contracts.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::response::decode_status;
use crate::types::Items;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_group_id: String,
    #[serde(default)]
    pub contract_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetGroupsRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub groups: Items<Group>,
}

impl Endpoint for GetGroupsRequest {
    type Response = GetGroupsResponse;
    const OPERATION: &'static str = "fetching groups";

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/groups"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
