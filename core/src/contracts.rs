//! Contracts visible to the account.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::response::decode_status;
use crate::types::Items;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_id: String,
    #[serde(default)]
    pub contract_type_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetContractsRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContractsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contracts: Items<Contract>,
}

impl Endpoint for GetContractsRequest {
    type Response = GetContractsResponse;
    const OPERATION: &'static str = "fetching contracts";

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/contracts"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
