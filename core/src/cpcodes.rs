//! CP codes.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode_status, link_id, single};
use crate::types::Items;
use crate::validate::{required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpCode {
    #[serde(rename = "cpcodeId")]
    pub id: String,
    #[serde(rename = "cpcodeName")]
    pub name: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCpCodesRequest {
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCpCodesResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(rename = "cpcodes", default)]
    pub cp_codes: Items<CpCode>,
}

impl Endpoint for GetCpCodesRequest {
    type Response = GetCpCodesResponse;
    const OPERATION: &'static str = "fetching CP codes";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/cpcodes").query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCpCodeRequest {
    pub cp_code_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCpCodeResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub cp_codes: Items<CpCode>,
    pub cp_code: CpCode,
}

impl Endpoint for GetCpCodeRequest {
    type Response = GetCpCodeResponse;
    const OPERATION: &'static str = "fetching CP code";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("CPCodeID", [required(&self.cp_code_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/cpcodes/{}", self.cp_code_id)).query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let list: GetCpCodesResponse = decode_status(Self::OPERATION, &response, 200)?;
        let cp_code = single(
            Self::OPERATION,
            &list.cp_codes.items,
            format_args!("CPCodeID: {}", self.cp_code_id),
        )?;
        Ok(GetCpCodeResponse {
            account_id: list.account_id,
            contract_id: list.contract_id,
            group_id: list.group_id,
            cp_codes: list.cp_codes,
            cp_code,
        })
    }
}

/// Body of a CP code creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCpCode {
    pub product_id: String,
    #[serde(rename = "cpcodeName")]
    pub cp_code_name: String,
}

impl CreateCpCode {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ProductID", [required(&self.product_id)])
            .field("CPCodeName", [required(&self.cp_code_name)])
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCpCodeRequest {
    pub contract_id: String,
    pub group_id: String,
    pub cp_code: CreateCpCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCpCodeResponse {
    pub cp_code_link: String,
    pub cp_code_id: String,
}

#[derive(Deserialize)]
struct CpCodeLink {
    #[serde(rename = "cpcodeLink")]
    link: String,
}

impl Endpoint for CreateCpCodeRequest {
    type Response = CreateCpCodeResponse;
    const OPERATION: &'static str = "creating CP code";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .nested("CPCode", self.cp_code.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post("/papi/v1/cpcodes")
            .query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            )
            .json(Self::OPERATION, &self.cp_code)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: CpCodeLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreateCpCodeResponse {
            cp_code_id: link_id(Self::OPERATION, &body.link)?,
            cp_code_link: body.link,
        })
    }
}
