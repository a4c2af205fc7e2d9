//! Rule format versions.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::response::decode_status;
use crate::types::Items;
use crate::validate::{check, Check};

static RULE_FORMAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(latest|v\d{4}-\d{2}-\d{2})$").ok());

/// `latest` or a dated version such as `v2023-01-05`. Blank passes.
pub fn validate_rule_format(value: &str) -> Check {
    let valid = value.is_empty()
        || RULE_FORMAT
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value));
    check(
        valid,
        "must be 'latest' or a date-based version such as 'v2023-01-05'",
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetRuleFormatsRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRuleFormatsResponse {
    #[serde(default)]
    pub rule_formats: Items<String>,
}

impl Endpoint for GetRuleFormatsRequest {
    type Response = GetRuleFormatsResponse;
    const OPERATION: &'static str = "fetching rule formats";

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/rule-formats"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
