//! Rule trees of property and include versions.
//!
//! The tree itself is kept as opaque JSON: behaviors and criteria are
//! versioned by rule format and change faster than this crate. Only the
//! root rule's `name` is checked before an update is sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::decode_status;
use crate::rule_formats::validate_rule_format;
use crate::types::IncludeType;
use crate::validate::{check, one_of, required, ValidationErrors, Validator};

pub const RULE_VALIDATE_MODE_FAST: &str = "fast";
pub const RULE_VALIDATE_MODE_FULL: &str = "full";

const VALIDATE_MODES: [&str; 2] = [RULE_VALIDATE_MODE_FAST, RULE_VALIDATE_MODE_FULL];

const ELEMENTS_REMAINING_HEADER: &str = "x-limit-elements-per-property-remaining";
const ELEMENTS_LIMIT_HEADER: &str = "x-limit-elements-per-property-limit";
const NESTED_RULES_REMAINING_HEADER: &str = "x-limit-max-nested-rules-per-include-remaining";
const NESTED_RULES_LIMIT_HEADER: &str = "x-limit-max-nested-rules-per-include-limit";

/// Body of a rule tree update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulesUpdate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
    pub rules: Value,
}

impl Default for RulesUpdate {
    fn default() -> Self {
        Self {
            comments: String::new(),
            rules: Value::Null,
        }
    }
}

impl RulesUpdate {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        match self.rules.as_object() {
            Some(root) => {
                let name = root.get("name").and_then(Value::as_str).unwrap_or_default();
                Validator::new()
                    .nested("Rules", Validator::new().field("Name", [required(name)]).finish())
                    .finish()
            }
            None => Validator::new()
                .field("Rules", [check(false, "must be a JSON object")])
                .finish(),
        }
    }
}

/// An error or warning reported against a rule tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleIssue {
    #[serde(rename = "type", default)]
    pub issue_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub behavior_name: String,
    #[serde(default)]
    pub error_location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_rule_format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suggested_rule_format: String,
}

fn rules_query(contract_id: &str, group_id: &str, validate_mode: &str, validate_rules: bool) -> Query {
    Query::new()
        .text("contractId", contract_id)
        .text("groupId", group_id)
        .text("validateMode", validate_mode)
        .flag_if_false("validateRules", validate_rules)
}

fn with_rule_format(parts: RequestParts, rule_format: &str) -> RequestParts {
    if rule_format.is_empty() {
        parts
    } else {
        parts.header(
            "Accept",
            format!("application/vnd.akamai.papirules.{rule_format}+json"),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRuleTreeRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
    pub validate_mode: String,
    pub validate_rules: bool,
    pub rule_format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRuleTreeResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_version: i64,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default)]
    pub rules: Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
}

impl Endpoint for GetRuleTreeRequest {
    type Response = GetRuleTreeResponse;
    const OPERATION: &'static str = "fetching rule tree";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
            .field("ValidateMode", [one_of(&self.validate_mode, &VALIDATE_MODES)])
            .field("RuleFormat", [validate_rule_format(&self.rule_format)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        let parts = RequestParts::get(format!(
            "/papi/v1/properties/{}/versions/{}/rules",
            self.property_id, self.property_version
        ))
        .query(rules_query(
            &self.contract_id,
            &self.group_id,
            &self.validate_mode,
            self.validate_rules,
        ));
        Ok(with_rule_format(parts, &self.rule_format))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRulesRequest {
    pub property_id: String,
    pub property_version: i64,
    pub contract_id: String,
    pub group_id: String,
    pub dry_run: bool,
    pub validate_mode: String,
    pub validate_rules: bool,
    pub rules: RulesUpdate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRulesResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub property_version: i64,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default)]
    pub rules: Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default)]
    pub errors: Vec<RuleIssue>,
    #[serde(default)]
    pub warnings: Vec<RuleIssue>,
}

impl Endpoint for UpdateRulesRequest {
    type Response = UpdateRulesResponse;
    const OPERATION: &'static str = "updating rule tree";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("PropertyVersion", [required(&self.property_version)])
            .field("ValidateMode", [one_of(&self.validate_mode, &VALIDATE_MODES)])
            .nested("Rules", self.rules.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::put(format!(
            "/papi/v1/properties/{}/versions/{}/rules",
            self.property_id, self.property_version
        ))
        .query(
            rules_query(
                &self.contract_id,
                &self.group_id,
                &self.validate_mode,
                self.validate_rules,
            )
            .flag_if_true("dryRun", self.dry_run),
        )
        .json(Self::OPERATION, &self.rules)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeRuleTreeRequest {
    pub contract_id: String,
    pub group_id: String,
    pub include_id: String,
    pub include_version: i64,
    pub rule_format: String,
    pub validate_mode: String,
    pub validate_rules: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeRuleTree {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub include_id: String,
    #[serde(default)]
    pub include_name: String,
    #[serde(default)]
    pub include_type: Option<IncludeType>,
    #[serde(default)]
    pub include_version: i64,
    #[serde(default)]
    pub rule_format: String,
    #[serde(default)]
    pub rules: Value,
}

pub type GetIncludeRuleTreeResponse = IncludeRuleTree;

impl Endpoint for GetIncludeRuleTreeRequest {
    type Response = GetIncludeRuleTreeResponse;
    const OPERATION: &'static str = "fetching include rule tree";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("IncludeID", [required(&self.include_id)])
            .field("IncludeVersion", [required(&self.include_version)])
            .field("RuleFormat", [validate_rule_format(&self.rule_format)])
            .field("ValidateMode", [one_of(&self.validate_mode, &VALIDATE_MODES)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        let parts = RequestParts::get(format!(
            "/papi/v1/includes/{}/versions/{}/rules",
            self.include_id, self.include_version
        ))
        .query(rules_query(
            &self.contract_id,
            &self.group_id,
            &self.validate_mode,
            self.validate_rules,
        ));
        Ok(with_rule_format(parts, &self.rule_format))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIncludeRuleTreeRequest {
    pub contract_id: String,
    pub group_id: String,
    pub include_id: String,
    pub include_version: i64,
    pub dry_run: bool,
    pub validate_mode: String,
    pub validate_rules: bool,
    pub rules: RulesUpdate,
}

/// Rule tree quotas reported on include updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeRuleLimits {
    pub elements_per_property_remaining: String,
    pub elements_per_property_total: String,
    pub max_nested_rules_per_include_remaining: String,
    pub max_nested_rules_per_include_total: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIncludeRuleTreeResponse {
    pub tree: IncludeRuleTree,
    pub limits: IncludeRuleLimits,
}

impl Endpoint for UpdateIncludeRuleTreeRequest {
    type Response = UpdateIncludeRuleTreeResponse;
    const OPERATION: &'static str = "updating include rule tree";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("IncludeID", [required(&self.include_id)])
            .field("IncludeVersion", [required(&self.include_version)])
            .nested("Rules", self.rules.validate())
            .field("ValidateMode", [one_of(&self.validate_mode, &VALIDATE_MODES)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::put(format!(
            "/papi/v1/includes/{}/versions/{}/rules",
            self.include_id, self.include_version
        ))
        .query(
            rules_query(
                &self.contract_id,
                &self.group_id,
                &self.validate_mode,
                self.validate_rules,
            )
            .flag_if_true("dryRun", self.dry_run),
        )
        .json(Self::OPERATION, &self.rules)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let tree: IncludeRuleTree = decode_status(Self::OPERATION, &response, 200)?;
        let header = |name| response.header(name).unwrap_or_default().to_string();
        Ok(UpdateIncludeRuleTreeResponse {
            tree,
            limits: IncludeRuleLimits {
                elements_per_property_remaining: header(ELEMENTS_REMAINING_HEADER),
                elements_per_property_total: header(ELEMENTS_LIMIT_HEADER),
                max_nested_rules_per_include_remaining: header(NESTED_RULES_REMAINING_HEADER),
                max_nested_rules_per_include_total: header(NESTED_RULES_LIMIT_HEADER),
            },
        })
    }
}
