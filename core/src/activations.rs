//! Property activations.
//!
//! Activating or deactivating a version is asynchronous on the server: the
//! create call returns an identifier right away and the caller polls
//! [`GetActivationRequest`] until the status is terminal. A pending
//! activation can be canceled with [`CancelActivationRequest`].

use serde::{Deserialize, Serialize};

use crate::compliance::{validate_record, ComplianceRecord};
use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode_status, link_id, single};
use crate::types::{is_false, ActivationNetwork, ActivationStatus, ActivationType, Items};
use crate::validate::{required, ValidationErrors, Validator};

/// Fast fallback state of an activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationFallbackInfo {
    #[serde(default)]
    pub fast_fallback_attempted: bool,
    #[serde(default)]
    pub fallback_version: i64,
    #[serde(default)]
    pub can_fast_fallback: bool,
    #[serde(default)]
    pub steady_state_time: i64,
    #[serde(default)]
    pub fast_fallback_expiration_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_fallback_recovery_state: Option<String>,
}

/// A property activation, both as submitted and as reported back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub activation_id: String,
    #[serde(default)]
    pub activation_type: ActivationType,
    #[serde(default)]
    pub use_fast_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_info: Option<ActivationFallbackInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acknowledge_warnings: Vec<String>,
    #[serde(default)]
    pub acknowledge_all_warnings: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fast_push: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fma_activation_state: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore_http_errors: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub property_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub property_id: String,
    #[serde(default)]
    pub property_version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<ActivationNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivationStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub submit_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default)]
    pub notify_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_record: Option<ComplianceRecord>,
}

impl Activation {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let validator = Validator::new()
            .field("PropertyVersion", [required(&self.property_version)])
            .field("Network", [required(&self.network)])
            .field("NotifyEmails", [required(&self.notify_emails)]);
        validate_record(validator, self.network, self.compliance_record.as_ref(), true).finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateActivationRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub activation: Activation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateActivationResponse {
    pub activation_id: String,
    pub activation_link: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivationLink {
    activation_link: String,
}

impl Endpoint for CreateActivationRequest {
    type Response = CreateActivationResponse;
    const OPERATION: &'static str = "creating activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .nested("Activation", self.activation.validate())
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::post(format!("/papi/v1/properties/{}/activations", self.property_id))
            .query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            )
            .json(Self::OPERATION, &self.activation)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let body: ActivationLink = decode_status(Self::OPERATION, &response, 201)?;
        Ok(CreateActivationResponse {
            activation_id: link_id(Self::OPERATION, &body.activation_link)?,
            activation_link: body.activation_link,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetActivationsRequest {
    pub property_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActivationsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub activations: Items<Activation>,
}

impl Endpoint for GetActivationsRequest {
    type Response = GetActivationsResponse;
    const OPERATION: &'static str = "fetching activations";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/properties/{}/activations", self.property_id)).query(
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetActivationRequest {
    pub property_id: String,
    pub activation_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetActivationResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub activations: Items<Activation>,
    /// The single activation asked for.
    pub activation: Activation,
    /// Seconds until the status is likely to change, from `Retry-After`.
    pub retry_after: Option<u64>,
}

impl GetActivationResponse {
    fn new(list: GetActivationsResponse, activation: Activation, retry_after: Option<u64>) -> Self {
        Self {
            account_id: list.account_id,
            contract_id: list.contract_id,
            group_id: list.group_id,
            activations: list.activations,
            activation,
            retry_after,
        }
    }
}

impl Endpoint for GetActivationRequest {
    type Response = GetActivationResponse;
    const OPERATION: &'static str = "fetching activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("ActivationID", [required(&self.activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get(format!(
            "/papi/v1/properties/{}/activations/{}",
            self.property_id, self.activation_id
        ))
        .query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let list: GetActivationsResponse = decode_status(Self::OPERATION, &response, 200)?;
        let activation = single(
            Self::OPERATION,
            &list.activations.items,
            format_args!("ActivationID: {}", self.activation_id),
        )?;
        let retry_after = response
            .header("Retry-After")
            .and_then(|value| value.trim().parse().ok());
        Ok(GetActivationResponse::new(list, activation, retry_after))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelActivationRequest {
    pub property_id: String,
    pub activation_id: String,
    pub contract_id: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelActivationResponse {
    #[serde(default)]
    pub activations: Items<Activation>,
}

impl Endpoint for CancelActivationRequest {
    type Response = CancelActivationResponse;
    const OPERATION: &'static str = "canceling activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("PropertyID", [required(&self.property_id)])
            .field("ActivationID", [required(&self.activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::delete(format!(
            "/papi/v1/properties/{}/activations/{}",
            self.property_id, self.activation_id
        ))
        .query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}
