//! Include activations.
//!
//! Activation and deactivation share one endpoint; the body's
//! `activationType` selects which. Failures that carry a `messageId` are
//! decoded as [`ActivationError`](crate::error::ActivationError).

use serde::{Deserialize, Serialize};

use crate::activations::ActivationFallbackInfo;
use crate::compliance::{validate_record, ComplianceRecord};
use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::{decode, include_activation_failure, link_id, single};
use crate::types::{ActivationNetwork, ActivationStatus, ActivationType, IncludeType, Items};
use crate::validate::{required, ValidationErrors, Validator};

/// Parameters shared by include activation and deactivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncludeActivationRequest {
    pub include_id: String,
    pub version: i64,
    pub network: Option<ActivationNetwork>,
    pub note: String,
    pub notify_emails: Vec<String>,
    pub acknowledge_warnings: Vec<String>,
    pub acknowledge_all_warnings: bool,
    /// Sent as `true` when unset.
    pub ignore_http_errors: Option<bool>,
    pub compliance_record: Option<ComplianceRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IncludeActivationBody<'a> {
    include_version: i64,
    network: Option<ActivationNetwork>,
    note: &'a str,
    notify_emails: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    acknowledge_warnings: &'a [String],
    acknowledge_all_warnings: bool,
    ignore_http_errors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    compliance_record: Option<&'a ComplianceRecord>,
    activation_type: ActivationType,
}

impl IncludeActivationRequest {
    fn validator(&self) -> Validator {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("Version", [required(&self.version)])
            .field("Network", [required(&self.network)])
            .field("NotifyEmails", [required(&self.notify_emails)])
    }

    fn post(&self, op: &'static str, activation_type: ActivationType) -> Result<RequestParts> {
        let body = IncludeActivationBody {
            include_version: self.version,
            network: self.network,
            note: &self.note,
            notify_emails: &self.notify_emails,
            acknowledge_warnings: &self.acknowledge_warnings,
            acknowledge_all_warnings: self.acknowledge_all_warnings,
            ignore_http_errors: self.ignore_http_errors.unwrap_or(true),
            compliance_record: self.compliance_record.as_ref(),
            activation_type,
        };
        RequestParts::post(format!("/papi/v1/includes/{}/activations", self.include_id))
            .json(op, &body)
    }
}

/// Decode a success body, or classify the failure.
fn decode_include<T: serde::de::DeserializeOwned>(
    op: &'static str,
    response: &HttpResponse,
    expected: u16,
) -> Result<T> {
    if response.status != expected {
        return Err(include_activation_failure(op, response));
    }
    decode(op, response)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivationLink {
    activation_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeActivationLink {
    pub activation_id: String,
    pub activation_link: String,
}

fn activation_link(op: &'static str, response: &HttpResponse) -> Result<IncludeActivationLink> {
    let body: ActivationLink = decode_include(op, response, 201)?;
    Ok(IncludeActivationLink {
        activation_id: link_id(op, &body.activation_link)?,
        activation_link: body.activation_link,
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivateIncludeRequest(pub IncludeActivationRequest);

impl Endpoint for ActivateIncludeRequest {
    type Response = IncludeActivationLink;
    const OPERATION: &'static str = "activate include";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let request = &self.0;
        validate_record(
            request.validator(),
            request.network,
            request.compliance_record.as_ref(),
            true,
        )
        .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        self.0.post(Self::OPERATION, ActivationType::Activate)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        activation_link(Self::OPERATION, &response)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeactivateIncludeRequest(pub IncludeActivationRequest);

impl Endpoint for DeactivateIncludeRequest {
    type Response = IncludeActivationLink;
    const OPERATION: &'static str = "deactivate include";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.0.validator().finish()
    }

    fn request(&self) -> Result<RequestParts> {
        self.0.post(Self::OPERATION, ActivationType::Deactivate)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        activation_link(Self::OPERATION, &response)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeActivation {
    #[serde(default)]
    pub activation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<ActivationNetwork>,
    #[serde(default)]
    pub activation_type: ActivationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivationStatus>,
    #[serde(default)]
    pub submit_date: String,
    #[serde(default)]
    pub update_date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub notify_emails: Vec<String>,
    #[serde(default)]
    pub fma_activation_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_info: Option<ActivationFallbackInfo>,
    #[serde(default)]
    pub include_id: String,
    #[serde(default)]
    pub include_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_type: Option<IncludeType>,
    #[serde(default)]
    pub include_version: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub include_activation_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIncludeActivationsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub activations: Items<IncludeActivation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelIncludeActivationRequest {
    pub include_id: String,
    pub activation_id: String,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for CancelIncludeActivationRequest {
    type Response = ListIncludeActivationsResponse;
    const OPERATION: &'static str = "cancel include activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .field("IncludeID", [required(&self.include_id)])
            .field("ActivationID", [required(&self.activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::delete(format!(
            "/papi/v1/includes/{}/activations/{}",
            self.include_id, self.activation_id
        ))
        .query(
            Query::new()
                .text("contractId", &self.contract_id)
                .text("groupId", &self.group_id),
        ))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_include(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    #[serde(default)]
    pub complete_percent: f64,
    #[serde(default)]
    pub has_validation_error: bool,
    #[serde(default)]
    pub has_validation_warning: bool,
    #[serde(default)]
    pub has_system_error: bool,
    #[serde(default)]
    pub has_client_error: bool,
    #[serde(default)]
    pub message_state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorItem {
    #[serde(default)]
    pub version_id: i64,
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub version_number: i64,
    #[serde(default)]
    pub has_validation_error: bool,
    #[serde(default)]
    pub has_validation_warning: bool,
    #[serde(default)]
    pub validation_results_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProgress {
    #[serde(rename = "errorItemsList", default)]
    pub error_items: Vec<ErrorItem>,
}

/// Progress of the server-side checks on the properties using an include.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validations {
    #[serde(default)]
    pub validation_summary: ValidationSummary,
    #[serde(rename = "validationProgressItemList", default)]
    pub validation_progress: ValidationProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<ActivationNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncludeActivationEnvelope {
    #[serde(default)]
    account_id: String,
    #[serde(default)]
    contract_id: String,
    #[serde(default)]
    group_id: String,
    #[serde(default)]
    activations: Items<IncludeActivation>,
    #[serde(default)]
    validations: Option<Validations>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIncludeActivationResponse {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub activations: Items<IncludeActivation>,
    pub validations: Option<Validations>,
    pub activation: IncludeActivation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIncludeActivationRequest {
    pub include_id: String,
    pub activation_id: String,
}

impl Endpoint for GetIncludeActivationRequest {
    type Response = GetIncludeActivationResponse;
    const OPERATION: &'static str = "get include activation";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("ActivationID", [required(&self.activation_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get(format!(
            "/papi/v1/includes/{}/activations/{}",
            self.include_id, self.activation_id
        )))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        let envelope: IncludeActivationEnvelope = decode_include(Self::OPERATION, &response, 200)?;
        let activation = single(
            Self::OPERATION,
            &envelope.activations.items,
            format_args!("ActivationID: {}", self.activation_id),
        )?;
        Ok(GetIncludeActivationResponse {
            account_id: envelope.account_id,
            contract_id: envelope.contract_id,
            group_id: envelope.group_id,
            activations: envelope.activations,
            validations: envelope.validations,
            activation,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncludeActivationsRequest {
    pub include_id: String,
    pub contract_id: String,
    pub group_id: String,
}

impl Endpoint for ListIncludeActivationsRequest {
    type Response = ListIncludeActivationsResponse;
    const OPERATION: &'static str = "list include activations";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("IncludeID", [required(&self.include_id)])
            .field("ContractID", [required(&self.contract_id)])
            .field("GroupID", [required(&self.group_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(
            RequestParts::get(format!("/papi/v1/includes/{}/activations", self.include_id)).query(
                Query::new()
                    .text("contractId", &self.contract_id)
                    .text("groupId", &self.group_id),
            ),
        )
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_include(Self::OPERATION, &response, 200)
    }
}
