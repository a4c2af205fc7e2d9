//! Error types for the PAPI client.
//!
//! # Design
//! [`Error`] is returned by every operation and always names the operation
//! that failed (`"fetching activation: ..."`). The underlying cause stays
//! reachable through `source()` and through the typed accessors, so callers
//! branch on [`ErrorCategory`] instead of matching message text.
//!
//! Non-2xx responses are normalized into [`ApiError`], which carries the
//! transport-observed status code even when the body is not JSON. Include
//! activation validation failures use the separately shaped
//! [`ActivationError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{HttpResponse, TransportError};
use crate::link::LinkError;
use crate::validate::ValidationErrors;

/// Category URI the API uses when secure-by-default is not enabled.
pub const SBD_NOT_ENABLED_TYPE: &str =
    "https://problems.luna.akamaiapis.net/papi/v0/property-version-hostname/default-cert-provisioning-unavailable";

/// Rate-limit key for the per-contract DEFAULT certificate quota.
pub const DEFAULT_CERTS_LIMIT_KEY: &str = "DEFAULT_CERTS_PER_CONTRACT";

/// `messageId` of an include activation rejected for lack of a compliance
/// record.
pub const MISSING_COMPLIANCE_RECORD_MESSAGE_ID: &str = "missing_compliance_record";

const UNMARSHAL_TITLE: &str =
    "Failed to unmarshal error body. PAPI API failed. Check details for more information.";

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 403 with the secure-by-default category URI.
    SbdNotEnabled,
    /// 429 on the DEFAULT certificate quota with nothing remaining.
    DefaultCertLimitReached,
    /// Any 404, or a lookup that returned no items.
    NotFound,
    /// 400 when an activation can no longer be canceled.
    ActivationTooFar,
    /// 422 when the version is already active.
    ActivationAlreadyActive,
    /// Include activation rejected for a missing compliance record.
    MissingComplianceRecord,
    /// 204 on a hostname activation cancel.
    ActivationAlreadyAborted,
    ClientValidation,
    Transport,
    Other,
}

/// Normalized problem-details body of a non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub behavior_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_location: String,
    /// Status observed by the transport; the body's own `status` is ignored.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub limit_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
}

fn is_zero(value: &u16) -> bool {
    *value == 0
}

impl ApiError {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    pub fn with_limit(mut self, limit_key: impl Into<String>, limit: i64, remaining: i64) -> Self {
        self.limit_key = limit_key.into();
        self.limit = Some(limit);
        self.remaining = Some(remaining);
        self
    }

    /// Normalize a non-2xx response. Never fails: bodies that are not a
    /// problem document become a synthesized error carrying the raw body.
    pub fn from_response(response: &HttpResponse) -> Self {
        let mut error = match serde_json::from_str::<ApiError>(&response.body) {
            Ok(error) => error,
            Err(err) => {
                tracing::error!(status = response.status, error = %err, "could not unmarshal API error");
                ApiError {
                    title: UNMARSHAL_TITLE.to_string(),
                    detail: response.body.clone(),
                    ..ApiError::default()
                }
            }
        };
        error.status_code = response.status;
        error
    }

    pub fn category(&self) -> ErrorCategory {
        if self.is_sbd_not_enabled() {
            ErrorCategory::SbdNotEnabled
        } else if self.is_default_cert_limit_reached() {
            ErrorCategory::DefaultCertLimitReached
        } else if self.is_not_found() {
            ErrorCategory::NotFound
        } else if self.is_activation_too_far() {
            ErrorCategory::ActivationTooFar
        } else if self.is_activation_already_active() {
            ErrorCategory::ActivationAlreadyActive
        } else {
            ErrorCategory::Other
        }
    }

    pub fn is_sbd_not_enabled(&self) -> bool {
        self.status_code == 403 && self.error_type == SBD_NOT_ENABLED_TYPE
    }

    pub fn is_default_cert_limit_reached(&self) -> bool {
        self.status_code == 429
            && self.limit_key == DEFAULT_CERTS_LIMIT_KEY
            && self.remaining == Some(0)
    }

    /// Any 404, whichever resource the server could not find.
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    pub fn is_activation_too_far(&self) -> bool {
        self.status_code == 400
            && self.title == "Error canceling Activation"
            && self.detail == "cancellation_failed.error.activation.toofar"
    }

    pub fn is_activation_already_active(&self) -> bool {
        self.status_code == 422 && self.title == "Activation Unprocessable"
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_tab_indented_json(self) {
            Ok(body) => write!(f, "API error: \n{body}"),
            Err(err) => write!(f, "error marshaling API error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Equal when the status code and the rendered message match.
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.status_code == other.status_code && self.to_string() == other.to_string()
    }
}

/// Include activation failure body, keyed by `messageId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationError {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub errors: Vec<ActivationErrorMessage>,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationErrorMessage {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl ActivationError {
    pub fn is_missing_compliance_record(&self) -> bool {
        self.message_id == MISSING_COMPLIANCE_RECORD_MESSAGE_ID
    }

    pub fn category(&self) -> ErrorCategory {
        if self.is_missing_compliance_record() {
            ErrorCategory::MissingComplianceRecord
        } else {
            ErrorCategory::Other
        }
    }
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_tab_indented_json(self) {
            Ok(body) => write!(f, "API error: \n{body}"),
            Err(err) => write!(f, "error marshaling API error: {err}"),
        }
    }
}

impl std::error::Error for ActivationError {}

impl PartialEq for ActivationError {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.to_string() == other.to_string()
    }
}

fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Error returned by every PAPI operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed client-side validation and was not sent.
    #[error("{op}: struct validation: {source}")]
    Validation {
        op: &'static str,
        #[source]
        source: ValidationErrors,
    },

    #[error("{op}: request failed: {source}")]
    Transport {
        op: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{op}: failed to encode request body: {source}")]
    Encode {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx body did not match the expected shape.
    #[error("{op}: failed to decode response: {source}")]
    Decode {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{op}: {source}")]
    Api {
        op: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("{op}: {source}")]
    Activation {
        op: &'static str,
        #[source]
        source: ActivationError,
    },

    /// A lookup by identifier returned an empty list.
    #[error("{op}: resource not found: {resource}")]
    NotFound { op: &'static str, resource: String },

    #[error("{op}: invalid response link: {source}")]
    InvalidResponseLink {
        op: &'static str,
        #[source]
        source: LinkError,
    },

    #[error("{op}: activation already aborted")]
    ActivationAlreadyAborted { op: &'static str },

    #[error("{op}: no such property: {name}")]
    NoProperty { op: &'static str, name: String },
}

impl Error {
    /// Short phrase naming the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Error::Validation { op, .. }
            | Error::Transport { op, .. }
            | Error::Encode { op, .. }
            | Error::Decode { op, .. }
            | Error::Api { op, .. }
            | Error::Activation { op, .. }
            | Error::NotFound { op, .. }
            | Error::InvalidResponseLink { op, .. }
            | Error::ActivationAlreadyAborted { op }
            | Error::NoProperty { op, .. } => op,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Api { source, .. } => source.category(),
            Error::Activation { source, .. } => source.category(),
            Error::NotFound { .. } | Error::NoProperty { .. } => ErrorCategory::NotFound,
            Error::ActivationAlreadyAborted { .. } => ErrorCategory::ActivationAlreadyAborted,
            Error::Validation { .. } => ErrorCategory::ClientValidation,
            Error::Transport { .. } => ErrorCategory::Transport,
            Error::Encode { .. } | Error::Decode { .. } | Error::InvalidResponseLink { .. } => {
                ErrorCategory::Other
            }
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn activation_error(&self) -> Option<&ActivationError> {
        match self {
            Error::Activation { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Status code of the response that caused the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { source, .. } => Some(source.status_code),
            Error::Activation { source, .. } => Some(source.status),
            Error::ActivationAlreadyAborted { .. } => Some(204),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    pub fn is_sbd_not_enabled(&self) -> bool {
        self.category() == ErrorCategory::SbdNotEnabled
    }

    pub fn is_default_cert_limit_reached(&self) -> bool {
        self.category() == ErrorCategory::DefaultCertLimitReached
    }

    pub fn is_activation_too_far(&self) -> bool {
        self.category() == ErrorCategory::ActivationTooFar
    }

    pub fn is_activation_already_active(&self) -> bool {
        self.category() == ErrorCategory::ActivationAlreadyActive
    }

    pub fn is_activation_already_aborted(&self) -> bool {
        self.category() == ErrorCategory::ActivationAlreadyAborted
    }

    pub fn is_missing_compliance_record(&self) -> bool {
        self.category() == ErrorCategory::MissingComplianceRecord
    }

    pub fn is_invalid_response_link(&self) -> bool {
        matches!(self, Error::InvalidResponseLink { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport {
                source: TransportError::Cancelled,
                ..
            }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
