//! Compliance records attached to production activations.
//!
//! A record is one of four kinds, each with its own fields. The
//! `noncomplianceReason` discriminator is written and read by serde from
//! the variant, so callers never set it themselves.

use serde::{Deserialize, Serialize};

use crate::types::ActivationNetwork;
use crate::validate::{check, required, required_when, with_message, ValidationErrors, Validator};

pub const COMPLIANCE_RECORD_REQUIRED: &str = "ComplianceRecord is required for production network";

pub const UNIT_TESTED_REQUIRED: &str = "for PRODUCTION activation network and nonComplianceRecord, UnitTested value has to be set to true, otherwise API will not work correctly";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "noncomplianceReason")]
pub enum ComplianceRecord {
    /// The change followed the regular review process.
    #[serde(rename = "NONE")]
    None(ComplianceRecordNone),
    #[serde(rename = "OTHER")]
    Other(ComplianceRecordOther),
    #[serde(rename = "NO_PRODUCTION_TRAFFIC")]
    NoProductionTraffic(ComplianceRecordTicket),
    #[serde(rename = "EMERGENCY")]
    Emergency(ComplianceRecordTicket),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecordNone {
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub peer_reviewed_by: String,
    #[serde(default)]
    pub unit_tested: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticket_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecordOther {
    #[serde(default)]
    pub other_noncompliance_reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticket_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecordTicket {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticket_id: String,
}

impl ComplianceRecord {
    /// The `noncomplianceReason` literal for this kind.
    pub fn reason(&self) -> &'static str {
        match self {
            ComplianceRecord::None(_) => "NONE",
            ComplianceRecord::Other(_) => "OTHER",
            ComplianceRecord::NoProductionTraffic(_) => "NO_PRODUCTION_TRAFFIC",
            ComplianceRecord::Emergency(_) => "EMERGENCY",
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            ComplianceRecord::None(record) => Validator::new()
                .field("CustomerEmail", [required(&record.customer_email)])
                .field("PeerReviewedBy", [required(&record.peer_reviewed_by)])
                .finish(),
            ComplianceRecord::Other(record) => Validator::new()
                .field(
                    "OtherNoncomplianceReason",
                    [required(&record.other_noncompliance_reason)],
                )
                .finish(),
            ComplianceRecord::NoProductionTraffic(_) | ComplianceRecord::Emergency(_) => Ok(()),
        }
    }
}

/// Adds the `ComplianceRecord` field rules of an activation request.
///
/// The record's own rules run first. On production, a `None` record must be
/// unit tested, and when `mandatory` a record must be present at all.
pub(crate) fn validate_record(
    validator: Validator,
    network: Option<ActivationNetwork>,
    record: Option<&ComplianceRecord>,
    mandatory: bool,
) -> Validator {
    let production = network == Some(ActivationNetwork::Production);
    match record {
        None => validator.field(
            "ComplianceRecord",
            [with_message(
                required_when(mandatory && production, &record),
                COMPLIANCE_RECORD_REQUIRED,
            )],
        ),
        Some(record) => match record.validate() {
            Err(errors) => validator.nested("ComplianceRecord", Err(errors)),
            Ok(()) => {
                let untested = matches!(record, ComplianceRecord::None(r) if !r.unit_tested);
                validator.field(
                    "ComplianceRecord",
                    [check(!(production && untested), UNIT_TESTED_REQUIRED)],
                )
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewed(unit_tested: bool) -> ComplianceRecord {
        ComplianceRecord::None(ComplianceRecordNone {
            customer_email: "sales@example.com".to_string(),
            peer_reviewed_by: "qa@example.com".to_string(),
            unit_tested,
            ticket_id: String::new(),
        })
    }

    #[test]
    fn discriminator_is_injected() {
        let json = serde_json::to_value(reviewed(true)).unwrap();
        assert_eq!(json["noncomplianceReason"], "NONE");
        assert_eq!(json["unitTested"], true);
        assert!(json.get("ticketId").is_none());

        let emergency = ComplianceRecord::Emergency(ComplianceRecordTicket {
            ticket_id: "T-1".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&emergency).unwrap(),
            serde_json::json!({"noncomplianceReason": "EMERGENCY", "ticketId": "T-1"})
        );
    }

    #[test]
    fn decodes_by_discriminator() {
        let record: ComplianceRecord = serde_json::from_str(
            r#"{"noncomplianceReason":"OTHER","otherNoncomplianceReason":"hotfix"}"#,
        )
        .unwrap();
        assert_eq!(record.reason(), "OTHER");
        assert!(matches!(record, ComplianceRecord::Other(ref r) if r.other_noncompliance_reason == "hotfix"));
    }

    #[test]
    fn variant_rules() {
        let err = ComplianceRecord::None(ComplianceRecordNone::default())
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "CustomerEmail: cannot be blank\nPeerReviewedBy: cannot be blank");
        let err = ComplianceRecord::Other(ComplianceRecordOther::default())
            .validate()
            .unwrap_err();
        assert_eq!(err.reason("OtherNoncomplianceReason"), Some("cannot be blank"));
    }

    #[test]
    fn production_requires_a_tested_record() {
        let production = Some(ActivationNetwork::Production);

        let err = validate_record(Validator::new(), production, None, true)
            .finish()
            .unwrap_err();
        assert_eq!(err.reason("ComplianceRecord"), Some(COMPLIANCE_RECORD_REQUIRED));

        let record = reviewed(false);
        let err = validate_record(Validator::new(), production, Some(&record), true)
            .finish()
            .unwrap_err();
        assert_eq!(err.reason("ComplianceRecord"), Some(UNIT_TESTED_REQUIRED));

        let record = reviewed(true);
        assert!(validate_record(Validator::new(), production, Some(&record), true)
            .finish()
            .is_ok());
    }

    #[test]
    fn staging_needs_no_record() {
        let staging = Some(ActivationNetwork::Staging);
        assert!(validate_record(Validator::new(), staging, None, true).finish().is_ok());
        let record = reviewed(false);
        assert!(validate_record(Validator::new(), staging, Some(&record), true)
            .finish()
            .is_ok());
    }
}
