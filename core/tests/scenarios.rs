//! End-to-end scenarios with canned transports.
//!
//! Each test wires a closure transport returning a fixed response into
//! `Papi` and checks the typed outcome a caller would see.

use papi_core::activations::GetActivationRequest;
use papi_core::cpcodes::{CreateCpCode, CreateCpCodeRequest, GetCpCodesRequest};
use papi_core::hostname_activations::CancelPropertyHostnameActivationRequest;
use papi_core::{
    ActivationNetwork, ActivationStatus, ApiError, ClientConfig, Error, HttpMethod, HttpRequest,
    HttpResponse, Papi, TransportError,
};

const BASE_URL: &str = "https://akab-scenarios.luna.akamaiapis.net";

fn papi<F>(respond: F) -> Papi<F>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    Papi::new(ClientConfig::new(BASE_URL), respond)
}

fn create_cp_code() -> CreateCpCodeRequest {
    CreateCpCodeRequest {
        contract_id: "contract".to_string(),
        group_id: "group".to_string(),
        cp_code: CreateCpCode {
            product_id: "product".to_string(),
            cp_code_name: "example.com".to_string(),
        },
    }
}

const ACTIVATION_BODY: &str = r#"{
    "accountId": "act_1-1TJZFB",
    "contractId": "ctr_1-1TJZFW",
    "groupId": "grp_15166",
    "activations": {
        "items": [{
            "activationId": "atv_67037",
            "propertyName": "example.com",
            "propertyId": "prp_173136",
            "propertyVersion": 1,
            "network": "STAGING",
            "activationType": "ACTIVATE",
            "status": "PENDING",
            "submitDate": "2014-03-02T02:22:12Z",
            "updateDate": "2014-03-01T21:12:57Z",
            "note": "Sample activation",
            "fmaActivationState": "steady",
            "notifyEmails": ["you@example.com"],
            "fallbackInfo": {
                "fastFallbackAttempted": false,
                "fallbackVersion": 10,
                "canFastFallback": true,
                "steadyStateTime": 1506448172,
                "fastFallbackExpirationTime": 1506451772,
                "fastFallbackRecoveryState": null
            }
        }]
    }
}"#;

#[test]
fn poll_pending_activation() {
    let papi = papi(|req: &HttpRequest| {
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            format!("{BASE_URL}/papi/v1/properties/prp_173136/activations/atv_67037?contractId=ctr_1-1TJZFW&groupId=grp_15166")
        );
        Ok(HttpResponse::new(200, ACTIVATION_BODY).with_header("Retry-After", "60"))
    });

    let resp = papi
        .get_activation(&GetActivationRequest {
            property_id: "prp_173136".to_string(),
            activation_id: "atv_67037".to_string(),
            contract_id: "ctr_1-1TJZFW".to_string(),
            group_id: "grp_15166".to_string(),
        })
        .unwrap();

    assert_eq!(resp.activations.items.len(), 1);
    assert_eq!(resp.activation, resp.activations.items[0]);
    assert_eq!(resp.activation.status, Some(ActivationStatus::Pending));
    assert!(!resp.activation.status.unwrap().is_terminal());
    assert_eq!(resp.activation.network, Some(ActivationNetwork::Staging));
    assert!(resp.activation.fallback_info.as_ref().unwrap().can_fast_fallback);
    assert_eq!(resp.retry_after, Some(60));
}

#[test]
fn server_error_is_normalized() {
    let papi = papi(|_: &HttpRequest| {
        Ok(HttpResponse::new(
            500,
            r#"{
                "type": "internal_error",
                "title": "Internal Server Error",
                "detail": "Error fetching activation",
                "status": 500
            }"#,
        ))
    });

    let err = papi
        .get_activation(&GetActivationRequest {
            property_id: "prp_175780".to_string(),
            activation_id: "atv_1696855".to_string(),
            contract_id: "ctr_1-1TJZFW".to_string(),
            group_id: "grp_15166".to_string(),
        })
        .unwrap_err();

    assert_eq!(err.operation(), "fetching activation");
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.api_error(),
        Some(
            &ApiError::new(500)
                .with_type("internal_error")
                .with_title("Internal Server Error")
                .with_detail("Error fetching activation")
        )
    );
    assert!(!err.is_not_found());
    assert!(err.to_string().starts_with("fetching activation: API error: \n"));
}

#[test]
fn undecodable_error_body_keeps_raw_text() {
    let papi = papi(|_: &HttpRequest| Ok(HttpResponse::new(502, "<html>bad gateway</html>")));

    let err = papi.create_cp_code(&create_cp_code()).unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 502);
    assert_eq!(api.detail, "<html>bad gateway</html>");
    assert!(api.title.starts_with("Failed to unmarshal error body."));
}

#[test]
fn create_cp_code_returns_link_identifier() {
    let papi = papi(|req: &HttpRequest| {
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"productId":"product","cpcodeName":"example.com"}"#)
        );
        Ok(HttpResponse::new(
            201,
            r#"{"cpcodeLink": "/papi/v1/cpcodes/123?contractId=contract-1TJZFW&groupId=group"}"#,
        ))
    });

    let created = papi.create_cp_code(&create_cp_code()).unwrap();

    assert_eq!(created.cp_code_id, "123");
    assert_eq!(
        created.cp_code_link,
        "/papi/v1/cpcodes/123?contractId=contract-1TJZFW&groupId=group"
    );
}

#[test]
fn malformed_link_is_rejected() {
    let papi = papi(|_: &HttpRequest| Ok(HttpResponse::new(201, r#"{"cpcodeLink": ":"}"#)));

    let err = papi.create_cp_code(&create_cp_code()).unwrap_err();

    assert!(err.is_invalid_response_link());
    assert_eq!(err.operation(), "creating CP code");
}

#[test]
fn finished_hostname_activation_cannot_be_canceled() {
    let papi = papi(|req: &HttpRequest| {
        assert_eq!(req.method, HttpMethod::Delete);
        Ok(HttpResponse::new(204, ""))
    });

    let err = papi
        .cancel_property_hostname_activation(&CancelPropertyHostnameActivationRequest {
            property_id: "prp_1".to_string(),
            hostname_activation_id: "atv_1".to_string(),
            contract_id: "ctr_1".to_string(),
            group_id: "grp_1".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, Error::ActivationAlreadyAborted { .. }));
    assert!(err.is_activation_already_aborted());
    assert_eq!(err.status_code(), Some(204));
    assert_eq!(
        err.to_string(),
        "canceling hostname activation: activation already aborted"
    );
}

#[test]
fn cancelled_transport_is_reported() {
    let papi = papi(|_: &HttpRequest| Err(TransportError::Cancelled));

    let err = papi
        .get_cp_codes(&GetCpCodesRequest {
            contract_id: "ctr_1".to_string(),
            group_id: "grp_1".to_string(),
        })
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.status_code(), None);
    assert_eq!(err.operation(), "fetching CP codes");
}
