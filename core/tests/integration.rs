//! Lifecycle tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Papi` over real
//! HTTP through a ureq-backed `Transport`. Validates that request building
//! and response parsing agree with the server end-to-end.

use papi_core::activations::{
    Activation, CancelActivationRequest, CreateActivationRequest, GetActivationRequest,
};
use papi_core::compliance::COMPLIANCE_RECORD_REQUIRED;
use papi_core::contracts::GetContractsRequest;
use papi_core::cpcodes::{CreateCpCode, CreateCpCodeRequest, GetCpCodeRequest, GetCpCodesRequest};
use papi_core::groups::GetGroupsRequest;
use papi_core::hostname_activations::CancelPropertyHostnameActivationRequest;
use papi_core::properties::{
    CreatePropertyRequest, GetPropertyRequest, MapPropertyIdToNameRequest,
    MapPropertyNameToIdRequest, PropertyCreate, RemovePropertyRequest,
};
use papi_core::{
    ActivationNetwork, ActivationStatus, ClientConfig, Error, ErrorCategory, HttpMethod,
    HttpRequest, HttpResponse, Papi, Transport, TransportError,
};
use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;

/// Executes requests with ureq.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as data
/// and the core interprets them.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn without_body(
    builder: RequestBuilder<WithoutBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    with_headers(builder, request).call()
}

fn with_body(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = with_headers(builder, request);
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.path.as_str();
        let result = match request.method {
            HttpMethod::Get => without_body(self.agent.get(url), request),
            HttpMethod::Delete => without_body(self.agent.delete(url), request),
            HttpMethod::Post => with_body(self.agent.post(url), request),
            HttpMethod::Put => with_body(self.agent.put(url), request),
            HttpMethod::Patch => with_body(self.agent.patch(url), request),
        };
        let mut response = result.map_err(|err| match err {
            ureq::Error::Timeout(_) => TransportError::Timeout,
            other => TransportError::other(other),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn papi() -> Papi<UreqTransport> {
    Papi::new(ClientConfig::new(&start_server()), UreqTransport::new())
}

#[test]
fn property_lifecycle() {
    let papi = papi();

    // Step 1: discover the contract and group.
    let contracts = papi.get_contracts(&GetContractsRequest).unwrap();
    let contract_id = contracts.contracts.items[0].contract_id.clone();
    let groups = papi.get_groups(&GetGroupsRequest).unwrap();
    let group_id = groups.groups.items[0].group_id.clone();
    assert_eq!(groups.groups.items[0].contract_ids, vec![contract_id.clone()]);

    // Step 2: create a CP code and read it back.
    let created = papi
        .create_cp_code(&CreateCpCodeRequest {
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
            cp_code: CreateCpCode {
                product_id: "prd_Fresca".to_string(),
                cp_code_name: "integration".to_string(),
            },
        })
        .unwrap();
    let fetched = papi
        .get_cp_code(&GetCpCodeRequest {
            cp_code_id: created.cp_code_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(fetched.cp_code.name, "integration");
    assert_eq!(fetched.cp_code.product_ids, vec!["prd_Fresca".to_string()]);

    let listed = papi
        .get_cp_codes(&GetCpCodesRequest {
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(listed.cp_codes.items.len(), 1);

    // Step 3: create a property and look it up both ways.
    let property = papi
        .create_property(&CreatePropertyRequest {
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
            property: PropertyCreate {
                clone_from: None,
                product_id: "prd_Fresca".to_string(),
                property_name: "www.example.com".to_string(),
                rule_format: "latest".to_string(),
            },
        })
        .unwrap();
    let property_id = property.property_id;
    let mapped = papi
        .map_property_name_to_id(&MapPropertyNameToIdRequest {
            name: "www.example.com".to_string(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(mapped, property_id);
    let name = papi
        .map_property_id_to_name(&MapPropertyIdToNameRequest {
            property_id: property_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(name, "www.example.com");

    // Step 4: activate on staging and poll once.
    let activation = papi
        .create_activation(&CreateActivationRequest {
            property_id: property_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
            activation: Activation {
                property_version: 1,
                network: Some(ActivationNetwork::Staging),
                notify_emails: vec!["ops@example.com".to_string()],
                ..Default::default()
            },
        })
        .unwrap();
    let status = papi
        .get_activation(&GetActivationRequest {
            property_id: property_id.clone(),
            activation_id: activation.activation_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(status.activation.status, Some(ActivationStatus::Pending));
    assert!(status.activation.fallback_info.as_ref().unwrap().can_fast_fallback);
    assert_eq!(status.retry_after, Some(30));

    // Step 5: cancel it.
    let canceled = papi
        .cancel_activation(&CancelActivationRequest {
            property_id: property_id.clone(),
            activation_id: activation.activation_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(
        canceled.activations.items[0].status,
        Some(ActivationStatus::Aborted)
    );

    // Step 6: production without a compliance record never leaves the client.
    let err = papi
        .create_activation(&CreateActivationRequest {
            property_id: property_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
            activation: Activation {
                property_version: 1,
                network: Some(ActivationNetwork::Production),
                notify_emails: vec!["ops@example.com".to_string()],
                ..Default::default()
            },
        })
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    let activation_errors = err.validation_errors().unwrap().nested("Activation").unwrap();
    assert_eq!(
        activation_errors.reason("ComplianceRecord"),
        Some(COMPLIANCE_RECORD_REQUIRED)
    );

    // Step 7: remove the property; it is gone afterwards.
    let removed = papi
        .remove_property(&RemovePropertyRequest {
            property_id: property_id.clone(),
            contract_id: contract_id.clone(),
            group_id: group_id.clone(),
        })
        .unwrap();
    assert_eq!(removed.message, "Deletion Successful.");
    let err = papi
        .get_property(&GetPropertyRequest {
            property_id: property_id.clone(),
            contract_id,
            group_id,
        })
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation(), "fetching property");
}

#[test]
fn cancel_finished_hostname_activation() {
    let papi = papi();
    let err = papi
        .cancel_property_hostname_activation(&CancelPropertyHostnameActivationRequest {
            property_id: "prp_1".to_string(),
            hostname_activation_id: "atv_1".to_string(),
            contract_id: "ctr_1-MOCK".to_string(),
            group_id: "grp_1".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::ActivationAlreadyAborted { .. }));
    assert_eq!(err.category(), ErrorCategory::ActivationAlreadyAborted);
}

#[test]
fn invalid_requests_never_reach_the_server() {
    let papi = papi();
    let err = papi.get_cp_codes(&GetCpCodesRequest::default()).unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["ContractID", "GroupID"]);
}

#[test]
fn server_problems_are_normalized() {
    let papi = papi();
    let err = papi
        .get_cp_code(&GetCpCodeRequest {
            cp_code_id: "cpc_404".to_string(),
            contract_id: "ctr_1-MOCK".to_string(),
            group_id: "grp_1".to_string(),
        })
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 404);
    assert_eq!(api.title, "Not Found");
    assert!(!api.instance.is_empty());
    assert!(err.is_not_found());
}
