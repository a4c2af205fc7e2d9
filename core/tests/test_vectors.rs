//! Verify build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Bodies are compared as parsed JSON
//! so field ordering does not matter.

use papi_core::activations::{Activation, CreateActivationRequest, GetActivationRequest};
use papi_core::cpcodes::{CreateCpCode, CreateCpCodeRequest};
use papi_core::{Endpoint, Error, HttpMethod, HttpRequest, HttpResponse, PapiClient};
use serde_json::Value;

const BASE_URL: &str = "https://akab-vectors.luna.akamaiapis.net";

fn client() -> PapiClient {
    PapiClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn text(value: &Value) -> String {
    value.as_str().unwrap().to_string()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| (text(&pair[0]), text(&pair[1])))
        .collect()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", text(&expected["path"])), "{name}: path");
    assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

fn response(case: &Value) -> HttpResponse {
    let resp = &case["response"];
    HttpResponse {
        status: resp["status"].as_u64().unwrap() as u16,
        headers: resp.get("headers").map(pairs).unwrap_or_default(),
        body: resp["body"].to_string(),
    }
}

fn assert_error(name: &str, op: &str, err: &Error, expected: &Value) {
    assert_eq!(err.operation(), op, "{name}: operation");
    assert_eq!(
        err.status_code().map(u64::from),
        expected["status"].as_u64(),
        "{name}: status"
    );
    assert_eq!(
        format!("{:?}", err.category()),
        text(&expected["category"]),
        "{name}: category"
    );
    let title = err.api_error().map(|api| api.title.as_str()).unwrap_or_default();
    assert_eq!(title, text(&expected["title"]), "{name}: title");
}

/// Build, check the request, then parse the simulated response.
fn run<E: Endpoint>(
    op: &str,
    case: &Value,
    endpoint: &E,
    check: impl FnOnce(&str, E::Response, &Value),
) {
    let name = text(&case["name"]);
    let c = client();

    let req = c.build(endpoint).unwrap();
    assert_request(&name, &req, &case["expected_request"]);

    match c.parse(endpoint, response(case)) {
        Ok(parsed) => check(&name, parsed, &case["expected"]),
        Err(err) => match case.get("expected_error") {
            Some(expected) => assert_error(&name, op, &err, expected),
            None => panic!("{name}: unexpected error: {err}"),
        },
    }
}

// ---------------------------------------------------------------------------
// CP codes
// ---------------------------------------------------------------------------

#[test]
fn create_cp_code_vectors() {
    let raw = include_str!("../../test-vectors/create_cp_code.json");
    for case in load(raw) {
        let input = &case["input"];
        let request = CreateCpCodeRequest {
            contract_id: text(&input["contractId"]),
            group_id: text(&input["groupId"]),
            cp_code: CreateCpCode {
                product_id: text(&input["cpCode"]["productId"]),
                cp_code_name: text(&input["cpCode"]["cpcodeName"]),
            },
        };
        run("creating CP code", &case, &request, |name, created, expected| {
            assert_eq!(created.cp_code_id, text(&expected["cpCodeId"]), "{name}: id");
            assert!(created.cp_code_link.contains(&created.cp_code_id), "{name}: link");
        });
    }
}

// ---------------------------------------------------------------------------
// Activations
// ---------------------------------------------------------------------------

#[test]
fn create_activation_vectors() {
    let raw = include_str!("../../test-vectors/create_activation.json");
    for case in load(raw) {
        let input = &case["input"];
        let activation: Activation = serde_json::from_value(input["activation"].clone()).unwrap();
        let request = CreateActivationRequest {
            property_id: text(&input["propertyId"]),
            contract_id: text(&input["contractId"]),
            group_id: text(&input["groupId"]),
            activation,
        };
        run("creating activation", &case, &request, |name, created, expected| {
            assert_eq!(created.activation_id, text(&expected["activationId"]), "{name}: id");
        });
    }
}

#[test]
fn get_activation_vectors() {
    let raw = include_str!("../../test-vectors/get_activation.json");
    for case in load(raw) {
        let input = &case["input"];
        let request = GetActivationRequest {
            property_id: text(&input["propertyId"]),
            activation_id: text(&input["activationId"]),
            contract_id: text(&input["contractId"]),
            group_id: text(&input["groupId"]),
        };
        run("fetching activation", &case, &request, |name, got, expected| {
            let activation = &got.activation;
            assert_eq!(
                activation.status.map(|s| s.as_str()),
                expected["status"].as_str(),
                "{name}: status"
            );
            assert_eq!(
                activation.network.map(|n| n.as_str()),
                expected["network"].as_str(),
                "{name}: network"
            );
            assert_eq!(got.retry_after, expected["retryAfter"].as_u64(), "{name}: retry after");
            let can_fast_fallback = activation
                .fallback_info
                .as_ref()
                .is_some_and(|info| info.can_fast_fallback);
            assert_eq!(
                can_fast_fallback,
                expected["canFastFallback"].as_bool().unwrap(),
                "{name}: fallback"
            );
            assert_eq!(got.activations.items.len(), 1, "{name}: items");
        });
    }
}
