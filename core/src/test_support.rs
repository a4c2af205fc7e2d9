use crate::client::PapiClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

pub const BASE_URL: &str = "https://papi.example.net";

pub fn client() -> PapiClient {
    PapiClient::new(BASE_URL)
}

/// Build `endpoint` and return the request path without the base URL.
pub fn built<E: Endpoint>(endpoint: &E) -> HttpRequest {
    let mut req = client().build(endpoint).unwrap();
    req.path = req.path.trim_start_matches(BASE_URL).to_string();
    req
}

pub fn parse<E: Endpoint>(endpoint: &E, status: u16, body: &str) -> Result<E::Response> {
    client().parse(endpoint, HttpResponse::new(status, body))
}

pub fn body_json(req: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
}
