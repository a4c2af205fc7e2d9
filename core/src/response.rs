//! Shared response handling: status checks, decoding, single-item unwrap
//! and link resolution. Every helper tags its error with the operation.

use std::fmt::Display;

use serde::de::DeserializeOwned;

use crate::error::{ActivationError, ApiError, Error, Result};
use crate::http::HttpResponse;
use crate::link::{parse_link, parse_numeric_link};

/// Fail with a normalized [`ApiError`] unless the status matches.
pub(crate) fn expect_status(op: &'static str, response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(Error::Api {
            op,
            source: ApiError::from_response(response),
        })
    }
}

pub(crate) fn decode<T: DeserializeOwned>(op: &'static str, response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|source| Error::Decode { op, source })
}

/// [`expect_status`] followed by [`decode`].
pub(crate) fn decode_status<T: DeserializeOwned>(
    op: &'static str,
    response: &HttpResponse,
    expected: u16,
) -> Result<T> {
    expect_status(op, response, expected)?;
    decode(op, response)
}

/// First element of a list fetched by identifier. An empty list is a
/// not-found naming `resource`.
pub(crate) fn single<T: Clone>(op: &'static str, items: &[T], resource: impl Display) -> Result<T> {
    items.first().cloned().ok_or_else(|| Error::NotFound {
        op,
        resource: resource.to_string(),
    })
}

pub(crate) fn link_id(op: &'static str, link: &str) -> Result<String> {
    parse_link(link).map_err(|source| Error::InvalidResponseLink { op, source })
}

pub(crate) fn numeric_link_id(op: &'static str, link: &str) -> Result<i64> {
    parse_numeric_link(link).map_err(|source| Error::InvalidResponseLink { op, source })
}

/// Non-2xx handling for include activation endpoints: bodies carrying a
/// `messageId` are activation validation errors, anything else is a
/// regular [`ApiError`].
pub(crate) fn include_activation_failure(op: &'static str, response: &HttpResponse) -> Error {
    match serde_json::from_str::<ActivationError>(&response.body) {
        Ok(mut source) if !source.message_id.is_empty() => {
            source.status = response.status;
            Error::Activation { op, source }
        }
        _ => Error::Api {
            op,
            source: ApiError::from_response(response),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: &str = "fetching thing";

    #[test]
    fn unexpected_status_is_normalized() {
        let response = HttpResponse::new(404, r#"{"type":"not_found","title":"Not Found"}"#);
        let err = decode_status::<serde_json::Value>(OP, &response, 200).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.operation(), OP);
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let response = HttpResponse::new(200, "not json");
        let err = decode_status::<serde_json::Value>(OP, &response, 200).unwrap_err();
        assert!(matches!(err, Error::Decode { op: OP, .. }));
    }

    #[test]
    fn single_unwraps_first_item() {
        assert_eq!(single(OP, &[7, 8], "ID: 7").unwrap(), 7);
        let err = single::<i32>(OP, &[], "ID: 7").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref resource, .. } if resource == "ID: 7"));
        assert!(err.to_string().contains("ID: 7"));
    }

    #[test]
    fn link_errors_are_tagged() {
        let err = link_id(OP, ":").unwrap_err();
        assert!(err.is_invalid_response_link());
        assert!(err.to_string().starts_with("fetching thing: invalid response link"));
        assert_eq!(numeric_link_id(OP, "/x/versions/3").unwrap(), 3);
    }

    #[test]
    fn include_activation_failures() {
        let response = HttpResponse::new(
            400,
            r#"{"type":"x","title":"Missing compliance record","messageId":"missing_compliance_record","status":400}"#,
        );
        assert!(include_activation_failure(OP, &response).is_missing_compliance_record());

        let response = HttpResponse::new(404, r#"{"type":"not_found"}"#);
        assert!(include_activation_failure(OP, &response).is_not_found());
    }
}
