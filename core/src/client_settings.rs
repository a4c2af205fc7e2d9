//! Account-wide client settings: default rule format and ID prefixes.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::response::decode_status;
use crate::rule_formats::validate_rule_format;
use crate::validate::{required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub rule_format: String,
    pub use_prefixes: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetClientSettingsRequest;

impl Endpoint for GetClientSettingsRequest {
    type Response = ClientSettings;
    const OPERATION: &'static str = "fetching client settings";

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/client-settings"))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateClientSettingsRequest {
    pub settings: ClientSettings,
}

impl Endpoint for UpdateClientSettingsRequest {
    type Response = ClientSettings;
    const OPERATION: &'static str = "updating client settings";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field(
                "RuleFormat",
                [
                    required(&self.settings.rule_format),
                    validate_rule_format(&self.settings.rule_format),
                ],
            )
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        RequestParts::put("/papi/v1/client-settings").json(Self::OPERATION, &self.settings)
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::test_support::{body_json, built, client, parse};

    #[test]
    fn get_client_settings() {
        assert_eq!(built(&GetClientSettingsRequest).path, "/papi/v1/client-settings");
        let settings = parse(
            &GetClientSettingsRequest,
            200,
            r#"{"ruleFormat":"v2020-09-16","usePrefixes":true}"#,
        )
        .unwrap();
        assert_eq!(settings.rule_format, "v2020-09-16");
        assert!(settings.use_prefixes);
    }

    #[test]
    fn update_client_settings() {
        let req = UpdateClientSettingsRequest {
            settings: ClientSettings {
                rule_format: "latest".to_string(),
                use_prefixes: false,
            },
        };
        let built = built(&req);
        assert_eq!(built.method, HttpMethod::Put);
        assert_eq!(
            body_json(&built),
            serde_json::json!({"ruleFormat": "latest", "usePrefixes": false})
        );
    }

    #[test]
    fn update_rejects_bad_rule_format() {
        let req = UpdateClientSettingsRequest {
            settings: ClientSettings {
                rule_format: "2020-09-16".to_string(),
                use_prefixes: true,
            },
        };
        let err = client().build(&req).unwrap_err();
        assert!(err.validation_errors().unwrap().reason("RuleFormat").is_some());
    }
}
