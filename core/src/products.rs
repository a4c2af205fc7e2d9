//! Products available under a contract.

use serde::{Deserialize, Serialize};

use crate::endpoint::{Endpoint, RequestParts};
use crate::error::Result;
use crate::http::HttpResponse;
use crate::query::Query;
use crate::response::decode_status;
use crate::types::Items;
use crate::validate::{required, ValidationErrors, Validator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProductsRequest {
    pub contract_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub products: Items<Product>,
}

impl Endpoint for GetProductsRequest {
    type Response = GetProductsResponse;
    const OPERATION: &'static str = "fetching products";

    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        Validator::new()
            .field("ContractID", [required(&self.contract_id)])
            .finish()
    }

    fn request(&self) -> Result<RequestParts> {
        Ok(RequestParts::get("/papi/v1/products")
            .query(Query::new().text("contractId", &self.contract_id)))
    }

    fn response(&self, response: HttpResponse) -> Result<Self::Response> {
        decode_status(Self::OPERATION, &response, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{built, client, parse};

    #[test]
    fn get_products() {
        let req = GetProductsRequest {
            contract_id: "ctr_1-1TJZFW".to_string(),
        };
        assert_eq!(built(&req).path, "/papi/v1/products?contractId=ctr_1-1TJZFW");
        let resp = parse(
            &req,
            200,
            r#"{"accountId":"act_1-1TJZFB","contractId":"ctr_1-1TJZFW","products":{"items":[{"productName":"Alta","productId":"prd_Alta"}]}}"#,
        )
        .unwrap();
        assert_eq!(resp.products.items[0].product_id, "prd_Alta");
    }

    #[test]
    fn contract_is_required() {
        let err = client().build(&GetProductsRequest::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "fetching products: struct validation: ContractID: cannot be blank"
        );
    }
}
