//! In-memory imitation of a slice of the `/papi/v1` API.
//!
//! Covers contracts, groups, CP codes, properties, property activations and
//! hostname-activation cancel. Failures are problem-detail documents shaped
//! like the real service's, each with a fresh `instance` id.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNT_ID: &str = "act_1-MOCK";
pub const CONTRACT_ID: &str = "ctr_1-MOCK";
pub const GROUP_ID: &str = "grp_1";

const PROBLEM_BASE: &str = "https://problems.luna.akamaiapis.net/papi/v0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpCode {
    #[serde(rename = "cpcodeId")]
    pub id: String,
    #[serde(rename = "cpcodeName")]
    pub name: String,
    pub created_date: String,
    pub product_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCpCode {
    pub product_id: String,
    #[serde(rename = "cpcodeName")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub account_id: String,
    pub contract_id: String,
    pub group_id: String,
    pub property_id: String,
    pub property_name: String,
    pub latest_version: i64,
    pub staging_version: Option<i64>,
    pub production_version: Option<i64>,
    pub asset_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    pub product_id: String,
    pub property_name: String,
    #[serde(default)]
    pub rule_format: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub activation_id: String,
    pub activation_type: String,
    pub property_id: String,
    pub property_name: String,
    pub property_version: i64,
    pub network: String,
    pub status: String,
    pub submit_date: String,
    pub update_date: String,
    pub note: String,
    pub notify_emails: Vec<String>,
    pub fallback_info: FallbackInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackInfo {
    pub fast_fallback_attempted: bool,
    pub fallback_version: i64,
    pub can_fast_fallback: bool,
    pub steady_state_time: i64,
    pub fast_fallback_expiration_time: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivation {
    #[serde(default = "default_activation_type")]
    pub activation_type: String,
    pub property_version: i64,
    pub network: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub notify_emails: Vec<String>,
    #[serde(default)]
    pub compliance_record: Option<serde_json::Value>,
}

fn default_activation_type() -> String {
    "ACTIVATE".to_string()
}

/// `contractId` / `groupId` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub group_id: String,
}

/// A problem-detail error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub detail: String,
    pub status: u16,
    pub instance: String,
}

impl Problem {
    fn new(status: StatusCode, kind: &str, title: &str, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("{PROBLEM_BASE}/{kind}"),
            title: title.to_string(),
            detail: detail.into(),
            status: status.as_u16(),
            instance: format!("{PROBLEM_BASE}/error-instances/{}", Uuid::new_v4()),
        }
    }

    fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "Not Found", detail)
    }

    fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", "Bad Request", detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!(status = self.status, detail = %self.detail, "returning problem");
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    cp_codes: BTreeMap<String, CpCode>,
    properties: BTreeMap<String, Property>,
    activations: BTreeMap<String, Vec<Activation>>,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", 100 + self.next_id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/papi/v1/contracts", get(list_contracts))
        .route("/papi/v1/groups", get(list_groups))
        .route("/papi/v1/cpcodes", get(list_cp_codes).post(create_cp_code))
        .route("/papi/v1/cpcodes/{id}", get(get_cp_code))
        .route("/papi/v1/properties", get(list_properties).post(create_property))
        .route("/papi/v1/properties/{id}", get(get_property).delete(remove_property))
        .route(
            "/papi/v1/properties/{id}/activations",
            get(list_activations).post(create_activation),
        )
        .route(
            "/papi/v1/properties/{id}/activations/{activation_id}",
            get(get_activation).delete(cancel_activation),
        )
        .route(
            "/papi/v1/properties/{id}/hostname-activations/{activation_id}",
            delete(cancel_hostname_activation),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    "2024-01-01T00:00:00Z".to_string()
}

fn require_scope(scope: &Scope) -> Result<(), Problem> {
    if scope.contract_id.is_empty() || scope.group_id.is_empty() {
        return Err(Problem::bad_request("contractId and groupId are required"));
    }
    Ok(())
}

fn link(path: &str, scope: &Scope) -> String {
    format!(
        "{path}?contractId={}&groupId={}",
        scope.contract_id, scope.group_id
    )
}

async fn list_contracts() -> Json<serde_json::Value> {
    Json(json!({
        "accountId": ACCOUNT_ID,
        "contracts": {"items": [{"contractId": CONTRACT_ID, "contractTypeName": "DIRECT_CUSTOMER"}]}
    }))
}

async fn list_groups() -> Json<serde_json::Value> {
    Json(json!({
        "accountId": ACCOUNT_ID,
        "accountName": "Mock Account",
        "groups": {"items": [{
            "groupId": GROUP_ID,
            "groupName": "Mock Group",
            "contractIds": [CONTRACT_ID]
        }]}
    }))
}

async fn list_cp_codes(
    State(db): State<Db>,
    Query(scope): Query<Scope>,
) -> Result<Json<serde_json::Value>, Problem> {
    require_scope(&scope)?;
    let store = db.read().await;
    let items: Vec<&CpCode> = store.cp_codes.values().collect();
    Ok(Json(json!({
        "accountId": ACCOUNT_ID,
        "contractId": scope.contract_id,
        "groupId": scope.group_id,
        "cpcodes": {"items": items}
    })))
}

async fn get_cp_code(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
) -> Result<Json<serde_json::Value>, Problem> {
    let store = db.read().await;
    let cp_code = store
        .cp_codes
        .get(&id)
        .ok_or_else(|| Problem::not_found(format!("CP code {id} does not exist")))?;
    Ok(Json(json!({
        "accountId": ACCOUNT_ID,
        "contractId": scope.contract_id,
        "groupId": scope.group_id,
        "cpcodes": {"items": [cp_code]}
    })))
}

async fn create_cp_code(
    State(db): State<Db>,
    Query(scope): Query<Scope>,
    Json(input): Json<CreateCpCode>,
) -> Result<(StatusCode, Json<serde_json::Value>), Problem> {
    require_scope(&scope)?;
    if input.name.is_empty() {
        return Err(Problem::bad_request("cpcodeName is required"));
    }
    let mut store = db.write().await;
    let id = store.next_id("cpc");
    store.cp_codes.insert(
        id.clone(),
        CpCode {
            id: id.clone(),
            name: input.name,
            created_date: now(),
            product_ids: vec![input.product_id],
        },
    );
    tracing::info!(cp_code_id = %id, "created CP code");
    let link = link(&format!("/papi/v1/cpcodes/{id}"), &scope);
    Ok((StatusCode::CREATED, Json(json!({ "cpcodeLink": link }))))
}

async fn list_properties(
    State(db): State<Db>,
    Query(scope): Query<Scope>,
) -> Result<Json<serde_json::Value>, Problem> {
    require_scope(&scope)?;
    let store = db.read().await;
    let items: Vec<&Property> = store
        .properties
        .values()
        .filter(|p| p.contract_id == scope.contract_id && p.group_id == scope.group_id)
        .collect();
    Ok(Json(json!({ "properties": {"items": items} })))
}

async fn get_property(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Problem> {
    let store = db.read().await;
    let property = store
        .properties
        .get(&id)
        .ok_or_else(|| Problem::not_found(format!("property {id} does not exist")))?;
    Ok(Json(json!({ "properties": {"items": [property]} })))
}

async fn create_property(
    State(db): State<Db>,
    Query(scope): Query<Scope>,
    Json(input): Json<CreateProperty>,
) -> Result<(StatusCode, Json<serde_json::Value>), Problem> {
    require_scope(&scope)?;
    let mut store = db.write().await;
    if store
        .properties
        .values()
        .any(|p| p.property_name == input.property_name)
    {
        return Err(Problem::new(
            StatusCode::CONFLICT,
            "property-name-conflict",
            "Conflict",
            format!("a property named {} already exists", input.property_name),
        ));
    }
    let id = store.next_id("prp");
    let asset_id = store.next_id("aid");
    store.properties.insert(
        id.clone(),
        Property {
            account_id: ACCOUNT_ID.to_string(),
            contract_id: scope.contract_id.clone(),
            group_id: scope.group_id.clone(),
            property_id: id.clone(),
            property_name: input.property_name,
            latest_version: 1,
            staging_version: None,
            production_version: None,
            asset_id,
        },
    );
    tracing::info!(property_id = %id, product_id = %input.product_id, rule_format = %input.rule_format, "created property");
    let link = link(&format!("/papi/v1/properties/{id}"), &scope);
    Ok((StatusCode::CREATED, Json(json!({ "propertyLink": link }))))
}

async fn remove_property(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Problem> {
    let mut store = db.write().await;
    store
        .properties
        .remove(&id)
        .ok_or_else(|| Problem::not_found(format!("property {id} does not exist")))?;
    store.activations.remove(&id);
    tracing::info!(property_id = %id, "removed property");
    Ok(Json(json!({ "message": "Deletion Successful." })))
}

fn activations_body(scope: &Scope, items: &[Activation]) -> serde_json::Value {
    json!({
        "accountId": ACCOUNT_ID,
        "contractId": scope.contract_id,
        "groupId": scope.group_id,
        "activations": {"items": items}
    })
}

async fn list_activations(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
) -> Result<Json<serde_json::Value>, Problem> {
    let store = db.read().await;
    if !store.properties.contains_key(&id) {
        return Err(Problem::not_found(format!("property {id} does not exist")));
    }
    let items = store.activations.get(&id).cloned().unwrap_or_default();
    Ok(Json(activations_body(&scope, &items)))
}

async fn create_activation(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
    Json(input): Json<CreateActivation>,
) -> Result<(StatusCode, Json<serde_json::Value>), Problem> {
    if input.network == "PRODUCTION" && input.compliance_record.is_none() {
        return Err(Problem::new(
            StatusCode::BAD_REQUEST,
            "missing_compliance_record",
            "Missing compliance record",
            "a compliance record is required for production activations",
        ));
    }
    let mut store = db.write().await;
    let property = store
        .properties
        .get(&id)
        .cloned()
        .ok_or_else(|| Problem::not_found(format!("property {id} does not exist")))?;
    let activation_id = store.next_id("atv");
    let activation = Activation {
        activation_id: activation_id.clone(),
        activation_type: input.activation_type,
        property_id: id.clone(),
        property_name: property.property_name,
        property_version: input.property_version,
        network: input.network,
        status: "PENDING".to_string(),
        submit_date: now(),
        update_date: now(),
        note: input.note,
        notify_emails: input.notify_emails,
        fallback_info: FallbackInfo {
            fast_fallback_attempted: false,
            fallback_version: (input.property_version - 1).max(0),
            can_fast_fallback: true,
            steady_state_time: 1_700_000_000,
            fast_fallback_expiration_time: 1_700_003_600,
        },
    };
    store.activations.entry(id.clone()).or_default().push(activation);
    tracing::info!(property_id = %id, activation_id = %activation_id, "created activation");
    let link = link(
        &format!("/papi/v1/properties/{id}/activations/{activation_id}"),
        &scope,
    );
    Ok((StatusCode::CREATED, Json(json!({ "activationLink": link }))))
}

async fn get_activation(
    State(db): State<Db>,
    Path((id, activation_id)): Path<(String, String)>,
    Query(scope): Query<Scope>,
) -> Result<Response, Problem> {
    let store = db.read().await;
    let activation = store
        .activations
        .get(&id)
        .and_then(|items| items.iter().find(|a| a.activation_id == activation_id))
        .ok_or_else(|| Problem::not_found(format!("activation {activation_id} does not exist")))?;
    let body = Json(activations_body(&scope, std::slice::from_ref(activation)));
    if activation.status == "PENDING" {
        Ok(([(header::RETRY_AFTER, "30")], body).into_response())
    } else {
        Ok(body.into_response())
    }
}

async fn cancel_activation(
    State(db): State<Db>,
    Path((id, activation_id)): Path<(String, String)>,
    Query(scope): Query<Scope>,
) -> Result<Json<serde_json::Value>, Problem> {
    let mut store = db.write().await;
    let activation = store
        .activations
        .get_mut(&id)
        .and_then(|items| items.iter_mut().find(|a| a.activation_id == activation_id))
        .ok_or_else(|| Problem::not_found(format!("activation {activation_id} does not exist")))?;
    if activation.status != "PENDING" {
        return Err(Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "activation-not-pending",
            "Activation not pending",
            format!("activation {activation_id} is {}", activation.status),
        ));
    }
    activation.status = "ABORTED".to_string();
    activation.update_date = now();
    tracing::info!(property_id = %id, activation_id = %activation_id, "aborted activation");
    Ok(Json(activations_body(&scope, std::slice::from_ref(activation))))
}

/// Hostname activations finish immediately here, so there is never anything
/// left to cancel.
async fn cancel_hostname_activation(
    Path((id, activation_id)): Path<(String, String)>,
) -> StatusCode {
    tracing::info!(property_id = %id, hostname_activation_id = %activation_id, "hostname activation already aborted");
    StatusCode::NO_CONTENT
}
