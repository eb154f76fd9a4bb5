use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// An address record as stored by the fake CDN.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub code: String,
    pub address: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

/// Keyed by the 8-digit CEP without punctuation. Read-only once built.
pub type Db = Arc<HashMap<String, Address>>;

/// The addresses every `app()` starts with.
pub fn fixtures() -> Vec<(String, Address)> {
    let entry = |cep: &str, code: &str, address: &str, district: &str, city: &str, state: &str| {
        (
            cep.to_string(),
            Address {
                code: code.to_string(),
                address: address.to_string(),
                district: district.to_string(),
                city: city.to_string(),
                state: state.to_string(),
            },
        )
    };
    vec![
        entry("01001000", "01001-000", "Praça da Sé - lado ímpar", "Sé", "São Paulo", "SP"),
        entry("20040002", "20040-002", "Rua da Assembléia", "Centro", "Rio de Janeiro", "RJ"),
        entry("70040010", "70040-010", "Esplanada dos Ministérios", "Zona Cívico-Administrativa", "Brasília", "DF"),
    ]
}

pub fn app() -> Router {
    app_with(fixtures())
}

pub fn app_with(entries: impl IntoIterator<Item = (String, Address)>) -> Router {
    let db: Db = Arc::new(entries.into_iter().collect());
    Router::new()
        .route("/file/apicep/{file}", get(get_cep))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serves `{cep}.json`. Like the real CDN, lookup failures are reported in
/// the body with an HTTP 200; only a malformed path gets a transport 404.
async fn get_cep(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let cep = file.strip_suffix(".json").ok_or(StatusCode::NOT_FOUND)?;
    debug!(cep, "lookup");

    if cep.len() != 8 || !cep.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Json(json!({
            "status": 400,
            "ok": false,
            "message": "CEP informado é inválido",
            "statusText": "bad_request",
        })));
    }

    let body = match db.get(cep) {
        Some(addr) => json!({
            "status": 200,
            "ok": true,
            "code": addr.code,
            "address": addr.address,
            "district": addr.district,
            "city": addr.city,
            "state": addr.state,
            "statusText": "ok",
        }),
        None => json!({
            "status": 404,
            "ok": false,
            "message": "CEP não encontrado",
            "statusText": "not_found",
        }),
    };
    Ok(Json(body))
}
