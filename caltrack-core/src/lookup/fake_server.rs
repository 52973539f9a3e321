//! In-process stand-in for the product database, for tests.

use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use super::LookupClient;

/// Product with 250 kcal per 100 g.
pub(crate) const OATS: &str = "4000000000001";
/// Product record without an energy figure.
pub(crate) const NO_ENERGY: &str = "4000000000002";
/// Answered with `status: 0` and no product record.
pub(crate) const UNKNOWN: &str = "4000000000003";

async fn product(Path(file): Path<String>) -> Result<Json<Value>, StatusCode> {
    match file.trim_end_matches(".json") {
        OATS => Ok(Json(json!({
            "status": 1,
            "product": {
                "product_name": "Haferflocken",
                "nutriments": {"energy_kcal_100g": 250}
            }
        }))),
        NO_ENERGY => Ok(Json(json!({
            "status": 1,
            "product": {"product_name": "Mineralwasser", "nutriments": {}}
        }))),
        UNKNOWN => Ok(Json(json!({"status": 0}))),
        "500" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Starts a fake product database and returns its base URL.
pub(crate) async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/api/v0/product/{file}", get(product));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Client that talks to `base_url` directly, ignoring proxy settings.
pub(crate) fn local_client(base_url: String) -> LookupClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    LookupClient::with_http(base_url, http)
}
