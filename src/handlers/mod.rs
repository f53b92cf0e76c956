use axum::Json;
use serde_json::{json, Value};

pub mod error;
pub mod extractors;
pub mod medicine;

pub use error::ApiError;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
