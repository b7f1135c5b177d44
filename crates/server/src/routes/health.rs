use axum::Json;
use serde_json::{json, Value as JsonValue};

/// GET /
pub async fn root() -> Json<JsonValue> {
    Json(json!({
        "message": "Chess Game Review API",
        "status": "running",
    }))
}
