use axum::response::{IntoResponse, Json};
use serde_json::json;

// axum handler for the API root
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "User account registry",
        "docs": "/docs",
        "health": "/health",
    }))
}
