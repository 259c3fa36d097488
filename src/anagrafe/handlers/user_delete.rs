use crate::anagrafe::registry;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use sqlx::PgPool;
use tracing::instrument;

#[utoipa::path(
    delete,
    path= "/api/user/{email}",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    responses (
        (status = 200, description = "User deleted", content_type = "application/json"),
        (status = 404, description = "No account with this email"),
    ),
    tag= "users"
)]
// axum handler for user deletion
#[instrument(skip_all)]
pub async fn delete_user(Path(email): Path<String>, pool: Extension<PgPool>) -> Response {
    match registry::delete(&pool, &email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "User deleted successfully"})),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
