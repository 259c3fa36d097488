use crate::anagrafe::{handlers::valid_password, registry};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use tracing::instrument;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PasswordChange {
    new_password: String,
}

#[utoipa::path(
    put,
    path= "/api/user/change-password/{email}",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    request_body = PasswordChange,
    responses (
        (status = 200, description = "Password updated", content_type = "application/json"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "No account with this email"),
    ),
    tag= "users"
)]
// axum handler for password change
#[instrument(skip_all)]
pub async fn change_password(
    Path(email): Path<String>,
    pool: Extension<PgPool>,
    payload: Option<Json<PasswordChange>>,
) -> Response {
    let data: PasswordChange = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !valid_password(&data.new_password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    match registry::change_password(&pool, &email, data.new_password).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Password updated successfully"})),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
