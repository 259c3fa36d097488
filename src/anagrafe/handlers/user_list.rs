use crate::anagrafe::registry::{self, Account};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sqlx::PgPool;
use tracing::instrument;

#[utoipa::path(
    get,
    path= "/api/users",
    responses (
        (status = 200, description = "All accounts, credentials always omitted", body = [Account], content_type = "application/json"),
    ),
    tag= "users"
)]
// axum handler for listing users
#[instrument(skip_all)]
pub async fn list_users(pool: Extension<PgPool>) -> Response {
    match registry::list(&pool).await {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(err) => err.into_response(),
    }
}
