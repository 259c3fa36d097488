use crate::anagrafe::{
    handlers::{valid_email, valid_password},
    registry,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserRegister {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/api/user",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", content_type = "application/json"),
        (status = 400, description = "Invalid payload or user with the specified email already exists"),
    ),
    tag= "users"
)]
// axum handler for user registration
#[instrument(skip_all)]
pub async fn register(pool: Extension<PgPool>, payload: Option<Json<UserRegister>>) -> Response {
    let user: UserRegister = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !valid_email(&user.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if !valid_password(&user.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    match registry::register(&pool, &user.email, user.password).await {
        Ok(account) => {
            debug!("User created with id {}", account.id);

            (
                StatusCode::CREATED,
                Json(json!({"message": "User registered successfully"})),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}
