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
pub struct UserLogin {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/api/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", content_type = "application/json"),
        (status = 401, description = "Unknown email or wrong password, deliberately not distinguished"),
    ),
    tag= "login"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login(pool: Extension<PgPool>, payload: Option<Json<UserLogin>>) -> Response {
    let user: UserLogin = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    if !valid_email(&user.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if !valid_password(&user.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    match registry::login(&pool, &user.email, user.password).await {
        Ok(()) => {
            debug!("Login successful");

            (StatusCode::OK, Json(json!({"message": "Login successful"}))).into_response()
        }
        Err(err) => err.into_response(),
    }
}
