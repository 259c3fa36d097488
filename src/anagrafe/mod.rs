use crate::anagrafe::handlers::{
    health, health::__path_health, password_change, password_change::__path_change_password,
    user_delete::__path_delete_user, user_list::__path_list_users, user_login,
    user_login::__path_login, user_register, user_register::__path_register,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    routing::{delete, get, post, put},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod db;
pub(crate) mod handlers;
pub mod password;
pub mod registry;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[derive(OpenApi)]
#[openapi(
    paths(health, register, list_users, change_password, delete_user, login),
    components(schemas(
        health::Health,
        user_register::UserRegister,
        password_change::PasswordChange,
        user_login::UserLogin,
        registry::Account
    )),
    tags(
        (name = "anagrafe", description = "User account registry API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String) -> Result<()> {
    let pool = db::connect(&dsn).await?;

    db::init_schema(&pool).await?;

    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    let app = Router::new()
        .route("/api/user", post(handlers::register))
        .route("/api/users", get(handlers::list_users))
        .route(
            "/api/user/change-password/:email",
            put(handlers::change_password),
        )
        .route("/api/user/:email", delete(handlers::delete_user))
        .route("/api/login", post(handlers::login))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(pool.clone())),
        )
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(Extension(pool))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi()));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to install shutdown signal handler: {err}");
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_openapi_covers_every_route() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        for route in [
            "/api/user",
            "/api/users",
            "/api/user/change-password/{email}",
            "/api/user/{email}",
            "/api/login",
            "/health",
        ] {
            assert!(paths.contains_key(route), "missing OpenAPI path: {route}");
        }
    }
}
