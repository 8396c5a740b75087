// src/routes.rs

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{fair, preference, user},
    error::AppError,
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Largest accepted request body (photo uploads included).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Assembles the main application router.
///
/// * Registers the user, fair and preference endpoints.
/// * Protects preference writes with token authentication.
/// * Applies global middleware (Trace, Timeout, CORS, body limit).
pub fn create_router(state: AppState) -> Router {
    let origin = HeaderValue::from_str(&state.config.cors_origin).unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid CORS_ORIGIN '{}', falling back to localhost",
            state.config.cors_origin
        );
        HeaderValue::from_static("http://localhost:3000")
    });

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let user_routes = Router::new()
        .route("/api/login", post(user::login))
        .route("/api/users", post(user::register))
        .route("/api/users/get", get(user::get_user))
        .route("/api/users/update/{id}", put(user::update_profile));

    let fair_routes = Router::new()
        .route("/api/fairs", post(fair::create_fair))
        .route("/api/fairs/get", get(fair::get_fair))
        .route("/api/fairs/getAll", get(fair::list_fairs))
        .route("/api/fairs/update/{id}", put(fair::update_fair))
        .route("/api/fairs/delete/{id}", delete(fair::delete_fair));

    let preference_routes = Router::new()
        .route("/api/preferences", get(preference::get_preferences))
        // Protected preference routes
        .merge(
            Router::new()
                .route("/api/preferences/create", post(preference::create_preferences))
                .route("/api/preferences/update", put(preference::update_preferences))
                .route_layer(middleware::from_fn_with_state(
                    state.config.clone(),
                    auth_middleware,
                )),
        );

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .merge(user_routes)
        .merge(fair_routes)
        .merge(preference_routes)
        // Global Middleware (applied from outside in)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(middleware::map_response(timeout_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Gives the bare 408 produced by the timeout layer the usual error body.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::Timeout.into_response();
    }
    response
}
