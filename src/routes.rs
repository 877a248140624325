//! Route definitions and router setup
//!
//! Configures the gateway middleware stack and the demonstration handlers
//! standing in for the business services behind the gateway. Handlers receive
//! the caller identity exclusively through the `Identity` request extension.

use crate::audit::admin_audit;
use crate::auth::{auth_middleware, Identity, Role};
use crate::config::Settings;
use crate::error::ApiResult;
use crate::state::SharedState;
use axum::{
    extract::Path,
    http::{header, Method},
    middleware,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware_stack = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Admin operations carry the audit wrapper on top of authentication
    let admin_routes = Router::new()
        .route("/users/{user_id}", patch(change_user_role))
        .route("/comments/{comment_id}", delete(delete_comment))
        .layer(middleware::from_fn(admin_audit));

    // Build the router; the authentication gate fronts every route and
    // exempts prefixes per configuration (e.g. /auth, /health)
    Router::new()
        .route("/health", get(health_check))
        .route("/todos", get(list_todos))
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(middleware_stack)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(3600))
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListResponse {
    pub success: bool,
    pub user_id: i64,
    pub email: String,
    pub user_role: Role,
    pub todos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleResponse {
    pub success: bool,
    pub user_id: i64,
    pub role: Role,
    pub changed_by: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    pub success: bool,
    pub comment_id: i64,
    pub deleted_by: i64,
}

// ============================================
// Route Handlers
// ============================================

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /todos
///
/// Demonstration stand-in for the todo service behind the gateway: echoes the
/// identity attributes published by the authentication middleware.
async fn list_todos(Extension(identity): Extension<Identity>) -> Json<TodoListResponse> {
    Json(TodoListResponse {
        success: true,
        user_id: identity.user_id,
        email: identity.email,
        user_role: identity.role,
        todos: Vec::new(),
    })
}

/// PATCH /admin/users/{user_id}
///
/// Demonstration stand-in for the user admin service (role changes).
async fn change_user_role(
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<i64>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<Json<ChangeRoleResponse>> {
    Ok(Json(ChangeRoleResponse {
        success: true,
        user_id,
        role: req.role,
        changed_by: identity.user_id,
    }))
}

/// DELETE /admin/comments/{comment_id}
///
/// Demonstration stand-in for the comment admin service.
async fn delete_comment(
    Extension(identity): Extension<Identity>,
    Path(comment_id): Path<i64>,
) -> ApiResult<Json<DeleteCommentResponse>> {
    Ok(Json(DeleteCommentResponse {
        success: true,
        comment_id,
        deleted_by: identity.user_id,
    }))
}
