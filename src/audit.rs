//! Admin operation audit middleware
//!
//! Wraps handlers under the admin prefixes with before/after audit logging:
//! method, path, caller identity, the raw request body, and the handler's
//! serialized result with timing. The wrapper only observes; the response is
//! propagated unchanged whether the handler succeeded or failed.

use crate::auth::Identity;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// Audit an admin-tagged handler invocation.
///
/// The request body is buffered so it can be logged here and still be read by
/// the handler. The after log runs for success and error responses alike.
pub async fn admin_audit(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (user_id, role) = match request.extensions().get::<Identity>() {
        Some(identity) => (identity.user_id.to_string(), identity.role.to_string()),
        None => ("-".to_string(), "-".to_string()),
    };

    let (parts, body) = request.into_parts();
    let request = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            info!(
                %method,
                %path,
                %user_id,
                %role,
                request_body = %String::from_utf8_lossy(&bytes),
                "admin request"
            );
            Request::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(%method, %path, error = %e, "failed to buffer admin request body");
            Request::from_parts(parts, Body::empty())
        }
    };

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let (parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            info!(
                %method,
                %path,
                %user_id,
                status = %parts.status,
                elapsed_ms,
                response_body = %String::from_utf8_lossy(&bytes),
                "admin response"
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(%method, %path, error = %e, "failed to buffer admin response body");
            Response::from_parts(parts, Body::empty())
        }
    }
}
