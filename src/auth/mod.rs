//! Credential gate
//!
//! Role-gated endpoints (menu writes, history reads) are protected by a
//! shared HTTP Basic credential pair held in process configuration. There is
//! no session or token state: every request carries the credential, every
//! failure gets a fresh `WWW-Authenticate` challenge.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::{Credential, ServerState};
use crate::utils::AppError;

/// Middleware layer for admin-gated routes.
pub async fn require_admin(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = is_authorized(
        &state.config.admin,
        request.headers().get(header::AUTHORIZATION),
    );
    if authorized {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated admin request");
        AppError::Unauthorized.into_response()
    }
}

/// Check a `Basic` authorization header against the configured credential.
fn is_authorized(cred: &Credential, header: Option<&HeaderValue>) -> bool {
    let Some(value) = header.and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((user, pass)) = decoded.split_once(':') else {
        return false;
    };
    cred.matches(user, pass)
}

/// Encode a `Basic` authorization header value. Used by tests and tooling.
pub fn basic_header(user: &str, pass: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", user, pass)))
}
