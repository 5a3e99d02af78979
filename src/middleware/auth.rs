use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::token;
use crate::config::AuthConfig;
use crate::error::AppError;

/// Requires `Authorization: Bearer <jwt>` on every request it wraps.
///
/// Verified claims are stored in the request extensions as
/// [`crate::auth::Claims`]. With `auth.enabled = false` requests pass through
/// unchecked.
pub async fn require_auth(
    State(cfg): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !cfg.enabled {
        return Ok(next.run(req).await);
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = token::verify(&cfg, bearer).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
