//! Shared-secret authentication middleware.
//!
//! The secret is read **once at startup** (see `bootstrap`) and only its
//! SHA-256 digest is kept in `AppState`.
//! - With a secret configured, every protected request must carry
//!   `Authorization: Bearer <token>`.
//! - Without one, requests pass (dev mode; a warning was logged at boot).

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use sl_domain::error::Error;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Attach via `axum::middleware::from_fn_with_state`.
pub async fn require_api_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let expected_hash = match &state.api_token_hash {
        Some(h) => h,
        None => return next.run(req).await,
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    // Fixed-length digests keep the comparison independent of token length.
    let provided_hash = Sha256::digest(provided.as_bytes());

    if !bool::from(provided_hash.ct_eq(expected_hash.as_slice())) {
        tracing::debug!(path = %req.uri().path(), "rejected request with bad bearer token");
        return ApiError(Error::Unauthorized("invalid or missing API token".into()))
            .into_response();
    }

    next.run(req).await
}
