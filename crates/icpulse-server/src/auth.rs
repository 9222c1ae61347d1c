//! Command JWT middleware
//!
//! Extracts the `x-oc-jwt` header, decodes the command claims, and attaches a
//! per-request [`OcClient`] built by the shared factory. A missing or
//! undecodable token is the one failure reported with a raw status: there is
//! no client yet to wrap the error in an ephemeral message.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use icpulse_oc::CommandClaims;

use crate::AppState;

pub const JWT_HEADER: &str = "x-oc-jwt";

pub async fn command_jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let token = request
        .headers()
        .get(JWT_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            format!("Missing {JWT_HEADER} header"),
        ))?
        .to_string();

    let claims = CommandClaims::parse(&token).map_err(|e| {
        warn!(error = %e, "rejected command JWT");
        (StatusCode::BAD_REQUEST, format!("Invalid command JWT: {e}"))
    })?;

    let client = state.oc_factory.build(token, claims);
    request.extensions_mut().insert(client);

    Ok(next.run(request).await)
}
