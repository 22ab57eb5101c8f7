use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::extract_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Mandatory auth: missing or invalid credentials stop the request with 401;
/// otherwise the verified identity is injected into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;
    let subject = state.token.verify(token)?;
    let user_id = parse_subject(&subject)?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Optional auth: no Authorization header at all means the request proceeds
/// anonymously. A header that is present but malformed or failing
/// verification is still rejected with 401 rather than downgraded to
/// anonymous.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.headers().get(AUTHORIZATION).is_none() {
        return Ok(next.run(request).await);
    }

    let token = extract_token(request.headers()).map_err(|_| {
        ApiError::unauthorized("Authorization header must use Bearer token format")
    })?;
    let subject = state.token.verify(token)?;
    let user_id = parse_subject(&subject)?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

// The subject claim is a stringified user id; a token whose subject does not
// parse is treated as invalid, never as a panic.
fn parse_subject(subject: &str) -> Result<i64, ApiError> {
    subject
        .parse::<i64>()
        .map_err(|_| ApiError::unauthorized("Invalid token subject"))
}
