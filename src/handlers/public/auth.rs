// POST /api/v1/auth - credential login
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::AUTHORIZATION,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::public::validate_credentials;
use crate::middleware::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
}

/// Authenticate by username and password. On success responds 201 with the
/// token in the `Authorization` header; bad credentials are a 400, not a 401,
/// matching the registration error presentation.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    validate_credentials(&request.username, &request.password)?;

    let user = state
        .users
        .get_user_by_credentials(&request.username, &request.password)
        .await?;

    let token = state.token.issue(&user.id.to_string())?;

    let response = LoginResponse {
        user_id: user.id,
        username: user.username,
    };

    Ok(ApiResponse::created(response).with_header(AUTHORIZATION, &token))
}
