// POST /api/v1/users - user registration
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
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub username: String,
    pub password: String,
}

/// Register a new user. On success responds 201 with the fresh token in the
/// `Authorization` header and the created account echoed in the body.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    validate_credentials(&request.username, &request.password)?;

    let user = state
        .users
        .create_user(&request.username, &request.password)
        .await?;

    let token = state.token.issue(&user.id.to_string())?;

    let response = RegisterResponse {
        user_id: user.id,
        username: user.username,
        password: user.password,
    };

    Ok(ApiResponse::created(response).with_header(AUTHORIZATION, &token))
}
