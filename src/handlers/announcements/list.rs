// GET /api/v1/announcements - paginated listing (optional auth)
use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::database::ListingParams;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Return one page of announcements as a bare JSON array.
///
/// `ListingParams` is guaranteed present and fully validated by the query
/// pipeline; the auth extension is present only when the caller presented a
/// valid token, which is exactly when rows carry `is_owner`.
pub async fn announcements_get(
    State(state): State<AppState>,
    Extension(params): Extension<ListingParams>,
    user: Option<Extension<AuthUser>>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = user.map(|Extension(auth)| auth.user_id);

    let rows = state
        .announcements
        .get_announcements_by_page(&params, caller)
        .await?;

    Ok(Json(rows))
}
