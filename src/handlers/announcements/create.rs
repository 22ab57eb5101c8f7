// POST /api/v1/announcements - create an announcement (mandatory auth)
use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::database::NewAnnouncement;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnnouncementsPostRequest {
    pub article: String,
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub cost: i32,
}

impl AnnouncementsPostRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        let article_len = self.article.chars().count();
        if !(5..=200).contains(&article_len) {
            field_errors.insert(
                "article".to_string(),
                "must be between 5 and 200 characters".to_string(),
            );
        }

        let text_len = self.text.chars().count();
        if !(10..=2000).contains(&text_len) {
            field_errors.insert(
                "text".to_string(),
                "must be between 10 and 2000 characters".to_string(),
            );
        }

        if let Some(image_url) = &self.image_url {
            if image_url.chars().count() > 255 || url::Url::parse(image_url).is_err() {
                field_errors.insert(
                    "image_url".to_string(),
                    "must be a valid URL of at most 255 characters".to_string(),
                );
            }
        }

        if self.cost < 0 {
            field_errors.insert("cost".to_string(), "must not be negative".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Invalid announcement payload",
                Some(field_errors),
            ))
        }
    }
}

/// Create an announcement owned by the authenticated caller. The owner id
/// always comes from the verified token subject, never from the payload.
pub async fn announcements_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AnnouncementsPostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    request.validate()?;

    let created = state
        .announcements
        .create_announcement(NewAnnouncement {
            user_id: user.user_id,
            title: request.article,
            text: request.text,
            image_url: request.image_url.unwrap_or_default(),
            price: request.cost,
        })
        .await?;

    Ok(ApiResponse::created(created))
}
