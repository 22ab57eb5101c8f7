use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored announcement, as returned by the insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub text: String,
    pub image_url: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

/// One row of the paginated listing.
///
/// `is_owner` is tri-state: SQL NULL (anonymous caller) deserializes to `None`
/// and is omitted from the JSON entirely, so an anonymous reader cannot tell
/// "not yours" from "not logged in" through this field.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnnouncementRow {
    pub owner_username: String,
    pub title: String,
    pub text: String,
    pub image_url: String,
    pub price: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
}
