use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::listing::ListingParams;
use crate::database::models::{Announcement, AnnouncementRow};
use crate::database::StoreError;

/// Fields supplied by the caller when creating an announcement; id and
/// creation timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub user_id: i64,
    pub title: String,
    pub text: String,
    pub image_url: String,
    pub price: i32,
}

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn create_announcement(&self, new: NewAnnouncement)
        -> Result<Announcement, StoreError>;

    /// One page of the listing, ordered by the validated sort key. `caller`
    /// is the authenticated user id, or `None` for anonymous requests (every
    /// row's `is_owner` comes back `None` in that case).
    async fn get_announcements_by_page(
        &self,
        params: &ListingParams,
        caller: Option<i64>,
    ) -> Result<Vec<AnnouncementRow>, StoreError>;
}

pub struct PostgresAnnouncementStore {
    pool: PgPool,
}

impl PostgresAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PostgresAnnouncementStore {
    async fn create_announcement(
        &self,
        new: NewAnnouncement,
    ) -> Result<Announcement, StoreError> {
        let created = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements(user_id, title, text, image_url, price) \
             VALUES($1, $2, $3, $4, $5) \
             RETURNING id, user_id, title, text, image_url, price, created_at",
        )
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.text)
        .bind(&new.image_url)
        .bind(new.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_announcements_by_page(
        &self,
        params: &ListingParams,
        caller: Option<i64>,
    ) -> Result<Vec<AnnouncementRow>, StoreError> {
        let sql = params.select_sql();

        let rows = sqlx::query_as::<_, AnnouncementRow>(&sql)
            .bind(params.limit as i64)
            .bind(params.offset())
            .bind(caller.unwrap_or(0))
            .bind(params.min_price)
            .bind(params.max_price)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
