use thiserror::Error;

pub mod announcement_store;
pub mod listing;
pub mod manager;
pub mod models;
pub mod user_store;

pub use announcement_store::{AnnouncementStore, NewAnnouncement, PostgresAnnouncementStore};
pub use listing::ListingParams;
pub use manager::DatabaseError;
pub use user_store::{PostgresUserStore, UserStore};

/// Errors surfaced by the store interfaces. The sentinel variants map to 400
/// at the HTTP edge; everything else collapses to a logged 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists")]
    DuplicateUser,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
