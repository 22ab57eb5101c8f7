use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::User;
use crate::database::StoreError;

/// Narrow persistence interface for users.
///
/// `get_user_by_credentials` takes the candidate password so the verification
/// strategy lives behind this trait; the Postgres implementation compares in
/// the query, a hashing implementation would fetch-then-verify instead.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, username: &str, password: &str) -> Result<User, StoreError>;
    async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError>;
}

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users(username, password) VALUES($1, $2) RETURNING id, username, password",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::DuplicateUser
            } else {
                err.into()
            }
        })
    }

    async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::InvalidCredentials)
    }
}

// Postgres unique_violation
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
