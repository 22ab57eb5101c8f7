use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::database::{AnnouncementStore, UserStore};

/// Shared application state, handed to every route handler via `State`.
///
/// All services are constructed once in `main` (or by a test harness) and
/// hold only immutable configuration, so cloning the state per request is a
/// handful of reference-count bumps.
#[derive(Clone)]
pub struct AppState {
    pub token: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
    pub announcements: Arc<dyn AnnouncementStore>,
    /// Present when backed by Postgres; `None` under in-memory test stores.
    pub pool: Option<PgPool>,
}
