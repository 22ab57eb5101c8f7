//! Shared test plumbing: the router wired to in-memory stores, so the full
//! middleware and handler stack runs in-process without Postgres.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use marketplace_api_rust::auth::TokenService;
use marketplace_api_rust::database::models::{Announcement, AnnouncementRow, User};
use marketplace_api_rust::database::{
    AnnouncementStore, ListingParams, NewAnnouncement, StoreError, UserStore,
};
use marketplace_api_rust::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    fn username_of(&self, user_id: i64) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.username.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|user| user.username == username) {
            return Err(StoreError::DuplicateUser);
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password: password.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, StoreError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username && user.password == password)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }
}

pub struct MemoryAnnouncementStore {
    users: Arc<MemoryUserStore>,
    announcements: Mutex<Vec<Announcement>>,
    /// Number of listing calls that reached the store, for asserting that
    /// rejected requests never query it.
    pub list_calls: AtomicUsize,
}

impl MemoryAnnouncementStore {
    pub fn new(users: Arc<MemoryUserStore>) -> Self {
        Self {
            users,
            announcements: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn create_announcement(
        &self,
        new: NewAnnouncement,
    ) -> Result<Announcement, StoreError> {
        let mut announcements = self.announcements.lock().unwrap();
        let id = announcements.len() as i64 + 1;
        let created = Announcement {
            id,
            user_id: new.user_id,
            title: new.title,
            text: new.text,
            image_url: new.image_url,
            price: new.price,
            // Milliseconds of skew keep creation order observable to date sorts
            created_at: Utc::now() + Duration::milliseconds(id),
        };
        announcements.push(created.clone());
        Ok(created)
    }

    async fn get_announcements_by_page(
        &self,
        params: &ListingParams,
        caller: Option<i64>,
    ) -> Result<Vec<AnnouncementRow>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let mut matching: Vec<Announcement> = self
            .announcements
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.price >= params.min_price && a.price <= params.max_price)
            .cloned()
            .collect();

        // Stable sorts, so insertion order breaks ties like the SQL path does
        match params.sort {
            "price ASC" => matching.sort_by_key(|a| a.price),
            "price DESC" => matching.sort_by_key(|a| std::cmp::Reverse(a.price)),
            "created_at ASC" => matching.sort_by_key(|a| a.created_at),
            "created_at DESC" => matching.sort_by_key(|a| std::cmp::Reverse(a.created_at)),
            other => panic!("unexpected sort fragment reached the store: {other}"),
        }

        let rows = matching
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit as usize)
            .map(|a| AnnouncementRow {
                owner_username: self
                    .users
                    .username_of(a.user_id)
                    .unwrap_or_else(|| format!("user{}", a.user_id)),
                title: a.title,
                text: a.text,
                image_url: a.image_url,
                price: a.price,
                is_owner: caller.map(|caller| a.user_id == caller),
            })
            .collect();

        Ok(rows)
    }
}

pub struct TestContext {
    pub app: Router,
    pub token: Arc<TokenService>,
    pub announcements: Arc<MemoryAnnouncementStore>,
}

pub fn test_app() -> TestContext {
    let users = Arc::new(MemoryUserStore::default());
    let announcements = Arc::new(MemoryAnnouncementStore::new(users.clone()));
    let token = Arc::new(TokenService::new(TEST_SECRET, 3600));

    let state = AppState {
        token: token.clone(),
        users,
        announcements: announcements.clone(),
        pool: None,
    };

    TestContext {
        app: marketplace_api_rust::app(state),
        token,
        announcements,
    }
}

/// Send a request with an optional raw Authorization header value and JSON
/// body, returning status, headers, and the decoded body (Null when empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth_header: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, body)
}

/// Register a user through the API, returning the assigned id and the token
/// from the Authorization response header.
pub async fn register(app: &Router, username: &str, password: &str) -> (i64, String) {
    let (status, headers, body) = send(
        app,
        "POST",
        "/api/v1/users",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

    let token = headers
        .get("authorization")
        .expect("Authorization header")
        .to_str()
        .unwrap()
        .to_string();
    (body["user_id"].as_i64().unwrap(), token)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
