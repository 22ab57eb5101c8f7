use axum::{
    extract::State,
    middleware as axum_middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use state::AppState;

/// Build the full application router around a constructed [`AppState`].
///
/// Layer order on the listing route matters: query validation wraps the
/// optional auth gate, so malformed query parameters are a 400 before any
/// credential is inspected.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/users", post(handlers::public::users::register_post))
        .route("/api/v1/auth", post(handlers::public::auth::login_post))
        .merge(announcement_routes(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn announcement_routes(state: &AppState) -> Router<AppState> {
    let list = Router::new()
        .route(
            "/api/v1/announcements",
            get(handlers::announcements::list::announcements_get),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::optional_auth,
        ))
        .route_layer(axum_middleware::from_fn(
            middleware::validate_query::validate_listing_query,
        ));

    let create = Router::new()
        .route(
            "/api/v1/announcements",
            post(handlers::announcements::create::announcements_post),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    list.merge(create)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Marketplace API (Rust)",
        "version": version,
        "endpoints": {
            "register": "POST /api/v1/users (public)",
            "login": "POST /api/v1/auth (public)",
            "announcements": "GET /api/v1/announcements (optional auth), POST /api/v1/announcements (auth)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    let database = match &state.pool {
        Some(pool) => database::manager::health_check(pool).await.map(|_| "ok"),
        None => Ok("disabled"),
    };

    match database {
        Ok(database) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": database,
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string(),
            })),
        ),
    }
}
