use std::sync::Arc;

use marketplace_api_rust::auth::TokenService;
use marketplace_api_rust::config::AppConfig;
use marketplace_api_rust::database::{self, PostgresAnnouncementStore, PostgresUserStore};
use marketplace_api_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting marketplace API in {:?} mode", config.environment);

    if config.security.token_secret.is_empty() {
        anyhow::bail!("TOKEN_SECRET must be set outside development");
    }

    let pool = database::manager::connect(&config.database).await?;

    let state = AppState {
        token: Arc::new(TokenService::new(
            &config.security.token_secret,
            config.security.token_ttl_secs,
        )),
        users: Arc::new(PostgresUserStore::new(pool.clone())),
        announcements: Arc::new(PostgresAnnouncementStore::new(pool.clone())),
        pool: Some(pool),
    };

    let app = marketplace_api_rust::app(state);

    let bind_addr = format!("{}:{}", config.server.bind_ip, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Marketplace API listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
