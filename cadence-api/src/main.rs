//! # Cadence API Server
//!
//! HTTP API for the Cadence habit and todo tracker.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - JWT authentication (register, login, refresh)
//! - Habit CRUD with history toggling and streak/rate stats
//! - Todo CRUD with a filtered, sorted tree view
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p cadence-api
//! ```

use cadence_api::{
    app::{build_router, AppState},
    config::Config,
};
use cadence_shared::db::{create_pool, run_migrations, DatabaseConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Cadence API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
