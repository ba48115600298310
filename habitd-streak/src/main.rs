//! habitd-streak service binary.
//!
//! Startup order: tracing first, build identification line immediately
//! after, then configuration, database, and the HTTP server.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use habitd_streak::config::{Args, Config};
use habitd_streak::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting habitd-streak v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = Config::resolve(Args::parse())?;
    info!("Database path: {}", config.database.display());
    info!(rules = ?config.rules, "Day-validity rule set");

    let pool = db::connect(&config.database).await?;
    db::init_schema(&pool).await?;

    let state = AppState::new(pool, config.rules);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("habitd-streak listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
