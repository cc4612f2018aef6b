use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use social_feed_service::middleware::{CorrelationIdMiddleware, JwtAuthMiddleware, TokenValidator};
use social_feed_service::repository::{PostgresSocialRepository, SocialRepository};
use social_feed_service::{configure_routes, AppState, Config};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    info!("Starting social-feed-service");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        env = %config.app.env,
        http_port = config.app.http_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("SELECT 1")
        .execute(&pg_pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database migrations completed");
    }

    let repo: Arc<dyn SocialRepository> = Arc::new(PostgresSocialRepository::new(pg_pool));
    let state = web::Data::new(AppState::new(repo, config.feed.clone()));
    let validator = Arc::new(TokenValidator::new(
        &config.auth.jwt_secret,
        &config.auth.jwt_audience,
    ));

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    info!(host = %bind_addr.0, port = bind_addr.1, "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(validator.clone()))
            .wrap(CorrelationIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("social-feed-service shut down");
    Ok(())
}
