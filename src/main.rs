//! Service entrypoint: configuration, pool setup, router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use siklusku::adapters::http::{
    cycle_router, daily_note_router, insight_router, CycleAppState, DailyNoteAppState,
    InsightAppState,
};
use siklusku::adapters::postgres::{
    PostgresCycleRepository, PostgresDailyNoteRepository, PostgresInsightRepository,
};
use siklusku::config::AppConfig;
use siklusku::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let cycle_repository: Arc<dyn CycleRepository> =
        Arc::new(PostgresCycleRepository::new(pool.clone()));
    let note_repository: Arc<dyn DailyNoteRepository> =
        Arc::new(PostgresDailyNoteRepository::new(pool.clone()));
    let insight_repository: Arc<dyn InsightRepository> =
        Arc::new(PostgresInsightRepository::new(pool));

    let cycle_state = CycleAppState::new(
        cycle_repository.clone(),
        note_repository.clone(),
        insight_repository.clone(),
        config.server.environment.clone(),
    );
    let note_state = DailyNoteAppState::new(
        note_repository.clone(),
        cycle_repository.clone(),
        insight_repository.clone(),
        config.server.environment.clone(),
    );
    let insight_state = InsightAppState::new(
        cycle_repository,
        note_repository,
        insight_repository,
    );

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let app = Router::new()
        .merge(cycle_router().with_state(cycle_state))
        .merge(daily_note_router().with_state(note_state))
        .merge(insight_router().with_state(insight_state))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "server listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
