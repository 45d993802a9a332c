//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use axum::{
    Json, Router,
    extract::State,
    http::{self, Method, header},
    routing::get,
};
use clap::Parser;
use identity::{InMemoryIdentityRepository, PgIdentityRepository, identity_router};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DatabaseConfig, ServerConfig, StoreKind};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

static MIGRATOR: Migrator = sqlx::migrate!("../../database/migrations");

/// Identity service
#[derive(Parser, Debug)]
#[command(name = "api")]
#[command(about = "Identity service API server")]
struct Cli {
    /// Apply pending migrations and exit
    #[arg(long, conflicts_with_all = ["reset", "drop"])]
    migrate: bool,

    /// Drop all tables, re-apply migrations and exit
    #[arg(long, conflicts_with = "drop")]
    reset: bool,

    /// Drop all tables and exit
    #[arg(long)]
    drop: bool,
}

impl Cli {
    fn is_admin_command(&self) -> bool {
        self.migrate || self.reset || self.drop
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if cli.is_admin_command() {
        let database = DatabaseConfig::from_env()?;
        if database.store != StoreKind::Postgres {
            anyhow::bail!("--migrate, --reset and --drop require IDENTITY_STORE=postgres");
        }
        let pool = connect(&database).await?;
        return run_admin(&cli, pool).await;
    }

    let config = ServerConfig::from_env()?;

    let identity_routes = match config.database.store {
        StoreKind::Postgres => {
            let pool = connect(&config.database).await?;

            // Run migrations
            MIGRATOR.run(&pool).await?;
            tracing::info!("Migrations completed");

            identity_router(PgIdentityRepository::new(pool.clone()), config.identity.clone())
                .merge(health_router(Some(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory identity store; data is lost on shutdown");
            identity_router(InMemoryIdentityRepository::new(), config.identity.clone())
                .merge(health_router(None))
        }
    };

    let app = Router::new()
        .nest("/api/identity", identity_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins));

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.database_url()?)
        .await?;

    tracing::info!("Connected to database");

    Ok(pool)
}

async fn run_admin(cli: &Cli, pool: PgPool) -> anyhow::Result<()> {
    let repo = PgIdentityRepository::new(pool.clone());

    if cli.drop || cli.reset {
        repo.drop_tables().await?;
    }

    if cli.migrate || cli.reset {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Migrations completed");
    }

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

fn health_router(pool: Option<PgPool>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(pool)
}

/// GET /api/identity/health
async fn health(State(pool): State<Option<PgPool>>) -> AppResult<Json<serde_json::Value>> {
    if let Some(pool) = pool {
        sqlx::query("SELECT 1").execute(&pool).await?;
    }

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["api"]).unwrap();
        assert!(!cli.is_admin_command());

        let cli = Cli::try_parse_from(["api", "--reset"]).unwrap();
        assert!(cli.reset && cli.is_admin_command());

        assert!(Cli::try_parse_from(["api", "--migrate", "--drop"]).is_err());
        assert!(Cli::try_parse_from(["api", "--reset", "--drop"]).is_err());
    }

    #[tokio::test]
    async fn test_memory_store_app() {
        let app = Router::new().nest(
            "/api/identity",
            identity_router(
                InMemoryIdentityRepository::new(),
                identity::IdentityConfig::development(),
            )
            .merge(health_router(None)),
        );

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/identity/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::get("/api/identity/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["total"], 0);
        assert_eq!(body["totalPages"], 0);
    }
}
