pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    config::Config,
    services::{
        AuditSink, DiceService, NoopAuditSink, PgAuditSink, RandomSource, SlackOAuthConfig,
        SlackOAuthService, SlackSignatureVerifier, ThreadRandom,
    },
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub dice: Arc<DiceService>,
    pub verifier: SlackSignatureVerifier,
    pub audit: Arc<dyn AuditSink>,
    pub oauth: Option<Arc<SlackOAuthService>>,
}

impl AppState {
    /// Wire the state from config plus the two injected collaborators.
    pub fn new(config: Config, audit: Arc<dyn AuditSink>, random: Arc<dyn RandomSource>) -> Self {
        let dice = DiceService::new(config.dice_limits(), random, &config.command_name);
        let verifier = SlackSignatureVerifier::new(
            config.slack_signing_secret.clone(),
            config.deployment_mode,
            config.slack_signature_tolerance_secs,
        );
        let oauth = SlackOAuthConfig::from_config(&config)
            .map(|cfg| Arc::new(SlackOAuthService::new(cfg)));

        Self {
            config,
            dice: Arc::new(dice),
            verifier,
            audit,
            oauth,
        }
    }
}

/// Create the application with all routes and middleware
pub async fn create_app(config: Config) -> Result<Router> {
    let audit = audit_sink(&config).await?;
    let state = AppState::new(config, audit, Arc::new(ThreadRandom));
    Ok(build_router(state))
}

/// Router without any I/O setup, used directly by tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::app_routes(&state))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(middleware::MAX_COMMAND_BODY_BYTES))
}

async fn audit_sink(config: &Config) -> Result<Arc<dyn AuditSink>> {
    if !config.deployment_mode.writes_audit_log() {
        tracing::info!("Audit log disabled in development mode");
        return Ok(Arc::new(NoopAuditSink));
    }

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, rolls will not be audited");
        return Ok(Arc::new(NoopAuditSink));
    };

    // Create database connection pool
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db).await?;

    Ok(Arc::new(PgAuditSink::new(db)))
}
