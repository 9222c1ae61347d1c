//! ICPulse bot service entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use icpulse::{LlmProvider, MemoStore};
use icpulse_oc::OcClientFactory;

mod adapters;
mod alerts;
mod auth;
mod commands;
mod config;
mod envelope;
mod rate_limit;
mod routes;
mod services;

use adapters::InMemoryStore;
use alerts::AlertRegistry;
use config::Config;
use rate_limit::RateLimiter;
use services::{DashboardApi, GroqProvider, JokeApi, LedgerApi, SnsApi};

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: DashboardApi,
    pub ledger: LedgerApi,
    pub sns: SnsApi,
    pub jokes: JokeApi,
    pub llm: Option<Arc<dyn LlmProvider>>,
    pub store: Arc<dyn MemoStore>,
    pub alerts: Arc<AlertRegistry>,
    pub oc_factory: OcClientFactory,
}

impl AppState {
    fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        let llm: Option<Arc<dyn LlmProvider>> = match &config.groq_api_key {
            Some(key) => Some(Arc::new(GroqProvider::new(
                http.clone(),
                key.clone(),
                config.groq_model.clone(),
            ))),
            None => {
                warn!("GROQ_API_KEY not set; ask and summarize_proposal are disabled");
                None
            }
        };

        Ok(Self {
            dashboard: DashboardApi::new(http.clone(), config.ic_api_base.clone()),
            ledger: LedgerApi::new(http.clone(), config.ledger_api_base.clone()),
            sns: SnsApi::new(http.clone(), config.sns_api_base.clone()),
            jokes: JokeApi::new(http.clone()),
            llm,
            store: Arc::new(InMemoryStore::new()),
            alerts: Arc::new(AlertRegistry::new()),
            oc_factory: OcClientFactory::new(http),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icpulse_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let port = config.port;
    let state = AppState::new(config)?;
    let limiter = RateLimiter::new();

    let command_routes = Router::new()
        .route("/execute_command", post(routes::execute_command))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::command_jwt_middleware,
        ));

    let app = Router::new()
        .route("/", get(routes::bot_definition))
        .route("/bot_definition", get(routes::bot_definition))
        .merge(command_routes)
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "icpulse-server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
