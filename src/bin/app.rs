use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use adapter::database::connect_database_with;
use api::route::v1;
use registry::AppRegistry;
use shared::{
    config::AppConfig,
    env::{which, Environment},
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .init();

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    let registry = AppRegistry::new(pool);

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = "127.0.0.1:8080";
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind the listen address")?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .await
        .context("unexpected error happened in the server")
        .inspect_err(|e| {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "unexpected error")
        })
}
