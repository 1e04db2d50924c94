mod assessment;
mod career;
mod config;
mod errors;
mod export;
mod extract;
mod reference;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::career::scoring::EuclideanScorer;
use crate::config::Config;
use crate::reference::loader::load_reference_data;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting self-assessment API v{}", env!("CARGO_PKG_VERSION"));

    // Load reference data once; a missing or malformed workbook is fatal
    let reference = load_reference_data(&config.reference_workbook, &config.competency_columns)
        .with_context(|| {
            format!(
                "loading reference workbook {}",
                config.reference_workbook.display()
            )
        })?;
    info!(
        areas = crate::reference::selection::areas(&reference.competencies).len(),
        competencies = ?reference.competency_set().names(),
        "Reference data ready"
    );

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;
    info!("Records are saved under {}", config.output_dir.display());

    // Build app state
    let state = AppState {
        reference: Arc::new(reference),
        scorer: Arc::new(EuclideanScorer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the form's origin once it is hosted

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
