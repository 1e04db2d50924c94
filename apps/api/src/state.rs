use std::sync::Arc;

use crate::career::scoring::ProfileScorer;
use crate::config::Config;
use crate::reference::models::ReferenceData;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only for the life of the process.
    pub reference: Arc<ReferenceData>,
    /// Pluggable similarity scorer. Default: EuclideanScorer.
    pub scorer: Arc<dyn ProfileScorer>,
}
