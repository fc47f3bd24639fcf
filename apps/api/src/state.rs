use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recommendation::extraction::TraitExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable trait extractor. Default: `LlmTraitExtractor`.
    pub trait_extractor: Arc<dyn TraitExtractor>,
}
