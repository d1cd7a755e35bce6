use std::sync::Arc;

use crate::config::Config;
use crate::templates::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only preset tables, built once at startup.
    pub catalog: Arc<TemplateCatalog>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(TemplateCatalog::new(config.default_layout));
        AppState { config, catalog }
    }
}
