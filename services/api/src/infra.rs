use cots_selector::config::SelectorConfig;
use cots_selector::error::AppError;
use cots_selector::selection::StaticCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog file from configuration, or the built-in reference records.
pub(crate) fn load_catalog(config: &SelectorConfig) -> Result<StaticCatalog, AppError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = StaticCatalog::from_path(path)?;
            info!(path = %path.display(), records = catalog.len(), "catalog loaded from file");
            Ok(catalog)
        }
        None => Ok(StaticCatalog::reference()),
    }
}

/// `key=value` pairs for `--field`. Values may be empty; keys may not.
pub(crate) fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
