//! Loader entrypoint.
//!
//! [`load`] reads a [`Source`] into a [`RawTable`] using a [`SourceConfig`], and reports the
//! outcome to an optional [`LoadObserver`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::LoadResult;
use crate::types::RawTable;

use super::config::SourceConfig;
use super::csv::read_delimited;
use super::observability::{severity_for_error, LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::source::Source;

/// Options controlling a load.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Delimiter, encoding and header handling for the source.
    pub config: SourceConfig,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("config", &self.config)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config: SourceConfig::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Default options with a specific source config.
    pub fn with_config(config: SourceConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}

/// Load a source into a [`RawTable`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use workshop_data_processing::ingestion::{load, LoadOptions, SourceConfig};
///
/// # fn main() -> Result<(), workshop_data_processing::LoadError> {
/// let opts = LoadOptions::with_config(SourceConfig::service_sheet());
/// let raw = load("dados/servico.csv", &opts)?;
/// println!("rows={} headers={:?}", raw.row_count(), raw.headers);
/// # Ok(())
/// # }
/// ```
pub fn load(source: impl Into<Source>, options: &LoadOptions) -> LoadResult<RawTable> {
    let source = source.into();
    let result = source
        .read_bytes()
        .and_then(|bytes| read_delimited(&bytes, &source.to_string(), &options.config));

    match &result {
        Ok(table) => debug!(
            source = %source,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded raw table"
        ),
        Err(e) => debug!(source = %source, error = %e, "load failed"),
    }

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            source: source.clone(),
        };
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}
