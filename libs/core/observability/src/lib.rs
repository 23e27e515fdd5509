//! Metrics for the catalog services.
//!
//! Recording goes through the `metrics` facade, so the `CatalogMetrics`
//! calls are no-ops until [`init_metrics`] installs the Prometheus recorder.
//!
//! ```rust,ignore
//! use observability::{init_metrics, render_metrics, CatalogMetrics};
//!
//! init_metrics()?;
//! CatalogMetrics::record_write("create_product", true, 0.012);
//! println!("{}", render_metrics());
//! ```

pub mod catalog;

pub use catalog::CatalogMetrics;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
#[error("failed to install Prometheus recorder: {0}")]
pub struct MetricsError(#[from] BuildError);

/// Install the Prometheus recorder once and return its handle.
///
/// Later calls return the handle installed by the first one.
pub fn init_metrics() -> Result<&'static PrometheusHandle, MetricsError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        catalog::describe_metrics();
        Ok(handle)
    })
}

/// The installed handle, if [`init_metrics`] has run.
pub fn metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Prometheus exposition text, or a comment line when nothing is installed.
pub fn render_metrics() -> String {
    match metrics_handle() {
        Some(handle) => handle.render(),
        None => "# metrics recorder not initialized\n".to_string(),
    }
}
