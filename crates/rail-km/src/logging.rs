use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,rail_km_lib=debug,rail_km_client=debug,hyper_util=info,reqwest::connect=info"
    } else {
        "warn"
    }
}

/// Initialize logging.
///
/// Logs go to stderr; stdout only carries the cell value.
pub fn setup_logging() {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_filter()), false),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    if !from_env {
        tracing::debug!("RUST_LOG not set, using default: {}", default_filter());
    }
}
