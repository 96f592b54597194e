use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

const DEFAULT_FILTER: &str = "fork_tiler=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(HierarchicalLayer::new(2).with_targets(true).with_bracketed_fields(true))
        .try_init();
}
