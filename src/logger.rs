use std::sync::Once;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static INIT: Once = Once::new();

/// The filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Installs a compact `fmt` subscriber. Verbosity comes from the `RUST_LOG` environment variable.
/// Calling this more than once has no further effect.
pub fn setup_logger() {
  INIT.call_once(|| {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Another subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_thread_names(false)
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init();
  });
}
