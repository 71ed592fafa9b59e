//! Subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "info,rozklad_core=debug,rozklad_client=debug,rozklad_cli=debug,program_tv=debug,rozklad_bus=debug";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug { DEBUG_FILTER } else { "info" }
}

/// Install the global subscriber. `RUST_LOG` wins over the flag; debug runs
/// trace to stdout as they go.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if debug {
        builder.with_writer(std::io::stdout).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}
