use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::commands::Verbosity;

/// Default filter for a verbosity level; `RUST_LOG` takes precedence.
fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,plugin_info=error,plugin_catalog=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,plugin_info=warn,plugin_catalog=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,plugin_info=info,plugin_catalog=info",
        // Also show debug from our libraries
        Verbosity::Verbose(2) => "off,plugin_info=debug,plugin_catalog=debug",
        // Also show trace from our libraries
        Verbosity::Verbose(3) => "off,plugin_info=trace,plugin_catalog=trace",
        // Also show debug from HTTP internals
        Verbosity::Verbose(4) => "debug,plugin_info=trace,plugin_catalog=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

pub(crate) fn init_logger(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::registry().with(log_layer).try_init();
}
