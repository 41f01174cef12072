//! Log subscriber setup
//!
//! Logs go to stderr; stdout carries the run report. `SCAFFOLD_LOG` takes
//! an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SCAFFOLD_LOG";

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose > 1)
        .try_init();
}
