//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = hos_cli::run() {
        eprintln!("hos: {err}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so command output on stdout stays parseable.
/// `RUST_LOG` overrides the default `warn` level; `log` records from the
/// library crates are forwarded to the same subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
