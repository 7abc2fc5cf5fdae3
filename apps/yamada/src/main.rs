//! # Yamada
//!
//! Spatial graph diagrams from the command line.
//!
//! ## Usage
//!
//! ```bash
//! yamada poly trefoil.pd
//! yamada simplify theta.json --tries 40 --output theta.min.json
//! yamada info theta.json --json
//! yamada enumerate shadows.pc --graph theta.json --crossings 3 --reject-r6
//! yamada distance trefoil.pd --target unknot.json
//! ```
//!
//! Logging goes to stderr. `YAMADA_LOG` (or `RUST_LOG`) sets the filter
//! and `YAMADA_LOG_FORMAT=json` switches to JSON lines.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yamada::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(&cli);

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(cli: &cli::Cli) {
    let default_level = if cli.verbose {
        "yamada=debug"
    } else if cli.quiet {
        "warn"
    } else {
        "yamada=info"
    };
    let filter = EnvFilter::try_from_env("YAMADA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_format = std::env::var("YAMADA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
