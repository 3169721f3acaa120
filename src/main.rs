//! PBX relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  PBX RELAY                   │
//!   Client Request       │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│  routing  │──▶│ validator │  │
//!                        │  │ server │   │   table   │   └─────┬─────┘  │
//!                        │  └────────┘   └───────────┘         │        │
//!                        │                                     ▼        │
//!   Client Response      │  ┌────────┐   ┌───────────┐   ┌───────────┐  │      PBX
//!   ◀────────────────────┼──│response│◀──│   relay   │◀──│ forwarder │◀─┼──── admin API
//!                        │  └────────┘   └───────────┘   └───────────┘  │
//!                        │                                              │
//!                        │   config · observability · lifecycle         │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pbx_relay::config::{load_config, ConfigError, ObservabilityConfig};
use pbx_relay::lifecycle::startup;
use pbx_relay::observability::init_logging;

#[derive(Parser)]
#[command(name = "pbx-relay", version, about = "Validating relay for a PBX administration API")]
struct Args {
    /// TOML configuration file. Environment variables override its values.
    #[arg(short, long, env = "PBX_RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_logging(&ObservabilityConfig::default());
            report_config_error(&err);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);
    tracing::info!("pbx-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        username = %config.upstream.username,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if let Err(err) = startup::run(config).await {
        tracing::error!(error = %err, "Relay failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

fn report_config_error(err: &ConfigError) {
    match err {
        ConfigError::Validation(errors) => {
            for e in errors {
                tracing::error!(field = e.field, reason = %e.reason, "Invalid configuration");
            }
        }
        other => tracing::error!(error = %other, "Failed to load configuration"),
    }
}
