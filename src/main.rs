//! CORS relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  CORS RELAY                  │
//!                       │                                              │
//!     Browser / page    │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!     ──────────────────┼─▶│   cors   │──▶│ handlers │──▶│  relay   │──┼──▶ Upstream
//!                       │  │ + req id │   │ POST/GET │   │  client  │  │
//!                       │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                       │                                     │        │
//!     JSON envelope     │  ┌──────────┐   ┌──────────┐        │        │
//!     ◀─────────────────┼──│ response │◀──│ classify │◀───────┘        │
//!                       │  └──────────┘   └──────────┘                 │
//!                       │                                              │
//!                       │   config · observability · lifecycle         │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::config::resolve_config;
use cors_relay::observability::{logging::init_logging, metrics::init_metrics};
use cors_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Relay HTTP requests for clients that cannot make them directly", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port; overrides the configuration file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref(), args.port)?;

    init_logging(&config.observability);

    tracing::info!("cors-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream_timeout_secs = config.upstream.timeout_secs,
        forward_allow_list = config.security.forward_headers.is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Held for the life of the process; the server stops on OS signals.
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
