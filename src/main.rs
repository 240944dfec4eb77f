//! vary-control demo server
//!
//! Serves the routes from a TOML config file through the `Vary` layers so
//! their effect can be inspected with any HTTP client:
//!
//! ```text
//! $ curl -sI http://127.0.0.1:8080/ | grep -i vary
//! vary: Accept-Encoding
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vary_control::config::{load_config, ServerConfig};
use vary_control::http::server::default_routes;
use vary_control::lifecycle::signals::trigger_on_ctrl_c;
use vary_control::observability::{logging, metrics};
use vary_control::{Shutdown, VaryServer};

#[derive(Parser)]
#[command(name = "vary-control")]
#[command(about = "Demo server for per-route Vary header control", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if config.routes.is_empty() {
        config.routes = default_routes();
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("vary-control v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        upstream_vary = ?config.vary.upstream,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal = shutdown.signalled();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move { trigger_on_ctrl_c(&ctrl_c).await });

    VaryServer::new(config).run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
