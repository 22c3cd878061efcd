//! # Order Broadcast Service
//!
//! Starts the [`OrderSystem`] and serves its HTTP and WebSocket API until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=debug cargo run -- --port 8000 --min-delay-ms 100 --max-delay-ms 1000
//! ```

use clap::Parser;
use order_broadcast::config::ServiceConfig;
use order_broadcast::execution::ExecutionDelay;
use order_broadcast::lifecycle::{setup_tracing, OrderSystem};
use order_broadcast::server;
use std::time::Duration;
use tracing::{info, warn};

/// Command-line arguments for the order service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interface to bind
    #[arg(long, env = "ORDER_BROADCAST_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "ORDER_BROADCAST_PORT", default_value_t = 8000)]
    port: u16,

    /// Lower bound of the random execution delay, in milliseconds
    #[arg(long, default_value_t = 100)]
    min_delay_ms: u64,

    /// Upper bound of the random execution delay, in milliseconds
    #[arg(long, default_value_t = 1000)]
    max_delay_ms: u64,

    /// Events a subscriber may have queued before it is dropped
    #[arg(long, default_value_t = 64)]
    subscriber_buffer: usize,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        let execution_delay = ExecutionDelay::new(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )?;
        Ok(ServiceConfig {
            host: self.host,
            port: self.port,
            execution_delay,
            subscriber_buffer: self.subscriber_buffer,
            ..ServiceConfig::default()
        })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_tracing(&args.log_level);

    let config = args.into_config()?;
    let system = OrderSystem::new(&config)?;

    server::start_server(&config.bind_address(), system.service.clone(), shutdown_signal()).await?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
