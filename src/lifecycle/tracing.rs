//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the whole process.
//! `RUST_LOG` takes precedence; without it the level given on the command line applies.
//!
//! ```bash
//! RUST_LOG=info cargo run                       # lifecycle, placements, executions
//! RUST_LOG=debug cargo run                      # plus every publish and subscriber change
//! RUST_LOG=order_broadcast=debug,tower_http=info cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown of the order store and the broadcaster
//! - **Store Operations**: Create, Get, Update, Delete with the order id
//! - **Executions**: one `execution{order_id=...}` span per lifecycle task
//! - **Subscribers**: connects, disconnects and drops with the subscriber id
//! - **HTTP**: one span per request from `tower_http::trace::TraceLayer`
//!
//! A cancelled order whose lifecycle task wakes up later reads:
//!
//! ```text
//! INFO place_order{execute=true}: Order placed order_id=5b0e...
//! INFO cancel_order{id=5b0e...}: Order cancelled
//! DEBUG execution{order_id=5b0e...}: Order gone before execution
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes structured logging. Panics if a global subscriber is already set.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
