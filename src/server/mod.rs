//! HTTP and WebSocket server for the order service.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | live event page |
//! | `POST /orders?executeOrder=bool` | [`orders::place_order`] |
//! | `GET /orders` | [`orders::list_orders`] |
//! | `GET /orders/{id}` | [`orders::get_order`] |
//! | `DELETE /orders/{id}` | [`orders::cancel_order`] |
//! | `GET /ws` | [`ws::subscribe`] |

pub mod error;
pub mod orders;
pub mod ws;

pub use error::ApiError;

use crate::service::OrderService;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Orders</title>
    </head>
    <body>
        <h1>Live orders</h1>
        <ul id="messages"></ul>
        <script>
            var ws = new WebSocket("ws://" + location.host + "/ws");
            ws.onmessage = function(event) {
                var message = document.createElement("li");
                message.appendChild(document.createTextNode(event.data));
                document.getElementById("messages").appendChild(message);
            };
        </script>
    </body>
</html>
"#;

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Builds the application router.
pub fn router(service: OrderService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .route("/orders/{id}", get(orders::get_order).delete(orders::cancel_order))
        .route("/ws", get(ws::subscribe))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    service: OrderService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = router(service);
    tracing::info!("Order API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Binds `bind_address` and serves the API until `shutdown` resolves.
pub async fn start_server(
    bind_address: &str,
    service: OrderService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    serve(listener, service, shutdown).await
}
