use crate::clients::OrderClient;
use crate::config::{ConfigError, ServiceConfig};
use crate::execution::ExecutionScheduler;
use crate::model::OrderEvent;
use crate::order_actor;
use crate::service::OrderService;
use actor_framework::{BroadcastActor, Broadcaster};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running service: the order store, the broadcaster and the execution scheduler.
///
/// # Example
///
/// ```rust
/// use order_broadcast::config::ServiceConfig;
/// use order_broadcast::lifecycle::OrderSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::new(&ServiceConfig::default())?;
///     let (order, _execution) = system.service.place_order(false).await?;
///     assert_eq!(system.service.get_order(order.id).await?, order);
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    /// Entry point for every order operation. Clone it into request handlers.
    pub service: OrderService,

    events: Broadcaster<OrderEvent>,
    order_handle: JoinHandle<()>,
    broadcast_handle: JoinHandle<()>,
}

impl OrderSystem {
    /// Spawns both actors and wires them together.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (broadcast_actor, events) =
            BroadcastActor::<OrderEvent>::new(config.request_buffer, config.subscriber_buffer);
        let broadcast_handle = tokio::spawn(broadcast_actor.run());

        let (order_actor, order_resource_client) = order_actor::new(config.request_buffer);
        let order_handle = tokio::spawn(order_actor.run(events.clone()));

        let orders = OrderClient::new(order_resource_client);
        let scheduler = ExecutionScheduler::new(orders.clone(), config.execution_delay);
        let service = OrderService::new(orders, events.clone(), scheduler);

        info!(
            min_delay = ?config.execution_delay.min(),
            max_delay = ?config.execution_delay.max(),
            "Order system started"
        );

        Ok(Self {
            service,
            events,
            order_handle,
            broadcast_handle,
        })
    }

    /// Stops the system. See the [module docs](crate::lifecycle) for the sequence.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.service.scheduler().abort_all();
        drop(self.service);

        if let Err(e) = self.order_handle.await {
            error!("Order actor task failed: {:?}", e);
            return Err(format!("Order actor task failed: {:?}", e));
        }

        match self.events.close().await {
            Ok(closed) => info!(subscribers = closed, "Subscribers disconnected"),
            Err(e) => error!(error = %e, "Broadcaster already gone"),
        }
        drop(self.events);

        if let Err(e) = self.broadcast_handle.await {
            error!("Broadcast actor task failed: {:?}", e);
            return Err(format!("Broadcast actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
