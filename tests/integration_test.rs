use order_broadcast::config::ServiceConfig;
use order_broadcast::execution::{ExecutionDelay, ExecutionOutcome};
use order_broadcast::lifecycle::OrderSystem;
use order_broadcast::model::{OrderEvent, OrderStatus};
use order_broadcast::order_actor::OrderError;
use std::time::Duration;
use tokio::time::timeout;

/// Full system tests: real actors, real scheduler, short delays.
fn config(min_ms: u64, max_ms: u64) -> ServiceConfig {
    ServiceConfig {
        execution_delay: ExecutionDelay::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
            .unwrap(),
        ..ServiceConfig::default()
    }
}

#[tokio::test]
async fn test_placed_order_is_executed_and_announced() {
    let system = OrderSystem::new(&config(10, 30)).unwrap();
    let mut watcher = system.service.events().connect().await.unwrap();

    let (order, execution) = system.service.place_order(true).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);

    let pending = timeout(Duration::from_secs(1), watcher.recv()).await.unwrap();
    assert_eq!(pending, Some(OrderEvent { order_id: order.id, status: OrderStatus::Pending }));
    let executed = timeout(Duration::from_secs(1), watcher.recv()).await.unwrap();
    assert_eq!(executed, Some(OrderEvent { order_id: order.id, status: OrderStatus::Executed }));

    assert_eq!(execution.unwrap().outcome().await, Ok(ExecutionOutcome::Executed));
    assert_eq!(system.service.get_order(order.id).await.unwrap().status, OrderStatus::Executed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_without_execution_can_be_cancelled() {
    let system = OrderSystem::new(&config(10, 30)).unwrap();

    let (order, execution) = system.service.place_order(false).await.unwrap();
    assert!(execution.is_none());
    assert_eq!(system.service.scheduler().pending(), 0);

    let cancelled = system.service.cancel_order(order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        system.service.get_order(order.id).await,
        Err(OrderError::NotFound(order.id.to_string()))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_before_execution_turns_the_task_into_a_no_op() {
    let system = OrderSystem::new(&config(50, 80)).unwrap();
    let mut watcher = system.service.events().connect().await.unwrap();

    let (order, execution) = system.service.place_order(true).await.unwrap();
    system.service.cancel_order(order.id).await.unwrap();

    assert_eq!(execution.unwrap().outcome().await, Ok(ExecutionOutcome::Skipped));

    assert_eq!(watcher.recv().await.map(|e| e.status), Some(OrderStatus::Pending));
    assert_eq!(watcher.recv().await.map(|e| e.status), Some(OrderStatus::Cancelled));
    // The skipped execution published nothing: the next event is a new order's.
    let (marker, _) = system.service.place_order(false).await.unwrap();
    assert_eq!(watcher.recv().await, Some(marker.event()));
    assert_eq!(system.service.list_orders().await.unwrap(), vec![marker]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_and_empty_lookups_are_not_found() {
    let system = OrderSystem::new(&config(10, 30)).unwrap();

    assert_eq!(system.service.list_orders().await, Err(OrderError::Empty));
    let (order, _) = system.service.place_order(false).await.unwrap();
    system.service.cancel_order(order.id).await.unwrap();
    assert!(matches!(
        system.service.cancel_order(order.id).await,
        Err(OrderError::NotFound(_))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_aborts_pending_executions_and_ends_subscriptions() {
    let system = OrderSystem::new(&config(10_000, 20_000)).unwrap();
    let mut watcher = system.service.events().connect().await.unwrap();

    let (_, execution) = system.service.place_order(true).await.unwrap();
    assert_eq!(system.service.scheduler().pending(), 1);
    assert!(watcher.recv().await.is_some());

    timeout(Duration::from_secs(1), system.shutdown()).await.unwrap().unwrap();

    assert_eq!(execution.unwrap().outcome().await, Ok(ExecutionOutcome::Aborted));
    assert_eq!(watcher.recv().await, None);
}
