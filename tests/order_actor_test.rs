use actor_framework::{BroadcastActor, Broadcaster, Subscription};
use order_broadcast::clients::OrderClient;
use order_broadcast::model::{OrderEvent, OrderStatus};
use order_broadcast::order_actor::{self, OrderError};

/// Real Order actor with a real broadcaster as its context.
///
/// Every status change must reach the subscriber exactly once, in the order it
/// happened, and rejected changes must reach it not at all.
async fn start() -> (OrderClient, Broadcaster<OrderEvent>, Subscription<OrderEvent>) {
    let (broadcast_actor, events) = BroadcastActor::new(16, 16);
    tokio::spawn(broadcast_actor.run());
    let watcher = events.connect().await.unwrap();

    let (actor, client) = order_actor::new(16);
    tokio::spawn(actor.run(events.clone()));
    (OrderClient::new(client), events, watcher)
}

#[tokio::test]
async fn test_every_transition_is_published_in_order() {
    let (orders, _events, mut watcher) = start().await;

    let executed = orders.create_order().await.unwrap();
    let cancelled = orders.create_order().await.unwrap();
    assert_eq!(executed.status, OrderStatus::Pending);

    orders.update_status(executed.id, OrderStatus::Executed).await.unwrap();
    let last_seen = orders.cancel_order(cancelled.id).await.unwrap();
    assert_eq!(last_seen.status, OrderStatus::Cancelled);

    let expected = [
        (executed.id, OrderStatus::Pending),
        (cancelled.id, OrderStatus::Pending),
        (executed.id, OrderStatus::Executed),
        (cancelled.id, OrderStatus::Cancelled),
    ];
    for (order_id, status) in expected {
        assert_eq!(watcher.recv().await, Some(OrderEvent { order_id, status }));
    }
}

#[tokio::test]
async fn test_cancelled_orders_are_removed() {
    let (orders, _events, _watcher) = start().await;
    let order = orders.create_order().await.unwrap();

    orders.cancel_order(order.id).await.unwrap();

    assert_eq!(
        orders.get_order(order.id).await,
        Err(OrderError::NotFound(order.id.to_string()))
    );
    assert_eq!(orders.list_orders().await, Err(OrderError::Empty));
    // The lifecycle task's update after a cancellation finds nothing to execute.
    assert!(matches!(
        orders.update_status(order.id, OrderStatus::Executed).await,
        Err(OrderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_executed_orders_cannot_be_cancelled() {
    let (orders, events, mut watcher) = start().await;
    let order = orders.create_order().await.unwrap();
    orders.update_status(order.id, OrderStatus::Executed).await.unwrap();
    watcher.recv().await.unwrap();
    watcher.recv().await.unwrap();

    let err = orders.cancel_order(order.id).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidState {
            id: order.id,
            status: OrderStatus::Executed,
            requested: OrderStatus::Cancelled,
        }
    );
    assert_eq!(orders.get_order(order.id).await.unwrap().status, OrderStatus::Executed);

    // Nothing was published for the rejected cancel: the next event is this marker.
    let marker = orders.create_order().await.unwrap();
    assert_eq!(watcher.recv().await, Some(marker.event()));
    assert_eq!(events.subscriber_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_orders_survive_a_vanished_broadcaster() {
    let (broadcast_actor, events) = BroadcastActor::<OrderEvent>::new(4, 4);
    drop(broadcast_actor);

    let (actor, client) = order_actor::new(4);
    tokio::spawn(actor.run(events));
    let orders = OrderClient::new(client);

    let order = orders.create_order().await.unwrap();
    assert_eq!(orders.list_orders().await.unwrap(), vec![order]);
}
