//! # Order Execution Scheduler
//!
//! Ages `PENDING` orders into `EXECUTED` in the background.
//!
//! [`ExecutionScheduler::schedule_execution`] spawns one task per order. The task
//! sleeps for a delay drawn from the configured [`ExecutionDelay`], then asks the
//! order actor to move the order to `EXECUTED`. The actor checks existence and applies
//! the transition in one step: if the order was cancelled (and therefore removed)
//! while the task slept, the update comes back `NotFound` and the task finishes as
//! [`ExecutionOutcome::Skipped`] without touching the store or publishing anything.
//! Tasks never retry and never reschedule.
//!
//! Running tasks are tracked by order id so they can be aborted, which is what
//! [`OrderSystem::shutdown`](crate::lifecycle::OrderSystem::shutdown) does.

mod delay;

pub use delay::ExecutionDelay;

use crate::clients::OrderClient;
use crate::model::{OrderId, OrderStatus};
use crate::order_actor::OrderError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, info_span, warn, Instrument};

/// How a lifecycle task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The order was moved to `EXECUTED` and the change published.
    Executed,
    /// The order no longer existed when the delay elapsed.
    Skipped,
    /// The task was aborted before it finished.
    Aborted,
}

/// Handle to one scheduled execution.
///
/// Dropping the handle does not stop the task.
#[derive(Debug)]
pub struct ExecutionHandle {
    order_id: OrderId,
    task: JoinHandle<Result<ExecutionOutcome, OrderError>>,
}

impl ExecutionHandle {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Waits for the task to finish.
    pub async fn outcome(self) -> Result<ExecutionOutcome, OrderError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(ExecutionOutcome::Aborted),
            Err(e) => Err(OrderError::ActorCommunicationError(format!(
                "execution task for {} failed: {}",
                self.order_id, e
            ))),
        }
    }
}

/// Spawns and tracks the per-order lifecycle tasks.
#[derive(Clone)]
pub struct ExecutionScheduler {
    orders: OrderClient,
    delay: ExecutionDelay,
    pending: Arc<DashMap<OrderId, (u64, AbortHandle)>>,
    tickets: Arc<AtomicU64>,
}

impl ExecutionScheduler {
    pub fn new(orders: OrderClient, delay: ExecutionDelay) -> Self {
        Self {
            orders,
            delay,
            pending: Arc::new(DashMap::new()),
            tickets: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Spawns the lifecycle task for `order_id`.
    pub fn schedule_execution(&self, order_id: OrderId) -> ExecutionHandle {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let delay = self.delay.sample();
        let orders = self.orders.clone();
        let pending = Arc::clone(&self.pending);

        let task = tokio::spawn(
            async move {
                let outcome = execute_after(&orders, order_id, delay).await;
                pending.remove_if(&order_id, |_, (owner, _)| *owner == ticket);
                outcome
            }
            .instrument(info_span!("execution", %order_id)),
        );

        self.pending.insert(order_id, (ticket, task.abort_handle()));
        // A zero delay can let the task finish before it was registered.
        if task.is_finished() {
            self.pending.remove_if(&order_id, |_, (owner, _)| *owner == ticket);
        }

        ExecutionHandle { order_id, task }
    }

    /// Number of lifecycle tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Aborts the lifecycle task of one order. Returns `false` if none was running.
    pub fn abort(&self, order_id: &OrderId) -> bool {
        match self.pending.remove(order_id) {
            Some((_, (_, handle))) => {
                handle.abort();
                debug!(%order_id, "Execution aborted");
                true
            }
            None => false,
        }
    }

    /// Aborts every running lifecycle task. Returns how many were stopped.
    pub fn abort_all(&self) -> usize {
        let mut aborted = 0;
        self.pending.retain(|_, (_, handle)| {
            handle.abort();
            aborted += 1;
            false
        });
        if aborted > 0 {
            info!(aborted, "Pending executions aborted");
        }
        aborted
    }
}

async fn execute_after(
    orders: &OrderClient,
    order_id: OrderId,
    delay: Duration,
) -> Result<ExecutionOutcome, OrderError> {
    debug!(?delay, "Execution scheduled");
    tokio::time::sleep(delay).await;

    match orders.update_status(order_id, OrderStatus::Executed).await {
        Ok(_) => {
            info!("Order executed");
            Ok(ExecutionOutcome::Executed)
        }
        Err(OrderError::NotFound(_)) => {
            debug!("Order gone before execution");
            Ok(ExecutionOutcome::Skipped)
        }
        Err(e) => {
            warn!(error = %e, "Execution failed");
            Err(e)
        }
    }
}
