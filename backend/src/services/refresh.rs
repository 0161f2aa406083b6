//! Refresh signalling for stock alerts
//!
//! The alerts screen re-fetches its whole batch on three uncoordinated
//! triggers: a manual refresh, a fixed-interval poll, and order activity
//! elsewhere in the application. All three flow through one injected
//! broadcast bus; subscribers re-fetch and replace, so overlapping or
//! lagged signals simply coalesce into the next fetch.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Why a refresh was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// Operator pressed the refresh button
    Manual,
    /// Background poll tick
    Poll,
    /// A purchase order was created, updated or validated
    OrderActivity,
}

/// Broadcast bus carrying refresh signals
///
/// Cheap to clone; any collaborator holding a clone can publish.
#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshReason>,
    event_name: String,
}

impl RefreshBus {
    pub fn new(event_name: impl Into<String>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            event_name: event_name.into(),
        }
    }

    /// Name of the event as exposed to external collaborators
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Publish a refresh signal to all current subscribers
    ///
    /// Returns the number of subscribers reached. A bus with no
    /// subscribers is not an error; the signal is simply dropped.
    pub fn publish(&self, reason: RefreshReason) -> usize {
        match self.tx.send(reason) {
            Ok(receivers) => {
                tracing::debug!(event = %self.event_name, ?reason, receivers, "refresh published");
                receivers
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshReason> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Spawn the background poller publishing [`RefreshReason::Poll`] ticks
///
/// The task stops when `shutdown` flips to true; the first tick fires
/// after one full interval, not immediately.
pub fn spawn_poller(
    bus: RefreshBus,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // Consume the immediate first tick
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    bus.publish(RefreshReason::Poll);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("alert poller stopping");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_all_subscribers() {
        let bus = RefreshBus::new("stock-alerts-refresh", 16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(RefreshReason::Manual), 2);
        assert_eq!(rx1.recv().await.unwrap(), RefreshReason::Manual);
        assert_eq!(rx2.recv().await.unwrap(), RefreshReason::Manual);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let bus = RefreshBus::new("stock-alerts-refresh", 16);
        assert_eq!(bus.publish(RefreshReason::OrderActivity), 0);
    }

    #[tokio::test]
    async fn uncoordinated_triggers_queue_in_order() {
        let bus = RefreshBus::new("stock-alerts-refresh", 16);
        let mut rx = bus.subscribe();

        bus.publish(RefreshReason::Manual);
        bus.publish(RefreshReason::Poll);
        bus.publish(RefreshReason::OrderActivity);

        assert_eq!(rx.recv().await.unwrap(), RefreshReason::Manual);
        assert_eq!(rx.recv().await.unwrap(), RefreshReason::Poll);
        assert_eq!(rx.recv().await.unwrap(), RefreshReason::OrderActivity);
    }

    #[tokio::test(start_paused = true)]
    async fn poller_publishes_on_each_tick() {
        let bus = RefreshBus::new("stock-alerts-refresh", 16);
        let mut rx = bus.subscribe();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_poller(bus, Duration::from_secs(30), shutdown_rx);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert_eq!(rx.recv().await.unwrap(), RefreshReason::Poll);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(rx.recv().await.unwrap(), RefreshReason::Poll);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn poller_stops_on_shutdown() {
        let bus = RefreshBus::new("stock-alerts-refresh", 16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_poller(bus.clone(), Duration::from_secs(30), shutdown_rx);
        shutdown_tx.send(true).unwrap();

        handle.await.unwrap();
        assert_eq!(bus.publish(RefreshReason::Poll), 0);
    }
}
