use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Ergonomic receive for bus subscribers.
///
/// Lagging receivers skip to the oldest retained event instead of failing.
pub trait EventReceiverExt<T> {
    /// Receive the next event, returning `None` when the channel is closed.
    fn recv_event(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;

    /// Collects everything currently buffered without waiting.
    fn drain_events(&mut self) -> Vec<Arc<T>>;
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv_event(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(event) => {
                    if skipped > 0 {
                        warn!(
                            event = std::any::type_name::<T>(),
                            skipped, "Event receiver lagged; continuing from oldest retained event"
                        );
                    }
                    return Some(event);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(event = std::any::type_name::<T>(), skipped = n, "Event receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn drain_events(&mut self) -> Vec<Arc<T>> {
        let mut events = Vec::new();
        loop {
            match self.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    debug!(event = std::any::type_name::<T>(), skipped = n, "Drain skipped events");
                },
                Err(_) => return events,
            }
        }
    }
}
