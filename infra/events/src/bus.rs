use crate::error::EventBusError;
use std::any::type_name;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Deployment runs emit a handful of events per unit; 128 leaves ample headroom.
const DEFAULT_CAPACITY: usize = 128;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Event for T {}

/// Fan-out channel for a single event type.
///
/// Cloning the bus shares the underlying channel; receivers observe closure once
/// every clone is dropped or [`EventBus::close`] is called.
#[derive(Debug)]
pub struct EventBus<E: Event> {
    sender: Arc<parking_lot::RwLock<Option<broadcast::Sender<Arc<E>>>>>,
    capacity: usize,
}

impl<E: Event> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self { sender: Arc::clone(&self.sender), capacity: self.capacity }
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventBus<E> {
    /// Creates a bus with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender: Arc::new(parking_lot::RwLock::new(Some(tx))), capacity: DEFAULT_CAPACITY }
    }

    /// Creates a bus with a specific buffer capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "Capacity must be greater than zero".into(),
                context: Some(type_name::<E>().into()),
            });
        }
        let (tx, _) = broadcast::channel(capacity);
        Ok(Self { sender: Arc::new(parking_lot::RwLock::new(Some(tx))), capacity })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Subscribes to future events.
    ///
    /// # Errors
    /// Returns [`EventBusError::Closed`] after [`EventBus::close`].
    ///
    /// # Examples
    /// ```rust
    /// use tnode_event_bus::{EventBus, EventReceiverExt};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Deployed(&'static str);
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), tnode_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let mut rx = bus.subscribe()?;
    /// bus.publish(Deployed("TestToken"));
    /// assert_eq!(rx.recv_event().await.unwrap().0, "TestToken");
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe(&self) -> Result<broadcast::Receiver<Arc<E>>, EventBusError> {
        self.sender.read().as_ref().map(broadcast::Sender::subscribe).ok_or_else(|| {
            EventBusError::Closed {
                message: "Event bus is closed".into(),
                context: Some(type_name::<E>().into()),
            }
        })
    }

    /// Publishes an event, returning how many receivers got it.
    ///
    /// Publishing without subscribers (or after close) is not an error: deployment
    /// never depends on someone listening.
    pub fn publish(&self, event: E) -> usize {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance without re-wrapping.
    pub fn publish_arc(&self, event: Arc<E>) -> usize {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            trace!(event = type_name::<E>(), "Event dropped: bus closed");
            return 0;
        };

        sender.send(event).map_or_else(
            |_| {
                trace!(event = type_name::<E>(), "Event dropped: no active subscribers");
                0
            },
            |count| {
                trace!(event = type_name::<E>(), count, "Event dispatched");
                count
            },
        )
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.read().as_ref().map_or(0, broadcast::Sender::receiver_count)
    }

    /// Closes the channel for every clone; pending receivers drain and then see closure.
    ///
    /// Returns `true` if this call closed an open channel.
    pub fn close(&self) -> bool {
        self.sender.write().take().is_some()
    }
}
