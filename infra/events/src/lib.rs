//! # Event Bus
//!
//! Typed broadcast channel used to observe deployment progress.
//!
//! The runner publishes a lifecycle event per registration step; test harnesses and
//! the CLI subscribe to report or assert on them. Built on `tokio::sync::broadcast`.
//!
//! # Example
//!
//! ```rust
//! use tnode_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Deployed { contract: &'static str }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe()?;
//!     bus.publish(Deployed { contract: "TestHelpers" });
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.contract, "TestHelpers");
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
