//! # Event Bus Module
//!
//! Publish/subscribe plumbing between the layout store and the views that
//! render it. Mutations notify subscribers explicitly; there is no implicit
//! "re-run when inputs change" mechanism anywhere in the workspace.
//!
//! ## Usage
//!
//! ```rust
//! use dashkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Layout]),
//!     |event| {
//!         if let AppEvent::Layout(layout) = event {
//!             println!("layout event: {:?}", layout);
//!         }
//!     },
//! );
//!
//! // ... publish from the store, then detach when the view goes away.
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
