//! Event Bus implementation.
//!
//! Synchronous handler registry: publishing walks the registered handlers
//! inline on the publishing thread. This matches the single-threaded,
//! event-driven model of the dashboard; there is no broadcast channel and
//! no background dispatch.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription handle for unsubscribing from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter.
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(AppEvent) + Send + Sync>;

/// Central event bus for store-to-view notification.
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Handlers run inline on the publishing thread; returns the number of
    /// handlers that were invoked.
    pub fn publish(&self, event: AppEvent) -> usize {
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe with a synchronous handler.
    ///
    /// The handler is called on the publishing thread, so it should return
    /// quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let removed = handlers.remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{LayoutEvent, SessionEvent};
    use crate::geometry::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn moved(id: &str) -> AppEvent {
        AppEvent::Layout(LayoutEvent::WidgetMoved {
            id: id.to_string(),
            position: Point::new(40.0, 20.0),
        })
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_event_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let _id = bus.subscribe(EventFilter::All, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.publish(moved("1")), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let layout_count = Arc::new(AtomicUsize::new(0));
        let session_count = Arc::new(AtomicUsize::new(0));

        let lc = layout_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Layout]),
            move |_| {
                lc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let sc = session_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Session]),
            move |_| {
                sc.fetch_add(1, Ordering::SeqCst);
            },
        );

        bus.publish(moved("1"));
        bus.publish(AppEvent::Session(SessionEvent::SignedOut));

        assert_eq!(layout_count.load(Ordering::SeqCst), 1);
        assert_eq!(session_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_filter_matches() {
        let event = moved("1");

        assert!(EventFilter::All.matches(&event));
        assert!(EventFilter::Categories(vec![EventCategory::Layout]).matches(&event));
        assert!(!EventFilter::Categories(vec![EventCategory::Session]).matches(&event));
        assert!(
            EventFilter::Categories(vec![EventCategory::Layout, EventCategory::Session])
                .matches(&event)
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(moved("1")), 0);
    }
}
