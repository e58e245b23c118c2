//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::widget::WidgetKind;

/// Root event enum for all application events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Widget layout mutations.
    Layout(LayoutEvent),
    /// Session lifecycle changes.
    Session(SessionEvent),
}

impl AppEvent {
    /// Get the category of this event.
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Layout(_) => EventCategory::Layout,
            AppEvent::Session(_) => EventCategory::Session,
        }
    }
}

/// Event category for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Widget layout mutation events.
    Layout,
    /// Session lifecycle events.
    Session,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Layout => write!(f, "Layout"),
            EventCategory::Session => write!(f, "Session"),
        }
    }
}

/// Emitted by the layout store after each committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// A widget was added to the canvas.
    WidgetAdded { id: String, kind: WidgetKind },
    /// A widget moved to a new position.
    WidgetMoved { id: String, position: Point },
    /// A widget was resized.
    WidgetResized { id: String, size: Size },
    /// A widget's title and/or description changed.
    WidgetContentChanged { id: String },
    /// A widget was removed from the canvas.
    WidgetRemoved { id: String },
}

/// Emitted when the persisted session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session was written to the key-value store.
    SignedIn,
    /// The session keys were cleared.
    SignedOut,
}
