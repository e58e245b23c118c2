//! # Dashkit Core
//!
//! Core types shared by every Dashkit crate:
//!
//! - **Geometry**: plain pixel-space points, sizes, and rectangles
//! - **Widgets**: the dashboard widget record and the metric kind catalog
//! - **Constants**: grid, placement, size-constraint, and autoscroll tuning
//! - **Event bus**: synchronous subscriber registry that views attach to
//!   so layout and session mutations notify them explicitly
//!
//! Everything here is logic-free data plus the event plumbing; the layout
//! algorithms live in `dashkit-canvas` and persistence in `dashkit-store`.

pub mod constants;
pub mod event_bus;
pub mod geometry;
pub mod widget;

pub use event_bus::{
    AppEvent, EventBus, EventCategory, EventFilter, LayoutEvent, SessionEvent, SubscriptionId,
};
pub use geometry::{Point, Rect, Size};
pub use widget::{Widget, WidgetDraft, WidgetKind, WidgetValue};
