//! # Dashkit Canvas
//!
//! The widget-canvas layout engine. Three layers, all free of I/O:
//!
//! - **Placement**: rectangle-overlap tests and the bounded free-slot
//!   search used when a widget is added
//! - **Gestures**: an explicit per-widget state machine for drag and
//!   resize, with the two mutually exclusive by construction
//! - **Surface**: the scrollable drop target that owns autoscroll timer
//!   state and corrects drop deltas for mid-drag scrolling
//!
//! The engine never touches the widget collection directly; it reports
//! deltas and committed sizes, and the orchestrator writes them through
//! the layout store.

pub mod gesture;
pub mod placement;
pub mod surface;

pub use gesture::{clamp_size, DragOutcome, GestureController, GesturePhase};
pub use placement::{find_free_position, has_collision, rects_overlap};
pub use surface::{AutoscrollDirection, CanvasSurface, ScrollOffset, SurfaceConfig};
