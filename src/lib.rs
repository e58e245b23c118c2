//! # Dashkit
//!
//! A role-gated metrics dashboard with a free-form widget canvas: client
//! users drag and resize metric tiles on a scrollable surface, and the
//! layout persists locally across sessions.
//!
//! ## Architecture
//!
//! Dashkit is organized as a workspace with multiple crates:
//!
//! 1. **dashkit-core** - geometry, widget model, constants, event bus
//! 2. **dashkit-canvas** - placement search, gesture state machines,
//!    autoscrolling drop surface
//! 3. **dashkit-store** - key-value persistence, layout store, session
//!    records and route gating
//! 4. **dashkit** - dashboard orchestrator and binary
//!
//! The orchestrator composes the canvas engine with the layout store:
//! gestures report deltas and committed sizes, the orchestrator applies
//! placement and clamping policy and writes results through the store,
//! and the store notifies subscribed views via the event bus.

pub mod dashboard;

pub use dashboard::{Dashboard, DashboardIntent, WidgetConfig};

pub use dashkit_canvas::{
    clamp_size, find_free_position, has_collision, rects_overlap, AutoscrollDirection,
    CanvasSurface, DragOutcome, GestureController, GesturePhase, ScrollOffset, SurfaceConfig,
};
pub use dashkit_core::{
    AppEvent, EventBus, EventCategory, EventFilter, LayoutEvent, Point, Rect, SessionEvent, Size,
    Widget, WidgetDraft, WidgetKind, WidgetValue,
};
pub use dashkit_store::{
    keys, FileStore, KeyValueStore, LayoutStore, MemoryStore, Session, StoreError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
