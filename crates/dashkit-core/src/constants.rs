//! Layout tuning constants shared across the workspace.

use crate::geometry::{Point, Size};
use std::time::Duration;

/// Base grid unit for placement stepping, in pixels.
pub const GRID_UNIT: f64 = 10.0;

/// Margin kept between placed widgets and the canvas edges.
pub const PLACEMENT_MARGIN: f64 = 20.0;

/// Attempt budget for the free-slot search. After this many candidates the
/// search returns the last one even if it still collides; creation never
/// blocks on a crowded canvas.
pub const PLACEMENT_MAX_ATTEMPTS: u32 = 10;

/// Container width assumed when the surface has not been measured yet.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 800.0;

/// Position given to a widget before the placement search runs.
pub const DEFAULT_WIDGET_POSITION: Point = Point::new(20.0, 20.0);

/// Size given to a newly added widget.
pub const DEFAULT_WIDGET_SIZE: Size = Size::new(300.0, 200.0);

/// Resize constraints, enforced continuously while a resize is live.
pub const MIN_WIDGET_WIDTH: f64 = 200.0;
pub const MAX_WIDGET_WIDTH: f64 = 800.0;
pub const MIN_WIDGET_HEIGHT: f64 = 150.0;
pub const MAX_WIDGET_HEIGHT: f64 = 500.0;

/// Pointer distance from a surface edge that engages autoscroll.
pub const EDGE_SCROLL_THRESHOLD: f64 = 50.0;

/// Scroll offset applied per autoscroll tick, per axis.
pub const AUTOSCROLL_STEP: f64 = 10.0;

/// Interval between autoscroll ticks while the direction is nonzero.
pub const AUTOSCROLL_INTERVAL: Duration = Duration::from_millis(50);
