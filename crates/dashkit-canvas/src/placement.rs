//! Collision tests and the free-slot placement search.
//!
//! All functions are pure over a widget snapshot. The search is bounded:
//! it prefers predictable termination over perfect packing and may return
//! a colliding candidate once the attempt budget runs out, in which case
//! the new widget simply stacks in z-order.

use dashkit_core::constants::{GRID_UNIT, PLACEMENT_MARGIN, PLACEMENT_MAX_ATTEMPTS};
use dashkit_core::{Point, Rect, Size, Widget};

/// Strict axis-aligned overlap test. Rectangles that merely touch along an
/// edge do not overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// True iff `candidate` overlaps any widget other than `exclude_id`.
pub fn has_collision(widgets: &[Widget], exclude_id: Option<&str>, candidate: &Rect) -> bool {
    widgets
        .iter()
        .filter(|w| exclude_id != Some(w.id.as_str()))
        .any(|w| rects_overlap(&w.rect(), candidate))
}

/// Deterministic scan for a free slot for a widget of `size`.
///
/// Starts at the placement margin, steps right two grid units per attempt,
/// and wraps to the left edge ten grid units further down when the
/// candidate would cross `container_width` minus the margin. Gives up
/// after [`PLACEMENT_MAX_ATTEMPTS`] candidates and returns the last one
/// even if it still collides, so widget creation never blocks.
pub fn find_free_position(widgets: &[Widget], size: Size, container_width: f64) -> Point {
    let max_x = container_width - size.width - PLACEMENT_MARGIN;
    let mut position = Point::new(PLACEMENT_MARGIN, PLACEMENT_MARGIN);
    let mut attempts = 0;

    while attempts < PLACEMENT_MAX_ATTEMPTS
        && has_collision(widgets, None, &Rect::from_parts(position, size))
    {
        position.x += 2.0 * GRID_UNIT;
        if position.x > max_x {
            position.x = PLACEMENT_MARGIN;
            position.y += 10.0 * GRID_UNIT;
        }
        attempts += 1;
    }

    tracing::trace!(
        x = position.x,
        y = position.y,
        attempts,
        "placement search finished"
    );
    position
}
