//! The scrollable drop target.
//!
//! The surface owns everything that makes drops land where the user
//! expects: the edge-proximity autoscroll direction, the recurring scroll
//! timer, the tracked scroll offset, and the drop-delta correction for
//! scrolling that happened mid-drag.
//!
//! The timer is a resource with the surface's lifetime: acquired lazily
//! when the direction first becomes nonzero, released when it returns to
//! zero, on drop of the gesture, and when the surface itself is dropped.
//! It is cooperative; the host event loop drives it via
//! [`CanvasSurface::poll_autoscroll`].

use std::time::{Duration, Instant};

use dashkit_core::constants::{
    AUTOSCROLL_INTERVAL, AUTOSCROLL_STEP, DEFAULT_CONTAINER_WIDTH, EDGE_SCROLL_THRESHOLD,
};
use dashkit_core::{Point, Rect, Size};

/// Tracked scroll position of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub left: f64,
    pub top: f64,
}

impl ScrollOffset {
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Per-axis autoscroll direction, recomputed on every drag-hover tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoscrollDirection {
    pub x: i8,
    pub y: i8,
}

impl AutoscrollDirection {
    pub const ZERO: AutoscrollDirection = AutoscrollDirection { x: 0, y: 0 };

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Surface geometry and policy knobs.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Bounding box of the surface in pointer coordinates.
    pub bounds: Rect,
    /// Pointer distance from an edge that engages autoscroll.
    pub edge_threshold: f64,
    /// Scroll offset applied per tick, per axis.
    pub scroll_step: f64,
    /// Tick interval while the direction is nonzero.
    pub interval: Duration,
    /// When set, committed positions are clamped so widgets stay inside a
    /// content box of this size. `None` keeps the canvas unbounded and
    /// widgets may be dragged to negative or off-canvas coordinates.
    pub clamp_to_bounds: Option<Size>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, DEFAULT_CONTAINER_WIDTH, 600.0),
            edge_threshold: EDGE_SCROLL_THRESHOLD,
            scroll_step: AUTOSCROLL_STEP,
            interval: AUTOSCROLL_INTERVAL,
            clamp_to_bounds: None,
        }
    }
}

#[derive(Debug)]
struct AutoscrollTimer {
    next_fire: Instant,
}

/// The drop target for widget drags.
#[derive(Debug)]
pub struct CanvasSurface {
    config: SurfaceConfig,
    scroll: ScrollOffset,
    scroll_at_drag_start: Option<ScrollOffset>,
    direction: AutoscrollDirection,
    timer: Option<AutoscrollTimer>,
}

impl CanvasSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            scroll: ScrollOffset::default(),
            scroll_at_drag_start: None,
            direction: AutoscrollDirection::ZERO,
            timer: None,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Width available for the placement search.
    pub fn container_width(&self) -> f64 {
        self.config.bounds.width
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    /// Records a scroll event. The surface listens continuously so drops
    /// can be corrected even when something else scrolled it.
    pub fn set_scroll(&mut self, offset: ScrollOffset) {
        self.scroll = offset;
    }

    pub fn autoscroll_direction(&self) -> AutoscrollDirection {
        self.direction
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.timer.is_some()
    }

    /// Marks the start of a drag over this surface, snapshotting the
    /// scroll offset so the drop delta can be corrected later.
    pub fn begin_drag(&mut self) {
        self.scroll_at_drag_start = Some(self.scroll);
    }

    /// Hover tick during an active drag: recompute the autoscroll
    /// direction from the pointer's distance to each edge, and acquire or
    /// release the timer accordingly. Both are idempotent.
    pub fn hover(&mut self, pointer: Point, now: Instant) -> AutoscrollDirection {
        let direction = self.direction_for(pointer);
        self.apply_direction(direction, now);
        direction
    }

    fn direction_for(&self, pointer: Point) -> AutoscrollDirection {
        let bounds = self.config.bounds;
        let threshold = self.config.edge_threshold;

        let from_top = pointer.y - bounds.y;
        let from_bottom = bounds.bottom() - pointer.y;
        let from_left = pointer.x - bounds.x;
        let from_right = bounds.right() - pointer.x;

        let y = if from_top < threshold {
            -1
        } else if from_bottom < threshold {
            1
        } else {
            0
        };
        let x = if from_left < threshold {
            -1
        } else if from_right < threshold {
            1
        } else {
            0
        };

        AutoscrollDirection { x, y }
    }

    fn apply_direction(&mut self, direction: AutoscrollDirection, now: Instant) {
        self.direction = direction;
        if direction.is_zero() {
            self.release_timer();
        } else if self.timer.is_none() {
            self.timer = Some(AutoscrollTimer {
                next_fire: now + self.config.interval,
            });
            tracing::trace!(x = direction.x, y = direction.y, "autoscroll timer acquired");
        }
    }

    fn release_timer(&mut self) {
        if self.timer.take().is_some() {
            tracing::trace!("autoscroll timer released");
        }
    }

    /// Fires every tick that has come due, shifting the scroll offset by
    /// one step per tick. Returns the number of ticks fired. A surface
    /// with no live timer never mutates its offset here.
    pub fn poll_autoscroll(&mut self, now: Instant) -> u32 {
        let direction = self.direction;
        let step = self.config.scroll_step;
        let interval = self.config.interval;

        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };

        let mut fired = 0;
        while now >= timer.next_fire {
            self.scroll.left = (self.scroll.left + f64::from(direction.x) * step).max(0.0);
            self.scroll.top = (self.scroll.top + f64::from(direction.y) * step).max(0.0);
            timer.next_fire += interval;
            fired += 1;
        }
        fired
    }

    /// Completes a drop: stops autoscroll and corrects the raw pointer
    /// delta by the scroll accumulated since the drag began.
    pub fn finish_drag(&mut self, raw_delta: Point) -> Point {
        self.direction = AutoscrollDirection::ZERO;
        self.release_timer();

        let origin = self.scroll_at_drag_start.take().unwrap_or(self.scroll);
        Point::new(
            raw_delta.x.round() + (self.scroll.left - origin.left),
            raw_delta.y.round() + (self.scroll.top - origin.top),
        )
    }

    /// Aborts a drag with no drop: stop autoscroll, forget the snapshot.
    pub fn cancel_drag(&mut self) {
        self.direction = AutoscrollDirection::ZERO;
        self.release_timer();
        self.scroll_at_drag_start = None;
    }

    /// Applies the configured position policy to a committed position.
    /// Unbounded by default; clamping is opt-in via
    /// [`SurfaceConfig::clamp_to_bounds`].
    pub fn clamp_position(&self, position: Point, size: Size) -> Point {
        match self.config.clamp_to_bounds {
            None => position,
            Some(content) => Point::new(
                position.x.clamp(0.0, (content.width - size.width).max(0.0)),
                position.y.clamp(0.0, (content.height - size.height).max(0.0)),
            ),
        }
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        // Surface teardown mid-drag must not leave timer state behind.
        self.release_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CanvasSurface {
        CanvasSurface::new(SurfaceConfig::default())
    }

    #[test]
    fn hover_in_the_middle_keeps_direction_zero() {
        let mut s = surface();
        let dir = s.hover(Point::new(400.0, 300.0), Instant::now());
        assert_eq!(dir, AutoscrollDirection::ZERO);
        assert!(!s.is_autoscrolling());
    }

    #[test]
    fn hover_near_edges_sets_direction() {
        let mut s = surface();
        let now = Instant::now();

        assert_eq!(
            s.hover(Point::new(400.0, 10.0), now),
            AutoscrollDirection { x: 0, y: -1 }
        );
        assert_eq!(
            s.hover(Point::new(400.0, 590.0), now),
            AutoscrollDirection { x: 0, y: 1 }
        );
        assert_eq!(
            s.hover(Point::new(10.0, 300.0), now),
            AutoscrollDirection { x: -1, y: 0 }
        );
        assert_eq!(
            s.hover(Point::new(790.0, 300.0), now),
            AutoscrollDirection { x: 1, y: 0 }
        );
        // Corner engages both axes.
        assert_eq!(
            s.hover(Point::new(790.0, 590.0), now),
            AutoscrollDirection { x: 1, y: 1 }
        );
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut s = surface();
        let start = Instant::now();
        s.hover(Point::new(400.0, 590.0), start);

        assert_eq!(s.poll_autoscroll(start), 0);
        assert_eq!(s.poll_autoscroll(start + Duration::from_millis(50)), 1);
        assert_eq!(s.scroll_offset(), ScrollOffset::new(0.0, 10.0));

        // 120ms later, two more ticks are due.
        assert_eq!(s.poll_autoscroll(start + Duration::from_millis(170)), 2);
        assert_eq!(s.scroll_offset(), ScrollOffset::new(0.0, 30.0));
    }

    #[test]
    fn timer_released_when_direction_returns_to_zero() {
        let mut s = surface();
        let start = Instant::now();
        s.hover(Point::new(400.0, 590.0), start);
        s.poll_autoscroll(start + Duration::from_millis(50));
        let offset = s.scroll_offset();

        s.hover(Point::new(400.0, 300.0), start + Duration::from_millis(60));
        assert!(!s.is_autoscrolling());

        // Torn down, not merely ignored: later polls change nothing.
        assert_eq!(s.poll_autoscroll(start + Duration::from_secs(10)), 0);
        assert_eq!(s.scroll_offset(), offset);
    }

    #[test]
    fn repeated_hover_does_not_restart_the_timer() {
        let mut s = surface();
        let start = Instant::now();
        s.hover(Point::new(400.0, 590.0), start);
        // A later hover in the same direction must not push next_fire out.
        s.hover(Point::new(410.0, 590.0), start + Duration::from_millis(40));
        assert_eq!(s.poll_autoscroll(start + Duration::from_millis(50)), 1);
    }

    #[test]
    fn scroll_does_not_go_negative() {
        let mut s = surface();
        let start = Instant::now();
        s.hover(Point::new(400.0, 10.0), start);
        s.poll_autoscroll(start + Duration::from_millis(200));
        assert_eq!(s.scroll_offset(), ScrollOffset::new(0.0, 0.0));
    }

    #[test]
    fn drop_delta_corrected_by_mid_drag_scroll() {
        let mut s = surface();
        s.begin_drag();
        s.set_scroll(ScrollOffset::new(0.0, 50.0));

        let adjusted = s.finish_drag(Point::new(10.0, -30.0));
        assert_eq!(adjusted, Point::new(10.0, 20.0));
    }

    #[test]
    fn drop_delta_ignores_scroll_present_before_the_drag() {
        let mut s = surface();
        s.set_scroll(ScrollOffset::new(0.0, 200.0));
        s.begin_drag();
        s.set_scroll(ScrollOffset::new(0.0, 250.0));

        let adjusted = s.finish_drag(Point::new(0.0, 0.0));
        assert_eq!(adjusted, Point::new(0.0, 50.0));
    }

    #[test]
    fn drop_stops_autoscroll() {
        let mut s = surface();
        let start = Instant::now();
        s.begin_drag();
        s.hover(Point::new(400.0, 590.0), start);
        assert!(s.is_autoscrolling());

        s.finish_drag(Point::new(0.0, 0.0));
        assert!(!s.is_autoscrolling());
        assert_eq!(s.autoscroll_direction(), AutoscrollDirection::ZERO);
        assert_eq!(s.poll_autoscroll(start + Duration::from_secs(1)), 0);
    }

    #[test]
    fn positions_unbounded_by_default() {
        let s = surface();
        let p = Point::new(-500.0, 9000.0);
        assert_eq!(p, s.clamp_position(p, Size::new(300.0, 200.0)));
    }

    #[test]
    fn positions_clamped_when_bounds_configured() {
        let mut config = SurfaceConfig::default();
        config.clamp_to_bounds = Some(Size::new(1000.0, 800.0));
        let s = CanvasSurface::new(config);

        let p = s.clamp_position(Point::new(-500.0, 9000.0), Size::new(300.0, 200.0));
        assert_eq!(p, Point::new(0.0, 600.0));
    }
}
