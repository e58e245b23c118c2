//! Per-widget gesture state machine.
//!
//! Replaces ad hoc `is_dragging`/`is_resizing` flags with one explicit
//! machine per widget: `Idle`, `Dragging`, or `Resizing`. Drag and resize
//! are mutually exclusive; either is reachable only from `Idle`, and a
//! rejected start is a quiet `false`, never an error, mirroring how the
//! pointer handlers suppress the later-claiming gesture.

use dashkit_core::constants::{
    MAX_WIDGET_HEIGHT, MAX_WIDGET_WIDTH, MIN_WIDGET_HEIGHT, MIN_WIDGET_WIDTH,
};
use dashkit_core::{Point, Size};

/// Current gesture phase for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// Result of a completed drag: the widget to move and the position delta
/// to apply. Deltas are relative because the drop surface may itself have
/// scrolled during the gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub widget_id: String,
    pub delta: Point,
}

/// Clamps a requested size to the widget resize constraints.
pub fn clamp_size(requested: Size) -> Size {
    Size::new(
        requested.width.clamp(MIN_WIDGET_WIDTH, MAX_WIDGET_WIDTH),
        requested.height.clamp(MIN_WIDGET_HEIGHT, MAX_WIDGET_HEIGHT),
    )
}

/// Tracks the in-progress gesture for a single widget.
#[derive(Debug, Clone)]
pub struct GestureController {
    widget_id: String,
    phase: GesturePhase,
}

impl GestureController {
    /// Creates an idle controller for the given widget.
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            phase: GesturePhase::Idle,
        }
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.phase == GesturePhase::Resizing
    }

    /// Attempts to start a drag. Rejected unless the widget is idle; in
    /// particular a widget currently resizing cannot start dragging.
    pub fn start_drag(&mut self) -> bool {
        match self.phase {
            GesturePhase::Idle => {
                self.phase = GesturePhase::Dragging;
                true
            }
            _ => {
                tracing::debug!(
                    widget = %self.widget_id,
                    phase = ?self.phase,
                    "drag start suppressed"
                );
                false
            }
        }
    }

    /// Ends a drag. `drop_delta` is the scroll-corrected delta reported by
    /// the drop target, or `None` when the gesture ended outside any valid
    /// target. Returns the outcome to commit, if any; the phase returns to
    /// idle unconditionally.
    pub fn finish_drag(&mut self, drop_delta: Option<Point>) -> Option<DragOutcome> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.phase = GesturePhase::Idle;
        drop_delta.map(|delta| DragOutcome {
            widget_id: self.widget_id.clone(),
            delta,
        })
    }

    /// Aborts whatever gesture is live, with no commit.
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Attempts to start a resize. Rejected unless the widget is idle; a
    /// dragging widget cannot start resizing.
    pub fn start_resize(&mut self) -> bool {
        match self.phase {
            GesturePhase::Idle => {
                self.phase = GesturePhase::Resizing;
                true
            }
            _ => {
                tracing::debug!(
                    widget = %self.widget_id,
                    phase = ?self.phase,
                    "resize start suppressed"
                );
                false
            }
        }
    }

    /// Size to render mid-resize for a pointer delta from the gesture
    /// start. Visual only; nothing is committed until release.
    pub fn resize_preview(&self, start: Size, dx: f64, dy: f64) -> Size {
        clamp_size(Size::new(start.width + dx, start.height + dy))
    }

    /// Ends a resize, returning the clamped size to commit. `None` if no
    /// resize was in progress. Resize always commits on release; there is
    /// no cancel path.
    pub fn finish_resize(&mut self, requested: Size) -> Option<Size> {
        if self.phase != GesturePhase::Resizing {
            return None;
        }
        self.phase = GesturePhase::Idle;
        Some(clamp_size(requested))
    }
}
