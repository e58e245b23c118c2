//! The dashboard orchestrator.
//!
//! Composes the canvas engine with the layout store: one gesture machine
//! per widget, one shared drop surface, and the store as the single point
//! of mutation. Pointer handlers call in with raw deltas and sizes; the
//! orchestrator applies scroll correction, clamping, and placement before
//! anything is committed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use dashkit_canvas::{
    find_free_position, AutoscrollDirection, CanvasSurface, GestureController, SurfaceConfig,
};
use dashkit_core::{EventBus, Point, Size, Widget, WidgetDraft, WidgetKind, WidgetValue};
use dashkit_store::{KeyValueStore, LayoutStore};

/// Optional overrides for the add-widget flow; absent fields fall back to
/// the kind's catalog defaults.
#[derive(Debug, Clone, Default)]
pub struct WidgetConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub value: Option<WidgetValue>,
}

/// A request the dashboard raises for the hosting shell to satisfy,
/// typically by opening a modal.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    /// Open the add-widget picker over the kind catalog.
    AddWidget,
    /// Open the edit form pre-filled from the given widget.
    EditWidget(Widget),
}

/// Top-level dashboard state: widgets, gestures, and the drop surface.
#[derive(Debug)]
pub struct Dashboard {
    store: LayoutStore,
    surface: CanvasSurface,
    gestures: HashMap<String, GestureController>,
}

impl Dashboard {
    /// Loads the persisted layout and builds one gesture machine per
    /// widget.
    pub fn new(kv: Box<dyn KeyValueStore>, bus: Arc<EventBus>, config: SurfaceConfig) -> Self {
        let store = LayoutStore::load(kv, bus);
        let gestures = store
            .widgets()
            .iter()
            .map(|w| (w.id.clone(), GestureController::new(w.id.clone())))
            .collect();

        Self {
            store,
            surface: CanvasSurface::new(config),
            gestures,
        }
    }

    pub fn widgets(&self) -> &[Widget] {
        self.store.widgets()
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    /// Starts a drag on `id`. Rejected when the widget is unknown or is
    /// already mid-gesture.
    pub fn begin_drag(&mut self, id: &str) -> bool {
        let Some(gesture) = self.gestures.get_mut(id) else {
            tracing::debug!(widget = id, "drag start for unknown widget ignored");
            return false;
        };
        if !gesture.start_drag() {
            return false;
        }
        self.surface.begin_drag();
        true
    }

    /// Hover tick while a drag is live; drives edge autoscroll.
    pub fn hover(&mut self, pointer: Point, now: Instant) -> AutoscrollDirection {
        self.surface.hover(pointer, now)
    }

    /// Fires any due autoscroll ticks. The host event loop calls this
    /// whenever it wakes.
    pub fn poll(&mut self, now: Instant) -> u32 {
        self.surface.poll_autoscroll(now)
    }

    /// Drops `id` at `raw_delta` pixels from where the drag began, as
    /// reported by the pointer. Applies scroll correction and the surface's
    /// position policy, then commits through the store. Returns the
    /// committed position, or `None` when nothing was committed.
    pub fn finish_drag(&mut self, id: &str, raw_delta: Point) -> Option<Point> {
        let adjusted = self.surface.finish_drag(raw_delta);
        let gesture = self.gestures.get_mut(id)?;
        let outcome = gesture.finish_drag(Some(adjusted))?;

        let widget = self.store.get(&outcome.widget_id)?;
        let moved = widget.position + outcome.delta;
        let committed = self.surface.clamp_position(moved, widget.size);

        self.store.set_position(&outcome.widget_id, committed);
        Some(committed)
    }

    /// Aborts the drag on `id` with no commit.
    pub fn cancel_drag(&mut self, id: &str) {
        self.surface.cancel_drag();
        if let Some(gesture) = self.gestures.get_mut(id) {
            gesture.cancel();
        }
    }

    /// Starts a resize on `id`. Rejected when the widget is unknown or is
    /// already mid-gesture.
    pub fn begin_resize(&mut self, id: &str) -> bool {
        let Some(gesture) = self.gestures.get_mut(id) else {
            tracing::debug!(widget = id, "resize start for unknown widget ignored");
            return false;
        };
        gesture.start_resize()
    }

    /// Size to render mid-resize for a pointer delta. Visual only.
    pub fn resize_preview(&self, id: &str, dx: f64, dy: f64) -> Option<Size> {
        let gesture = self.gestures.get(id)?;
        let widget = self.store.get(id)?;
        Some(gesture.resize_preview(widget.size, dx, dy))
    }

    /// Ends the resize on `id`, committing the clamped size through the
    /// store. Returns the committed size, or `None` when no resize was in
    /// progress.
    pub fn finish_resize(&mut self, id: &str, requested: Size) -> Option<Size> {
        let gesture = self.gestures.get_mut(id)?;
        let committed = gesture.finish_resize(requested)?;
        self.store.set_size(id, committed);
        Some(committed)
    }

    /// Adds a widget of `kind`, placed by the free-slot search over the
    /// current layout. Returns the new widget's id.
    pub fn add_widget(&mut self, kind: WidgetKind, config: Option<WidgetConfig>) -> String {
        let mut draft = WidgetDraft::from_kind(kind);
        if let Some(config) = config {
            if let Some(title) = config.title {
                draft.title = title;
            }
            if let Some(description) = config.description {
                draft.description = description;
            }
            if config.value.is_some() {
                draft.value = config.value;
            }
        }

        draft.position =
            find_free_position(self.store.widgets(), draft.size, self.surface.container_width());

        let id = self.store.add(draft);
        self.gestures
            .insert(id.clone(), GestureController::new(id.clone()));
        tracing::info!(widget = %id, kind = ?kind, "widget added");
        id
    }

    /// Updates title and/or description on `id`.
    pub fn edit_widget(&mut self, id: &str, title: Option<&str>, description: Option<&str>) {
        self.store.set_content(id, title, description);
    }

    /// Removes `id` and its gesture machine. No-op on unknown ids.
    pub fn remove_widget(&mut self, id: &str) {
        self.store.remove(id);
        self.gestures.remove(id);
    }

    /// Raised by the add button.
    pub fn request_add(&self) -> DashboardIntent {
        DashboardIntent::AddWidget
    }

    /// Raised by a widget's edit affordance; `None` for unknown ids.
    pub fn request_edit(&self, id: &str) -> Option<DashboardIntent> {
        self.store
            .get(id)
            .cloned()
            .map(DashboardIntent::EditWidget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit_store::MemoryStore;

    fn dashboard() -> Dashboard {
        Dashboard::new(
            Box::new(MemoryStore::new()),
            Arc::new(EventBus::new()),
            SurfaceConfig::default(),
        )
    }

    #[test]
    fn starts_with_the_seed_layout() {
        let dash = dashboard();
        assert_eq!(dash.widgets().len(), 3);
    }

    #[test]
    fn drag_commits_through_the_store() {
        let mut dash = dashboard();
        assert!(dash.begin_drag("1"));

        let committed = dash.finish_drag("1", Point::new(100.0, 50.0)).unwrap();
        assert_eq!(committed, Point::new(120.0, 70.0));
        assert_eq!(dash.store().get("1").unwrap().position, committed);
    }

    #[test]
    fn cancelled_drag_leaves_the_store_untouched() {
        let mut dash = dashboard();
        let before = dash.store().get("1").unwrap().position;

        assert!(dash.begin_drag("1"));
        dash.cancel_drag("1");
        assert_eq!(dash.store().get("1").unwrap().position, before);

        // And the widget is free to start a new gesture.
        assert!(dash.begin_resize("1"));
    }

    #[test]
    fn gestures_are_per_widget() {
        let mut dash = dashboard();
        assert!(dash.begin_drag("1"));
        // A different widget may drag concurrently.
        assert!(dash.begin_drag("2"));
        // The same widget may not resize while dragging.
        assert!(!dash.begin_resize("1"));
    }

    #[test]
    fn added_widget_avoids_the_seed_tiles() {
        let mut dash = dashboard();
        let id = dash.add_widget(WidgetKind::IterableMetric, None);
        let widget = dash.store().get(&id).unwrap();

        // The seed occupies {20,20} so the search moved off it.
        assert_ne!(widget.position, Point::new(20.0, 20.0));
        // And the new widget immediately supports gestures.
        assert!(dash.begin_drag(&id));
    }

    #[test]
    fn add_config_overrides_catalog_defaults() {
        let mut dash = dashboard();
        let id = dash.add_widget(
            WidgetKind::YotpoMetric,
            Some(WidgetConfig {
                title: Some("Opened".into()),
                description: None,
                value: Some(WidgetValue::Number(12.0)),
            }),
        );
        let widget = dash.store().get(&id).unwrap();
        assert_eq!(widget.title, "Opened");
        assert_eq!(
            widget.description,
            WidgetKind::YotpoMetric.default_description()
        );
        assert_eq!(widget.value, Some(WidgetValue::Number(12.0)));
    }

    #[test]
    fn removed_widget_rejects_gestures() {
        let mut dash = dashboard();
        dash.remove_widget("2");
        assert_eq!(dash.widgets().len(), 2);
        assert!(!dash.begin_drag("2"));
    }

    #[test]
    fn edit_intent_carries_the_widget() {
        let dash = dashboard();
        let Some(DashboardIntent::EditWidget(widget)) = dash.request_edit("1") else {
            panic!("expected an edit intent");
        };
        assert_eq!(widget.id, "1");
        assert!(dash.request_edit("missing").is_none());
        assert_eq!(dash.request_add(), DashboardIntent::AddWidget);
    }

    #[test]
    fn resize_commits_clamped() {
        let mut dash = dashboard();
        assert!(dash.begin_resize("1"));
        let committed = dash.finish_resize("1", Size::new(2000.0, 10.0)).unwrap();
        assert_eq!(committed, Size::new(800.0, 150.0));
        assert_eq!(dash.store().get("1").unwrap().size, committed);
    }
}
