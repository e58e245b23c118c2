//! The layout store: canonical owner of the widget collection.
//!
//! All mutations are id-keyed and total: an absent id is a silent no-op.
//! Every committed mutation persists the entire collection under the
//! `widgets` key and publishes a layout event. Persistence failures are
//! logged and swallowed; in-memory state remains authoritative until the
//! next reload.

use std::sync::Arc;

use chrono::Utc;
use dashkit_core::{
    AppEvent, EventBus, LayoutEvent, Point, Size, Widget, WidgetDraft, WidgetKind, WidgetValue,
};

use crate::error::Result;
use crate::kv::{keys, KeyValueStore};

/// Ordered widget collection with persist-on-mutate semantics.
///
/// Collection order is visual z/tab order, not spatial order; new widgets
/// append at the end.
#[derive(Debug)]
pub struct LayoutStore {
    widgets: Vec<Widget>,
    kv: Box<dyn KeyValueStore>,
    bus: Arc<EventBus>,
    last_id: i64,
}

impl LayoutStore {
    /// Loads the collection from the key-value store. An absent `widgets`
    /// key yields the seed layout; an unreadable one is logged and also
    /// falls back to the seed rather than failing startup.
    pub fn load(kv: Box<dyn KeyValueStore>, bus: Arc<EventBus>) -> Self {
        let widgets = match kv.get(keys::WIDGETS) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(widgets) => widgets,
                Err(e) => {
                    tracing::warn!(error = %e, "persisted widget layout unreadable, reseeding");
                    Self::seed_layout()
                }
            },
            Ok(None) => {
                tracing::info!("no persisted layout, seeding defaults");
                Self::seed_layout()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted layout, seeding defaults");
                Self::seed_layout()
            }
        };

        let last_id = widgets
            .iter()
            .filter_map(|w| w.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            widgets,
            kv,
            bus,
            last_id,
        }
    }

    /// The default three-widget layout used on first run.
    pub fn seed_layout() -> Vec<Widget> {
        let seed = [
            (
                "1",
                WidgetKind::IdentitiesProvided,
                "Identities Provided",
                "Number of identities your store has provided to customers",
                Point::new(20.0, 20.0),
            ),
            (
                "2",
                WidgetKind::IterableMetric,
                "Clicked",
                "Number of provided identities who clicked on emails for the selected time period",
                Point::new(20.0, 240.0),
            ),
            (
                "3",
                WidgetKind::YotpoMetric,
                "Identities Provided demo",
                "Number of identities your store has provided to customers",
                Point::new(340.0, 20.0),
            ),
        ];

        seed.into_iter()
            .map(|(id, kind, title, description, position)| Widget {
                id: id.to_string(),
                kind,
                title: title.to_string(),
                description: description.to_string(),
                position,
                size: Size::new(300.0, 200.0),
                icon: None,
                value: Some(WidgetValue::Text("0".to_string())),
            })
            .collect()
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Moves a widget. No-op when the id is absent.
    pub fn set_position(&mut self, id: &str, position: Point) {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            tracing::debug!(widget = id, "set_position for unknown widget ignored");
            return;
        };
        widget.position = position;
        self.persist();
        self.bus.publish(AppEvent::Layout(LayoutEvent::WidgetMoved {
            id: id.to_string(),
            position,
        }));
    }

    /// Resizes a widget. The caller applies clamps before calling; the
    /// store does not re-validate. No-op when the id is absent.
    pub fn set_size(&mut self, id: &str, size: Size) {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            tracing::debug!(widget = id, "set_size for unknown widget ignored");
            return;
        };
        widget.size = size;
        self.persist();
        self.bus
            .publish(AppEvent::Layout(LayoutEvent::WidgetResized {
                id: id.to_string(),
                size,
            }));
    }

    /// Updates title and/or description; only provided fields change.
    /// No-op when the id is absent.
    pub fn set_content(&mut self, id: &str, title: Option<&str>, description: Option<&str>) {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            tracing::debug!(widget = id, "set_content for unknown widget ignored");
            return;
        };
        if let Some(title) = title {
            widget.title = title.to_string();
        }
        if let Some(description) = description {
            widget.description = description.to_string();
        }
        self.persist();
        self.bus
            .publish(AppEvent::Layout(LayoutEvent::WidgetContentChanged {
                id: id.to_string(),
            }));
    }

    /// Appends a new widget and returns its freshly assigned id.
    pub fn add(&mut self, draft: WidgetDraft) -> String {
        let id = self.next_id();
        let kind = draft.kind;
        self.widgets.push(draft.into_widget(id.clone()));
        self.persist();
        self.bus.publish(AppEvent::Layout(LayoutEvent::WidgetAdded {
            id: id.clone(),
            kind,
        }));
        id
    }

    /// Removes a widget. No-op when the id is absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        if self.widgets.len() == before {
            tracing::debug!(widget = id, "remove for unknown widget ignored");
            return;
        }
        self.persist();
        self.bus
            .publish(AppEvent::Layout(LayoutEvent::WidgetRemoved {
                id: id.to_string(),
            }));
    }

    /// Writes the whole collection to the key-value store.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.widgets)?;
        self.kv.set(keys::WIDGETS, &json)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            // In-memory state remains authoritative until next reload.
            tracing::warn!(error = %e, "failed to persist widget layout");
        }
    }

    /// Ids are wall-clock milliseconds, bumped monotonically within a
    /// session so rapid adds never collide.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }
}
