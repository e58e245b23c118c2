//! The dashboard widget record and the metric kind catalog.
//!
//! Field names follow the persisted wire format: `type` for the kind,
//! nested `position {x, y}` and `size {width, height}`, optional `icon`
//! and `value` omitted when absent.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_WIDGET_POSITION, DEFAULT_WIDGET_SIZE};
use crate::geometry::{Point, Rect, Size};

/// Closed set of metric widget kinds offered by the add-widget flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "identities-provided")]
    IdentitiesProvided,
    #[serde(rename = "iterable-metric")]
    IterableMetric,
    #[serde(rename = "yotpo-metric")]
    YotpoMetric,
}

impl WidgetKind {
    /// Every kind, in catalog order.
    pub const ALL: [WidgetKind; 3] = [
        WidgetKind::IdentitiesProvided,
        WidgetKind::IterableMetric,
        WidgetKind::YotpoMetric,
    ];

    /// Title used when an add intent carries no explicit title.
    pub fn default_title(&self) -> &'static str {
        match self {
            WidgetKind::IdentitiesProvided => "Identities Provided",
            WidgetKind::IterableMetric => "Iterable Metric",
            WidgetKind::YotpoMetric => "Yotpo Metric",
        }
    }

    /// Description used when an add intent carries no explicit description.
    pub fn default_description(&self) -> &'static str {
        match self {
            WidgetKind::IdentitiesProvided => {
                "Number of identities your store has provided to customers"
            }
            WidgetKind::IterableMetric => "Number of provided identities who opened emails",
            WidgetKind::YotpoMetric => "Number of provided identities who clicked on emails",
        }
    }

    /// Catalog icon glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            WidgetKind::IdentitiesProvided => "\u{1F464}",
            WidgetKind::IterableMetric => "\u{1F4E8}",
            WidgetKind::YotpoMetric => "\u{2709}\u{FE0F}",
        }
    }
}

/// Displayed metric value; the backend reports either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValue {
    Number(f64),
    Text(String),
}

/// A positioned, sized, titled metric tile on the dashboard canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique identifier, stable across renames.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    pub description: String,
    /// Position in pixels relative to the canvas origin. Unbounded.
    pub position: Point,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WidgetValue>,
}

impl Widget {
    /// The widget's footprint on the canvas.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// A widget awaiting an identifier, as handed to the layout store's `add`.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDraft {
    pub kind: WidgetKind,
    pub title: String,
    pub description: String,
    pub position: Point,
    pub size: Size,
    pub icon: Option<String>,
    pub value: Option<WidgetValue>,
}

impl WidgetDraft {
    /// Draft populated with the kind's catalog defaults. The position is a
    /// placeholder the placement search overrides before insertion.
    pub fn from_kind(kind: WidgetKind) -> Self {
        Self {
            kind,
            title: kind.default_title().to_string(),
            description: kind.default_description().to_string(),
            position: DEFAULT_WIDGET_POSITION,
            size: DEFAULT_WIDGET_SIZE,
            icon: Some(kind.icon().to_string()),
            value: None,
        }
    }

    /// Attaches an identifier, producing the final widget record.
    pub fn into_widget(self, id: String) -> Widget {
        Widget {
            id,
            kind: self.kind,
            title: self.title,
            description: self.description,
            position: self.position,
            size: self.size,
            icon: self.icon,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_wire_name() {
        let json = serde_json::to_string(&WidgetKind::IdentitiesProvided).unwrap();
        assert_eq!(json, r#""identities-provided""#);
        let kind: WidgetKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, WidgetKind::IdentitiesProvided);
    }

    #[test]
    fn widget_wire_shape() {
        let widget = WidgetDraft::from_kind(WidgetKind::IterableMetric).into_widget("7".into());
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "iterable-metric");
        assert_eq!(json["position"]["x"], 20.0);
        assert_eq!(json["size"]["width"], 300.0);
        // No value yet, so the field is omitted entirely.
        assert!(json.get("value").is_none());
    }

    #[test]
    fn value_accepts_both_wire_forms() {
        let n: WidgetValue = serde_json::from_str("42").unwrap();
        assert_eq!(n, WidgetValue::Number(42.0));
        let s: WidgetValue = serde_json::from_str(r#""0""#).unwrap();
        assert_eq!(s, WidgetValue::Text("0".into()));
    }

    #[test]
    fn draft_defaults_match_catalog() {
        let draft = WidgetDraft::from_kind(WidgetKind::YotpoMetric);
        assert_eq!(draft.title, "Yotpo Metric");
        assert_eq!(draft.size, Size::new(300.0, 200.0));
        assert_eq!(draft.position, Point::new(20.0, 20.0));
    }
}
