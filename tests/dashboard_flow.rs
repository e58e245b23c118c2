//! End-to-end dashboard flows over a file-backed store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashkit::{
    Dashboard, EventBus, FileStore, KeyValueStore, Point, Size, SurfaceConfig, WidgetKind,
};

fn open_dashboard(dir: &std::path::Path) -> Dashboard {
    let kv = FileStore::open(dir).expect("state dir");
    Dashboard::new(Box::new(kv), Arc::new(EventBus::new()), SurfaceConfig::default())
}

#[test]
fn adding_a_widget_uses_catalog_defaults_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut dash = open_dashboard(dir.path());
        dash.add_widget(WidgetKind::IdentitiesProvided, None)
    };

    let dash = open_dashboard(dir.path());
    let widget = dash.store().get(&id).expect("added widget survives reload");
    assert_eq!(widget.title, "Identities Provided");
    assert_eq!(
        widget.description,
        "Number of identities your store has provided to customers"
    );
    assert_eq!(widget.size, Size::new(300.0, 200.0));
    // The seed occupies the top-left slot, so placement moved on.
    assert_ne!(widget.position, Point::new(20.0, 20.0));
}

#[test]
fn drag_near_the_bottom_edge_scrolls_and_corrects_the_drop() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open_dashboard(dir.path());
    let start = Instant::now();

    assert!(dash.begin_drag("1"));
    dash.hover(Point::new(400.0, 590.0), start);

    // Three intervals elapse while the pointer sits at the edge.
    assert_eq!(dash.poll(start + Duration::from_millis(160)), 3);

    // Raw pointer delta, plus 30px of autoscroll accumulated mid-drag.
    let committed = dash.finish_drag("1", Point::new(12.0, 80.0)).unwrap();
    assert_eq!(committed, Point::new(32.0, 130.0));
    assert_eq!(dash.store().get("1").unwrap().position, committed);
    assert!(!dash.surface().is_autoscrolling());
}

#[test]
fn cancelled_drag_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let before = {
        let mut dash = open_dashboard(dir.path());
        let before = dash.store().get("1").unwrap().position;

        assert!(dash.begin_drag("1"));
        dash.hover(Point::new(400.0, 590.0), Instant::now());
        dash.cancel_drag("1");
        assert!(!dash.surface().is_autoscrolling());
        before
    };

    let dash = open_dashboard(dir.path());
    assert_eq!(dash.store().get("1").unwrap().position, before);
}

#[test]
fn resize_commits_within_constraints_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut dash = open_dashboard(dir.path());
        assert!(dash.begin_resize("2"));
        let committed = dash.finish_resize("2", Size::new(5000.0, 40.0)).unwrap();
        assert_eq!(committed, Size::new(800.0, 150.0));
    }

    let dash = open_dashboard(dir.path());
    assert_eq!(dash.store().get("2").unwrap().size, Size::new(800.0, 150.0));
}

#[test]
fn one_widget_one_gesture_at_a_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open_dashboard(dir.path());

    assert!(dash.begin_resize("3"));
    assert!(!dash.begin_drag("3"));
    // Other widgets are unaffected.
    assert!(dash.begin_drag("1"));

    // Releasing the resize frees the widget again.
    dash.finish_resize("3", Size::new(300.0, 200.0)).unwrap();
    assert!(dash.begin_drag("3"));
}

#[test]
fn layout_file_holds_the_whole_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut dash = open_dashboard(dir.path());
    dash.remove_widget("2");

    let kv = FileStore::open(dir.path()).unwrap();
    let json = kv.get(dashkit::keys::WIDGETS).unwrap().unwrap();
    let widgets: Vec<dashkit::Widget> = serde_json::from_str(&json).unwrap();
    let ids: Vec<_> = widgets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}
