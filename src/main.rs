use std::sync::Arc;

use dashkit::{init_logging, Dashboard, EventBus, EventFilter, FileStore, SurfaceConfig};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    tracing::info!(
        version = dashkit::VERSION,
        built = dashkit::BUILD_DATE,
        "dashkit starting"
    );

    let state_dir =
        std::env::var("DASHKIT_STATE_DIR").unwrap_or_else(|_| ".dashkit".to_string());
    let kv = FileStore::open(&state_dir)?;

    let bus = Arc::new(EventBus::new());
    bus.subscribe(EventFilter::All, |event| {
        tracing::debug!(?event, "event");
    });

    let dashboard = Dashboard::new(Box::new(kv), bus, SurfaceConfig::default());

    tracing::info!(widgets = dashboard.widgets().len(), dir = %state_dir, "layout loaded");
    for widget in dashboard.widgets() {
        tracing::info!(
            id = %widget.id,
            kind = ?widget.kind,
            title = %widget.title,
            x = widget.position.x,
            y = widget.position.y,
            "widget"
        );
    }

    Ok(())
}
