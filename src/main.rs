//! Headless demo: an in-process hub seeded with a small library, one
//! widget instance, and a scripted interaction sequence.
//!
//! Run with `RUST_LOG=debug` to watch the controller react to pushes.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ds_app::WidgetDeps;
use ds_core::ids::ResourceId;
use ds_core::library::BoxFacet;
use ds_core::ports::NewEntry;
use ds_core::privilege::CallerIdentity;
use ds_infra::{FileConfigSource, LoggingLinkOpener, LoggingRenderer, MemoryHub, ScriptedInteraction};
use dvdshelf::ShelfWidget;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    dvdshelf::register_widget_type();

    let hub = Arc::new(MemoryHub::new(ResourceId::from("sensor.dvd_library")));
    hub.set_caller(CallerIdentity {
        display_name: "Demo Owner".to_string(),
        is_owner: true,
        is_admin: false,
    });
    hub.seed(vec![
        json!({
            "title": "The Matrix",
            "year": "1999",
            "external_id": "tt0133093",
            "poster_url": "http://img.example/matrix.jpg",
            "box_number": 1,
        }),
        json!({
            "title": "Arrival",
            "year": "2016",
            "secondary_code": "7321931145014",
            "box_number": 2,
        }),
        json!({ "title": "Alien", "year": "1979" }),
        // No identifiers at all: only removable by snapshot position.
        json!({ "year": "1982", "box_number": 3 }),
    ]);

    let interaction = Arc::new(ScriptedInteraction::assenting().with_prompt_answer("3"));
    let deps = WidgetDeps {
        host: hub.clone(),
        identity: hub.clone(),
        events: hub.clone(),
        commands: hub.clone(),
        interaction: interaction.clone(),
        links: Arc::new(LoggingLinkOpener::new()),
        renderer: Arc::new(LoggingRenderer),
    };

    // An optional path argument supplies the partial configuration the way
    // an embedding host would; otherwise a built-in one is used.
    let partial = match std::env::args().nth(1) {
        Some(path) => FileConfigSource::new(path).load().await?,
        None => json!({
            "resource_id": "sensor.dvd_library",
            "fields": { "secondary_code": true },
            "hold_action": "assign_box",
        }),
    };
    let widget = ShelfWidget::activate(&partial, deps)?;

    info!("host binding arrives: privilege resolves, subscription attaches");
    widget.on_host_update().await;

    info!("searching for \"19\"");
    widget.controller().set_query("19").await;

    info!("narrowing to box 1");
    widget.controller().set_facet(BoxFacet::Box(1)).await;
    widget.controller().set_facet(BoxFacet::All).await;
    widget.controller().set_query("").await;

    info!("adding an entry; the hub pushes a change event back");
    widget
        .controller()
        .submit_add(&NewEntry {
            title: "Dune".to_string(),
            year: "2021".to_string(),
            external_id: "tt1160419".to_string(),
            ..NewEntry::default()
        })
        .await;

    // Give the push event a moment to pump through.
    tokio::time::sleep(Duration::from_millis(50)).await;

    info!("removing the identifier-less entry (removed by position)");
    let untitled = ds_core::library::project(&hub.records())
        .into_iter()
        .find(|m| m.title.is_empty())
        .expect("seeded entry present");
    widget.controller().request_remove(&untitled).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    info!(remaining = hub.records().len(), "tearing down");
    widget.teardown().await;
    Ok(())
}
