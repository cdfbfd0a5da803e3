//! Usage example: a dropdown that swaps between the five globe widgets.
//!
//! Serves the layout over WebSocket on 127.0.0.1:8051. The dropdown
//! offers the five selector values; each selection swaps the matching
//! globe into the container with fixed 800x600 dimensions. Run with
//! `RUST_LOG=debug` to watch the dispatch.

use std::sync::Arc;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use globekit_core::registry::ComponentRegistry;
use globekit_core::transport::Server;
use globekit_core::tree::{Element, Node};
use globekit_core::GlobeProps;

fn build_layout() -> Node {
    Element::new("div")
        .child(
            Element::new("dropdown")
                .id("globe-selector")
                .attr(
                    "options",
                    json!([
                        {"label": "Tiled Globe", "value": "tiled"},
                        {"label": "Globe with Arcs", "value": "arcs"},
                        {"label": "Basic Globe", "value": "basic"},
                        {"label": "Globe with Airline Routes", "value": "airlines"},
                        {"label": "Globe with Satellites", "value": "satellites"},
                    ]),
                )
                .attr("value", "tiled"),
        )
        .child(
            Element::new("div")
                .id("globe-container")
                .attr("style", json!({"width": "100%", "height": "800px"})),
        )
        .into()
}

#[tokio::main]
async fn main() -> globekit_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Arc::new(ComponentRegistry::with_globes());
    let server = Server::new(build_layout(), "globe-container", move |value| {
        registry
            .build(
                value,
                GlobeProps::new()
                    .id(format!("{value}-globe"))
                    .width(800)
                    .height(600),
            )
            .map(|component| component.to_node())
    });

    server.run("127.0.0.1:8051").await
}
