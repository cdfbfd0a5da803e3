//! Integration Tests for Component Dispatch and Transport
//!
//! These tests verify that the registry, component records, and the
//! WebSocket transport work together the way the usage example wires
//! them.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use globekit_core::component::ComponentNode;
use globekit_core::registry::ComponentRegistry;
use globekit_core::transport::{ClientMessage, Server, ServerMessage};
use globekit_core::tree::{Element, Node};
use globekit_core::GlobeProps;

/// The dispatch the usage example installs: fixed 800x600 dimensions and
/// an id derived from the selector value.
fn select_globe(registry: &ComponentRegistry, value: &str) -> Option<ComponentNode> {
    registry
        .build(
            value,
            GlobeProps::new()
                .id(format!("{value}-globe"))
                .width(800)
                .height(600),
        )
        .map(|component| component.to_node())
}

#[test]
fn every_selector_maps_to_its_variant() {
    let registry = ComponentRegistry::with_globes();
    let expected = [
        ("tiled", "TiledGlobe"),
        ("arcs", "GlobeWithArcs"),
        ("basic", "BasicGlobe"),
        ("airlines", "GlobeWithAirlineRoutes"),
        ("satellites", "GlobeWithSatellites"),
    ];

    for (selector, type_tag) in expected {
        let node = select_globe(&registry, selector).unwrap();
        assert_eq!(node.type_tag, type_tag);
        assert_eq!(node.namespace, "globekit");
        assert_eq!(node.props["id"], json!(format!("{selector}-globe")));
        assert_eq!(node.props["width"], json!(800));
        assert_eq!(node.props["height"], json!(600));
    }
}

#[test]
fn unrecognized_selector_produces_no_component() {
    let registry = ComponentRegistry::with_globes();
    assert_eq!(select_globe(&registry, "mercator"), None);
}

#[test]
fn dispatched_records_list_only_declared_props() {
    let registry = ComponentRegistry::with_globes();
    let node = select_globe(&registry, "arcs").unwrap();
    let keys: Vec<&str> = node.props.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "width", "height"]);
}

/// Full transport exchange: connect, receive the layout, select a globe,
/// receive the swap; a repeated selection is suppressed and an unknown
/// one swaps in nothing.
#[tokio::test]
async fn transport_serves_layout_and_swaps_components() {
    let registry = Arc::new(ComponentRegistry::with_globes());
    let layout: Node = Element::new("div")
        .child(Element::new("dropdown").id("globe-selector"))
        .child(Element::new("div").id("globe-container"))
        .into();

    let server = Server::new(layout.clone(), "globe-container", move |value| {
        select_globe(&registry, value)
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.serve(listener));

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .unwrap();

    // Initial layout push.
    let frame = ws.next().await.unwrap().unwrap();
    let msg: ServerMessage = rmp_serde::from_slice(&frame.into_data()).unwrap();
    assert_eq!(msg, ServerMessage::Layout { root: layout });

    let select = |value: &str| {
        Message::Binary(
            rmp_serde::to_vec_named(&ClientMessage::Select {
                value: value.to_owned(),
            })
            .unwrap(),
        )
    };

    // Select the arcs globe.
    ws.send(select("arcs")).await.unwrap();
    let frame = ws.next().await.unwrap().unwrap();
    let msg: ServerMessage = rmp_serde::from_slice(&frame.into_data()).unwrap();
    match msg {
        ServerMessage::Swap { target, node } => {
            assert_eq!(target, "globe-container");
            let node = node.unwrap();
            assert_eq!(node.type_tag, "GlobeWithArcs");
            assert_eq!(node.props["id"], json!("arcs-globe"));
        }
        other => panic!("expected swap, got {other:?}"),
    }

    // A repeated selection produces no swap; the next frame we see must
    // be the answer to the unknown selector that follows it.
    ws.send(select("arcs")).await.unwrap();
    ws.send(select("mercator")).await.unwrap();
    let frame = ws.next().await.unwrap().unwrap();
    let msg: ServerMessage = rmp_serde::from_slice(&frame.into_data()).unwrap();
    assert_eq!(
        msg,
        ServerMessage::Swap {
            target: "globe-container".to_owned(),
            node: None,
        }
    );

    ws.close(None).await.unwrap();
}
