//! WebSocket Transport
//!
//! Serves the layout tree to front-end clients and swaps component
//! leaves in response to selector changes.
//!
//! # Protocol
//!
//! All frames are MessagePack-encoded binary. On connect the server
//! sends [`ServerMessage::Layout`] with the full tree. The client then
//! sends [`ClientMessage::Select`] whenever its selector control
//! changes, and the server answers with [`ServerMessage::Swap`] carrying
//! the target container id and the new component record (or no record,
//! when the selected value resolves to nothing).
//!
//! Selection resolution is a caller-supplied closure, so the server
//! stays independent of any particular component family. Each
//! connection remembers its last selection and suppresses swaps for
//! repeated values; the host framework treats an identical record as a
//! no-op anyway, so there is no point shipping it.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::component::ComponentNode;
use crate::error::Result;
use crate::tree::Node;

/// Messages sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The selector control changed to `value`.
    Select {
        /// The selected value.
        value: String,
    },
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The full layout tree, sent once on connect.
    Layout {
        /// Root of the tree.
        root: Node,
    },
    /// Replace the children of the element identified by `target`.
    Swap {
        /// Id of the container element to swap into.
        target: String,
        /// The new component record, or `None` to empty the container.
        node: Option<ComponentNode>,
    },
}

/// Resolves a selector value to a component record.
pub type SelectHandler = dyn Fn(&str) -> Option<ComponentNode> + Send + Sync;

/// WebSocket server for one layout.
pub struct Server {
    layout: Node,
    target: String,
    on_select: Arc<SelectHandler>,
}

impl Server {
    /// Create a server for the given layout.
    ///
    /// `target` is the id of the container element that swaps receive;
    /// `on_select` maps each selected value to the record shown there.
    pub fn new<F>(layout: Node, target: impl Into<String>, on_select: F) -> Self
    where
        F: Fn(&str) -> Option<ComponentNode> + Send + Sync + 'static,
    {
        Self {
            layout,
            target: target.into(),
            on_select: Arc::new(on_select),
        }
    }

    /// Bind to `addr` and serve until the task is dropped.
    pub async fn run(self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        info!(%local_addr, "transport listening");

        let server = Arc::new(self);
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                debug!(%peer, "client connected");
                if let Err(err) = server.handle_connection(stream).await {
                    warn!(%peer, %err, "connection closed with error");
                } else {
                    debug!(%peer, "client disconnected");
                }
            });
        }
    }

    async fn handle_connection(&self, stream: TcpStream) -> Result<()> {
        let ws = tokio_tungstenite::accept_async(stream).await?;
        let (mut tx, mut rx) = ws.split();

        // Initial layout push.
        let layout = ServerMessage::Layout {
            root: self.layout.clone(),
        };
        tx.send(Message::Binary(rmp_serde::to_vec_named(&layout)?))
            .await?;

        // Last selection seen on this connection.
        let mut current: Option<String> = None;

        while let Some(frame) = rx.next().await {
            match frame? {
                Message::Binary(buf) => {
                    let ClientMessage::Select { value } = rmp_serde::from_slice(&buf)?;
                    if current.as_deref() == Some(value.as_str()) {
                        debug!(%value, "selection unchanged, skipping swap");
                        continue;
                    }

                    let node = self.on_select.as_ref()(&value);
                    match &node {
                        Some(node) => debug!(%value, type_tag = %node.type_tag, "swapping component"),
                        None => debug!(%value, "no component for selection"),
                    }

                    let swap = ServerMessage::Swap {
                        target: self.target.clone(),
                        node,
                    };
                    tx.send(Message::Binary(rmp_serde::to_vec_named(&swap)?))
                        .await?;
                    current = Some(value);
                }
                Message::Close(_) => break,
                Message::Text(_) => {
                    warn!("ignoring text frame; protocol is binary messagepack");
                }
                // Ping/pong are handled by tungstenite itself.
                _ => {}
            }
        }

        Ok(())
    }
}
