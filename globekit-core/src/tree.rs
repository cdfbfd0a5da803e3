//! Layout Tree
//!
//! A minimal serializable layout tree. Component records sit as leaves
//! inside plain elements; the transport ships the whole tree once on
//! connect, and afterwards only swaps component leaves by target id.
//! Reconciliation of the rendered output belongs to the host framework,
//! not to this crate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::component::ComponentNode;

/// One node of the layout tree.
///
/// Elements are boxed: an element stores its first few children inline,
/// so the variant needs indirection to keep the node type finitely
/// sized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A plain container or control element.
    Element(Box<Element>),
    /// A component record leaf, rendered by the host's widget bundle.
    Component(ComponentNode),
    /// A text leaf.
    Text {
        /// The literal text content.
        text: String,
    },
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(Box::new(element))
    }
}

impl From<ComponentNode> for Node {
    fn from(node: ComponentNode) -> Self {
        Self::Component(node)
    }
}

/// A plain element: tag, optional id, attributes, children.
///
/// Most layouts are a handful of nodes, so children live in a small
/// inline vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element tag understood by the host, e.g. `"div"` or `"dropdown"`.
    pub tag: String,

    /// Identifier for callback wiring and swap targeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Attribute values passed through to the host unchanged.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, Value>,

    /// Child nodes, in document order.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub children: SmallVec<[Node; 4]>,
}

impl Element {
    /// Create an element with the given tag and nothing else.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attrs: IndexMap::new(),
            children: SmallVec::new(),
        }
    }

    /// Set the element id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, TiledGlobe};
    use serde_json::json;

    #[test]
    fn element_builder_accumulates_children_in_order() {
        let root = Element::new("div")
            .child(Element::new("dropdown").id("globe-selector"))
            .child(Element::new("div").id("globe-container"));
        assert_eq!(root.children.len(), 2);
        match &root.children[0] {
            Node::Element(e) => assert_eq!(e.id.as_deref(), Some("globe-selector")),
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn tree_serializes_components_as_leaves() {
        let tree: Node = Element::new("div")
            .id("globe-container")
            .child(TiledGlobe::new().id("tiled-globe").to_node())
            .into();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "element",
                "tag": "div",
                "id": "globe-container",
                "children": [{
                    "kind": "component",
                    "type": "TiledGlobe",
                    "namespace": "globekit",
                    "props": {"id": "tiled-globe"}
                }]
            })
        );
    }

    #[test]
    fn elements_nest_to_arbitrary_depth() {
        let tree: Node = Element::new("div")
            .child(
                Element::new("div").child(
                    Element::new("div")
                        .id("globe-container")
                        .child(TiledGlobe::new().to_node()),
                ),
            )
            .into();
        let value = serde_json::to_value(&tree).unwrap();
        let round_tripped: Node = serde_json::from_value(value).unwrap();
        assert_eq!(round_tripped, tree);
    }

    #[test]
    fn empty_fields_are_omitted_from_serialization() {
        let value = serde_json::to_value(Node::from(Element::new("div"))).unwrap();
        assert_eq!(value, json!({"kind": "element", "tag": "div"}));
    }
}
