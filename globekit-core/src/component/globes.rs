//! Globe Variants
//!
//! The five globe widgets, declared through one macro because they are
//! identical apart from their type tags. Each variant wraps the shared
//! [`GlobeProps`] record; validation and serialization live there, not
//! here.
//!
//! The full widget family is expected to grow variant-specific properties
//! (arc endpoints, route lists, orbital elements) once the front-end
//! bundle exposes them; adding a field to one variant means giving it its
//! own props record instead of the shared one.

use indexmap::IndexMap;
use serde_json::Value;

use super::{Component, ComponentId, GlobeProps, PixelValue};
use crate::error::Result;

macro_rules! globe_component {
    ($(#[$doc:meta])* $name:ident => $tag:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            props: GlobeProps,
        }

        impl $name {
            /// Create a record with no properties set.
            pub fn new() -> Self {
                Self::default()
            }

            /// Set the identifier.
            pub fn id(mut self, id: impl Into<ComponentId>) -> Self {
                self.props = self.props.id(id);
                self
            }

            /// Set the pixel width hint.
            ///
            /// Panics if given a non-finite float; see [`PixelValue`].
            pub fn width(mut self, width: impl PixelValue) -> Self {
                self.props = self.props.width(width);
                self
            }

            /// Set the pixel height hint.
            ///
            /// Panics if given a non-finite float; see [`PixelValue`].
            pub fn height(mut self, height: impl PixelValue) -> Self {
                self.props = self.props.height(height);
                self
            }

            /// Build a record from a string-keyed property map, rejecting
            /// unknown keys.
            pub fn from_props(props: &IndexMap<String, Value>) -> Result<Self> {
                Ok(Self {
                    props: GlobeProps::from_props($tag, props)?,
                })
            }

            /// The underlying shared property record.
            pub fn props_record(&self) -> &GlobeProps {
                &self.props
            }
        }

        impl From<GlobeProps> for $name {
            fn from(props: GlobeProps) -> Self {
                Self { props }
            }
        }

        impl Component for $name {
            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn valid_props(&self) -> &'static [&'static str] {
                GlobeProps::PROP_NAMES
            }

            fn props(&self) -> IndexMap<String, Value> {
                self.props.to_map()
            }
        }
    };
}

globe_component! {
    /// Globe rendered from slippy-map raster tiles.
    TiledGlobe => "TiledGlobe"
}

globe_component! {
    /// Globe with animated great-circle arcs between surface points.
    GlobeWithArcs => "GlobeWithArcs"
}

globe_component! {
    /// Plain textured globe with no overlays.
    BasicGlobe => "BasicGlobe"
}

globe_component! {
    /// Globe overlaid with airline route traces.
    GlobeWithAirlineRoutes => "GlobeWithAirlineRoutes"
}

globe_component! {
    /// Globe with orbiting satellite markers.
    GlobeWithSatellites => "GlobeWithSatellites"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    /// Every variant declares exactly {id, width, height}, in order, and
    /// no wildcard patterns.
    #[test]
    fn all_variants_declare_the_same_props() {
        let variants: Vec<Box<dyn Component>> = vec![
            Box::new(TiledGlobe::new()),
            Box::new(GlobeWithArcs::new()),
            Box::new(BasicGlobe::new()),
            Box::new(GlobeWithAirlineRoutes::new()),
            Box::new(GlobeWithSatellites::new()),
        ];
        for variant in &variants {
            assert_eq!(variant.valid_props(), ["id", "width", "height"]);
            assert!(variant.wildcard_props().is_empty());
            assert_eq!(variant.namespace(), super::super::NAMESPACE);
        }
    }

    #[test]
    fn type_tags_identify_each_variant() {
        assert_eq!(TiledGlobe::new().type_tag(), "TiledGlobe");
        assert_eq!(GlobeWithArcs::new().type_tag(), "GlobeWithArcs");
        assert_eq!(BasicGlobe::new().type_tag(), "BasicGlobe");
        assert_eq!(
            GlobeWithAirlineRoutes::new().type_tag(),
            "GlobeWithAirlineRoutes"
        );
        assert_eq!(GlobeWithSatellites::new().type_tag(), "GlobeWithSatellites");
    }

    #[test]
    fn arcs_globe_builds_and_serializes() {
        let globe = GlobeWithArcs::new().id("arcs-globe").width(800).height(600);
        let node = globe.to_node();
        assert_eq!(node.type_tag, "GlobeWithArcs");
        assert_eq!(node.namespace, "globekit");
        assert_eq!(node.props["id"], json!("arcs-globe"));
        assert_eq!(node.props["width"], json!(800));
        assert_eq!(node.props["height"], json!(600));
    }

    #[test]
    fn basic_globe_rejects_extra_keyword() {
        let input: IndexMap<String, serde_json::Value> =
            [("color".to_owned(), json!("red"))].into_iter().collect();
        let err = BasicGlobe::from_props(&input).unwrap_err();
        match err {
            Error::UnknownProp { component, prop, .. } => {
                assert_eq!(component, "BasicGlobe");
                assert_eq!(prop, "color");
            }
            other => panic!("expected UnknownProp, got {other:?}"),
        }
    }

    #[test]
    fn from_props_round_trips_through_node() {
        let input: IndexMap<String, serde_json::Value> = [
            ("id".to_owned(), json!("sat-globe")),
            ("width".to_owned(), json!(1024)),
        ]
        .into_iter()
        .collect();
        let globe = GlobeWithSatellites::from_props(&input).unwrap();
        let node = globe.to_node();
        assert_eq!(node.type_tag, "GlobeWithSatellites");
        assert_eq!(node.props["id"], json!("sat-globe"));
        assert_eq!(node.props["width"], json!(1024));
        assert!(!node.props.contains_key("height"));
    }

    #[test]
    fn node_serializes_with_type_and_namespace() {
        let node = TiledGlobe::new().id("tiled-globe").to_node();
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "TiledGlobe",
                "namespace": "globekit",
                "props": {"id": "tiled-globe"}
            })
        );
    }
}
