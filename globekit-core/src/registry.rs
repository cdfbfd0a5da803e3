//! Component Registry
//!
//! Maps selector strings to component factories. The host's selector
//! control hands back one of a fixed set of string values, and the
//! registry turns that value plus a property record into the matching
//! component, or nothing when the value is unrecognized. An unknown
//! selector is a normal outcome, not an error: the layout simply shows
//! no component.
//!
//! The map is concurrent so the transport can resolve selections from
//! any connection task without locking around the whole registry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::component::{
    BasicGlobe, BoxedComponent, GlobeProps, GlobeWithAirlineRoutes, GlobeWithArcs,
    GlobeWithSatellites, TiledGlobe,
};

/// A factory producing a component record from a property record.
pub type ComponentFactory = Arc<dyn Fn(GlobeProps) -> BoxedComponent + Send + Sync>;

/// Concurrent map from selector value to component factory.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: DashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the five globe variants registered under
    /// their selector values: `"tiled"`, `"arcs"`, `"basic"`,
    /// `"airlines"`, `"satellites"`.
    pub fn with_globes() -> Self {
        let registry = Self::new();
        registry.register("tiled", |props| Box::new(TiledGlobe::from(props)));
        registry.register("arcs", |props| Box::new(GlobeWithArcs::from(props)));
        registry.register("basic", |props| Box::new(BasicGlobe::from(props)));
        registry.register("airlines", |props| {
            Box::new(GlobeWithAirlineRoutes::from(props))
        });
        registry.register("satellites", |props| {
            Box::new(GlobeWithSatellites::from(props))
        });
        registry
    }

    /// Register a factory under a selector value.
    ///
    /// Registering the same selector twice replaces the earlier factory.
    pub fn register<F>(&self, selector: impl Into<String>, factory: F)
    where
        F: Fn(GlobeProps) -> BoxedComponent + Send + Sync + 'static,
    {
        let selector = selector.into();
        debug!(%selector, "registering component factory");
        self.factories.insert(selector, Arc::new(factory));
    }

    /// Build the component registered under `selector`.
    ///
    /// Returns `None` when no factory is registered for the value.
    pub fn build(&self, selector: &str, props: GlobeProps) -> Option<BoxedComponent> {
        let factory = self.factories.get(selector)?;
        debug!(%selector, "building component");
        Some(factory.value().as_ref()(props))
    }

    /// Whether a factory is registered under `selector`.
    pub fn contains(&self, selector: &str) -> bool {
        self.factories.contains_key(selector)
    }

    /// The registered selector values, in no particular order.
    pub fn selectors(&self) -> Vec<String> {
        self.factories.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_globes_registers_all_five_selectors() {
        let registry = ComponentRegistry::with_globes();
        for selector in ["tiled", "arcs", "basic", "airlines", "satellites"] {
            assert!(registry.contains(selector), "missing {selector}");
        }
        assert_eq!(registry.selectors().len(), 5);
    }

    #[test]
    fn satellites_selector_builds_the_satellites_variant() {
        let registry = ComponentRegistry::with_globes();
        let component = registry
            .build("satellites", GlobeProps::new().id("satellites-globe"))
            .unwrap();
        assert_eq!(component.type_tag(), "GlobeWithSatellites");
    }

    #[test]
    fn unknown_selector_builds_nothing() {
        let registry = ComponentRegistry::with_globes();
        assert!(registry.build("flat-earth", GlobeProps::new()).is_none());
    }

    #[test]
    fn props_flow_through_the_factory() {
        let registry = ComponentRegistry::with_globes();
        let node = registry
            .build("arcs", GlobeProps::new().id("arcs-globe").width(800).height(600))
            .unwrap()
            .to_node();
        assert_eq!(node.type_tag, "GlobeWithArcs");
        assert_eq!(node.props["width"], serde_json::json!(800));
    }

    #[test]
    fn register_replaces_existing_factory() {
        let registry = ComponentRegistry::with_globes();
        registry.register("basic", |props| Box::new(TiledGlobe::from(props)));
        let component = registry.build("basic", GlobeProps::new()).unwrap();
        assert_eq!(component.type_tag(), "TiledGlobe");
    }
}
