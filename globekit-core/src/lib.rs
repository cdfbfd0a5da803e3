//! GlobeKit Core
//!
//! This crate provides the component-binding layer for the GlobeKit
//! globe-visualization widgets. It implements:
//!
//! - Component records for the five globe variants (tiled, arcs, basic,
//!   airline routes, satellites)
//! - Shared property validation, introspection, and serialization
//! - A selector registry for string-keyed component dispatch
//! - A minimal layout tree and WebSocket transport layer
//!
//! The actual rendering lives in the host framework's front-end bundle;
//! this crate only describes which widget to show and with which
//! configuration. The crate is designed to be used both as a native Rust
//! library and, behind the `python` feature, as a Python extension
//! module via PyO3.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `component`: component records, the `Component` trait, validation
//! - `registry`: selector-string dispatch to component factories
//! - `tree`: the serializable layout tree the records live in
//! - `transport`: WebSocket server and protocol implementation
//!
//! # Example
//!
//! ```rust
//! use globekit_core::component::{Component, GlobeWithArcs};
//!
//! let globe = GlobeWithArcs::new().id("arcs-globe").width(800).height(600);
//! let node = globe.to_node();
//!
//! assert_eq!(node.type_tag, "GlobeWithArcs");
//! assert_eq!(node.props["width"], serde_json::json!(800));
//! ```

pub mod component;
pub mod error;
pub mod registry;
pub mod transport;
pub mod tree;

pub use component::{Component, ComponentId, ComponentNode, GlobeProps};
pub use error::{Error, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed component classes.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register the globe component classes
    m.add_class::<component::python::PyTiledGlobe>()?;
    m.add_class::<component::python::PyGlobeWithArcs>()?;
    m.add_class::<component::python::PyBasicGlobe>()?;
    m.add_class::<component::python::PyGlobeWithAirlineRoutes>()?;
    m.add_class::<component::python::PyGlobeWithSatellites>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
