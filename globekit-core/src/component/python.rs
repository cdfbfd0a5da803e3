//! Python Bindings
//!
//! One Python class per globe variant, mirroring the binding classes the
//! host framework generates for its front-end bundles. Construction takes
//! the declared keyword arguments only; the call signature itself rejects
//! unknown keywords, and the dynamic `from_props` path reports them as
//! `ValueError` naming the offending key.
//!
//! Only compiled with the `python` feature, since the extension-module
//! linkage cannot be used from plain test binaries.

use indexmap::IndexMap;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList, PyString};
use serde_json::{Number, Value};

use super::{
    BasicGlobe, Component, ComponentId, GlobeProps, GlobeWithAirlineRoutes, GlobeWithArcs,
    GlobeWithSatellites, TiledGlobe,
};

impl From<crate::Error> for PyErr {
    fn from(err: crate::Error) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl<'py> FromPyObject<'py> for ComponentId {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Self::Plain(s.to_string_lossy().into_owned()));
        }
        if let Ok(dict) = ob.downcast::<PyDict>() {
            let mut map = IndexMap::new();
            for (key, value) in dict.iter() {
                map.insert(key.extract::<String>()?, py_to_value(&value)?);
            }
            return Ok(Self::Composite(map));
        }
        Err(PyTypeError::new_err("id must be a string or a dict"))
    }
}

/// Keyword-argument wrapper accepting an int or a float, preserving
/// which one it was.
struct PixelArg(Number);

impl<'py> FromPyObject<'py> for PixelArg {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        // bool is an int subclass in Python; reject it explicitly.
        if ob.is_instance_of::<PyBool>() {
            return Err(PyTypeError::new_err("expected an int or float, got bool"));
        }
        if let Ok(i) = ob.extract::<i64>() {
            return Ok(Self(Number::from(i)));
        }
        if let Ok(f) = ob.extract::<f64>() {
            return Number::from_f64(f)
                .map(Self)
                .ok_or_else(|| PyValueError::new_err("dimension must be finite"));
        }
        Err(PyTypeError::new_err("expected an int or float"))
    }
}

/// Convert a Python value into a JSON value.
fn py_to_value(value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Null);
    }
    if value.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(value.extract::<bool>()?));
    }
    if let Ok(i) = value.extract::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(f) = value.extract::<f64>() {
        return Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| PyValueError::new_err("non-finite numbers are not serializable"));
    }
    if let Ok(s) = value.downcast::<PyString>() {
        return Ok(Value::String(s.to_string_lossy().into_owned()));
    }
    if let Ok(list) = value.downcast::<PyList>() {
        let mut items = Vec::with_capacity(list.len());
        for item in list.iter() {
            items.push(py_to_value(&item)?);
        }
        return Ok(Value::Array(items));
    }
    if let Ok(dict) = value.downcast::<PyDict>() {
        let mut map = serde_json::Map::new();
        for (key, item) in dict.iter() {
            map.insert(key.extract::<String>()?, py_to_value(&item)?);
        }
        return Ok(Value::Object(map));
    }
    let type_name = value.get_type();
    let type_name = type_name.name()?;
    Err(PyTypeError::new_err(format!(
        "unsupported property value type: {}",
        type_name.to_string_lossy()
    )))
}

/// Convert a JSON value back into a Python object.
fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => (*b).into_py(py),
        Value::Number(n) => number_to_py(py, n),
        Value::String(s) => s.as_str().into_py(py),
        Value::Array(items) => {
            let converted: Vec<PyObject> = items
                .iter()
                .map(|item| value_to_py(py, item))
                .collect::<PyResult<_>>()?;
            PyList::new_bound(py, converted).into_py(py)
        }
        Value::Object(map) => {
            let dict = PyDict::new_bound(py);
            for (key, item) in map {
                dict.set_item(key, value_to_py(py, item)?)?;
            }
            dict.into_py(py)
        }
    })
}

fn number_to_py(py: Python<'_>, n: &Number) -> PyObject {
    if let Some(i) = n.as_i64() {
        i.into_py(py)
    } else if let Some(u) = n.as_u64() {
        u.into_py(py)
    } else {
        n.as_f64().unwrap_or(f64::NAN).into_py(py)
    }
}

macro_rules! py_globe_class {
    ($(#[$doc:meta])* $pyname:ident wraps $inner:ident as $tag:literal) => {
        $(#[$doc])*
        #[pyclass(name = $tag)]
        pub struct $pyname {
            inner: $inner,
        }

        #[pymethods]
        impl $pyname {
            /// Create a record from the declared keyword arguments.
            #[new]
            #[pyo3(signature = (id=None, width=None, height=None))]
            fn new(
                id: Option<ComponentId>,
                width: Option<PixelArg>,
                height: Option<PixelArg>,
            ) -> Self {
                let mut inner = $inner::new();
                if let Some(id) = id {
                    inner = inner.id(id);
                }
                if let Some(width) = width {
                    inner = inner.width(width.0);
                }
                if let Some(height) = height {
                    inner = inner.height(height.0);
                }
                Self { inner }
            }

            /// Build a record from a property dict, rejecting unknown keys
            /// with a `ValueError` naming the offending key.
            #[staticmethod]
            fn from_props(props: &Bound<'_, PyDict>) -> PyResult<Self> {
                let mut map = IndexMap::new();
                for (key, value) in props.iter() {
                    map.insert(key.extract::<String>()?, py_to_value(&value)?);
                }
                Ok(Self {
                    inner: $inner::from_props(&map)?,
                })
            }

            /// Property names this component accepts, in documented order.
            #[classattr]
            fn available_properties() -> Vec<&'static str> {
                GlobeProps::PROP_NAMES.to_vec()
            }

            /// Wildcard property patterns (none for the globe family).
            #[classattr]
            fn available_wildcard_properties() -> Vec<&'static str> {
                Vec::new()
            }

            /// Widget type tag.
            #[classattr]
            fn component_type() -> &'static str {
                $tag
            }

            #[getter]
            fn id(&self, py: Python<'_>) -> PyResult<Option<PyObject>> {
                match &self.inner.props_record().id {
                    None => Ok(None),
                    Some(id) => Ok(Some(value_to_py(py, &id.to_value())?)),
                }
            }

            #[getter]
            fn width(&self, py: Python<'_>) -> Option<PyObject> {
                self.inner
                    .props_record()
                    .width
                    .as_ref()
                    .map(|n| number_to_py(py, n))
            }

            #[getter]
            fn height(&self, py: Python<'_>) -> Option<PyObject> {
                self.inner
                    .props_record()
                    .height
                    .as_ref()
                    .map(|n| number_to_py(py, n))
            }

            /// Serialize the record for the rendering host.
            fn to_json(&self) -> PyResult<String> {
                serde_json::to_string(&self.inner.to_node())
                    .map_err(|e| PyValueError::new_err(e.to_string()))
            }

            fn __repr__(&self) -> String {
                let props = self.inner.props_record();
                let mut parts = Vec::new();
                if let Some(id) = &props.id {
                    parts.push(format!("id={id}"));
                }
                if let Some(width) = &props.width {
                    parts.push(format!("width={width}"));
                }
                if let Some(height) = &props.height {
                    parts.push(format!("height={height}"));
                }
                format!("{}({})", $tag, parts.join(", "))
            }
        }
    };
}

py_globe_class! {
    /// Globe rendered from slippy-map raster tiles.
    PyTiledGlobe wraps TiledGlobe as "TiledGlobe"
}

py_globe_class! {
    /// Globe with animated great-circle arcs between surface points.
    PyGlobeWithArcs wraps GlobeWithArcs as "GlobeWithArcs"
}

py_globe_class! {
    /// Plain textured globe with no overlays.
    PyBasicGlobe wraps BasicGlobe as "BasicGlobe"
}

py_globe_class! {
    /// Globe overlaid with airline route traces.
    PyGlobeWithAirlineRoutes wraps GlobeWithAirlineRoutes as "GlobeWithAirlineRoutes"
}

py_globe_class! {
    /// Globe with orbiting satellite markers.
    PyGlobeWithSatellites wraps GlobeWithSatellites as "GlobeWithSatellites"
}
