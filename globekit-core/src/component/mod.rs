//! Component Records
//!
//! A component record is a validated, named set of optional configuration
//! values for one front-end widget. The record itself does no rendering:
//! it reports its type tag and current property values, and the external
//! rendering host turns that into the actual WebGL widget.
//!
//! # Structure
//!
//! All five globe variants carry the same property set, so the shared
//! machinery lives here once:
//!
//! - [`ComponentId`]: plain string or composite key mapping
//! - [`GlobeProps`]: the {id, width, height} record with builder setters
//!   and the dynamic [`GlobeProps::from_props`] construction path
//! - [`Component`]: the introspection/serialization trait every variant
//!   implements
//! - [`ComponentNode`]: the serialized form shipped to the host
//!
//! The variants themselves are declared in [`globes`] and are identical
//! apart from their type tags.
//!
//! # Validation
//!
//! The dynamic construction path rejects any property name outside the
//! declared set, failing with [`Error::UnknownProp`] naming the offending
//! key. The builder path cannot express an unknown key at all, so the
//! check exists only where property names arrive as strings.

mod globes;
#[cfg(feature = "python")]
pub mod python;

pub use globes::{
    BasicGlobe, GlobeWithAirlineRoutes, GlobeWithArcs, GlobeWithSatellites, TiledGlobe,
};

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// Namespace tag reported alongside every component record.
///
/// The host uses it to locate the front-end bundle that implements the
/// widget types.
pub const NAMESPACE: &str = "globekit";

/// Identifier addressing a component instance in callback wiring.
///
/// Most instances use a plain string. The host framework also supports
/// composite keys (a small mapping of string keys to values) for
/// pattern-matched callbacks, so both shapes are accepted and serialized
/// untagged: a string stays a string, a composite key becomes an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentId {
    /// A plain string identifier.
    Plain(String),
    /// A composite key mapping, matched structurally by the host.
    Composite(IndexMap<String, Value>),
}

impl ComponentId {
    /// The identifier as a JSON value, in the shape the host expects.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Plain(s) => Value::String(s.clone()),
            Self::Composite(map) => {
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(s) => f.write_str(s),
            Self::Composite(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

/// Conversion for numeric property values.
///
/// Pixel dimensions accept integers and floats, and the record preserves
/// which one it was given: an integer width serializes as an integer, a
/// float width as a float.
///
/// The float conversions panic on NaN and infinity. Those values have no
/// JSON representation, and the builder path takes dimensions from code
/// rather than from outside input, so a non-finite dimension is a caller
/// bug. The dynamic paths ([`GlobeProps::from_props`], the Python
/// bindings) reject non-finite input with an error instead.
pub trait PixelValue {
    /// Convert into the number stored on the record.
    fn into_number(self) -> Number;
}

macro_rules! pixel_value_int {
    ($($ty:ty),*) => {
        $(impl PixelValue for $ty {
            fn into_number(self) -> Number {
                Number::from(self)
            }
        })*
    };
}

pixel_value_int!(i32, i64, u32, u64, usize);

impl PixelValue for f64 {
    /// Non-finite dimensions have no JSON representation and are a caller
    /// bug, so this panics on NaN or infinity.
    fn into_number(self) -> Number {
        Number::from_f64(self).expect("pixel dimensions must be finite")
    }
}

impl PixelValue for f32 {
    fn into_number(self) -> Number {
        (self as f64).into_number()
    }
}

impl PixelValue for Number {
    fn into_number(self) -> Number {
        self
    }
}

/// The shared property record behind every globe variant.
///
/// All fields are optional; a record with no properties set is valid and
/// simply lets the front end fall back to its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobeProps {
    /// Identifier used by the host for callback wiring.
    pub id: Option<ComponentId>,
    /// Pixel width hint.
    pub width: Option<Number>,
    /// Pixel height hint.
    pub height: Option<Number>,
}

impl GlobeProps {
    /// The declared property names, in documented order.
    pub const PROP_NAMES: &'static [&'static str] = &["id", "width", "height"];

    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier.
    pub fn id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the pixel width hint.
    ///
    /// # Panics
    ///
    /// Panics if given a non-finite float; see [`PixelValue`].
    pub fn width(mut self, width: impl PixelValue) -> Self {
        self.width = Some(width.into_number());
        self
    }

    /// Set the pixel height hint.
    ///
    /// # Panics
    ///
    /// Panics if given a non-finite float; see [`PixelValue`].
    pub fn height(mut self, height: impl PixelValue) -> Self {
        self.height = Some(height.into_number());
        self
    }

    /// Build a record from a string-keyed property map.
    ///
    /// This is the dynamic construction path used when property names
    /// arrive from outside the type system (the host's callback payloads,
    /// the Python bindings). The first key outside [`Self::PROP_NAMES`]
    /// aborts construction with [`Error::UnknownProp`]; declared keys with
    /// values of the wrong shape fail with [`Error::InvalidPropValue`].
    /// `null` values are treated as unset.
    pub fn from_props(
        component: &'static str,
        props: &IndexMap<String, Value>,
    ) -> Result<Self> {
        for key in props.keys() {
            if !Self::PROP_NAMES.contains(&key.as_str()) {
                return Err(Error::unknown_prop(component, key.clone(), Self::PROP_NAMES));
            }
        }

        let id = match props.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(ComponentId::Plain(s.clone())),
            Some(Value::Object(map)) => Some(ComponentId::Composite(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
            Some(other) => {
                return Err(Error::invalid_prop_value(
                    component,
                    "id",
                    format!("expected a string or keyed mapping, got {other}"),
                ))
            }
        };

        Ok(Self {
            id,
            width: Self::number_prop(component, "width", props.get("width"))?,
            height: Self::number_prop(component, "height", props.get("height"))?,
        })
    }

    fn number_prop(
        component: &'static str,
        prop: &'static str,
        value: Option<&Value>,
    ) -> Result<Option<Number>> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n.clone())),
            Some(other) => Err(Error::invalid_prop_value(
                component,
                prop,
                format!("expected a number, got {other}"),
            )),
        }
    }

    /// The currently set properties, keyed by name in declared order.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        let mut map = IndexMap::new();
        if let Some(id) = &self.id {
            map.insert("id".to_owned(), id.to_value());
        }
        if let Some(width) = &self.width {
            map.insert("width".to_owned(), Value::Number(width.clone()));
        }
        if let Some(height) = &self.height {
            map.insert("height".to_owned(), Value::Number(height.clone()));
        }
        map
    }
}

/// Introspection and serialization surface of a component record.
///
/// The host framework consumes this trait generically: it asks each record
/// for its type tag, the properties it accepts, and the values currently
/// set, then emits the corresponding front-end widget. Records are
/// immutable once constructed and constructing one has no side effects.
pub trait Component {
    /// String identifying which widget variant this record configures.
    fn type_tag(&self) -> &'static str;

    /// Namespace of the front-end bundle implementing the widget.
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    /// Property names this record accepts, in documented order.
    fn valid_props(&self) -> &'static [&'static str];

    /// Wildcard property patterns this record accepts.
    ///
    /// None of the globe variants declare any, so the default is empty.
    fn wildcard_props(&self) -> &'static [&'static str] {
        &[]
    }

    /// The currently set property values, keyed by name.
    fn props(&self) -> IndexMap<String, Value>;

    /// Serialize into the record shipped to the rendering host.
    fn to_node(&self) -> ComponentNode {
        ComponentNode {
            type_tag: self.type_tag().to_owned(),
            namespace: self.namespace().to_owned(),
            props: self.props(),
        }
    }
}

/// A boxed component record, as stored by the registry and layout tree.
pub type BoxedComponent = Box<dyn Component + Send + Sync>;

/// The serialized form of a component record.
///
/// This is what crosses the transport: the host looks up `namespace` /
/// `type` in its bundle and instantiates the widget with `props`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Widget type tag, e.g. `"GlobeWithArcs"`.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Front-end bundle namespace.
    pub namespace: String,
    /// Property values, in declared order.
    pub props: IndexMap<String, Value>,
}
