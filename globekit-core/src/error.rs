//! Error Types
//!
//! All failures in this crate funnel into a single [`Error`] enum.
//!
//! Configuration errors (`UnknownProp`, `InvalidPropValue`) surface
//! synchronously at component-construction time: a record either builds
//! fully or not at all, and nothing is retried. The remaining variants
//! wrap transport failures and convert via `#[from]`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied a property name outside the declared valid set.
    #[error("unknown property `{prop}` for component {component}; valid properties are {valid:?}")]
    UnknownProp {
        /// Type tag of the component being constructed.
        component: &'static str,
        /// The offending property name.
        prop: String,
        /// The declared valid property names, in documented order.
        valid: &'static [&'static str],
    },

    /// A declared property was given a value of the wrong shape.
    #[error("invalid value for property `{prop}` on component {component}: {reason}")]
    InvalidPropValue {
        /// Type tag of the component being constructed.
        component: &'static str,
        /// The property that rejected its value.
        prop: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Underlying socket failure in the transport.
    #[error("transport i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket protocol failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Failed to encode an outgoing message.
    #[error("message encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode an incoming message.
    #[error("message decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl Error {
    /// Construct an unknown-property error for the given component.
    pub fn unknown_prop(
        component: &'static str,
        prop: impl Into<String>,
        valid: &'static [&'static str],
    ) -> Self {
        Self::UnknownProp {
            component,
            prop: prop.into(),
            valid,
        }
    }

    /// Construct an invalid-value error for a declared property.
    pub fn invalid_prop_value(
        component: &'static str,
        prop: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPropValue {
            component,
            prop,
            reason: reason.into(),
        }
    }
}
