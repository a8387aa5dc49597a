//! Layer identifiers and the current-layer state.
//!
//! A [`Layer`] is an opaque name.  Four names ship as constants because most
//! applications use them ([`Layer::DEFAULT`], [`Layer::DEBUG`], [`Layer::AIR`],
//! [`Layer::RAGDOLL`]), but any string is a valid layer and equality is plain
//! string equality.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named input-handling context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Layer(Cow<'static, str>);

impl Layer {
    /// Normal gameplay.
    pub const DEFAULT: Layer = Layer(Cow::Borrowed("Default"));
    /// Developer tooling overlays.
    pub const DEBUG: Layer = Layer(Cow::Borrowed("Debug"));
    /// The controlled character is airborne.
    pub const AIR: Layer = Layer(Cow::Borrowed("Air"));
    /// The controlled character is ragdolled.
    pub const RAGDOLL: Layer = Layer(Cow::Borrowed("Ragdoll"));

    /// The built-in layers, in declaration order.
    pub const BUILT_IN: [Layer; 4] = [Self::DEFAULT, Self::DEBUG, Self::AIR, Self::RAGDOLL];

    /// Creates a layer from any name.
    pub fn new(name: impl Into<String>) -> Self {
        Layer(Cow::Owned(name.into()))
    }

    /// Returns the layer name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Layer {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Layer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Layer {
    fn from(name: &str) -> Self {
        Layer::new(name)
    }
}

impl From<String> for Layer {
    fn from(name: String) -> Self {
        Layer(Cow::Owned(name))
    }
}

impl From<&Layer> for Layer {
    fn from(layer: &Layer) -> Self {
        layer.clone()
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.0.into_owned()
    }
}

/// The current layer.
///
/// Explicitly owned rather than global so that independent instances can
/// coexist (one per test, for example).  The value is never validated against
/// [`Layer::BUILT_IN`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerState {
    current: Layer,
}

impl LayerState {
    /// Creates a state whose current layer is `initial`.
    pub fn new(initial: impl Into<Layer>) -> Self {
        Self {
            current: initial.into(),
        }
    }

    /// Replaces the current layer unconditionally.
    pub fn set_layer(&mut self, layer: impl Into<Layer>) {
        let layer = layer.into();
        if layer != self.current {
            debug!(from = %self.current, to = %layer, "layer changed");
        }
        self.current = layer;
    }

    /// Returns the current layer.
    pub fn layer(&self) -> &Layer {
        &self.current
    }

    /// Returns `true` if `layer` is the current layer.
    pub fn is_layer(&self, layer: &str) -> bool {
        self.current.as_str() == layer
    }
}
