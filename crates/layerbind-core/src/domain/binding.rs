//! The binding store: which named callbacks fire for which input, per layer.
//!
//! # Data layout (for beginners)
//!
//! The store is three nested maps:
//!
//! ```text
//! layer ──► input ──► callback name ──► Callbacks { began, ended }
//! "Default"   Space       "Jump"           (on_jump_start, on_jump_end)
//!             E           "Interact"       (on_interact, -)
//! "Air"       W           "Jump"           (on_double_jump, -)
//! ```
//!
//! Dispatch is an exact-match lookup on `(layer, input)`, so it never depends on
//! iteration order.  The maps are [`IndexMap`]s anyway so that
//! [`BindingStore::layer_binds`] lists bindings in a stable, insertion-ordered
//! way.
//!
//! # Invariants
//!
//! - A name appears under at most one input per layer.  Binding the same name
//!   again in a layer moves it (last write wins).
//! - Empty inner maps are removed as soon as their last entry goes, so the
//!   store never accumulates dead keys.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::layer::Layer;
use crate::input::{InputId, Transition};

/// A zero-argument side-effecting action.
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// The optional "began" and "ended" actions of one binding.
///
/// Cloning is cheap and shares the underlying closures.
#[derive(Clone, Default)]
pub struct Callbacks {
    began: Option<Action>,
    ended: Option<Action>,
}

impl Callbacks {
    /// Creates a pair with neither action set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action invoked when the bound input begins.
    pub fn on_began(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.began = Some(Arc::new(action));
        self
    }

    /// Sets the action invoked when the bound input ends.
    pub fn on_ended(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.ended = Some(Arc::new(action));
        self
    }

    /// Returns `true` if an action exists for `transition`.
    pub fn handles(&self, transition: Transition) -> bool {
        self.action(transition).is_some()
    }

    /// Invokes the action for `transition`, if any.
    ///
    /// Returns whether an action ran.
    pub fn fire(&self, transition: Transition) -> bool {
        match self.action(transition) {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    fn action(&self, transition: Transition) -> Option<&Action> {
        match transition {
            Transition::Began => self.began.as_ref(),
            Transition::Ended => self.ended.as_ref(),
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("began", &self.began.is_some())
            .field("ended", &self.ended.is_some())
            .finish()
    }
}

type NameTable = IndexMap<String, Callbacks>;
type InputTable = IndexMap<InputId, NameTable>;

/// Owns every binding, keyed `layer → input → name`.
#[derive(Debug, Default)]
pub struct BindingStore {
    layers: IndexMap<Layer, InputTable>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `input` in each of `layers`.
    ///
    /// In each listed layer any previous binding of `name` is replaced, even if
    /// it was keyed on a different input.  Layers not listed are untouched.  An
    /// empty `layers` is a no-op; unknown layer names become new layers.
    pub fn bind<L>(
        &mut self,
        input: InputId,
        layers: impl IntoIterator<Item = L>,
        name: &str,
        callbacks: Callbacks,
    ) where
        L: Into<Layer>,
    {
        for layer in layers {
            let layer = layer.into();
            debug!(%layer, %input, name, "bind");
            let table = self.layers.entry(layer).or_default();

            match input_of(table, name) {
                Some(existing) if existing == input => {
                    if let Some(names) = table.get_mut(&input) {
                        names.insert(name.to_string(), callbacks.clone());
                    }
                }
                Some(_) => {
                    take_name(table, name);
                    table
                        .entry(input)
                        .or_default()
                        .insert(name.to_string(), callbacks.clone());
                }
                None => {
                    table
                        .entry(input)
                        .or_default()
                        .insert(name.to_string(), callbacks.clone());
                }
            }
        }
    }

    /// Removes `name` from every layer that holds it.
    pub fn unbind(&mut self, name: &str) {
        let mut removed = 0usize;
        self.layers.retain(|layer, table| {
            if take_name(table, name).is_some() {
                debug!(%layer, name, "unbind");
                removed += 1;
            }
            !table.is_empty()
        });
        if removed == 0 {
            debug!(name, "unbind: name not bound anywhere");
        }
    }

    /// Removes `name` from each of `layers` only.
    pub fn unbind_in<L>(&mut self, name: &str, layers: impl IntoIterator<Item = L>)
    where
        L: AsRef<str>,
    {
        for layer in layers {
            let layer = layer.as_ref();
            let Some(table) = self.layers.get_mut(layer) else {
                continue;
            };
            if take_name(table, name).is_some() {
                debug!(layer, name, "unbind");
            }
            if table.is_empty() {
                self.layers.shift_remove(layer);
            }
        }
    }

    /// Moves `name` onto `new_input` in every layer where it is bound.
    ///
    /// Each layer keeps its own callbacks.  Layers where `name` is absent are
    /// unaffected, and the call is a no-op if `name` is bound nowhere.
    pub fn rebind(&mut self, name: &str, new_input: InputId) {
        for (layer, table) in self.layers.iter_mut() {
            match input_of(table, name) {
                Some(old) if old == new_input => {}
                Some(old) => {
                    if let Some((_, callbacks)) = take_name(table, name) {
                        debug!(%layer, name, from = %old, to = %new_input, "rebind");
                        table
                            .entry(new_input)
                            .or_default()
                            .insert(name.to_string(), callbacks);
                    }
                }
                None => {}
            }
        }
    }

    /// Returns `name → display form of its input` for every binding in `layer`.
    ///
    /// The result is an owned snapshot; an unknown layer yields an empty map.
    pub fn layer_binds(&self, layer: &str) -> IndexMap<String, String> {
        let Some(table) = self.layers.get(layer) else {
            return IndexMap::new();
        };
        table
            .iter()
            .flat_map(|(input, names)| {
                names
                    .keys()
                    .map(move |name| (name.clone(), input.to_string()))
            })
            .collect()
    }

    /// Returns a snapshot of the `(name, callbacks)` bound to `input` in `layer`.
    pub fn lookup(&self, layer: &str, input: InputId) -> Vec<(String, Callbacks)> {
        self.layers
            .get(layer)
            .and_then(|table| table.get(&input))
            .map(|names| {
                names
                    .iter()
                    .map(|(name, callbacks)| (name.clone(), callbacks.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the input `name` is bound to in `layer`.
    pub fn input_for(&self, layer: &str, name: &str) -> Option<InputId> {
        self.layers.get(layer).and_then(|table| input_of(table, name))
    }

    /// Returns `true` if `name` is bound in at least one layer.
    pub fn is_bound(&self, name: &str) -> bool {
        self.layers
            .values()
            .any(|table| input_of(table, name).is_some())
    }

    /// Iterates over the layers that currently hold at least one binding.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.keys()
    }

    /// Total number of bindings across all layers.
    pub fn len(&self) -> usize {
        self.layers
            .values()
            .flat_map(|table| table.values())
            .map(IndexMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn input_of(table: &InputTable, name: &str) -> Option<InputId> {
    table
        .iter()
        .find(|(_, names)| names.contains_key(name))
        .map(|(input, _)| *input)
}

/// Detaches `name` from `table`, dropping its input entry if that empties it.
fn take_name(table: &mut InputTable, name: &str) -> Option<(InputId, Callbacks)> {
    let input = input_of(table, name)?;
    let names = table.get_mut(&input)?;
    let callbacks = names.shift_remove(name)?;
    if names.is_empty() {
        table.shift_remove(&input);
    }
    Some((input, callbacks))
}
