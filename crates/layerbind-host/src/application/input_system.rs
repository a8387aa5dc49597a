//! The initialization-gated binding system shared by application code.
//!
//! [`InputSystem`] owns one [`BindingStore`] and one [`LayerState`] behind a
//! single mutex and hands out cheap clones of itself.  Every operation takes
//! the lock for as long as the underlying store call lasts and no longer.
//!
//! # Initialization gate
//!
//! The only way to obtain a system is [`InputSystem::initialize`], which asks
//! an [`ExecutionContext`] once whether this process can receive input.  If it
//! cannot, the returned system is *inert*: mutations are ignored, queries
//! return empty or default values, and dispatch fires nothing.  Calling an
//! operation "before initialization" is therefore unrepresentable.
//!
//! # Reentrancy
//!
//! Callbacks commonly change the binding set or the layer (a "Land" action
//! switching back to `Default`, a one-shot binding unbinding itself).
//! [`InputSystem::dispatch`] copies the matching `(name, callbacks)` pairs out
//! of the store, releases the lock, and only then runs the callbacks.  A
//! callback may call any method on any clone of the system; changes apply to
//! the next event, never to the snapshot already being fired.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use layerbind_core::{BindingStore, Callbacks, InputId, Layer, LayerState, Transition};
use tracing::{debug, info, trace, warn};

use crate::infrastructure::context::ExecutionContext;

#[derive(Debug, Default)]
struct SystemState {
    store: BindingStore,
    layer: LayerState,
}

/// Shared handle to the binding store and current layer.
#[derive(Clone)]
pub struct InputSystem {
    state: Option<Arc<Mutex<SystemState>>>,
}

impl InputSystem {
    /// Runs the initialization gate.
    ///
    /// Returns an active system whose current layer is `initial_layer` when
    /// `context` is input-capable, and an inert system otherwise.
    pub fn initialize(context: &dyn ExecutionContext, initial_layer: impl Into<Layer>) -> Self {
        if !context.is_input_capable() {
            warn!("execution context cannot receive input; binding system is inert");
            return Self::inert();
        }
        let layer = LayerState::new(initial_layer);
        info!(layer = %layer.layer(), "binding system initialized");
        Self {
            state: Some(Arc::new(Mutex::new(SystemState {
                store: BindingStore::new(),
                layer,
            }))),
        }
    }

    /// Returns a system on which every operation is a no-op.
    pub fn inert() -> Self {
        Self { state: None }
    }

    /// Returns `false` if initialization was refused.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    // ── Binding store ─────────────────────────────────────────────────────────

    /// Binds `name` to `input` in each of `layers`.  See [`BindingStore::bind`].
    pub fn bind<L>(
        &self,
        input: InputId,
        layers: impl IntoIterator<Item = L>,
        name: &str,
        callbacks: Callbacks,
    ) where
        L: Into<Layer>,
    {
        if let Some(mut state) = self.lock() {
            state.store.bind(input, layers, name, callbacks);
        }
    }

    /// Removes `name` from every layer.
    pub fn unbind(&self, name: &str) {
        if let Some(mut state) = self.lock() {
            state.store.unbind(name);
        }
    }

    /// Removes `name` from the listed layers only.
    pub fn unbind_in<L>(&self, name: &str, layers: impl IntoIterator<Item = L>)
    where
        L: AsRef<str>,
    {
        if let Some(mut state) = self.lock() {
            state.store.unbind_in(name, layers);
        }
    }

    /// Moves `name` onto `new_input` in every layer where it is bound.
    pub fn rebind(&self, name: &str, new_input: InputId) {
        if let Some(mut state) = self.lock() {
            state.store.rebind(name, new_input);
        }
    }

    /// Returns `name → input name` for every binding in `layer`.
    pub fn layer_binds(&self, layer: &str) -> IndexMap<String, String> {
        self.lock()
            .map(|state| state.store.layer_binds(layer))
            .unwrap_or_default()
    }

    /// Returns the input `name` is bound to in `layer`.
    pub fn input_for(&self, layer: &str, name: &str) -> Option<InputId> {
        self.lock()
            .and_then(|state| state.store.input_for(layer, name))
    }

    /// Returns `true` if `name` is bound in at least one layer.
    pub fn is_bound(&self, name: &str) -> bool {
        self.lock()
            .map(|state| state.store.is_bound(name))
            .unwrap_or(false)
    }

    /// Returns the layers that currently hold at least one binding.
    pub fn bound_layers(&self) -> Vec<Layer> {
        self.lock()
            .map(|state| state.store.layers().cloned().collect())
            .unwrap_or_default()
    }

    // ── Layer state ───────────────────────────────────────────────────────────

    /// Makes `layer` current for all subsequent events.
    pub fn set_layer(&self, layer: impl Into<Layer>) {
        if let Some(mut state) = self.lock() {
            state.layer.set_layer(layer);
        }
    }

    /// Returns the current layer ([`Layer::DEFAULT`] on an inert system).
    pub fn layer(&self) -> Layer {
        self.lock()
            .map(|state| state.layer.layer().clone())
            .unwrap_or_default()
    }

    /// Returns `true` if `layer` is current.
    ///
    /// An inert system reports [`Layer::DEFAULT`] as current, consistent with
    /// [`InputSystem::layer`].
    pub fn is_layer(&self, layer: &str) -> bool {
        match self.lock() {
            Some(state) => state.layer.is_layer(layer),
            None => Layer::default().as_str() == layer,
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Fires the `transition` action of every binding for `input` in the
    /// current layer.
    ///
    /// The layer is read when this call starts; for an end event that is the
    /// layer current at release time, not at press time.  Returns how many
    /// actions ran.
    pub fn dispatch(&self, input: InputId, transition: Transition) -> usize {
        let Some((layer, matches)) = self.lock().map(|state| {
            let layer = state.layer.layer().clone();
            let mut matches = state.store.lookup(layer.as_str(), input);
            matches.retain(|(_, callbacks)| callbacks.handles(transition));
            (layer, matches)
        }) else {
            return 0;
        };

        if matches.is_empty() {
            trace!(%layer, %input, ?transition, "no bindings");
            return 0;
        }

        for (name, callbacks) in &matches {
            callbacks.fire(transition);
            debug!(
                %layer,
                %input,
                ?transition,
                name = name.as_str(),
                "action fired"
            );
        }
        matches.len()
    }

    fn lock(&self) -> Option<MutexGuard<'_, SystemState>> {
        self.state
            .as_ref()
            .map(|state| state.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl fmt::Debug for InputSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lock() {
            Some(state) => f
                .debug_struct("InputSystem")
                .field("layer", state.layer.layer())
                .field("bindings", &state.store.len())
                .finish(),
            None => f.write_str("InputSystem(inert)"),
        }
    }
}
