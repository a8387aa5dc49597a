//! Domain entities for layer-scoped input bindings.
//!
//! Pure data structures with no infrastructure dependencies.  Nothing here
//! locks, spawns, or performs I/O; the host crate decides how the store and
//! the layer state are shared.

/// Layer identifiers and the current-layer state cell.
pub mod layer;

/// The binding store: `layer → input → name → callbacks`.
///
/// See [`binding::BindingStore`] for the main type.
pub mod binding;
