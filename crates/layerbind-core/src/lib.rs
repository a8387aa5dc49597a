//! # layerbind-core
//!
//! Domain types for a layer-scoped input binding dispatcher: named layers,
//! input identifiers, callback pairs, the binding store, and the current-layer
//! state cell.
//!
//! This crate has zero dependencies on OS APIs, threads, or I/O.  The host
//! crate wraps these types behind a shared handle and feeds them input events.
//!
//! # Architecture overview (for beginners)
//!
//! An application (usually a game) wants "Jump" to fire when Space is pressed,
//! but only while the player is on the ground.  While airborne a different set
//! of actions applies, and a debug overlay may want its own keys entirely.
//! Each of these contexts is a **layer**; exactly one layer is current.
//!
//! - **`input`** – What can be pressed.  [`InputId`] is either a keyboard key
//!   ([`KeyCode`], numbered by USB HID usage) or a device-level input class
//!   ([`InputType`], e.g. a mouse button or a gamepad).
//!
//! - **`domain`** – The binding store (`layer → input → name → callbacks`) and
//!   the [`LayerState`] holding the current layer.

pub mod domain;
pub mod input;

pub use domain::binding::{Action, BindingStore, Callbacks};
pub use domain::layer::{Layer, LayerState};
pub use input::keycode::KeyCode;
pub use input::{InputId, InputType, ParseInputError, Transition};
