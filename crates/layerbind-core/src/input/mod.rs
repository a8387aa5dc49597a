//! Input identifiers: what a binding listens to.
//!
//! An [`InputId`] is either a keyboard key ([`KeyCode`]) or a device-level
//! input class ([`InputType`]) such as a mouse button or a whole gamepad.
//! Both have a canonical name used for display and for parsing configuration
//! text; parsing also accepts the dotted `KeyCode.E` / `Enum.KeyCode.E` and
//! `UserInputType.MouseButton1` spellings common in game-engine tooling.

pub mod keycode;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use keycode::KeyCode;

/// Error returned when text does not name any known input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input identifier: {0:?}")]
pub struct ParseInputError(pub String);

/// Device-level input classes that are not individual keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputType {
    /// Primary (usually left) mouse button.
    MouseButton1,
    /// Secondary (usually right) mouse button.
    MouseButton2,
    /// Middle mouse button.
    MouseButton3,
    MouseWheel,
    MouseMovement,
    Touch,
    Gamepad1,
    Gamepad2,
    Gamepad3,
    Gamepad4,
}

impl InputType {
    pub const ALL: &'static [InputType] = &[
        InputType::MouseButton1,
        InputType::MouseButton2,
        InputType::MouseButton3,
        InputType::MouseWheel,
        InputType::MouseMovement,
        InputType::Touch,
        InputType::Gamepad1,
        InputType::Gamepad2,
        InputType::Gamepad3,
        InputType::Gamepad4,
    ];

    /// Returns the canonical name of this input class.
    pub fn name(self) -> &'static str {
        match self {
            InputType::MouseButton1 => "MouseButton1",
            InputType::MouseButton2 => "MouseButton2",
            InputType::MouseButton3 => "MouseButton3",
            InputType::MouseWheel => "MouseWheel",
            InputType::MouseMovement => "MouseMovement",
            InputType::Touch => "Touch",
            InputType::Gamepad1 => "Gamepad1",
            InputType::Gamepad2 => "Gamepad2",
            InputType::Gamepad3 => "Gamepad3",
            InputType::Gamepad4 => "Gamepad4",
        }
    }

    /// Looks up an input class by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// A distinguishable physical input signal.
///
/// Serialises as its display name (`"Space"`, `"MouseButton1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InputId {
    Key(KeyCode),
    Device(InputType),
}

impl From<KeyCode> for InputId {
    fn from(code: KeyCode) -> Self {
        InputId::Key(code)
    }
}

impl From<InputType> for InputId {
    fn from(kind: InputType) -> Self {
        InputId::Device(kind)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputId::Key(code) => f.write_str(code.name()),
            InputId::Device(kind) => f.write_str(kind.name()),
        }
    }
}

impl FromStr for InputId {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix("Enum.").unwrap_or(trimmed);

        if let Some(name) = bare.strip_prefix("KeyCode.") {
            return KeyCode::from_name(name)
                .map(InputId::Key)
                .ok_or_else(|| ParseInputError(s.to_string()));
        }
        if let Some(name) = bare.strip_prefix("UserInputType.") {
            return InputType::from_name(name)
                .map(InputId::Device)
                .ok_or_else(|| ParseInputError(s.to_string()));
        }

        KeyCode::from_name(bare)
            .map(InputId::Key)
            .or_else(|| InputType::from_name(bare).map(InputId::Device))
            .ok_or_else(|| ParseInputError(s.to_string()))
    }
}

impl TryFrom<String> for InputId {
    type Error = ParseInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputId> for String {
    fn from(id: InputId) -> Self {
        id.to_string()
    }
}

/// The two transitions the router reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The input became active (key pressed, button down).
    Began,
    /// The input became inactive (key released, button up).
    Ended,
}
