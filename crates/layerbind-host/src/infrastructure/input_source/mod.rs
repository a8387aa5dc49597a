//! Input event sources.
//!
//! The host never talks to a keyboard or gamepad directly.  Whatever owns the
//! real devices (a window event loop, an engine's input service) implements
//! [`InputSource`] and pushes [`RawInputEvent`]s into a channel; the router
//! drains that channel.
//!
//! # The `processed` flag
//!
//! Input stacks usually let a higher-priority consumer (a focused text box, a
//! chat window) mark an event as handled.  Key and button events carry that
//! mark as `processed`; the router skips processed events so typing "W" into
//! chat does not also walk forward.
//!
//! # Testability
//!
//! [`channel::ChannelInputSource`] lets tests (and the console driver) inject
//! synthetic events.

use std::sync::mpsc;

use layerbind_core::{InputId, InputType, KeyCode, Transition};

pub mod channel;

/// A raw input event produced by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInputEvent {
    /// A key was pressed down.
    KeyDown {
        key: KeyCode,
        /// `true` if another consumer already handled this event.
        processed: bool,
    },
    /// A key was released.
    KeyUp { key: KeyCode, processed: bool },
    /// A device-level input (mouse button, touch, gamepad) became active.
    ButtonDown { input: InputType, processed: bool },
    /// A device-level input became inactive.
    ButtonUp { input: InputType, processed: bool },
    /// The pointer moved.  Analog; never dispatched.
    MouseMove { x: i32, y: i32 },
    /// The wheel scrolled.  Analog; never dispatched.
    MouseWheel { delta: i16 },
}

impl RawInputEvent {
    /// Builds the unprocessed begin/end event for `input`.
    pub fn new(input: InputId, transition: Transition) -> Self {
        match (input, transition) {
            (InputId::Key(key), Transition::Began) => RawInputEvent::KeyDown {
                key,
                processed: false,
            },
            (InputId::Key(key), Transition::Ended) => RawInputEvent::KeyUp {
                key,
                processed: false,
            },
            (InputId::Device(input), Transition::Began) => RawInputEvent::ButtonDown {
                input,
                processed: false,
            },
            (InputId::Device(input), Transition::Ended) => RawInputEvent::ButtonUp {
                input,
                processed: false,
            },
        }
    }

    /// Returns this event marked as already handled by another consumer.
    ///
    /// Analog events are returned unchanged.
    pub fn mark_processed(mut self) -> Self {
        match &mut self {
            RawInputEvent::KeyDown { processed, .. }
            | RawInputEvent::KeyUp { processed, .. }
            | RawInputEvent::ButtonDown { processed, .. }
            | RawInputEvent::ButtonUp { processed, .. } => *processed = true,
            RawInputEvent::MouseMove { .. } | RawInputEvent::MouseWheel { .. } => {}
        }
        self
    }

    /// Returns `true` if another consumer already handled this event.
    pub fn is_processed(&self) -> bool {
        match self {
            RawInputEvent::KeyDown { processed, .. }
            | RawInputEvent::KeyUp { processed, .. }
            | RawInputEvent::ButtonDown { processed, .. }
            | RawInputEvent::ButtonUp { processed, .. } => *processed,
            RawInputEvent::MouseMove { .. } | RawInputEvent::MouseWheel { .. } => false,
        }
    }

    /// Returns the input and transition for begin/end events, `None` for analog ones.
    pub fn transition(&self) -> Option<(InputId, Transition)> {
        match *self {
            RawInputEvent::KeyDown { key, .. } => Some((InputId::Key(key), Transition::Began)),
            RawInputEvent::KeyUp { key, .. } => Some((InputId::Key(key), Transition::Ended)),
            RawInputEvent::ButtonDown { input, .. } => {
                Some((InputId::Device(input), Transition::Began))
            }
            RawInputEvent::ButtonUp { input, .. } => {
                Some((InputId::Device(input), Transition::Ended))
            }
            RawInputEvent::MouseMove { .. } | RawInputEvent::MouseWheel { .. } => None,
        }
    }
}

/// Error type for input source operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("input source has already been started")]
    AlreadyStarted,
    #[error("input source is not running")]
    NotRunning,
    #[error("event receiver has been dropped")]
    Disconnected,
}

/// Trait abstracting input event production.
pub trait InputSource: Send {
    /// Starts the source and returns a receiver for its events.
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError>;
    /// Stops the source; the receiver sees the channel close.
    fn stop(&self);
}
