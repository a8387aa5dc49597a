//! Channel-backed input source.
//!
//! Events are injected programmatically instead of captured from hardware.
//! Tests use it to drive the router; the headless binary feeds it from
//! console commands.

use std::sync::{
    mpsc::{self, Sender},
    Mutex, PoisonError,
};

use super::{CaptureError, InputSource, RawInputEvent};

/// An [`InputSource`] whose events come from [`ChannelInputSource::inject`].
#[derive(Default)]
pub struct ChannelInputSource {
    sender: Mutex<Option<Sender<RawInputEvent>>>,
}

impl ChannelInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic event, as if captured from hardware.
    ///
    /// # Errors
    ///
    /// [`CaptureError::NotRunning`] before `start()` or after `stop()`;
    /// [`CaptureError::Disconnected`] if the receiver was dropped.
    pub fn inject(&self, event: RawInputEvent) -> Result<(), CaptureError> {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(CaptureError::NotRunning)?;
        sender.send(event).map_err(|_| CaptureError::Disconnected)
    }

    /// Returns `true` between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl InputSource for ChannelInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError> {
        let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(CaptureError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender closes the channel.
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerbind_core::{InputType, KeyCode, Transition};

    #[test]
    fn test_channel_source_starts_and_receives_events() {
        // Arrange
        let source = ChannelInputSource::new();
        let rx = source.start().expect("start should succeed");

        // Act
        source
            .inject(RawInputEvent::new(KeyCode::Space.into(), Transition::Began))
            .expect("inject should succeed");

        // Assert
        let event = rx.recv().expect("should receive event");
        assert!(matches!(
            event,
            RawInputEvent::KeyDown { key: KeyCode::Space, processed: false }
        ));
    }

    #[test]
    fn test_channel_source_stop_closes_channel() {
        // Arrange
        let source = ChannelInputSource::new();
        let rx = source.start().expect("start should succeed");

        // Act
        source.stop();

        // Assert – channel should be disconnected
        assert!(rx.recv().is_err(), "channel should be closed after stop()");
        assert!(!source.is_running());
    }

    #[test]
    fn test_inject_before_start_is_rejected() {
        let source = ChannelInputSource::new();
        let result = source.inject(RawInputEvent::MouseWheel { delta: 120 });
        assert!(matches!(result, Err(CaptureError::NotRunning)));
    }

    #[test]
    fn test_second_start_is_rejected() {
        let source = ChannelInputSource::new();
        let _rx = source.start().expect("first start");
        assert!(matches!(source.start(), Err(CaptureError::AlreadyStarted)));
    }

    #[test]
    fn test_inject_after_receiver_dropped_reports_disconnect() {
        let source = ChannelInputSource::new();
        drop(source.start().expect("start"));
        let result = source.inject(RawInputEvent::new(KeyCode::E.into(), Transition::Began));
        assert!(matches!(result, Err(CaptureError::Disconnected)));
    }

    #[test]
    fn test_channel_source_preserves_event_order() {
        // Arrange
        let source = ChannelInputSource::new();
        let rx = source.start().expect("start should succeed");

        // Act
        source.inject(RawInputEvent::MouseMove { x: 100, y: 200 }).unwrap();
        source
            .inject(RawInputEvent::new(InputType::MouseButton1.into(), Transition::Began))
            .unwrap();
        source
            .inject(RawInputEvent::new(InputType::MouseButton1.into(), Transition::Ended))
            .unwrap();

        // Assert
        assert!(matches!(rx.recv().unwrap(), RawInputEvent::MouseMove { x: 100, .. }));
        assert!(matches!(
            rx.recv().unwrap(),
            RawInputEvent::ButtonDown { input: InputType::MouseButton1, .. }
        ));
        assert!(matches!(
            rx.recv().unwrap(),
            RawInputEvent::ButtonUp { input: InputType::MouseButton1, .. }
        ));
    }
}
