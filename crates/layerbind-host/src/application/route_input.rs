//! RouteInputUseCase: turns raw input events into action calls.
//!
//! The router subscribes to an [`InputSource`], filters out events that
//! another consumer already handled and analog events, and hands every
//! remaining begin/end event to [`InputSystem::dispatch`].
//!
//! # Architecture
//!
//! This use case depends only on the [`InputSource`] trait and the
//! [`InputSystem`] handle.  Tests drive it with
//! [`ChannelInputSource`](crate::infrastructure::input_source::channel::ChannelInputSource).

use std::sync::mpsc::Receiver;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::application::input_system::InputSystem;
use crate::infrastructure::input_source::{CaptureError, InputSource, RawInputEvent};

/// Error type for the route-input use case.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("input source error: {0}")]
    Capture(#[from] CaptureError),
}

/// Counters reported when the event stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    /// Events read from the source.
    pub received: u64,
    /// Events skipped as processed or analog.
    pub ignored: u64,
    /// Actions fired.
    pub fired: u64,
}

/// The Route Input use case.
pub struct RouteInputUseCase {
    system: InputSystem,
}

impl RouteInputUseCase {
    pub fn new(system: InputSystem) -> Self {
        Self { system }
    }

    /// Returns the system this router dispatches into.
    pub fn system(&self) -> &InputSystem {
        &self.system
    }

    /// Starts `source` and returns its event stream.
    ///
    /// An inert system never subscribes: the source is left untouched and
    /// `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Capture`] if the source fails to start.
    pub fn subscribe(
        &self,
        source: &dyn InputSource,
    ) -> Result<Option<Receiver<RawInputEvent>>, RouteError> {
        if !self.system.is_active() {
            debug!("binding system is inert; not subscribing to input");
            return Ok(None);
        }
        let rx = source.start()?;
        info!("subscribed to input source");
        Ok(Some(rx))
    }

    /// Handles one raw event and returns how many actions it fired.
    pub fn handle_event(&self, event: &RawInputEvent) -> usize {
        if event.is_processed() {
            trace!(?event, "skipping processed event");
            return 0;
        }
        match event.transition() {
            Some((input, transition)) => self.system.dispatch(input, transition),
            None => 0,
        }
    }

    /// Drains `events` until the source closes the channel.
    ///
    /// Blocks the calling thread; the binary runs it on a blocking task.
    pub fn run(&self, events: Receiver<RawInputEvent>) -> RouteStats {
        let mut stats = RouteStats::default();
        for event in events {
            stats.received += 1;
            if event.is_processed() || event.transition().is_none() {
                stats.ignored += 1;
                continue;
            }
            stats.fired += self.handle_event(&event) as u64;
        }
        info!(
            received = stats.received,
            ignored = stats.ignored,
            fired = stats.fired,
            "input source closed"
        );
        stats
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::context::HostRole;
    use crate::infrastructure::input_source::channel::ChannelInputSource;
    use layerbind_core::{Callbacks, InputId, InputType, KeyCode, Layer, Transition};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn make_router() -> RouteInputUseCase {
        RouteInputUseCase::new(InputSystem::initialize(&HostRole::Client, Layer::DEFAULT))
    }

    fn bind_counter(router: &RouteInputUseCase, input: InputId, name: &str) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        router.system().bind(
            input,
            [Layer::DEFAULT],
            name,
            Callbacks::new().on_began(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );
        counter
    }

    #[test]
    fn test_key_down_fires_bound_action() {
        // Arrange
        let router = make_router();
        let hits = bind_counter(&router, KeyCode::Space.into(), "Jump");

        // Act
        let fired = router.handle_event(&RawInputEvent::KeyDown {
            key: KeyCode::Space,
            processed: false,
        });

        // Assert
        assert_eq!(fired, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_processed_event_is_skipped() {
        // Arrange
        let router = make_router();
        let hits = bind_counter(&router, KeyCode::W.into(), "Forward");

        // Act
        let fired = router.handle_event(
            &RawInputEvent::new(KeyCode::W.into(), Transition::Began).mark_processed(),
        );

        // Assert
        assert_eq!(fired, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_analog_events_fire_nothing() {
        let router = make_router();
        bind_counter(&router, InputType::MouseMovement.into(), "Look");

        assert_eq!(
            router.handle_event(&RawInputEvent::MouseMove { x: 4, y: 2 }),
            0
        );
        assert_eq!(
            router.handle_event(&RawInputEvent::MouseWheel { delta: 120 }),
            0
        );
    }

    #[test]
    fn test_button_events_route_as_device_inputs() {
        let router = make_router();
        let hits = bind_counter(&router, InputType::MouseButton1.into(), "Attack");

        router.handle_event(&RawInputEvent::new(
            InputType::MouseButton1.into(),
            Transition::Began,
        ));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribe_starts_source_when_active() {
        // Arrange
        let router = make_router();
        let source = ChannelInputSource::new();

        // Act
        let rx = router.subscribe(&source).expect("subscribe");

        // Assert
        assert!(rx.is_some());
        assert!(source.is_running());
    }

    #[test]
    fn test_subscribe_skips_source_when_inert() {
        // Arrange
        let router = RouteInputUseCase::new(InputSystem::inert());
        let source = ChannelInputSource::new();

        // Act
        let rx = router.subscribe(&source).expect("subscribe");

        // Assert
        assert!(rx.is_none());
        assert!(!source.is_running());
    }

    #[test]
    fn test_subscribe_twice_reports_capture_error() {
        let router = make_router();
        let source = ChannelInputSource::new();
        let _rx = router.subscribe(&source).expect("first subscribe");

        let result = router.subscribe(&source);

        assert!(matches!(
            result,
            Err(RouteError::Capture(CaptureError::AlreadyStarted))
        ));
    }

    #[test]
    fn test_run_drains_until_source_stops() {
        // Arrange
        let router = make_router();
        let hits = bind_counter(&router, KeyCode::Space.into(), "Jump");
        let source = ChannelInputSource::new();
        let rx = router.subscribe(&source).unwrap().unwrap();
        for event in [
            RawInputEvent::new(KeyCode::Space.into(), Transition::Began),
            RawInputEvent::new(KeyCode::Space.into(), Transition::Ended),
            RawInputEvent::MouseMove { x: 1, y: 1 },
            RawInputEvent::new(KeyCode::Space.into(), Transition::Began).mark_processed(),
            RawInputEvent::new(KeyCode::Space.into(), Transition::Began),
        ] {
            source.inject(event).unwrap();
        }
        source.stop();

        // Act
        let stats = router.run(rx);

        // Assert
        assert_eq!(
            stats,
            RouteStats {
                received: 5,
                ignored: 2,
                fired: 2,
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
