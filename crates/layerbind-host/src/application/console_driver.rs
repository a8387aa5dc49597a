//! Console driver: runs parsed console commands against the binding system.
//!
//! The headless binary has no real input device.  Instead, `down`/`up`/`tap`
//! commands become raw events injected into a [`ChannelInputSource`], so they
//! travel the same path through the router as hardware input would.  All
//! other commands query or mutate the [`InputSystem`] directly.
//!
//! Output goes to any [`Write`] so tests can capture it.

use std::io::{self, Write};

use layerbind_core::{Callbacks, Transition};
use tracing::{error, info};

use crate::application::input_system::InputSystem;
use crate::infrastructure::console::{Command, HELP};
use crate::infrastructure::input_source::{channel::ChannelInputSource, RawInputEvent};
use crate::infrastructure::storage::config::BindingEntry;

/// Binds every config entry with actions that log when they fire.
///
/// Returns how many entries were bound (zero on an inert system).
pub fn seed_bindings(system: &InputSystem, entries: &[BindingEntry]) -> usize {
    if !system.is_active() || entries.is_empty() {
        return 0;
    }
    for BindingEntry {
        name,
        input,
        layers,
    } in entries
    {
        let (began, ended) = (name.clone(), name.clone());
        system.bind(
            *input,
            layers,
            name,
            Callbacks::new()
                .on_began(move || info!(action = began.as_str(), "began"))
                .on_ended(move || info!(action = ended.as_str(), "ended")),
        );
    }
    info!(count = entries.len(), "seeded bindings from config");
    entries.len()
}

/// Executes one console command.
///
/// # Errors
///
/// Returns any error from writing to `out`.  Injection failures are logged,
/// not returned; the console keeps running.
pub fn execute(
    command: Command,
    system: &InputSystem,
    source: &ChannelInputSource,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        Command::Press(input) => inject(source, [RawInputEvent::new(input, Transition::Began)]),
        Command::Release(input) => inject(source, [RawInputEvent::new(input, Transition::Ended)]),
        Command::Tap(input) => inject(
            source,
            [
                RawInputEvent::new(input, Transition::Began),
                RawInputEvent::new(input, Transition::Ended),
            ],
        ),
        Command::ShowLayer => writeln!(out, "{}", system.layer())?,
        Command::SetLayer(layer) => system.set_layer(layer),
        Command::Binds(layer) => {
            let layer = layer.unwrap_or_else(|| system.layer());
            for (name, input) in system.layer_binds(layer.as_str()) {
                writeln!(out, "{name} = {input}")?;
            }
        }
        Command::Rebind { name, input } => {
            if !system.is_bound(&name) {
                writeln!(out, "{name} is not bound")?;
                return Ok(());
            }
            system.rebind(&name, input);
            for layer in system.bound_layers() {
                if let Some(bound) = system.input_for(layer.as_str(), &name) {
                    writeln!(out, "{layer}: {name} = {bound}")?;
                }
            }
        }
        Command::Unbind { name, layers } => {
            if layers.is_empty() {
                system.unbind(&name);
            } else {
                system.unbind_in(&name, &layers);
            }
        }
        Command::Help => writeln!(out, "{}", HELP)?,
    }
    Ok(())
}

fn inject(source: &ChannelInputSource, events: impl IntoIterator<Item = RawInputEvent>) {
    for event in events {
        if let Err(e) = source.inject(event) {
            error!("failed to inject event: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::context::HostRole;
    use crate::infrastructure::input_source::InputSource;
    use crate::infrastructure::storage::config::AppConfig;
    use layerbind_core::{InputId, KeyCode, Layer};

    fn active() -> InputSystem {
        InputSystem::initialize(&HostRole::Client, Layer::DEFAULT)
    }

    fn run(command: Command, system: &InputSystem, source: &ChannelInputSource) -> String {
        let mut out = Vec::new();
        execute(command, system, source, &mut out).expect("write to Vec");
        String::from_utf8(out).expect("utf-8 output")
    }

    fn space() -> InputId {
        InputId::Key(KeyCode::Space)
    }

    // ── seed_bindings ─────────────────────────────────────────────────────────

    #[test]
    fn test_seed_bindings_uses_default_layer_when_layers_omitted() {
        // Arrange
        let cfg: AppConfig = toml::from_str(
            r#"
[[bindings]]
name = "Jump"
input = "Space"

[[bindings]]
name = "Glide"
input = "Space"
layers = ["Air"]
"#,
        )
        .expect("config");
        let system = active();

        // Act
        let seeded = seed_bindings(&system, &cfg.bindings);

        // Assert
        assert_eq!(seeded, 2);
        assert_eq!(system.layer_binds("Default")["Jump"], "Space");
        assert!(!system.layer_binds("Default").contains_key("Glide"));
        assert_eq!(system.layer_binds("Air")["Glide"], "Space");
    }

    #[test]
    fn test_seeded_bindings_fire_on_both_transitions() {
        // Arrange
        let system = active();
        let entries = vec![BindingEntry {
            name: "Jump".to_string(),
            input: space(),
            layers: vec![Layer::DEFAULT],
        }];
        seed_bindings(&system, &entries);

        // Act / Assert
        assert_eq!(system.dispatch(space(), Transition::Began), 1);
        assert_eq!(system.dispatch(space(), Transition::Ended), 1);
    }

    #[test]
    fn test_seed_bindings_on_inert_system_binds_nothing() {
        let system = InputSystem::inert();
        let entries = vec![BindingEntry {
            name: "Jump".to_string(),
            input: space(),
            layers: vec![Layer::DEFAULT],
        }];

        assert_eq!(seed_bindings(&system, &entries), 0);
        assert!(!system.is_bound("Jump"));
    }

    // ── input commands ────────────────────────────────────────────────────────

    #[test]
    fn test_tap_injects_begin_then_end() {
        // Arrange
        let system = active();
        let source = ChannelInputSource::new();
        let rx = source.start().expect("start");

        // Act
        run(Command::Tap(space()), &system, &source);

        // Assert
        assert_eq!(
            rx.try_recv().ok(),
            Some(RawInputEvent::new(space(), Transition::Began))
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(RawInputEvent::new(space(), Transition::Ended))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_press_and_release_inject_one_event_each() {
        let system = active();
        let source = ChannelInputSource::new();
        let rx = source.start().expect("start");

        run(Command::Press(space()), &system, &source);
        run(Command::Release(space()), &system, &source);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            [
                RawInputEvent::new(space(), Transition::Began),
                RawInputEvent::new(space(), Transition::Ended),
            ]
        );
    }

    #[test]
    fn test_press_without_running_source_does_not_panic() {
        let system = active();
        let source = ChannelInputSource::new();

        let output = run(Command::Press(space()), &system, &source);

        assert!(output.is_empty());
    }

    // ── layer and binds ───────────────────────────────────────────────────────

    #[test]
    fn test_set_then_show_layer() {
        let system = active();
        let source = ChannelInputSource::new();

        run(Command::SetLayer(Layer::AIR), &system, &source);
        let output = run(Command::ShowLayer, &system, &source);

        assert_eq!(output, "Air\n");
    }

    #[test]
    fn test_binds_defaults_to_current_layer() {
        // Arrange
        let system = active();
        let source = ChannelInputSource::new();
        system.bind(space(), [Layer::DEFAULT], "Jump", Callbacks::new());
        system.bind(
            InputId::Key(KeyCode::W),
            [Layer::AIR],
            "Dive",
            Callbacks::new(),
        );

        // Act
        let current = run(Command::Binds(None), &system, &source);
        let air = run(Command::Binds(Some(Layer::AIR)), &system, &source);

        // Assert
        assert_eq!(current, "Jump = Space\n");
        assert_eq!(air, "Dive = W\n");
    }

    // ── rebind and unbind ─────────────────────────────────────────────────────

    #[test]
    fn test_rebind_reports_new_input_per_layer() {
        // Arrange
        let system = active();
        let source = ChannelInputSource::new();
        system.bind(
            space(),
            [Layer::DEFAULT, Layer::AIR],
            "Jump",
            Callbacks::new(),
        );

        // Act
        let output = run(
            Command::Rebind {
                name: "Jump".to_string(),
                input: InputId::Key(KeyCode::E),
            },
            &system,
            &source,
        );

        // Assert
        assert_eq!(output, "Default: Jump = E\nAir: Jump = E\n");
        assert_eq!(system.layer_binds("Air")["Jump"], "E");
    }

    #[test]
    fn test_rebind_of_unbound_name_reports_and_changes_nothing() {
        let system = active();
        let source = ChannelInputSource::new();

        let output = run(
            Command::Rebind {
                name: "Fly".to_string(),
                input: InputId::Key(KeyCode::F),
            },
            &system,
            &source,
        );

        assert_eq!(output, "Fly is not bound\n");
        assert!(system.bound_layers().is_empty());
    }

    #[test]
    fn test_unbind_without_layers_removes_name_everywhere() {
        // Arrange
        let system = active();
        let source = ChannelInputSource::new();
        system.bind(
            space(),
            [Layer::DEFAULT, Layer::AIR],
            "Jump",
            Callbacks::new(),
        );

        // Act
        run(
            Command::Unbind {
                name: "Jump".to_string(),
                layers: vec![],
            },
            &system,
            &source,
        );

        // Assert
        assert!(!system.is_bound("Jump"));
    }

    #[test]
    fn test_unbind_with_layers_removes_only_those() {
        // Arrange
        let system = active();
        let source = ChannelInputSource::new();
        system.bind(
            space(),
            [Layer::DEFAULT, Layer::AIR, Layer::DEBUG],
            "Jump",
            Callbacks::new(),
        );

        // Act
        run(
            Command::Unbind {
                name: "Jump".to_string(),
                layers: vec![Layer::AIR, Layer::DEBUG],
            },
            &system,
            &source,
        );

        // Assert
        assert_eq!(system.bound_layers(), vec![Layer::DEFAULT]);
        assert_eq!(system.layer_binds("Default")["Jump"], "Space");
    }

    #[test]
    fn test_help_prints_command_list() {
        let system = active();
        let source = ChannelInputSource::new();

        let output = run(Command::Help, &system, &source);

        assert!(output.starts_with("commands:"), "{output}");
        assert!(output.contains("rebind <name> <input>"), "{output}");
    }
}
