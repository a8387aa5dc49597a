//! Line-oriented console commands for the headless binary.
//!
//! Each stdin line is one command:
//!
//! | Command                        | Effect                                   |
//! |--------------------------------|------------------------------------------|
//! | `down <input>`                 | inject a begin event                     |
//! | `up <input>`                   | inject an end event                      |
//! | `tap <input>`                  | inject begin then end                    |
//! | `layer [<name>]`               | show or set the current layer            |
//! | `binds [<layer>]`              | list bindings (current layer by default) |
//! | `rebind <name> <input>`        | move a binding in every layer            |
//! | `unbind <name> [<layer>...]`   | remove a binding everywhere or per layer |
//! | `help`                         | list commands                            |
//!
//! Blank lines and lines starting with `#` are ignored.
//!
//! [`spawn_line_reader`] moves the blocking line reads onto a plain OS thread.
//! A read parked there never delays runtime shutdown, unlike a read on the
//! runtime's blocking pool.

use std::io::BufRead;

use layerbind_core::{InputId, Layer, ParseInputError};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

/// Error type for console command parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0:?} (try `help`)")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Input(#[from] ParseInputError),
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Press(InputId),
    Release(InputId),
    Tap(InputId),
    ShowLayer,
    SetLayer(Layer),
    Binds(Option<Layer>),
    Rebind { name: String, input: InputId },
    Unbind { name: String, layers: Vec<Layer> },
    Help,
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  down <input>              press an input
  up <input>                release an input
  tap <input>               press and release an input
  layer [<name>]            show or set the current layer
  binds [<layer>]           list bindings
  rebind <name> <input>     move a binding to another input
  unbind <name> [<layer>..] remove a binding
  help                      show this text";

/// Parses one console line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands, missing arguments, or
/// unknown input names.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    if verb.starts_with('#') {
        return Ok(None);
    }

    let command = match verb.to_ascii_lowercase().as_str() {
        "down" => Command::Press(input_arg(words.next(), "down")?),
        "up" => Command::Release(input_arg(words.next(), "up")?),
        "tap" => Command::Tap(input_arg(words.next(), "tap")?),
        "layer" => match words.next() {
            Some(name) => Command::SetLayer(Layer::from(name)),
            None => Command::ShowLayer,
        },
        "binds" => Command::Binds(words.next().map(Layer::from)),
        "rebind" => {
            let name = words.next().ok_or(CommandError::MissingArgument {
                command: "rebind",
                expected: "a binding name and an input",
            })?;
            let input = input_arg(words.next(), "rebind")?;
            Command::Rebind {
                name: name.to_string(),
                input,
            }
        }
        "unbind" => {
            let name = words.next().ok_or(CommandError::MissingArgument {
                command: "unbind",
                expected: "a binding name",
            })?;
            Command::Unbind {
                name: name.to_string(),
                layers: words.map(Layer::from).collect(),
            }
        }
        "help" | "?" => Command::Help,
        _ => return Err(CommandError::UnknownCommand(verb.to_string())),
    };
    Ok(Some(command))
}

/// Forwards lines from `reader` until EOF, a read error, or the receiver is
/// dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("console read failed: {e}");
                    break;
                }
            }
        }
    });
    rx
}

fn input_arg(word: Option<&str>, command: &'static str) -> Result<InputId, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument {
        command,
        expected: "an input name",
    })?;
    Ok(word.parse()?)
}
