//! Infrastructure layer for the host.
//!
//! Contains the edges of the system: the input event source, the
//! execution-context gate, TOML configuration, and the console command parser
//! used by the headless binary.
//!
//! **Dependency rule**: this layer may depend on `layerbind_core`, but the
//! application layer only consumes its traits and plain data types.

pub mod console;
pub mod context;
pub mod input_source;
pub mod storage;
