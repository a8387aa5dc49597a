//! Application layer use cases for the host.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure data structures in `layerbind-core`) and the infrastructure (input
//! sources, configuration files, the console).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a goal (e.g., "fire the Jump
//!   action when Space is pressed in the Default layer").
//! - **Depend on abstractions** ([`ExecutionContext`], [`InputSource`]) rather
//!   than concrete implementations.
//! - **Contain no OS calls and no file system access**.
//!
//! # Sub-modules
//!
//! - **`input_system`** – The shared, initialization-gated handle through
//!   which application code binds, unbinds, rebinds and switches layers.
//!
//! - **`route_input`** – Drains an input source and dispatches every begin/end
//!   event to the bindings of the current layer.
//!
//! - **`console_driver`** – Seeds bindings from the config and runs console
//!   commands for the headless binary.
//!
//! [`ExecutionContext`]: crate::infrastructure::context::ExecutionContext
//! [`InputSource`]: crate::infrastructure::input_source::InputSource

pub mod console_driver;
pub mod input_system;
pub mod route_input;
