//! Execution-context gate.
//!
//! Some processes that link the binding system can never receive input (a
//! dedicated game server, a batch tool).  [`ExecutionContext`] answers the one
//! question the initialization step asks: may this process subscribe to input
//! at all?

use serde::{Deserialize, Serialize};

/// Reports whether the current process can receive input.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutionContext {
    /// Returns `true` if input events can reach this process.
    fn is_input_capable(&self) -> bool;
}

/// The role this process plays, as configured in `[host] role`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostRole {
    /// An interactive process with a local player.
    #[default]
    Client,
    /// An authoritative server; never input-capable.
    Server,
}

impl ExecutionContext for HostRole {
    fn is_input_capable(&self) -> bool {
        matches!(self, HostRole::Client)
    }
}
