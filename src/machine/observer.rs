//! Hook for diagnostics raised while actions run.

use std::fmt;

/// An action requested a further transition before acknowledging its own.
///
/// The machine's state is being moved out from under the unacknowledged
/// transition `from => to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationWarning {
    pub machine: String,
    pub from: String,
    pub to: String,
    pub next: String,
}

impl fmt::Display for DelegationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: transitioning to '{}' before {} => {} was acknowledged",
            self.machine, self.next, self.from, self.to
        )
    }
}

/// Receives diagnostics from a machine in addition to its `tracing` output.
pub trait TransitionObserver: Send + Sync {
    fn on_unacknowledged_delegation(&self, warning: &DelegationWarning);
}
