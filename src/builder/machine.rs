//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::{Action, Controller, Machine, TransitionObserver};
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
///
/// Transitions are registered in the order they were added when
/// [`build`](Self::build) is called.
///
/// # Example
///
/// ```rust
/// use relay::builder::succeeding;
/// use relay::Machine;
///
/// let machine: Machine<String> = Machine::builder("player")
///     .initial("ready")
///     .transition("start => ready", succeeding())
///     .transition("ready => playing", succeeding())
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current().as_deref(), Some("ready"));
/// assert!(machine.has_transition("ready", "playing"));
/// ```
pub struct MachineBuilder<S: State> {
    name: String,
    initial: Option<S>,
    transitions: Vec<(String, Action<S>)>,
    observer: Option<Arc<dyn TransitionObserver>>,
}

impl<S: State> MachineBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            transitions: Vec::new(),
            observer: None,
        }
    }

    /// Set the initial state instead of using the first registered origin.
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a transition declaration and its action.
    pub fn transition<F>(mut self, declaration: impl Into<String>, action: F) -> Self
    where
        F: Fn(Controller<S>) + Send + Sync + 'static,
    {
        self.transitions.push((declaration.into(), Arc::new(action)));
        self
    }

    /// Receive diagnostics such as unacknowledged delegations.
    pub fn observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the machine, registering every transition.
    /// Returns the first registration error encountered.
    pub fn build(self) -> Result<Machine<S>, BuildError> {
        let machine = Machine::from_parts(self.name, self.initial, self.observer);
        for (declaration, action) in self.transitions {
            machine.register(&declaration, action)?;
        }
        Ok(machine)
    }
}
