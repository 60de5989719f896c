//! Per-dispatch protocol handed to an action.

use super::completion::{Completion, CompletionSender};
use super::context::TransitionContext;
use super::dispatch::Machine;
use super::error::{DoubleCompletion, Outcome, TransitionError};
use super::observer::DelegationWarning;
use crate::core::State;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use tracing::{debug, warn};

enum Slot {
    Pending(CompletionSender),
    Completed(Outcome),
}

/// Lets an action report the outcome of the move it was invoked for.
///
/// Exactly one of [`succeed`](Self::succeed), [`fail`](Self::fail) or
/// [`fail_with`](Self::fail_with) may be called; any later call returns
/// [`DoubleCompletion`]. The controller may be moved into another task to
/// complete asynchronously. Dropping it uncompleted resolves the caller's
/// completion with [`TransitionError::Abandoned`].
pub struct Controller<S: State> {
    machine: Machine<S>,
    context: TransitionContext<S>,
    slot: Mutex<Slot>,
}

impl<S: State> Controller<S> {
    pub(crate) fn new(machine: Machine<S>, context: TransitionContext<S>, tx: CompletionSender) -> Self {
        Self {
            machine,
            context,
            slot: Mutex::new(Slot::Pending(tx)),
        }
    }

    /// State the machine was in when the move was requested.
    pub fn from(&self) -> &S {
        &self.context.from
    }

    /// Requested destination.
    pub fn to(&self) -> &S {
        &self.context.to
    }

    pub fn context(&self) -> &TransitionContext<S> {
        &self.context
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match &*self.slot.lock() {
            Slot::Pending(_) => None,
            Slot::Completed(outcome) => Some(*outcome),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.outcome().is_some()
    }

    /// Accept the move: the machine enters the destination state.
    pub fn succeed(&self) -> Result<(), DoubleCompletion> {
        let tx = self.settle(Outcome::Succeeded)?;
        self.machine.set_current(self.context.to.clone());
        debug!(
            machine = self.machine.name(),
            from = self.context.from.name(),
            to = self.context.to.name(),
            elapsed_ms = self.context.elapsed().as_millis() as u64,
            "transition succeeded"
        );
        let _ = tx.send(Ok(()));
        Ok(())
    }

    /// Reject the move without a reason. The caller sees
    /// [`TransitionError::Halted`].
    pub fn fail(&self) -> Result<(), DoubleCompletion> {
        self.halt(TransitionError::Halted)
    }

    /// Reject the move with `error`. The caller sees it as
    /// [`TransitionError::Rejected`].
    pub fn fail_with<E>(&self, error: E) -> Result<(), DoubleCompletion>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.halt(TransitionError::Rejected(error.into()))
    }

    /// Request a further transition from whatever the machine's state is now.
    ///
    /// Does not complete this controller. Delegating before `succeed` or `fail`
    /// is allowed but logged as a warning, since the state moves on while this
    /// transition is still unacknowledged.
    pub fn delegate(&self, target: impl Into<S>) -> Completion {
        let target = target.into();

        if !self.is_completed() {
            let warning = DelegationWarning {
                machine: self.machine.name().to_string(),
                from: self.context.from.name().to_string(),
                to: self.context.to.name().to_string(),
                next: target.name().to_string(),
            };
            warn!(
                machine = %warning.machine,
                from = %warning.from,
                to = %warning.to,
                next = %warning.next,
                "transitioning before the current transition was acknowledged"
            );
            if let Some(observer) = self.machine.observer() {
                observer.on_unacknowledged_delegation(&warning);
            }
        }

        self.machine.to(target)
    }

    fn halt(&self, error: TransitionError) -> Result<(), DoubleCompletion> {
        let tx = self.settle(Outcome::Halted)?;
        debug!(
            machine = self.machine.name(),
            from = self.context.from.name(),
            to = self.context.to.name(),
            %error,
            "transition halted"
        );
        let _ = tx.send(Err(error));
        Ok(())
    }

    fn settle(&self, outcome: Outcome) -> Result<CompletionSender, DoubleCompletion> {
        let mut slot = self.slot.lock();
        match std::mem::replace(&mut *slot, Slot::Completed(outcome)) {
            Slot::Pending(tx) => Ok(tx),
            Slot::Completed(previous) => {
                *slot = Slot::Completed(previous);
                Err(DoubleCompletion {
                    from: self.context.from.name().to_string(),
                    to: self.context.to.name().to_string(),
                    outcome: previous,
                })
            }
        }
    }
}

impl<S: State> Drop for Controller<S> {
    fn drop(&mut self) {
        if matches!(*self.slot.get_mut(), Slot::Pending(_)) {
            debug!(
                machine = self.machine.name(),
                from = self.context.from.name(),
                to = self.context.to.name(),
                "controller dropped without completing"
            );
        }
    }
}

impl<S: State> fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("machine", &self.machine.name())
            .field("from", &self.context.from)
            .field("to", &self.context.to)
            .field("outcome", &self.outcome())
            .finish()
    }
}
