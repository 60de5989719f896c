//! The machine: current state, registration and dispatch.

use super::completion::Completion;
use super::context::TransitionContext;
use super::controller::Controller;
use super::error::TransitionError;
use super::observer::TransitionObserver;
use crate::builder::{BuildError, MachineBuilder};
use crate::core::{Declaration, Lookup, State, TransitionTable};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Name reported for the origin when a machine has no current state yet.
const UNSET: &str = "<unset>";

/// Work run when a transition is dispatched.
///
/// The action reports its outcome through the controller, immediately or
/// later, possibly from another task.
pub type Action<S> = Arc<dyn Fn(Controller<S>) + Send + Sync>;

/// A finite state machine with declared transitions.
///
/// `Machine` is a cheap handle; clones share the same state and table.
///
/// # Example
///
/// ```rust
/// use relay::Machine;
///
/// #[tokio::main]
/// async fn main() {
///     let machine: Machine<String> = Machine::new("loader");
///     machine
///         .transition("start => loaded", |ctr| {
///             ctr.succeed().unwrap();
///         })
///         .unwrap();
///
///     assert_eq!(machine.current().as_deref(), Some("start"));
///     machine.to("loaded").await.unwrap();
///     assert_eq!(machine.current().as_deref(), Some("loaded"));
/// }
/// ```
pub struct Machine<S: State> {
    shared: Arc<Shared<S>>,
}

struct Shared<S: State> {
    name: String,
    inner: Mutex<Inner<S>>,
    observer: Option<Arc<dyn TransitionObserver>>,
}

struct Inner<S: State> {
    current: Option<S>,
    table: TransitionTable<S, Action<S>>,
}

impl<S: State> Machine<S> {
    /// Create an empty machine. Its initial state becomes the first origin
    /// registered.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(name.into(), None, None)
    }

    /// Create an empty machine starting in `initial`.
    pub fn with_initial(name: impl Into<String>, initial: impl Into<S>) -> Self {
        Self::from_parts(name.into(), Some(initial.into()), None)
    }

    pub fn builder(name: impl Into<String>) -> MachineBuilder<S> {
        MachineBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        initial: Option<S>,
        observer: Option<Arc<dyn TransitionObserver>>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                inner: Mutex::new(Inner {
                    current: initial,
                    table: TransitionTable::new(),
                }),
                observer,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// The present state, or `None` before any state is known.
    pub fn current(&self) -> Option<S> {
        self.shared.inner.lock().current.clone()
    }

    /// Whether an action is registered for `from => to`.
    pub fn has_transition(&self, from: impl Into<S>, to: impl Into<S>) -> bool {
        self.shared
            .inner
            .lock()
            .table
            .contains(&from.into(), &to.into())
    }

    /// Register `action` for every move described by `declaration`.
    ///
    /// Fails without touching the machine if the declaration is malformed,
    /// names an unknown state, or repeats an already registered move.
    pub fn transition<F>(&self, declaration: &str, action: F) -> Result<(), BuildError>
    where
        F: Fn(Controller<S>) + Send + Sync + 'static,
    {
        self.register(declaration, Arc::new(action))
    }

    pub(crate) fn register(&self, declaration: &str, action: Action<S>) -> Result<(), BuildError> {
        let parsed = Declaration::parse(declaration)?;

        let resolve = |name: &str| {
            S::from_name(name).ok_or_else(|| BuildError::UnknownState {
                name: name.to_string(),
                declaration: declaration.to_string(),
            })
        };
        let pairs = parsed
            .pairs()
            .map(|(from, to)| -> Result<(S, S), BuildError> { Ok((resolve(from)?, resolve(to)?)) })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.shared.inner.lock();
        inner
            .table
            .insert_all(&pairs, action)
            .map_err(|(from, to)| BuildError::DuplicateTransition {
                declaration: declaration.to_string(),
                from: from.name().to_string(),
                to: to.name().to_string(),
            })?;

        if inner.current.is_none() {
            inner.current = pairs.first().map(|(from, _)| from.clone());
        }

        debug!(
            machine = %self.shared.name,
            declaration,
            edges = pairs.len(),
            "registered transition"
        );
        Ok(())
    }

    /// Request a move from the current state to `target`.
    ///
    /// The registered action runs before this returns. Its outcome, or the
    /// reason no action was found, is delivered through the returned
    /// [`Completion`].
    pub fn to(&self, target: impl Into<S>) -> Completion {
        let target = target.into();

        let (from, action) = {
            let inner = self.shared.inner.lock();
            let Some(from) = inner.current.clone() else {
                return self.undefined(TransitionError::UndefinedOrigin {
                    from: UNSET.to_string(),
                    to: target.name().to_string(),
                });
            };
            match inner.table.lookup(&from, &target) {
                Lookup::Found(action) => (from, Arc::clone(action)),
                Lookup::UndefinedOrigin => {
                    return self.undefined(TransitionError::UndefinedOrigin {
                        from: from.name().to_string(),
                        to: target.name().to_string(),
                    })
                }
                Lookup::UndefinedDestination => {
                    return self.undefined(TransitionError::UndefinedDestination {
                        from: from.name().to_string(),
                        to: target.name().to_string(),
                    })
                }
            }
        };

        debug!(
            machine = %self.shared.name,
            from = from.name(),
            to = target.name(),
            "dispatching transition"
        );

        let (tx, completion) = Completion::channel(from.name(), target.name());
        let controller = Controller::new(self.clone(), TransitionContext::begin(from, target), tx);
        action(controller);
        completion
    }

    fn undefined(&self, error: TransitionError) -> Completion {
        debug!(machine = %self.shared.name, %error, "transition refused");
        let (from, to) = match &error {
            TransitionError::UndefinedOrigin { from, to }
            | TransitionError::UndefinedDestination { from, to } => (from.clone(), to.clone()),
            _ => (UNSET.to_string(), UNSET.to_string()),
        };
        Completion::resolved(&from, &to, Err(error))
    }

    pub(crate) fn set_current(&self, state: S) {
        self.shared.inner.lock().current = Some(state);
    }

    pub(crate) fn observer(&self) -> Option<&Arc<dyn TransitionObserver>> {
        self.shared.observer.as_ref()
    }
}

impl<S: State> Clone for Machine<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: State> fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("Machine")
            .field("name", &self.shared.name)
            .field("current", &inner.current)
            .field("transitions", &inner.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::succeeding;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn noop(_: Controller<String>) {}

    #[test]
    fn initial_state_is_first_registered_origin() {
        let machine: Machine<String> = Machine::new("test");
        assert_eq!(machine.current(), None);

        machine.transition("start => ready", noop).unwrap();
        machine.transition("ready => playing", noop).unwrap();

        assert_eq!(machine.current().as_deref(), Some("start"));
    }

    #[test]
    fn grouped_declaration_picks_first_origin_token() {
        let machine: Machine<String> = Machine::new("test");
        machine.transition("{zeta, alpha} => ready", noop).unwrap();

        assert_eq!(machine.current().as_deref(), Some("zeta"));
    }

    #[test]
    fn explicit_initial_state_is_kept() {
        let machine: Machine<String> = Machine::with_initial("test", "ready");
        machine.transition("start => ready", noop).unwrap();

        assert_eq!(machine.current().as_deref(), Some("ready"));
    }

    #[test]
    fn registration_creates_cross_product() {
        let machine: Machine<String> = Machine::new("test");
        machine
            .transition("{start, epoch} => {ready, waiting}", noop)
            .unwrap();

        assert!(machine.has_transition("start", "ready"));
        assert!(machine.has_transition("start", "waiting"));
        assert!(machine.has_transition("epoch", "ready"));
        assert!(machine.has_transition("epoch", "waiting"));
        assert!(!machine.has_transition("ready", "start"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let machine: Machine<String> = Machine::new("test");
        machine.transition("yep => nope", noop).unwrap();

        for declaration in [
            "yep => nope",
            "yep, hey => nope",
            "yep => nope, hey",
            "yep, hey => nope, hey",
        ] {
            let err = machine.transition(declaration, noop).unwrap_err();
            assert!(
                matches!(err, BuildError::DuplicateTransition { .. }),
                "{declaration}: {err}"
            );
        }

        assert!(!machine.has_transition("hey", "nope"));
        assert!(!machine.has_transition("yep", "hey"));
    }

    #[test]
    fn self_repeating_group_is_a_duplicate() {
        let machine: Machine<String> = Machine::new("test");
        let err = machine.transition("{a, a} => c", noop).unwrap_err();

        match err {
            BuildError::DuplicateTransition { from, to, .. } => {
                assert_eq!(from, "a");
                assert_eq!(to, "c");
            }
            other => panic!("Expected DuplicateTransition, got {other}"),
        }
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn malformed_declaration_is_rejected() {
        let machine: Machine<String> = Machine::new("test");

        for declaration in [" => nope", "yep => ", ", => nope", "yep => ,"] {
            let err = machine.transition(declaration, noop).unwrap_err();
            assert!(matches!(err, BuildError::Malformed(_)), "{declaration}");
        }
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn action_runs_during_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let machine: Machine<String> = Machine::new("test");
        let counter = Arc::clone(&calls);
        machine
            .transition("start => loaded", move |ctr| {
                counter.fetch_add(1, Ordering::SeqCst);
                ctr.succeed().unwrap();
            })
            .unwrap();

        let _completion = machine.to("loaded");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(machine.current().as_deref(), Some("loaded"));
    }

    #[tokio::test]
    async fn machine_without_state_reports_undefined_origin() {
        let machine: Machine<String> = Machine::new("test");

        let err = machine.to("anywhere").await.unwrap_err();
        assert!(matches!(err, TransitionError::UndefinedOrigin { .. }));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let machine: Machine<String> = Machine::new("test");
        machine.transition("a => b", succeeding()).unwrap();
        let other = machine.clone();

        other.to("b").await.unwrap();

        assert_eq!(machine.current().as_deref(), Some("b"));
    }

    #[test]
    fn debug_shows_name_and_state() {
        let machine: Machine<String> = Machine::with_initial("visual", "waiting");
        let debug = format!("{:?}", machine);

        assert!(debug.contains("visual"));
        assert!(debug.contains("waiting"));
    }
}
