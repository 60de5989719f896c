//! Builder API for constructing machines.
//!
//! This module provides a fluent builder, stock actions, and a macro for
//! declaring state enums.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::State;
use crate::machine::Controller;

/// An action that accepts every move immediately.
///
/// # Example
///
/// ```
/// use relay::builder::succeeding;
/// use relay::Machine;
///
/// let machine: Machine<String> = Machine::new("door");
/// machine.transition("closed => open", succeeding()).unwrap();
/// let _completion = machine.to("open");
/// assert_eq!(machine.current().as_deref(), Some("open"));
/// ```
pub fn succeeding<S: State>() -> impl Fn(Controller<S>) + Send + Sync + 'static {
    |ctr: Controller<S>| {
        let _ = ctr.succeed();
    }
}

/// An action that rejects every move with `TransitionHalted`.
pub fn halting<S: State>() -> impl Fn(Controller<S>) + Send + Sync + 'static {
    |ctr: Controller<S>| {
        let _ = ctr.fail();
    }
}
