//! The transition engine.
//!
//! - **Machine**: owns the current state, registers declarations and dispatches moves
//! - **Controller**: handed to each action so it can succeed, fail or delegate
//! - **Completion**: single-shot future carrying the outcome back to the caller
//!
//! # Deferred delivery
//!
//! `Machine::to` runs the action inline but never reports the outcome inline.
//! The caller learns it by awaiting the returned `Completion`, so setup done
//! right after `to` can never race the outcome, whether the action finished
//! synchronously or not.
//!
//! # Interleaving
//!
//! There is no in-flight lock. A `to` issued while an earlier action has not
//! yet completed dispatches from the state current at that moment, and each
//! controller's `succeed` moves the machine to its own destination when called.

mod completion;
mod context;
mod controller;
mod dispatch;
mod error;
mod observer;

pub use completion::Completion;
pub use context::TransitionContext;
pub use controller::Controller;
pub use dispatch::{Action, Machine};
pub use error::{DoubleCompletion, Outcome, TransitionError};
pub use observer::{DelegationWarning, TransitionObserver};
