//! Relay: a finite state machine with declared, asynchronous transitions
//!
//! Call sites declare which moves between named states are legal and attach an
//! action to each. The machine only performs declared moves, every move is
//! completed at most once, and the caller always learns the outcome
//! asynchronously, whether the action finished immediately or not.
//!
//! # Core Concepts
//!
//! - **State**: an opaque identifier, via the `State` trait (`String` works out of the box)
//! - **Declaration**: `"{ready, paused} => playing"` describes every origin × destination pair
//! - **Controller**: the action's handle for reporting success, failure, or delegating
//! - **Completion**: the future a caller awaits to learn the outcome of a move
//!
//! # Example
//!
//! ```rust
//! use relay::{Machine, TransitionError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let machine: Machine<String> = Machine::new("loader");
//!
//!     machine
//!         .transition("start => loaded", |ctr| {
//!             ctr.succeed().unwrap();
//!         })
//!         .unwrap();
//!     machine
//!         .transition("loaded => finished", |ctr| {
//!             ctr.fail_with("NO PLUTONIUM").unwrap();
//!         })
//!         .unwrap();
//!
//!     machine.to("loaded").await.unwrap();
//!     assert_eq!(machine.current().as_deref(), Some("loaded"));
//!
//!     let err = machine.to("finished").await.unwrap_err();
//!     assert!(matches!(err, TransitionError::Rejected(_)));
//!     assert_eq!(machine.current().as_deref(), Some("loaded"));
//! }
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder};
pub use crate::core::{Declaration, State};
pub use crate::machine::{Completion, Controller, DoubleCompletion, Machine, TransitionError};
