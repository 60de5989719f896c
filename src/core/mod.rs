//! Core state machine types.
//!
//! This module contains the parts of the engine with no runtime behaviour:
//! - State identifiers via the `State` trait
//! - The declaration parser turning `a, b => c` into origin/destination groups
//! - The transition table storing one action per (origin, destination) pair

mod declaration;
mod state;
mod table;

pub use declaration::{parse_group, Declaration, DeclarationError, DeclarationErrorKind, Side};
pub use state::State;
pub use table::{Lookup, TransitionTable};
