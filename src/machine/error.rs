//! Runtime errors delivered through a transition's completion.

use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Why a requested transition did not take place.
///
/// These are normal runtime outcomes. They are never returned from `to`
/// directly; they resolve the `Completion` it hands back.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Undefined transition requested: {from} => {to} (no transitions out of '{from}')")]
    UndefinedOrigin { from: String, to: String },

    #[error("Undefined transition requested: {from} => {to}")]
    UndefinedDestination { from: String, to: String },

    /// The action called `fail()` without giving a reason.
    #[error("TransitionHalted")]
    Halted,

    /// The action called `fail_with(error)`.
    #[error("{0}")]
    Rejected(Box<dyn Error + Send + Sync>),

    /// The controller was dropped before the action reported an outcome.
    #[error("Transition {from} => {to} was abandoned without completing")]
    Abandoned { from: String, to: String },
}

impl TransitionError {
    /// True for both kinds of lookup failure.
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            Self::UndefinedOrigin { .. } | Self::UndefinedDestination { .. }
        )
    }
}

/// How a controller was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Halted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Halted => f.write_str("halted"),
        }
    }
}

/// A controller was asked to complete a second time.
///
/// This is a bug in the action, not a runtime condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Transition {from} => {to} already {outcome}")]
pub struct DoubleCompletion {
    pub from: String,
    pub to: String,
    pub outcome: Outcome,
}
