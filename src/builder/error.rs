//! Errors raised while registering transitions.

use crate::core::DeclarationError;
use thiserror::Error;

/// A transition declaration that cannot be added to a machine.
///
/// Registration fails before anything is stored, so a machine is never left
/// half-configured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Malformed(#[from] DeclarationError),

    #[error("Unknown state '{name}' in transition: {declaration}")]
    UnknownState { name: String, declaration: String },

    #[error("Duplicate transition: {declaration} ({from} => {to} is already defined)")]
    DuplicateTransition {
        declaration: String,
        from: String,
        to: String,
    },
}
