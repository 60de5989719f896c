//! State identifier trait.
//!
//! A state is an opaque, comparable identifier. Transition declarations name
//! states textually, so every state type must be able to convert to and from
//! its name.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// States carry no structure beyond equality and hashing. The name of a state
/// is the token that refers to it inside a transition declaration.
///
/// # Required Traits
///
/// - `Clone`: the machine hands out copies of its current state
/// - `Eq` + `Hash`: states key the transition table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states can be stored by callers alongside their own data
///
/// # Example
///
/// ```rust
/// use relay::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Closed => "closed",
///         }
///     }
///
///     fn from_name(name: &str) -> Option<Self> {
///         match name {
///             "open" => Some(Self::Open),
///             "closed" => Some(Self::Closed),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Door::from_name("open"), Some(Door::Open));
/// assert_eq!(Door::Closed.name(), "closed");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The identifier used for this state in declarations and logs.
    fn name(&self) -> &str;

    /// Resolve a declaration token to a state.
    ///
    /// Returns `None` when the token does not name a state of this type.
    fn from_name(name: &str) -> Option<Self>;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(name.to_string())
    }
}
