//! Macros for declaring state types.

/// Declare an enum of unit variants usable as machine states.
///
/// Each variant's identifier is its name in transition declarations.
///
/// # Example
///
/// ```
/// use relay::core::State;
/// use relay::state_enum;
///
/// state_enum! {
///     pub enum PlayerState {
///         Waiting,
///         Ready,
///         Playing,
///     }
/// }
///
/// assert_eq!(PlayerState::Ready.name(), "Ready");
/// assert_eq!(PlayerState::from_name("Playing"), Some(PlayerState::Playing));
/// assert_eq!(PlayerState::from_name("playing"), None);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}
