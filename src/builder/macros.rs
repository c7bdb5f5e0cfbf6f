//! Macros for declaring coordinator states.

/// Declare a fieldless enum of state keys and implement
/// [`State`](crate::core::State) for it.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// and `Debug`; each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use segue::core::State;
/// use segue::state_enum;
///
/// state_enum! {
///     pub enum Onboarding {
///         Welcome,
///         Permissions,
///         Done,
///     }
/// }
///
/// assert_eq!(Onboarding::Permissions.name(), "Permissions");
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
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
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;
    use std::collections::HashSet;

    state_enum! {
        enum TestState {
            Splash,
            Home,
            /// Reached from the gear icon.
            Settings,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Splash.name(), "Splash");
        assert_eq!(TestState::Home.name(), "Home");
        assert_eq!(TestState::Settings.name(), "Settings");
    }

    #[test]
    fn state_enum_keys_are_hashable_values() {
        let visited: HashSet<TestState> = [TestState::Home, TestState::Home, TestState::Splash]
            .into_iter()
            .collect();

        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_ne!(PublicState::A, PublicState::B);
    }
}
