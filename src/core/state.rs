//! State keys for the coordinator state machine.
//!
//! A state key names one navigation state. Keys are plain values, usually
//! fieldless enums generated with [`state_enum!`](crate::state_enum), and
//! carry no behaviour beyond their name.

use std::fmt::Debug;

/// Trait for coordinator state keys.
///
/// # Required Traits
///
/// - `Clone`: keys are copied into outcomes and errors
/// - `PartialEq`: keys are compared to locate registered states
/// - `Debug`: keys are debuggable for diagnostics
///
/// # Example
///
/// ```rust
/// use segue::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Flow {
///     Splash,
///     Login,
///     Home,
/// }
///
/// impl State for Flow {
///     fn name(&self) -> &str {
///         match self {
///             Self::Splash => "Splash",
///             Self::Login => "Login",
///             Self::Home => "Home",
///         }
///     }
/// }
///
/// assert_eq!(Flow::Login.name(), "Login");
/// ```
pub trait State: Clone + PartialEq + Debug + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
