//! Errors reported by the coordinator.

use thiserror::Error;

/// Developer errors that abort a transition.
///
/// Every variant is raised before the host is mutated, so a failed
/// `enter_state` never leaves a half-finished transition behind. A
/// transition refused by a guard is not an error; see
/// [`EnterOutcome::Refused`](crate::EnterOutcome::Refused).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinatorError {
    #[error("State '{state}' is not registered with this coordinator")]
    UnregisteredState { state: String },

    #[error("State '{state}' declares screen '{expected}' but its factory produced '{produced}'")]
    MalformedNextState {
        state: String,
        expected: String,
        produced: String,
    },

    #[error("No mounted '{screen}' found for state '{state}'")]
    MissingMountedScreen { state: String, screen: String },

    #[error("Host container has been dropped")]
    HostUnavailable,

    #[error("Host container is already borrowed; a transition cannot be requested from inside another")]
    HostBusy,
}
