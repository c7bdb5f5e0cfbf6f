//! Build errors for coordinator state machines.

use thiserror::Error;

/// Problems found while validating a [`CoordinatorBuilder`](super::CoordinatorBuilder).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Host not specified. Call .host(&host) before .build()")]
    MissingHost,

    #[error("Host was dropped before .build()")]
    HostDropped,

    #[error("No states registered. Add at least one state")]
    NoStates,

    #[error("State '{state}' is registered more than once")]
    DuplicateState { state: String },
}
