//! Builder API for ergonomic coordinator construction.
//!
//! This module provides a fluent, validating builder and the `state_enum!`
//! macro for declaring state keys with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::CoordinatorBuilder;
