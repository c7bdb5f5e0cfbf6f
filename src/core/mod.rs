//! Core coordinator vocabulary.
//!
//! This module contains the value types every other module builds on:
//! - State keys via the `State` trait
//! - Guard predicates restricting the transition graph
//! - Screens, their kinds, instance ids and visual surfaces

mod guard;
mod screen;
mod state;

pub use guard::Guard;
pub use screen::{Rect, Screen, ScreenId, ScreenKind, Surface};
pub use state::State;
