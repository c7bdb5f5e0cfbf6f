//! The transition engine.
//!
//! # Key Concepts
//!
//! - **TransitionState**: a navigation state bound to a screen type, with
//!   its guard and the animation used when leaving it
//! - **CoordinatorStateMachine**: tracks the current state and drives
//!   exit → update → enter for every requested transition
//! - **Presentation**: the stateless mount/animate/unmount sequence run by
//!   the exiting state

mod error;
mod machine;
mod present;
mod state;

pub use error::CoordinatorError;
pub use machine::{CoordinatorStateMachine, EnterOutcome};
pub use present::Presentation;
pub use state::{ScreenFactory, TransitionState};
