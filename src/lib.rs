//! Segue: a state machine driven screen navigation coordinator
//!
//! Segue separates *which* screen is active from *how* screens are
//! presented. An explicit state machine decides the active state; leaving a
//! state hands the host over from its screen to a fresh screen of the next
//! state, crossfading by default or swapping instantly.
//!
//! # Core Concepts
//!
//! - **Screen**: opaque mountable unit with pre-mount, post-mount and
//!   pre-unmount hooks
//! - **Host**: the container screens are mounted into, held weakly
//! - **TransitionState**: a state key bound to a screen type, with a guard
//!   and an animation policy
//! - **CoordinatorStateMachine**: runs exit → update → enter for each
//!   requested transition
//!
//! # Example
//!
//! ```rust
//! use segue::core::{Rect, Screen, ScreenKind, Surface};
//! use segue::{state_enum, CoordinatorBuilder, MemoryHost, TransitionState};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Flow {
//!         Login,
//!         Home,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct LoginScreen {
//!     surface: Surface,
//! }
//!
//! impl Screen for LoginScreen {
//!     fn surface(&self) -> &Surface {
//!         &self.surface
//!     }
//!
//!     fn surface_mut(&mut self) -> &mut Surface {
//!         &mut self.surface
//!     }
//! }
//!
//! #[derive(Default)]
//! struct HomeScreen {
//!     surface: Surface,
//! }
//!
//! impl Screen for HomeScreen {
//!     fn surface(&self) -> &Surface {
//!         &self.surface
//!     }
//!
//!     fn surface_mut(&mut self) -> &mut Surface {
//!         &mut self.surface
//!     }
//! }
//!
//! let host = Rc::new(RefCell::new(MemoryHost::new(Rect::new(0.0, 0.0, 390.0, 844.0))));
//! let mut machine = CoordinatorBuilder::new()
//!     .host(&host)
//!     .state(TransitionState::new::<LoginScreen>(Flow::Login).instant())
//!     .state(TransitionState::new::<HomeScreen>(Flow::Home).when(|next| *next != Flow::Login))
//!     .build()
//!     .unwrap();
//!
//! machine.enter_state(&Flow::Login).unwrap();
//! machine.enter_state(&Flow::Home).unwrap();
//!
//! assert_eq!(host.borrow().mounted_kinds(), vec![ScreenKind::of::<HomeScreen>()]);
//! assert!(!machine.can_enter_state(&Flow::Login));
//! ```

pub mod animation;
pub mod builder;
pub mod config;
pub mod coordinator;
pub mod core;
pub mod host;

// Re-export commonly used types
pub use animation::{Animation, AnimationCurve, AnimationOptions, AnimationPolicy};
pub use builder::{BuildError, CoordinatorBuilder};
pub use config::{ConfigError, TransitionConfig};
pub use coordinator::{
    CoordinatorError, CoordinatorStateMachine, EnterOutcome, Presentation, TransitionState,
};
pub use core::{Guard, Rect, Screen, ScreenId, ScreenKind, State, Surface};
pub use host::{Host, MemoryHost};
