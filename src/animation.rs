//! Transition animations.
//!
//! An [`Animation`] is a pair of blocks over the outgoing and incoming
//! surfaces: an optional setup block applied immediately, and a transform
//! block the host applies under its timed, interpolated animation context.
//! Which animation a state uses when it is left is decided by its
//! [`AnimationPolicy`].

use crate::core::{Screen, Surface};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Block over `(from, to)` surfaces.
pub type AnimationBlock = Box<dyn FnOnce(&mut Surface, &mut Surface)>;

/// Setup and transform blocks for one transition.
pub struct Animation {
    setup: Option<AnimationBlock>,
    transform: AnimationBlock,
}

impl Animation {
    /// Animation with a transform and no setup.
    pub fn new<F>(transform: F) -> Self
    where
        F: FnOnce(&mut Surface, &mut Surface) + 'static,
    {
        Self {
            setup: None,
            transform: Box::new(transform),
        }
    }

    /// Add a block applied to the surfaces before the animation starts.
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut Surface, &mut Surface) + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Fade `from` out while fading `to` in from fully transparent.
    pub fn crossfade() -> Self {
        Self::new(|from, to| {
            from.alpha = 0.0;
            to.alpha = 1.0;
        })
        .with_setup(|_from, to| to.alpha = 0.0)
    }

    pub fn into_parts(self) -> (Option<AnimationBlock>, AnimationBlock) {
        (self.setup, self.transform)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("has_setup", &self.setup.is_some())
            .finish_non_exhaustive()
    }
}

/// Produces the animation used when leaving a state.
#[derive(Clone, Default)]
pub enum AnimationPolicy {
    /// [`Animation::crossfade`].
    #[default]
    Crossfade,
    /// No animation: the outgoing screen is swapped out synchronously.
    Instant,
    /// Caller supplied animation; returning `None` also swaps instantly.
    Custom(Rc<dyn Fn(&dyn Screen, &dyn Screen) -> Option<Animation>>),
}

impl AnimationPolicy {
    pub fn custom<F>(policy: F) -> Self
    where
        F: Fn(&dyn Screen, &dyn Screen) -> Option<Animation> + 'static,
    {
        Self::Custom(Rc::new(policy))
    }

    /// Animation for a transition from `from` to `to`, or `None` to swap
    /// without animating.
    pub fn animation(&self, from: &dyn Screen, to: &dyn Screen) -> Option<Animation> {
        match self {
            Self::Crossfade => Some(Animation::crossfade()),
            Self::Instant => None,
            Self::Custom(policy) => policy(from, to),
        }
    }
}

impl fmt::Debug for AnimationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crossfade => f.write_str("Crossfade"),
            Self::Instant => f.write_str("Instant"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Timing curve of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    #[default]
    EaseInOut,
    EaseIn,
    EaseOut,
    Linear,
}

/// Options handed to the host's animation primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Start from the surfaces' presented values instead of the target
    /// values of an in-flight animation.
    pub begin_from_current_state: bool,
    pub curve: AnimationCurve,
    /// Whether the surfaces receive input while animating.
    pub allow_user_interaction: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            begin_from_current_state: true,
            curve: AnimationCurve::EaseInOut,
            allow_user_interaction: false,
        }
    }
}
