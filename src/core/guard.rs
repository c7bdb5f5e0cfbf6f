//! Guard predicates restricting which states may follow a state.

use super::state::State;
use std::fmt;
use std::rc::Rc;

/// Pure predicate deciding whether a candidate state may be entered next.
///
/// A [`TransitionState`](crate::TransitionState) without a guard accepts
/// every successor. Attaching a guard narrows the transition graph for
/// that one state.
///
/// # Example
///
/// ```rust
/// use segue::core::Guard;
/// use segue::state_enum;
///
/// state_enum! {
///     enum Flow {
///         Splash,
///         Login,
///         Home,
///     }
/// }
///
/// // Once logged in, never go back to the login screen.
/// let from_home = Guard::new(|next: &Flow| *next != Flow::Login);
///
/// assert!(from_home.check(&Flow::Splash));
/// assert!(!from_home.check(&Flow::Login));
/// ```
pub struct Guard<S: State> {
    predicate: Rc<dyn Fn(&S) -> bool>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a predicate over the candidate next state.
    ///
    /// The predicate must be deterministic. It runs on every
    /// `enter_state` and `can_enter_state` call.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Guard that accepts only the listed successors.
    pub fn only(allowed: Vec<S>) -> Self {
        Self::new(move |next: &S| allowed.contains(next))
    }

    /// Check whether `next` may be entered.
    pub fn check(&self, next: &S) -> bool {
        (self.predicate)(next)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
