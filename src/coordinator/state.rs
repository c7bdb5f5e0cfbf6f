//! Navigation states bound to a screen type.

use crate::animation::{Animation, AnimationOptions, AnimationPolicy};
use crate::config::TransitionConfig;
use crate::coordinator::error::CoordinatorError;
use crate::coordinator::present::{present, Presentation};
use crate::core::{Guard, Screen, ScreenId, ScreenKind, State};
use crate::host::Host;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Parameterless constructor for a state's screen.
pub type ScreenFactory = Rc<dyn Fn() -> Box<dyn Screen>>;

/// One navigation state and the screen type it presents.
///
/// Per-state behaviour is configuration rather than subclassing: a guard
/// restricting the successors, an [`AnimationPolicy`] used when this state
/// is left, and optional timing overriding the coordinator's defaults.
///
/// # Example
///
/// ```rust
/// use segue::core::{Screen, Surface};
/// use segue::{state_enum, AnimationPolicy, TransitionState};
///
/// state_enum! {
///     enum Flow {
///         Login,
///         Home,
///     }
/// }
///
/// #[derive(Default)]
/// struct LoginScreen {
///     surface: Surface,
/// }
///
/// impl Screen for LoginScreen {
///     fn surface(&self) -> &Surface {
///         &self.surface
///     }
///
///     fn surface_mut(&mut self) -> &mut Surface {
///         &mut self.surface
///     }
/// }
///
/// let login = TransitionState::new::<LoginScreen>(Flow::Login)
///     .when(|next| *next == Flow::Home)
///     .with_animation(AnimationPolicy::Instant);
///
/// assert!(login.is_valid_next_state(&Flow::Home));
/// assert!(!login.is_valid_next_state(&Flow::Login));
/// ```
pub struct TransitionState<S: State> {
    id: S,
    screen_kind: ScreenKind,
    factory: ScreenFactory,
    guard: Option<Guard<S>>,
    animation: AnimationPolicy,
    duration: Option<Duration>,
    options: Option<AnimationOptions>,
}

impl<S: State> TransitionState<S> {
    /// State presenting `T`, constructed with `T::default()`.
    pub fn new<T: Screen + Default>(id: S) -> Self {
        Self::with_factory(id, T::default)
    }

    /// State presenting `T`, constructed by `factory`.
    pub fn with_factory<T, F>(id: S, factory: F) -> Self
    where
        T: Screen,
        F: Fn() -> T + 'static,
    {
        Self::from_boxed(id, ScreenKind::of::<T>(), move || {
            Box::new(factory()) as Box<dyn Screen>
        })
    }

    /// State presenting screens of `screen_kind`, produced by a type-erased
    /// factory. A factory that produces any other kind makes every
    /// transition into this state fail with
    /// [`CoordinatorError::MalformedNextState`].
    pub fn from_boxed<F>(id: S, screen_kind: ScreenKind, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Screen> + 'static,
    {
        Self {
            id,
            screen_kind,
            factory: Rc::new(factory),
            guard: None,
            animation: AnimationPolicy::default(),
            duration: None,
            options: None,
        }
    }

    /// Restrict the states that may follow this one.
    pub fn with_guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Restrict the states that may follow this one with a predicate.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        self.with_guard(Guard::new(predicate))
    }

    /// Animation used when leaving this state.
    pub fn with_animation(mut self, policy: AnimationPolicy) -> Self {
        self.animation = policy;
        self
    }

    /// Leave this state with an immediate, unanimated swap.
    pub fn instant(self) -> Self {
        self.with_animation(AnimationPolicy::Instant)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen_kind
    }

    pub fn animation_policy(&self) -> &AnimationPolicy {
        &self.animation
    }

    /// Whether `candidate` may follow this state. Unguarded states accept
    /// every successor, themselves included.
    pub fn is_valid_next_state(&self, candidate: &S) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(candidate))
    }

    /// Animation for leaving this state, or `None` to swap instantly.
    pub fn animation(&self, from: &dyn Screen, to: &dyn Screen) -> Option<Animation> {
        self.animation.animation(from, to)
    }

    pub fn animation_options(&self, defaults: &TransitionConfig) -> AnimationOptions {
        self.options.unwrap_or(defaults.options)
    }

    pub fn transition_duration(&self, defaults: &TransitionConfig) -> Duration {
        self.duration.unwrap_or_else(|| defaults.duration())
    }

    /// Entry hook.
    ///
    /// Only the very first state entered mounts its own screen, filling the
    /// host's bounds. On later entries the exiting state has already handed
    /// the host over to this state's screen, so nothing is mounted here.
    pub(crate) fn on_enter(
        &self,
        previous: Option<&TransitionState<S>>,
        host: &mut dyn Host,
    ) -> Result<Option<ScreenId>, CoordinatorError> {
        if let Some(previous) = previous {
            tracing::trace!(
                state = self.id.name(),
                previous = previous.id.name(),
                "Entered state presented by exit path"
            );
            return Ok(None);
        }

        let mut screen = self.make_screen()?;
        screen.surface_mut().frame = host.bounds();
        screen.will_mount();
        let id = host.add_child(screen);
        host.mount_surface(id);
        if let Some(screen) = host.screen_mut(id) {
            screen.did_mount();
        }
        Ok(Some(id))
    }

    /// Exit hook: hand the host over from this state's live screen to a
    /// fresh screen of `next`.
    ///
    /// `current` is the screen the coordinator recorded for this state. It
    /// must still be a child of the host and of this state's screen kind.
    pub(crate) fn on_exit(
        &self,
        next: &TransitionState<S>,
        current: Option<ScreenId>,
        defaults: &TransitionConfig,
        host: &mut dyn Host,
    ) -> Result<Presentation, CoordinatorError> {
        let incoming = next.make_screen()?;
        let from = self.locate_screen(current, &*host)?;
        present(self, from, incoming, defaults, host)
    }

    fn locate_screen(
        &self,
        current: Option<ScreenId>,
        host: &dyn Host,
    ) -> Result<ScreenId, CoordinatorError> {
        let located = current.filter(|id| {
            host.screen(*id)
                .is_some_and(|screen| screen.kind() == self.screen_kind)
        });

        located.ok_or_else(|| {
            tracing::error!(
                state = self.id.name(),
                screen = self.screen_kind.name(),
                "Could not find the mounted screen of the exiting state"
            );
            self.missing_screen()
        })
    }

    pub(crate) fn missing_screen(&self) -> CoordinatorError {
        CoordinatorError::MissingMountedScreen {
            state: self.id.name().to_string(),
            screen: self.screen_kind.name().to_string(),
        }
    }

    fn make_screen(&self) -> Result<Box<dyn Screen>, CoordinatorError> {
        let screen = (self.factory)();
        let produced = screen.kind();
        if produced != self.screen_kind {
            tracing::error!(
                state = self.id.name(),
                expected = self.screen_kind.name(),
                produced = produced.name(),
                "Screen factory produced an unexpected screen type"
            );
            return Err(CoordinatorError::MalformedNextState {
                state: self.id.name().to_string(),
                expected: self.screen_kind.name().to_string(),
                produced: produced.name().to_string(),
            });
        }
        Ok(screen)
    }
}

impl<S: State> Clone for TransitionState<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            screen_kind: self.screen_kind,
            factory: Rc::clone(&self.factory),
            guard: self.guard.clone(),
            animation: self.animation.clone(),
            duration: self.duration,
            options: self.options,
        }
    }
}

impl<S: State> fmt::Debug for TransitionState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionState")
            .field("id", &self.id)
            .field("screen_kind", &self.screen_kind)
            .field("guarded", &self.guard.is_some())
            .field("animation", &self.animation)
            .field("duration", &self.duration)
            .field("options", &self.options)
            .finish()
    }
}
