//! State machine that drives screen transitions in a host.

use crate::config::TransitionConfig;
use crate::coordinator::error::CoordinatorError;
use crate::coordinator::state::TransitionState;
use crate::core::{ScreenId, State};
use crate::host::Host;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Result of a successful [`CoordinatorStateMachine::enter_state`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum EnterOutcome<S: State> {
    /// The machine had no state yet; `state` mounted its own screen.
    Initial { state: S },

    /// Left `from` for `to`. When `animated`, the old screen stays mounted
    /// until the host completes the animation.
    Presented {
        from: S,
        to: S,
        screen: ScreenId,
        animated: bool,
    },

    /// The current state does not accept `requested` as a successor.
    /// Nothing changed.
    Refused { current: S, requested: S },
}

struct Slot<S: State> {
    state: TransitionState<S>,
    /// Live screen presented for this state, if it is the current one.
    screen: Option<ScreenId>,
}

/// Coordinates which screen a host presents.
///
/// The machine holds a weak handle to its host and never keeps it alive.
/// Each registered state remembers the screen it presented, so the exit
/// path hands over exactly that instance instead of searching the host.
///
/// # Example
///
/// ```rust
/// use segue::core::{Rect, Screen, Surface};
/// use segue::{state_enum, CoordinatorStateMachine, EnterOutcome, MemoryHost, TransitionState};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// state_enum! {
///     enum Flow {
///         Welcome,
///         Home,
///     }
/// }
///
/// #[derive(Default)]
/// struct Page {
///     surface: Surface,
/// }
///
/// impl Screen for Page {
///     fn surface(&self) -> &Surface {
///         &self.surface
///     }
///
///     fn surface_mut(&mut self) -> &mut Surface {
///         &mut self.surface
///     }
/// }
///
/// #[derive(Default)]
/// struct Dashboard {
///     surface: Surface,
/// }
///
/// impl Screen for Dashboard {
///     fn surface(&self) -> &Surface {
///         &self.surface
///     }
///
///     fn surface_mut(&mut self) -> &mut Surface {
///         &mut self.surface
///     }
/// }
///
/// let host = Rc::new(RefCell::new(MemoryHost::new(Rect::new(0.0, 0.0, 390.0, 844.0))));
/// let mut machine = CoordinatorStateMachine::new(
///     &host,
///     vec![
///         TransitionState::new::<Page>(Flow::Welcome),
///         TransitionState::new::<Dashboard>(Flow::Home),
///     ],
/// );
///
/// machine.enter_state(&Flow::Welcome).unwrap();
/// let outcome = machine.enter_state(&Flow::Home).unwrap();
/// assert!(matches!(outcome, EnterOutcome::Presented { animated: true, .. }));
///
/// host.borrow_mut().finish_animations();
/// assert_eq!(host.borrow().mounted_surfaces().len(), 1);
/// ```
pub struct CoordinatorStateMachine<S: State, H: Host + 'static> {
    host: Weak<RefCell<H>>,
    slots: Vec<Slot<S>>,
    current: Option<usize>,
    previous: Option<usize>,
    config: TransitionConfig,
}

impl<S: State, H: Host + 'static> CoordinatorStateMachine<S, H> {
    /// Create a machine over `states` presenting into `host`, with default
    /// transition timing. No state is entered yet.
    pub fn new(host: &Rc<RefCell<H>>, states: Vec<TransitionState<S>>) -> Self {
        Self::with_config(Rc::downgrade(host), states, TransitionConfig::default())
    }

    pub(crate) fn with_config(
        host: Weak<RefCell<H>>,
        states: Vec<TransitionState<S>>,
        config: TransitionConfig,
    ) -> Self {
        Self {
            host,
            slots: states
                .into_iter()
                .map(|state| Slot {
                    state,
                    screen: None,
                })
                .collect(),
            current: None,
            previous: None,
            config,
        }
    }

    /// Move to `target`.
    ///
    /// The current state's exit hook runs first (while it is still
    /// current), then the current state is updated, then `target`'s entry
    /// hook runs with the previous state passed explicitly. A refusal by
    /// the current state's guard is reported as [`EnterOutcome::Refused`]
    /// and has no side effects.
    pub fn enter_state(&mut self, target: &S) -> Result<EnterOutcome<S>, CoordinatorError> {
        let Some(next) = self.index_of(target) else {
            tracing::error!(state = target.name(), "Requested state is not registered");
            return Err(CoordinatorError::UnregisteredState {
                state: target.name().to_string(),
            });
        };

        if let Some(current) = self.current {
            let current = &self.slots[current].state;
            if !current.is_valid_next_state(target) {
                tracing::debug!(
                    from = current.id().name(),
                    to = target.name(),
                    "Transition refused by current state"
                );
                return Ok(EnterOutcome::Refused {
                    current: current.id().clone(),
                    requested: target.clone(),
                });
            }
        }

        let Some(handle) = self.host.upgrade() else {
            tracing::error!(to = target.name(), "Host dropped; ignoring transition");
            return Err(CoordinatorError::HostUnavailable);
        };
        let Ok(mut guard) = handle.try_borrow_mut() else {
            tracing::error!(to = target.name(), "Host already borrowed; ignoring transition");
            return Err(CoordinatorError::HostBusy);
        };
        let host: &mut H = &mut guard;

        match self.current {
            None => self.enter_initial(next, host),
            Some(current) => self.transition(current, next, host),
        }
    }

    fn enter_initial(
        &mut self,
        next: usize,
        host: &mut dyn Host,
    ) -> Result<EnterOutcome<S>, CoordinatorError> {
        self.current = Some(next);
        let mounted = match self.slots[next].state.on_enter(None, host) {
            Ok(mounted) => mounted,
            Err(err) => {
                self.current = None;
                return Err(err);
            }
        };
        self.slots[next].screen = mounted;

        let state = self.slots[next].state.id().clone();
        tracing::info!(state = state.name(), "Entered initial state");
        Ok(EnterOutcome::Initial { state })
    }

    fn transition(
        &mut self,
        current: usize,
        next: usize,
        host: &mut dyn Host,
    ) -> Result<EnterOutcome<S>, CoordinatorError> {
        let presentation = self.slots[current].state.on_exit(
            &self.slots[next].state,
            self.slots[current].screen,
            &self.config,
            host,
        )?;
        self.slots[current].screen = None;
        self.slots[next].screen = Some(presentation.screen());

        self.current = Some(next);
        self.previous = Some(current);
        self.slots[next]
            .state
            .on_enter(Some(&self.slots[current].state), host)?;

        let from = self.slots[current].state.id().clone();
        let to = self.slots[next].state.id().clone();
        tracing::info!(
            from = from.name(),
            to = to.name(),
            animated = presentation.is_animated(),
            "Entered state"
        );
        Ok(EnterOutcome::Presented {
            from,
            to,
            screen: presentation.screen(),
            animated: presentation.is_animated(),
        })
    }

    /// Whether `enter_state(target)` would be attempted rather than refused
    /// or rejected.
    pub fn can_enter_state(&self, target: &S) -> bool {
        if self.index_of(target).is_none() {
            return false;
        }
        self.current
            .is_none_or(|current| self.slots[current].state.is_valid_next_state(target))
    }

    pub fn current_state(&self) -> Option<&S> {
        self.current.map(|index| self.slots[index].state.id())
    }

    /// State left by the most recent transition.
    pub fn previous_state(&self) -> Option<&S> {
        self.previous.map(|index| self.slots[index].state.id())
    }

    /// Screen presented for the current state.
    pub fn current_screen(&self) -> Option<ScreenId> {
        self.current.and_then(|index| self.slots[index].screen)
    }

    pub fn state(&self, id: &S) -> Option<&TransitionState<S>> {
        self.index_of(id).map(|index| &self.slots[index].state)
    }

    pub fn states(&self) -> impl Iterator<Item = &TransitionState<S>> {
        self.slots.iter().map(|slot| &slot.state)
    }

    /// The host, if it is still alive.
    pub fn host(&self) -> Option<Rc<RefCell<H>>> {
        self.host.upgrade()
    }

    /// Default timing for states without their own.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    fn index_of(&self, id: &S) -> Option<usize> {
        self.slots.iter().position(|slot| slot.state.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rect, Screen, ScreenKind, Surface};
    use crate::host::MemoryHost;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Splash,
        Home,
        Settings,
        Unregistered,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Splash => "Splash",
                Self::Home => "Home",
                Self::Settings => "Settings",
                Self::Unregistered => "Unregistered",
            }
        }
    }

    macro_rules! plain_screen {
        ($name:ident) => {
            #[derive(Default)]
            struct $name {
                surface: Surface,
            }

            impl Screen for $name {
                fn surface(&self) -> &Surface {
                    &self.surface
                }

                fn surface_mut(&mut self) -> &mut Surface {
                    &mut self.surface
                }
            }
        };
    }

    plain_screen!(SplashScreen);
    plain_screen!(HomeScreen);
    plain_screen!(SettingsScreen);

    fn setup(
        states: Vec<TransitionState<TestState>>,
    ) -> (
        Rc<RefCell<MemoryHost>>,
        CoordinatorStateMachine<TestState, MemoryHost>,
    ) {
        let host = Rc::new(RefCell::new(MemoryHost::new(Rect::new(
            0.0, 0.0, 320.0, 480.0,
        ))));
        let machine = CoordinatorStateMachine::new(&host, states);
        (host, machine)
    }

    fn default_states() -> Vec<TransitionState<TestState>> {
        vec![
            TransitionState::new::<SplashScreen>(TestState::Splash),
            TransitionState::new::<HomeScreen>(TestState::Home),
            TransitionState::new::<SettingsScreen>(TestState::Settings),
        ]
    }

    #[test]
    fn new_machine_has_no_state() {
        let (_host, machine) = setup(default_states());

        assert!(machine.current_state().is_none());
        assert!(machine.previous_state().is_none());
        assert!(machine.current_screen().is_none());
        assert_eq!(machine.states().count(), 3);
    }

    #[test]
    fn initial_entry_mounts_without_animation() {
        let (host, mut machine) = setup(default_states());

        let outcome = machine.enter_state(&TestState::Splash).unwrap();

        assert_eq!(
            outcome,
            EnterOutcome::Initial {
                state: TestState::Splash
            }
        );
        assert_eq!(machine.current_state(), Some(&TestState::Splash));
        let host = host.borrow();
        assert_eq!(host.mounted_kinds(), vec![ScreenKind::of::<SplashScreen>()]);
        assert!(host.animation_records().is_empty());
        assert_eq!(machine.current_screen(), Some(host.children()[0]));
    }

    #[test]
    fn transition_records_previous_state() {
        let (host, mut machine) = setup(default_states());

        machine.enter_state(&TestState::Splash).unwrap();
        let outcome = machine.enter_state(&TestState::Home).unwrap();

        match outcome {
            EnterOutcome::Presented {
                from, to, animated, ..
            } => {
                assert_eq!(from, TestState::Splash);
                assert_eq!(to, TestState::Home);
                assert!(animated);
            }
            other => panic!("Expected Presented, got {:?}", other),
        }
        assert_eq!(machine.current_state(), Some(&TestState::Home));
        assert_eq!(machine.previous_state(), Some(&TestState::Splash));

        host.borrow_mut().finish_animations();
        assert_eq!(
            host.borrow().mounted_kinds(),
            vec![ScreenKind::of::<HomeScreen>()]
        );
    }

    #[test]
    fn unregistered_target_changes_nothing() {
        let (host, mut machine) = setup(default_states());
        machine.enter_state(&TestState::Splash).unwrap();
        let before = machine.current_screen();

        let result = machine.enter_state(&TestState::Unregistered);

        assert_eq!(
            result,
            Err(CoordinatorError::UnregisteredState {
                state: "Unregistered".to_string()
            })
        );
        assert_eq!(machine.current_state(), Some(&TestState::Splash));
        assert_eq!(machine.current_screen(), before);
        assert_eq!(host.borrow().children().len(), 1);
    }

    #[test]
    fn unregistered_initial_target_mounts_nothing() {
        let (host, mut machine) = setup(default_states());

        assert!(machine.enter_state(&TestState::Unregistered).is_err());

        assert!(machine.current_state().is_none());
        assert!(host.borrow().children().is_empty());
    }

    #[test]
    fn refused_transition_has_no_side_effects() {
        let (host, mut machine) = setup(vec![
            TransitionState::new::<SplashScreen>(TestState::Splash)
                .when(|next| *next == TestState::Home),
            TransitionState::new::<HomeScreen>(TestState::Home),
            TransitionState::new::<SettingsScreen>(TestState::Settings),
        ]);
        machine.enter_state(&TestState::Splash).unwrap();
        let before = machine.current_screen();

        assert!(!machine.can_enter_state(&TestState::Settings));
        let outcome = machine.enter_state(&TestState::Settings).unwrap();

        assert_eq!(
            outcome,
            EnterOutcome::Refused {
                current: TestState::Splash,
                requested: TestState::Settings,
            }
        );
        assert_eq!(machine.current_state(), Some(&TestState::Splash));
        assert_eq!(machine.current_screen(), before);
        assert!(host.borrow().animation_records().is_empty());
    }

    #[test]
    fn can_enter_state_reflects_registration_and_guard() {
        let (_host, mut machine) = setup(vec![
            TransitionState::new::<SplashScreen>(TestState::Splash)
                .when(|next| *next != TestState::Settings),
            TransitionState::new::<HomeScreen>(TestState::Home),
        ]);

        assert!(machine.can_enter_state(&TestState::Splash));
        assert!(!machine.can_enter_state(&TestState::Settings));

        machine.enter_state(&TestState::Splash).unwrap();

        assert!(machine.can_enter_state(&TestState::Home));
        assert!(!machine.can_enter_state(&TestState::Unregistered));
    }

    #[test]
    fn dropped_host_is_reported() {
        let (host, mut machine) = setup(default_states());
        drop(host);

        let result = machine.enter_state(&TestState::Splash);

        assert_eq!(result, Err(CoordinatorError::HostUnavailable));
        assert!(machine.current_state().is_none());
        assert!(machine.host().is_none());
    }

    #[test]
    fn borrowed_host_is_reported_as_busy() {
        let (host, mut machine) = setup(default_states());
        let _borrow = host.borrow();

        let result = machine.enter_state(&TestState::Splash);

        assert_eq!(result, Err(CoordinatorError::HostBusy));
        assert!(machine.current_state().is_none());
    }

    #[test]
    fn vanished_screen_aborts_transition() {
        let (host, mut machine) = setup(default_states());
        machine.enter_state(&TestState::Splash).unwrap();
        let splash = machine.current_screen().unwrap();
        host.borrow_mut().remove_child(splash);

        let result = machine.enter_state(&TestState::Home);

        assert!(matches!(
            result,
            Err(CoordinatorError::MissingMountedScreen { .. })
        ));
        assert_eq!(machine.current_state(), Some(&TestState::Splash));
        assert!(host.borrow().children().is_empty());
    }

    #[test]
    fn malformed_initial_state_is_rolled_back() {
        let (host, mut machine) = setup(vec![TransitionState::from_boxed(
            TestState::Splash,
            ScreenKind::of::<SplashScreen>(),
            || Box::new(HomeScreen::default()) as Box<dyn Screen>,
        )]);

        let result = machine.enter_state(&TestState::Splash);

        assert!(matches!(
            result,
            Err(CoordinatorError::MalformedNextState { .. })
        ));
        assert!(machine.current_state().is_none());
        assert!(host.borrow().children().is_empty());
    }

    #[test]
    fn reentering_current_state_replaces_its_screen() {
        let (host, mut machine) = setup(vec![
            TransitionState::new::<SplashScreen>(TestState::Splash).instant(),
        ]);
        machine.enter_state(&TestState::Splash).unwrap();
        let first = machine.current_screen().unwrap();

        machine.enter_state(&TestState::Splash).unwrap();

        let second = machine.current_screen().unwrap();
        assert_ne!(first, second);
        assert_eq!(host.borrow().children(), vec![second]);
    }

    #[test]
    fn machine_holds_host_weakly() {
        let (host, machine) = setup(default_states());

        assert_eq!(Rc::strong_count(&host), 1);
        assert!(machine.host().is_some());
    }
}
