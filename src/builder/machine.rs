//! Builder for constructing coordinator state machines.

use crate::builder::error::BuildError;
use crate::config::TransitionConfig;
use crate::coordinator::{CoordinatorStateMachine, TransitionState};
use crate::core::State;
use crate::host::Host;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing coordinator state machines with a fluent API.
///
/// Validation reports every problem at once rather than the first one.
pub struct CoordinatorBuilder<S: State, H: Host + 'static> {
    host: Option<Weak<RefCell<H>>>,
    states: Vec<TransitionState<S>>,
    config: TransitionConfig,
}

impl<S: State, H: Host + 'static> CoordinatorBuilder<S, H> {
    pub fn new() -> Self {
        Self {
            host: None,
            states: Vec::new(),
            config: TransitionConfig::default(),
        }
    }

    /// Set the host screens are presented in (required).
    /// Only a weak handle is kept.
    pub fn host(mut self, host: &Rc<RefCell<H>>) -> Self {
        self.host = Some(Rc::downgrade(host));
        self
    }

    /// Register a state.
    pub fn state(mut self, state: TransitionState<S>) -> Self {
        self.states.push(state);
        self
    }

    /// Register several states.
    pub fn states(mut self, states: Vec<TransitionState<S>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Default timing for states that do not set their own.
    pub fn config(mut self, config: TransitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the builder, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        checks.push(match &self.host {
            None => Validation::fail(BuildError::MissingHost),
            Some(host) if host.strong_count() == 0 => Validation::fail(BuildError::HostDropped),
            Some(_) => Validation::success(()),
        });

        if self.states.is_empty() {
            checks.push(Validation::fail(BuildError::NoStates));
        }

        for (index, state) in self.states.iter().enumerate() {
            let earlier = self.states[..index]
                .iter()
                .filter(|other| other.id() == state.id())
                .count();
            if earlier == 1 {
                checks.push(Validation::fail(BuildError::DuplicateState {
                    state: state.id().name().to_string(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and build the machine. No state is entered yet.
    pub fn build(self) -> Result<CoordinatorStateMachine<S, H>, Vec<BuildError>> {
        if let Validation::Failure(errors) = self.validate() {
            for error in errors.iter() {
                tracing::error!(%error, "Invalid coordinator configuration");
            }
            return Err(errors.iter().cloned().collect());
        }

        let Some(host) = self.host else {
            return Err(vec![BuildError::MissingHost]);
        };

        tracing::debug!(
            states = self.states.len(),
            duration_ms = self.config.duration().as_millis() as u64,
            "Built coordinator"
        );
        Ok(CoordinatorStateMachine::with_config(
            host,
            self.states,
            self.config,
        ))
    }
}

impl<S: State, H: Host + 'static> Default for CoordinatorBuilder<S, H> {
    fn default() -> Self {
        Self::new()
    }
}
