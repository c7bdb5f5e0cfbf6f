//! The mount/animate/unmount sequence run when a state is left.
//!
//! Presentation is stateless: everything it needs comes from the exiting
//! state and the host, and everything it changes lives in the host.

use crate::config::TransitionConfig;
use crate::coordinator::error::CoordinatorError;
use crate::coordinator::state::TransitionState;
use crate::core::{Screen, ScreenId, State};
use crate::host::{apply_block, Host, TransitionRequest};
use chrono::Utc;

/// How the incoming screen was put in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Handed to the host's animation primitive. The outgoing screen stays
    /// mounted until the animation completes.
    Animated(ScreenId),
    /// Swapped in synchronously.
    Swapped(ScreenId),
}

impl Presentation {
    /// The incoming screen.
    pub fn screen(&self) -> ScreenId {
        match self {
            Self::Animated(id) | Self::Swapped(id) => *id,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Replace the mounted `from` screen with `to`, animated according to
/// `state`'s policy.
pub(crate) fn present<S: State>(
    state: &TransitionState<S>,
    from: ScreenId,
    mut to: Box<dyn Screen>,
    defaults: &TransitionConfig,
    host: &mut dyn Host,
) -> Result<Presentation, CoordinatorError> {
    let Some(outgoing) = host.screen_mut(from) else {
        return Err(state.missing_screen());
    };
    outgoing.will_unmount();
    to.surface_mut().frame = outgoing.surface().frame;
    to.will_mount();
    let to_id = host.add_child(to);

    let animation = match (host.screen(from), host.screen(to_id)) {
        (Some(outgoing), Some(incoming)) => state.animation(outgoing, incoming),
        _ => None,
    };

    let Some(animation) = animation else {
        swap(host, from, to_id);
        tracing::debug!(
            state = state.id().name(),
            from = %from,
            to = %to_id,
            "Swapped screens without animation"
        );
        return Ok(Presentation::Swapped(to_id));
    };

    let (setup, transform) = animation.into_parts();
    if let Some(setup) = setup {
        apply_block(host, from, to_id, setup);
    }

    let duration = state.transition_duration(defaults);
    let options = state.animation_options(defaults);
    let state_name = state.id().name().to_string();
    let started_at = Utc::now();

    tracing::debug!(
        state = %state_name,
        from = %from,
        to = %to_id,
        duration_ms = duration.as_millis() as u64,
        "Starting animated transition"
    );

    host.transition(TransitionRequest {
        from,
        to: to_id,
        duration,
        options,
        animations: transform,
        completion: Box::new(move |host, finished| {
            host.unmount_surface(from);
            host.remove_child(from);
            if let Some(incoming) = host.screen_mut(to_id) {
                incoming.did_mount();
            }
            tracing::debug!(
                state = %state_name,
                finished,
                elapsed_ms = (Utc::now() - started_at).num_milliseconds(),
                "Animated transition completed"
            );
        }),
    });

    Ok(Presentation::Animated(to_id))
}

fn swap(host: &mut dyn Host, from: ScreenId, to: ScreenId) {
    host.unmount_surface(from);
    host.remove_child(from);
    host.mount_surface(to);
    if let Some(incoming) = host.screen_mut(to) {
        incoming.did_mount();
    }
}
