//! The container screens are mounted into.
//!
//! A host keeps two related structures:
//! - the logical hierarchy: which screens are its children (it owns them)
//! - the visual tree: which children currently have their surface mounted
//!
//! The coordinator never holds a host strongly; it reaches it through a
//! `Weak<RefCell<H>>` and mutates it only through the operations below.

mod memory;

pub use memory::{AnimationRecord, MemoryHost};

use crate::animation::{AnimationBlock, AnimationOptions};
use crate::core::{Rect, Screen, ScreenId};
use std::fmt;
use std::time::Duration;

/// One-shot continuation run when an animated transition ends.
///
/// The flag reports whether the animation ran to completion (`false` when
/// it was interrupted). The continuation runs either way.
pub type Completion = Box<dyn FnOnce(&mut dyn Host, bool)>;

/// An animated handoff from one child to another.
pub struct TransitionRequest {
    pub from: ScreenId,
    pub to: ScreenId,
    pub duration: Duration,
    pub options: AnimationOptions,
    /// Transform to apply to `(from, to)` surfaces under animation.
    pub animations: AnimationBlock,
    pub completion: Completion,
}

impl fmt::Debug for TransitionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Container that owns mounted screens.
///
/// The trait is object safe; completions receive the host as `&mut dyn Host`.
pub trait Host {
    /// Bounds a freshly mounted root screen should fill.
    fn bounds(&self) -> Rect;

    /// Logical children, in attach order.
    fn children(&self) -> Vec<ScreenId>;

    fn screen(&self, id: ScreenId) -> Option<&(dyn Screen + 'static)>;

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen + 'static)>;

    /// Take ownership of `screen` as a logical child. Does not mount its surface.
    fn add_child(&mut self, screen: Box<dyn Screen>) -> ScreenId;

    /// Release a logical child. The caller decides the screen's fate;
    /// dropping it discards it.
    fn remove_child(&mut self, id: ScreenId) -> Option<Box<dyn Screen>>;

    /// Put a child's surface into the visual tree.
    fn mount_surface(&mut self, id: ScreenId);

    /// Take a surface out of the visual tree. No-op if it is not mounted.
    fn unmount_surface(&mut self, id: ScreenId);

    fn is_surface_mounted(&self, id: ScreenId) -> bool;

    /// Start an animated handoff.
    ///
    /// The host mounts `to`'s surface next to `from`'s, animates
    /// `request.animations` over `request.duration` honouring
    /// `request.options`, and later invokes `request.completion` exactly
    /// once. Unmounting `from` is left to the completion.
    fn transition(&mut self, request: TransitionRequest);
}

/// Run `block` against the current surfaces of `from` and `to` and store
/// the results. Returns `false` if either screen is not a child of `host`.
pub fn apply_block(host: &mut dyn Host, from: ScreenId, to: ScreenId, block: AnimationBlock) -> bool {
    let from_surface = host.screen(from).map(|screen| *screen.surface());
    let to_surface = host.screen(to).map(|screen| *screen.surface());
    let (Some(mut from_surface), Some(mut to_surface)) = (from_surface, to_surface) else {
        return false;
    };

    block(&mut from_surface, &mut to_surface);

    if let Some(screen) = host.screen_mut(from) {
        *screen.surface_mut() = from_surface;
    }
    if let Some(screen) = host.screen_mut(to) {
        *screen.surface_mut() = to_surface;
    }
    true
}
