//! Headless host backed by plain collections.

use super::{apply_block, Completion, Host, TransitionRequest};
use crate::animation::AnimationOptions;
use crate::core::{Rect, Screen, ScreenId, ScreenKind};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// An animation the host was asked to run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRecord {
    pub from: ScreenId,
    pub to: ScreenId,
    pub duration: Duration,
    pub options: AnimationOptions,
    pub started_at: DateTime<Utc>,
}

/// In-memory [`Host`].
///
/// Animated transitions jump straight to their target values; their
/// completions are queued until [`finish_animations`](Self::finish_animations)
/// or [`interrupt_animations`](Self::interrupt_animations) is called, which
/// lets callers observe the window where both screens are mounted.
///
/// # Example
///
/// ```rust
/// use segue::core::Rect;
/// use segue::MemoryHost;
///
/// let host = MemoryHost::new(Rect::new(0.0, 0.0, 390.0, 844.0));
/// assert!(host.children_ids().is_empty());
/// assert_eq!(host.pending_animations(), 0);
/// ```
pub struct MemoryHost {
    bounds: Rect,
    children: Vec<(ScreenId, Box<dyn Screen>)>,
    visual_tree: Vec<ScreenId>,
    pending: VecDeque<Completion>,
    records: Vec<AnimationRecord>,
}

impl MemoryHost {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            children: Vec::new(),
            visual_tree: Vec::new(),
            pending: VecDeque::new(),
            records: Vec::new(),
        }
    }

    pub fn children_ids(&self) -> Vec<ScreenId> {
        self.children.iter().map(|(id, _)| *id).collect()
    }

    /// Children whose screen is of `kind`.
    pub fn children_of_kind(&self, kind: ScreenKind) -> Vec<ScreenId> {
        self.children
            .iter()
            .filter(|(_, screen)| screen.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Mounted surfaces, back to front.
    pub fn mounted_surfaces(&self) -> &[ScreenId] {
        &self.visual_tree
    }

    /// Kinds of the screens whose surface is mounted, back to front.
    pub fn mounted_kinds(&self) -> Vec<ScreenKind> {
        self.visual_tree
            .iter()
            .filter_map(|id| self.screen(*id).map(|screen| screen.kind()))
            .collect()
    }

    pub fn animation_records(&self) -> &[AnimationRecord] {
        &self.records
    }

    pub fn pending_animations(&self) -> usize {
        self.pending.len()
    }

    /// Complete every in-flight animation, oldest first. Returns how many ran.
    pub fn finish_animations(&mut self) -> usize {
        self.run_completions(true)
    }

    /// Cut every in-flight animation short. Completions still run, with
    /// `finished == false`.
    pub fn interrupt_animations(&mut self) -> usize {
        self.run_completions(false)
    }

    fn run_completions(&mut self, finished: bool) -> usize {
        let pending: Vec<Completion> = self.pending.drain(..).collect();
        let count = pending.len();
        for completion in pending {
            completion(&mut *self, finished);
        }
        tracing::trace!(count, finished, "Ran animation completions");
        count
    }

    fn position(&self, id: ScreenId) -> Option<usize> {
        self.children.iter().position(|(child, _)| *child == id)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl Host for MemoryHost {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn children(&self) -> Vec<ScreenId> {
        self.children_ids()
    }

    fn screen(&self, id: ScreenId) -> Option<&(dyn Screen + 'static)> {
        self.children
            .iter()
            .find(|(child, _)| *child == id)
            .map(|(_, screen)| &**screen)
    }

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen + 'static)> {
        self.children
            .iter_mut()
            .find(|(child, _)| *child == id)
            .map(|(_, screen)| &mut **screen)
    }

    fn add_child(&mut self, screen: Box<dyn Screen>) -> ScreenId {
        let id = ScreenId::new();
        tracing::trace!(screen = %id, kind = %screen.kind(), "Attached child");
        self.children.push((id, screen));
        id
    }

    fn remove_child(&mut self, id: ScreenId) -> Option<Box<dyn Screen>> {
        let index = self.position(id)?;
        self.visual_tree.retain(|mounted| *mounted != id);
        let (_, screen) = self.children.remove(index);
        tracing::trace!(screen = %id, kind = %screen.kind(), "Detached child");
        Some(screen)
    }

    fn mount_surface(&mut self, id: ScreenId) {
        if self.position(id).is_some() && !self.visual_tree.contains(&id) {
            self.visual_tree.push(id);
        }
    }

    fn unmount_surface(&mut self, id: ScreenId) {
        self.visual_tree.retain(|mounted| *mounted != id);
    }

    fn is_surface_mounted(&self, id: ScreenId) -> bool {
        self.visual_tree.contains(&id)
    }

    fn transition(&mut self, request: TransitionRequest) {
        let TransitionRequest {
            from,
            to,
            duration,
            options,
            animations,
            completion,
        } = request;

        if self.position(to).is_some() && !self.visual_tree.contains(&to) {
            let slot = self
                .visual_tree
                .iter()
                .position(|mounted| *mounted == from)
                .map_or(self.visual_tree.len(), |index| index + 1);
            self.visual_tree.insert(slot, to);
        }

        apply_block(&mut *self, from, to, animations);

        self.records.push(AnimationRecord {
            from,
            to,
            duration,
            options,
            started_at: Utc::now(),
        });
        self.pending.push_back(completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;

    #[derive(Default)]
    struct Panel {
        surface: Surface,
    }

    impl Screen for Panel {
        fn surface(&self) -> &Surface {
            &self.surface
        }

        fn surface_mut(&mut self) -> &mut Surface {
            &mut self.surface
        }
    }

    #[derive(Default)]
    struct Sheet {
        surface: Surface,
    }

    impl Screen for Sheet {
        fn surface(&self) -> &Surface {
            &self.surface
        }

        fn surface_mut(&mut self) -> &mut Surface {
            &mut self.surface
        }
    }

    #[test]
    fn add_child_does_not_mount_surface() {
        let mut host = MemoryHost::default();
        let id = host.add_child(Box::new(Panel::default()));

        assert_eq!(host.children(), vec![id]);
        assert!(!host.is_surface_mounted(id));

        host.mount_surface(id);
        assert!(host.is_surface_mounted(id));
    }

    #[test]
    fn mount_surface_ignores_unknown_ids() {
        let mut host = MemoryHost::default();
        host.mount_surface(ScreenId::new());
        assert!(host.mounted_surfaces().is_empty());
    }

    #[test]
    fn remove_child_also_unmounts_surface() {
        let mut host = MemoryHost::default();
        let id = host.add_child(Box::new(Panel::default()));
        host.mount_surface(id);

        let removed = host.remove_child(id);

        assert!(removed.is_some());
        assert!(host.children().is_empty());
        assert!(host.mounted_surfaces().is_empty());
        assert!(host.remove_child(id).is_none());
    }

    #[test]
    fn children_of_kind_filters_by_type() {
        let mut host = MemoryHost::default();
        let panel = host.add_child(Box::new(Panel::default()));
        let sheet = host.add_child(Box::new(Sheet::default()));

        assert_eq!(host.children_of_kind(ScreenKind::of::<Panel>()), vec![panel]);
        assert_eq!(host.children_of_kind(ScreenKind::of::<Sheet>()), vec![sheet]);
    }

    #[test]
    fn transition_mounts_target_and_defers_completion() {
        let mut host = MemoryHost::default();
        let from = host.add_child(Box::new(Panel::default()));
        host.mount_surface(from);
        let to = host.add_child(Box::new(Sheet::default()));

        host.transition(TransitionRequest {
            from,
            to,
            duration: Duration::from_millis(300),
            options: AnimationOptions::default(),
            animations: Box::new(|from, _to| from.alpha = 0.0),
            completion: Box::new(move |host, _finished| {
                host.unmount_surface(from);
            }),
        });

        assert_eq!(host.mounted_surfaces(), &[from, to]);
        assert_eq!(host.screen(from).unwrap().surface().alpha, 0.0);
        assert_eq!(host.pending_animations(), 1);
        assert_eq!(host.animation_records().len(), 1);

        assert_eq!(host.finish_animations(), 1);
        assert_eq!(host.mounted_surfaces(), &[to]);
        assert_eq!(host.pending_animations(), 0);
    }

    #[test]
    fn interrupted_completion_reports_unfinished() {
        let mut host = MemoryHost::default();
        let from = host.add_child(Box::new(Panel::default()));
        let to = host.add_child(Box::new(Sheet::default()));

        host.transition(TransitionRequest {
            from,
            to,
            duration: Duration::from_millis(300),
            options: AnimationOptions::default(),
            animations: Box::new(|_, _| {}),
            completion: Box::new(|host, finished| {
                assert!(!finished);
                let ids = host.children();
                for id in ids {
                    host.remove_child(id);
                }
            }),
        });

        assert_eq!(host.interrupt_animations(), 1);
        assert!(host.children().is_empty());
    }

    #[test]
    fn apply_block_writes_back_both_surfaces() {
        let mut host = MemoryHost::default();
        let from = host.add_child(Box::new(Panel::default()));
        let to = host.add_child(Box::new(Sheet::default()));

        let applied = apply_block(
            &mut host,
            from,
            to,
            Box::new(|from, to| {
                from.alpha = 0.25;
                to.frame.width = 10.0;
            }),
        );

        assert!(applied);
        assert_eq!(host.screen(from).unwrap().surface().alpha, 0.25);
        assert_eq!(host.screen(to).unwrap().surface().frame.width, 10.0);
    }

    #[test]
    fn apply_block_skips_unknown_screens() {
        let mut host = MemoryHost::default();
        let from = host.add_child(Box::new(Panel::default()));

        assert!(!apply_block(&mut host, from, ScreenId::new(), Box::new(|_, _| {})));
    }
}
