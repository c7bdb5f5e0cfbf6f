//! Screens and their visual surfaces.
//!
//! A screen is an opaque, mountable unit supplied by the application. The
//! coordinator only constructs screens, moves them in and out of a host,
//! and reads or animates their [`Surface`].

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Axis-aligned rectangle in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Animatable properties of a screen's visual surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub frame: Rect,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            alpha: 1.0,
        }
    }
}

/// Identity of a screen type.
///
/// Two screens have the same kind exactly when they have the same concrete
/// Rust type.
#[derive(Clone, Copy)]
pub struct ScreenKind {
    id: TypeId,
    name: &'static str,
}

impl ScreenKind {
    /// Kind of the screen type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ScreenKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScreenKind {}

impl Hash for ScreenKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScreenKind").field(&self.name).finish()
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity of one live screen instance inside a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A mountable visual unit.
///
/// Lifecycle: constructed → `will_mount` → attached → `did_mount` →
/// visible → `will_unmount` → detached → dropped. There is no post-unmount
/// hook; a detached screen is simply dropped by its host.
///
/// # Example
///
/// ```rust
/// use segue::core::{Screen, ScreenKind, Surface};
///
/// #[derive(Default)]
/// struct Welcome {
///     surface: Surface,
/// }
///
/// impl Screen for Welcome {
///     fn surface(&self) -> &Surface {
///         &self.surface
///     }
///
///     fn surface_mut(&mut self) -> &mut Surface {
///         &mut self.surface
///     }
/// }
///
/// let screen: Box<dyn Screen> = Box::new(Welcome::default());
/// assert_eq!(screen.kind(), ScreenKind::of::<Welcome>());
/// ```
pub trait Screen: Any {
    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    /// Called right before the screen is attached to a host.
    fn will_mount(&mut self) {}

    /// Called once the screen is attached and its surface is in the
    /// host's visual tree (after any entrance animation).
    fn did_mount(&mut self) {}

    /// Called right before the screen starts leaving its host.
    fn will_unmount(&mut self) {}

    /// Concrete type of this screen.
    fn kind(&self) -> ScreenKind {
        ScreenKind::of::<Self>()
    }
}
