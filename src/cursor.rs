//! The decorative cursor follower.
//!
//! A ring trails the pointer: every pointer move retargets three springs
//! (x, y and scale) and every animation frame advances them. The ring's
//! top-left corner chases `pointer − radius`, so its centre lands on the
//! pointer once settled, and it grows while the pointer is over something
//! clickable.
//!
//! "Clickable" is decided from the hit chain, the element under the pointer
//! followed by its ancestors, using properties fixed at render time: the
//! element kind, its declared cursor style, and the `data-interactive`
//! capability tag the generator puts on every link, button and pointer-styled
//! control. Nothing is re-derived from live styles per event.

use crate::config::CursorConfig;
use crate::signal::{Observable, Watch};
use crate::spring::{Spring, SpringError, SpringParams};

/// The kinds of element the follower cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Anchor,
    Button,
    Other,
}

impl ElementKind {
    /// Classify an HTML tag name, case-insensitively.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("a") {
            ElementKind::Anchor
        } else if tag.eq_ignore_ascii_case("button") {
            ElementKind::Button
        } else {
            ElementKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Auto,
    Pointer,
    Other,
}

/// One element of a hit chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub kind: ElementKind,
    pub cursor: CursorStyle,
    /// Render-time `data-interactive` tag.
    pub interactive: bool,
}

impl HitTarget {
    pub fn plain() -> Self {
        Self {
            kind: ElementKind::Other,
            cursor: CursorStyle::Auto,
            interactive: false,
        }
    }

    pub fn anchor() -> Self {
        Self {
            kind: ElementKind::Anchor,
            ..Self::plain()
        }
    }

    pub fn button() -> Self {
        Self {
            kind: ElementKind::Button,
            ..Self::plain()
        }
    }

    pub fn with_cursor(self, cursor: CursorStyle) -> Self {
        Self { cursor, ..self }
    }

    pub fn tagged(self) -> Self {
        Self {
            interactive: true,
            ..self
        }
    }
}

/// Whether a pointer over `chain` (target first, then ancestors) is over
/// something interactive.
pub fn is_over_interactive(chain: &[HitTarget]) -> bool {
    let Some(target) = chain.first() else {
        return false;
    };
    target.cursor == CursorStyle::Pointer
        || chain.iter().any(|el| {
            el.interactive || matches!(el.kind, ElementKind::Anchor | ElementKind::Button)
        })
}

/// Last known pointer position, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub is_over_interactive: bool,
}

/// Where to draw the ring this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
}

impl Indicator {
    pub fn center(&self, radius: f64) -> (f64, f64) {
        (self.left + radius, self.top + radius)
    }
}

/// Pointer tracking plus the springs that chase it.
pub struct CursorFollower {
    radius: f64,
    hover_scale: f64,
    viewport: (f64, f64),
    pointer: Observable<PointerState>,
    x: Spring,
    y: Spring,
    scale: Spring,
}

impl CursorFollower {
    /// A follower at rest at the viewport origin.
    pub fn new(config: &CursorConfig, viewport: (f64, f64)) -> Result<Self, SpringError> {
        let params = SpringParams::new(config.stiffness, config.damping, config.mass)?;
        let radius = config.radius;
        Ok(Self {
            radius,
            hover_scale: config.hover_scale,
            viewport,
            pointer: Observable::new(PointerState::default()),
            x: Spring::new(params, -radius),
            y: Spring::new(params, -radius),
            scale: Spring::new(params, 1.0),
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.get()
    }

    pub fn watch_pointer(&self) -> Watch<PointerState> {
        self.pointer.watch()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    /// Handle one pointer-move event.
    pub fn pointer_moved(&mut self, x: f64, y: f64, chain: &[HitTarget]) {
        let (w, h) = self.viewport;
        let state = PointerState {
            x: x.clamp(0.0, w.max(0.0)),
            y: y.clamp(0.0, h.max(0.0)),
            is_over_interactive: is_over_interactive(chain),
        };
        self.x.set_target(state.x - self.radius);
        self.y.set_target(state.y - self.radius);
        self.scale.set_target(if state.is_over_interactive {
            self.hover_scale
        } else {
            1.0
        });
        self.pointer.set(state);
    }

    /// Advance the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
        self.scale.step(dt);
    }

    pub fn indicator(&self) -> Indicator {
        Indicator {
            left: self.x.position(),
            top: self.y.position(),
            scale: self.scale.position(),
        }
    }

    pub fn is_at_rest(&self) -> bool {
        [&self.x, &self.y].iter().all(|s| s.is_at_rest(0.01, 0.01))
            && self.scale.is_at_rest(0.001, 0.001)
    }
}
