//! Viewport visibility tracking.
//!
//! A [`VisibilityTracker`] turns a stream of intersection measurements for one
//! section into a boolean "is visible" signal. It mirrors the browser's
//! `IntersectionObserver` contract: the host reports how much of the element
//! is inside the viewport whenever that changes, and the tracker flips its
//! signal when the ratio crosses the threshold.
//!
//! Only state changes are published. Hosts routinely deliver several
//! callbacks that report the same state (one per threshold crossing, one on
//! initial observe, and so on); those are absorbed here so downstream
//! animations fire once per real transition.

use crate::signal::{Observable, Watch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum VisibilityError {
    #[error("visibility threshold must be in (0, 1], got {0}")]
    Threshold(f64),
}

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlapping region, if the rectangles touch or overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Fraction of `target`'s area that lies inside `viewport`, in `[0, 1]`.
///
/// A zero-area target counts as fully visible when it touches the viewport,
/// as it does for `IntersectionObserver`.
pub fn intersection_ratio(target: &Rect, viewport: &Rect) -> f64 {
    let Some(overlap) = target.intersection(viewport) else {
        return 0.0;
    };
    let area = target.area();
    if area == 0.0 {
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Fraction of an element that must be visible, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, VisibilityError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(VisibilityError::Threshold(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Threshold {
    type Error = VisibilityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> f64 {
        t.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.1)
    }
}

/// How a tracker reacts to intersection changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibilityOptions {
    pub threshold: Threshold,
    /// Latch at `true` after the first reveal instead of replaying on every
    /// scroll in and out.
    pub trigger_once: bool,
}

/// A published flip of the visibility signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered,
    Exited,
}

/// Tracks one observed element.
pub struct VisibilityTracker {
    options: VisibilityOptions,
    visible: Observable<bool>,
    latched: bool,
}

impl VisibilityTracker {
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            visible: Observable::new(false),
            latched: false,
        }
    }

    pub fn options(&self) -> VisibilityOptions {
        self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Read-only handle for consumers such as a reveal binding.
    pub fn signal(&self) -> Watch<bool> {
        self.visible.watch()
    }

    /// Feed one intersection measurement.
    ///
    /// Returns the change that was published, or `None` when the measurement
    /// leaves the signal where it was.
    pub fn observe_ratio(&mut self, ratio: f64) -> Option<VisibilityChange> {
        if self.latched {
            return None;
        }
        let now_visible = ratio > 0.0 && ratio >= self.options.threshold.get();
        if !self.visible.set(now_visible) {
            return None;
        }
        if now_visible {
            if self.options.trigger_once {
                self.latched = true;
            }
            Some(VisibilityChange::Entered)
        } else {
            Some(VisibilityChange::Exited)
        }
    }

    /// Measure `target` against `viewport` and feed the ratio.
    ///
    /// `None` stands for an element that is not in the document; nothing is
    /// published for it.
    pub fn observe(&mut self, target: Option<&Rect>, viewport: &Rect) -> Option<VisibilityChange> {
        let target = target?;
        self.observe_ratio(intersection_ratio(target, viewport))
    }
}
