//! Scroll-triggered reveal animations.
//!
//! Every animated element carries a [`MotionSpec`]: the pose it rests in while
//! its section is out of view, the pose it settles into once visible, and the
//! timing of the move between them. A [`RevealAnimator`] runs that spec as a
//! four-state machine:
//!
//! ```text
//!            visible                     elapsed ≥ delay + duration
//! Hidden ───────────▶ Revealing ───────────────────────────▶ Revealed
//!   ▲                  │    ▲                                   │
//!   │                  │    │ visible                           │
//!   │  done      hidden▼    │                        hidden     │
//!   └──────────────── Hiding ◀──────────────────────────────────┘
//! ```
//!
//! Transitions always start from the pose currently on screen, so reversing
//! mid-flight never jumps and replaying a reveal looks exactly like the first
//! one. Signals that repeat the current direction are ignored.
//!
//! The animator does not know where visibility comes from. A
//! [`RevealBinding`] subscribes a group of animators to any boolean
//! [`Watch`]: a [`VisibilityTracker`](crate::visibility::VisibilityTracker)
//! in production, a bare [`Observable`](crate::signal::Observable) in tests.

use crate::signal::{Subscription, Watch};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Timing curve for a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t ∈ [0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// The matching CSS `transition-timing-function`.
    pub fn css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "cubic-bezier(0.32, 0, 0.67, 0)",
            Easing::EaseOut => "cubic-bezier(0.33, 1, 0.68, 1)",
            Easing::EaseInOut => "cubic-bezier(0.65, 0, 0.35, 1)",
        }
    }
}

/// Visual state of an element: opacity plus a 2D offset and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub opacity: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Pose {
    pub const SHOWN: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    pub const fn hidden() -> Self {
        Pose {
            opacity: 0.0,
            ..Self::SHOWN
        }
    }

    pub fn lerp(&self, to: &Pose, t: f64) -> Pose {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, to.opacity),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
        }
    }

    /// CSS `transform` for this pose.
    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.x, self.y, self.scale
        )
    }
}

/// What an element looks like hidden and shown, and how it moves between.
///
/// Durations and delays are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSpec {
    pub from: Pose,
    pub to: Pose,
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl MotionSpec {
    /// Fade in while rising `offset` pixels.
    pub fn fade_up(offset: f64, duration: f64) -> Self {
        Self {
            from: Pose {
                y: offset,
                ..Pose::hidden()
            },
            to: Pose::SHOWN,
            duration,
            delay: 0.0,
            easing: Easing::default(),
        }
    }

    /// Fade in while sliding horizontally; negative `offset` enters from the left.
    pub fn slide_x(offset: f64, duration: f64) -> Self {
        Self {
            from: Pose {
                x: offset,
                ..Pose::hidden()
            },
            ..Self::fade_up(0.0, duration)
        }
    }

    /// Fade in while growing from `scale`.
    pub fn zoom(scale: f64, duration: f64) -> Self {
        Self {
            from: Pose {
                scale,
                ..Pose::hidden()
            },
            ..Self::fade_up(0.0, duration)
        }
    }

    /// Plain opacity fade.
    pub fn fade(duration: f64) -> Self {
        Self::fade_up(0.0, duration)
    }

    pub fn with_delay(self, delay: f64) -> Self {
        Self { delay, ..self }
    }

    pub fn with_easing(self, easing: Easing) -> Self {
        Self { easing, ..self }
    }

    /// Delay this spec for the `index`-th sibling of a cascade.
    pub fn staggered(self, base: f64, step: f64, index: usize) -> Self {
        self.with_delay(stagger_delay(base, step, index))
    }

    pub fn total_time(&self) -> f64 {
        self.delay + self.duration
    }
}

/// Start offset for the `index`-th element of a cascade.
pub fn stagger_delay(base: f64, step: f64, index: usize) -> f64 {
    base + step * index as f64
}

/// Where an animator is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    Hidden,
    Revealing { elapsed: f64, origin: Pose },
    Revealed,
    Hiding { elapsed: f64, origin: Pose },
}

impl RevealPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RevealPhase::Hidden => "hidden",
            RevealPhase::Revealing { .. } => "revealing",
            RevealPhase::Revealed => "revealed",
            RevealPhase::Hiding { .. } => "hiding",
        }
    }
}

/// Drives one element through its [`MotionSpec`].
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    spec: MotionSpec,
    phase: RevealPhase,
    reveals: usize,
}

impl RevealAnimator {
    pub fn new(spec: MotionSpec) -> Self {
        Self {
            spec,
            phase: RevealPhase::Hidden,
            reveals: 0,
        }
    }

    pub fn spec(&self) -> &MotionSpec {
        &self.spec
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// How many reveal animations have been started.
    pub fn reveal_count(&self) -> usize {
        self.reveals
    }

    /// The pose on screen right now.
    pub fn pose(&self) -> Pose {
        match self.phase {
            RevealPhase::Hidden => self.spec.from,
            RevealPhase::Revealed => self.spec.to,
            RevealPhase::Revealing { elapsed, origin } => {
                origin.lerp(&self.spec.to, self.progress(elapsed))
            }
            RevealPhase::Hiding { elapsed, origin } => {
                origin.lerp(&self.spec.from, self.progress(elapsed))
            }
        }
    }

    fn progress(&self, elapsed: f64) -> f64 {
        let running = (elapsed - self.spec.delay).max(0.0);
        if self.spec.duration <= 0.0 {
            return 1.0;
        }
        self.spec.easing.apply(running / self.spec.duration)
    }

    /// React to the section's visibility. Returns `true` if an animation started.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let origin = self.pose();
        let next = match (self.phase, visible) {
            (RevealPhase::Hidden | RevealPhase::Hiding { .. }, true) => {
                self.reveals += 1;
                RevealPhase::Revealing {
                    elapsed: 0.0,
                    origin,
                }
            }
            (RevealPhase::Revealed | RevealPhase::Revealing { .. }, false) => RevealPhase::Hiding {
                elapsed: 0.0,
                origin,
            },
            _ => return false,
        };
        self.phase = next;
        true
    }

    /// Advance the clock by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let total = self.spec.total_time();
        self.phase = match self.phase {
            RevealPhase::Revealing { elapsed, origin } => {
                let elapsed = elapsed + dt;
                if elapsed >= total {
                    RevealPhase::Revealed
                } else {
                    RevealPhase::Revealing { elapsed, origin }
                }
            }
            RevealPhase::Hiding { elapsed, origin } => {
                let elapsed = elapsed + dt;
                if elapsed >= total {
                    RevealPhase::Hidden
                } else {
                    RevealPhase::Hiding { elapsed, origin }
                }
            }
            settled => settled,
        };
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, RevealPhase::Hidden | RevealPhase::Revealed)
    }
}

/// A group of animators following one visibility signal.
///
/// Dropping the binding unsubscribes from the signal.
pub struct RevealBinding {
    animators: Rc<RefCell<Vec<RevealAnimator>>>,
    _subscription: Subscription,
}

impl RevealBinding {
    /// Subscribe `animators` to `source`. If the source is already visible the
    /// reveal starts immediately.
    pub fn bind(source: &Watch<bool>, animators: Vec<RevealAnimator>) -> Self {
        let animators = Rc::new(RefCell::new(animators));
        if source.get() {
            for a in animators.borrow_mut().iter_mut() {
                a.set_visible(true);
            }
        }
        let sink = Rc::clone(&animators);
        let subscription = source.subscribe(move |visible| {
            for a in sink.borrow_mut().iter_mut() {
                a.set_visible(*visible);
            }
        });
        Self {
            animators,
            _subscription: subscription,
        }
    }

    /// Bind a cascade: one animator per child, each delayed `step` seconds
    /// after the previous one.
    pub fn staggered(source: &Watch<bool>, spec: MotionSpec, step: f64, children: usize) -> Self {
        let base = spec.delay;
        let animators = (0..children)
            .map(|i| RevealAnimator::new(spec.staggered(base, step, i)))
            .collect();
        Self::bind(source, animators)
    }

    pub fn tick(&self, dt: f64) {
        for a in self.animators.borrow_mut().iter_mut() {
            a.tick(dt);
        }
    }

    pub fn poses(&self) -> Vec<Pose> {
        self.animators.borrow().iter().map(|a| a.pose()).collect()
    }

    pub fn phases(&self) -> Vec<RevealPhase> {
        self.animators.borrow().iter().map(|a| a.phase()).collect()
    }

    pub fn reveal_counts(&self) -> Vec<usize> {
        self.animators
            .borrow()
            .iter()
            .map(|a| a.reveal_count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Observable;
    use crate::visibility::{VisibilityOptions, VisibilityTracker};

    fn spec() -> MotionSpec {
        MotionSpec::fade_up(20.0, 0.5)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_endpoints() {
        for e in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(approx(e.apply(0.0), 0.0));
            assert!(approx(e.apply(1.0), 1.0));
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn stagger_is_monotonic() {
        let delays: Vec<f64> = (0..5).map(|i| stagger_delay(0.2, 0.1, i)).collect();
        assert!(approx(delays[0], 0.2));
        assert!(approx(delays[4], 0.6));
        assert!(delays.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn starts_hidden_at_from_pose() {
        let a = RevealAnimator::new(spec());
        assert_eq!(a.phase(), RevealPhase::Hidden);
        assert_eq!(a.pose().opacity, 0.0);
        assert_eq!(a.pose().y, 20.0);
    }

    #[test]
    fn full_reveal_cycle() {
        let mut a = RevealAnimator::new(spec());
        assert!(a.set_visible(true));
        a.tick(0.25);
        assert_eq!(a.phase().name(), "revealing");
        let mid = a.pose();
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        a.tick(0.25);
        assert_eq!(a.phase(), RevealPhase::Revealed);
        assert_eq!(a.pose(), Pose::SHOWN);
    }

    #[test]
    fn delay_holds_pose() {
        let mut a = RevealAnimator::new(spec().with_delay(0.3));
        a.set_visible(true);
        a.tick(0.2);
        assert_eq!(a.pose().opacity, 0.0);
        a.tick(0.6);
        assert_eq!(a.phase(), RevealPhase::Revealed);
    }

    #[test]
    fn repeated_visible_signal_is_ignored() {
        let mut a = RevealAnimator::new(spec());
        assert!(a.set_visible(true));
        assert!(!a.set_visible(true));
        a.tick(1.0);
        assert!(!a.set_visible(true));
        assert_eq!(a.reveal_count(), 1);
    }

    #[test]
    fn reversal_starts_from_current_pose() {
        let mut a = RevealAnimator::new(spec().with_easing(Easing::Linear));
        a.set_visible(true);
        a.tick(0.25);
        let at_reversal = a.pose();
        a.set_visible(false);
        assert_eq!(a.pose(), at_reversal);
        a.tick(0.5);
        assert_eq!(a.phase(), RevealPhase::Hidden);
    }

    #[test]
    fn replay_matches_first_run() {
        let mut a = RevealAnimator::new(spec());
        a.set_visible(true);
        a.tick(0.2);
        let first = a.pose();
        a.tick(1.0);
        a.set_visible(false);
        a.tick(1.0);

        a.set_visible(true);
        a.tick(0.2);
        assert_eq!(a.pose(), first);
        assert_eq!(a.reveal_count(), 2);
    }

    #[test]
    fn binding_follows_fake_source() {
        let source = Observable::new(false);
        let binding = RevealBinding::bind(
            &source.watch(),
            vec![RevealAnimator::new(spec()), RevealAnimator::new(spec())],
        );
        source.set(true);
        binding.tick(1.0);
        assert!(binding.phases().iter().all(|p| *p == RevealPhase::Revealed));
        source.set(false);
        binding.tick(1.0);
        assert!(binding.phases().iter().all(|p| *p == RevealPhase::Hidden));
    }

    #[test]
    fn binding_starts_when_source_already_visible() {
        let source = Observable::new(true);
        let binding = RevealBinding::bind(&source.watch(), vec![RevealAnimator::new(spec())]);
        assert_eq!(binding.phases()[0].name(), "revealing");
    }

    #[test]
    fn dropped_binding_unsubscribes() {
        let source = Observable::new(false);
        let watch = source.watch();
        let binding = RevealBinding::bind(&watch, vec![RevealAnimator::new(spec())]);
        assert_eq!(watch.subscriber_count(), 1);
        drop(binding);
        assert_eq!(watch.subscriber_count(), 0);
    }

    #[test]
    fn staggered_children_cascade() {
        let source = Observable::new(false);
        let binding = RevealBinding::staggered(&source.watch(), spec(), 0.1, 4);
        source.set(true);
        binding.tick(0.15);
        let opacities: Vec<f64> = binding.poses().iter().map(|p| p.opacity).collect();
        // Earlier children are further along.
        assert!(opacities.windows(2).all(|w| w[0] >= w[1]));
        assert!(opacities[0] > 0.0);
        assert_eq!(opacities[3], 0.0);
    }

    #[test]
    fn tracker_callbacks_trigger_one_reveal_per_entry() {
        let mut tracker = VisibilityTracker::new(VisibilityOptions::default());
        let binding = RevealBinding::bind(&tracker.signal(), vec![RevealAnimator::new(spec())]);

        for ratio in [0.2, 0.4, 0.9, 1.0] {
            tracker.observe_ratio(ratio);
        }
        assert_eq!(binding.reveal_counts(), vec![1]);

        tracker.observe_ratio(0.0);
        binding.tick(1.0);
        tracker.observe_ratio(0.5);
        assert_eq!(binding.reveal_counts(), vec![2]);
    }
}
