//! Damped spring physics.
//!
//! A [`Spring`] chases a target with the motion of a mass on a damped spring:
//!
//! ```text
//! m·x'' = −k·(x − target) − c·x'
//! ```
//!
//! Stepping uses the closed-form solution of that equation for the current
//! displacement and velocity, so results do not depend on frame rate and
//! never drift. Retargeting mid-flight keeps position and velocity, which is
//! what gives a follower its natural lag and overshoot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SpringError {
    #[error("spring {0} must be a positive finite number, got {1}")]
    NonPositive(&'static str, f64),
    #[error("spring damping must be a non-negative finite number, got {0}")]
    NegativeDamping(f64),
}

/// Width of the band around ζ = 1 treated as critically damped.
const CRITICAL_BAND: f64 = 1e-6;

/// Physical constants of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self, SpringError> {
        if !(stiffness.is_finite() && stiffness > 0.0) {
            return Err(SpringError::NonPositive("stiffness", stiffness));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SpringError::NonPositive("mass", mass));
        }
        if !(damping.is_finite() && damping >= 0.0) {
            return Err(SpringError::NegativeDamping(damping));
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
        })
    }

    /// Undamped angular frequency ω₀ = √(k/m), in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// ζ = c / (2·√(k·m)). Below 1 the spring overshoots; at or above 1 it
    /// does not.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Largest overshoot past the target for a step from rest, as a fraction
    /// of the step size.
    pub fn max_overshoot(&self) -> f64 {
        let zeta = self.damping_ratio();
        if zeta >= 1.0 {
            0.0
        } else {
            (-zeta * std::f64::consts::PI / (1.0 - zeta * zeta).sqrt()).exp()
        }
    }

    /// Time in seconds after which a unit step from rest stays within
    /// `epsilon` of its target. Capped at `horizon` seconds.
    pub fn settle_time(&self, epsilon: f64, horizon: f64) -> f64 {
        const DT: f64 = 0.001;
        let mut state = SpringState {
            displacement: 1.0,
            velocity: 0.0,
        };
        let mut last_outside = 0.0;
        let mut t = 0.0;
        while t < horizon {
            state = state.advance(self, DT);
            t += DT;
            if state.displacement.abs() >= epsilon {
                last_outside = t;
            }
        }
        (last_outside + DT).min(horizon)
    }
}

/// Displacement from the target and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpringState {
    displacement: f64,
    velocity: f64,
}

impl SpringState {
    fn advance(self, p: &SpringParams, t: f64) -> Self {
        let x0 = self.displacement;
        let v0 = self.velocity;
        let w0 = p.natural_frequency();
        let zeta = p.damping_ratio();

        if (zeta - 1.0).abs() < CRITICAL_BAND {
            let e = (-w0 * t).exp();
            let b = v0 + w0 * x0;
            return Self {
                displacement: e * (x0 + b * t),
                velocity: e * (v0 - w0 * b * t),
            };
        }

        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let e = (-zeta * w0 * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            Self {
                displacement: e * (x0 * cos + (v0 + zeta * w0 * x0) / wd * sin),
                velocity: e * (v0 * cos - (w0 * w0 * x0 + zeta * w0 * v0) / wd * sin),
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            Self {
                displacement: a * e1 + b * e2,
                velocity: r1 * a * e1 + r2 * b * e2,
            }
        }
    }
}

/// One animated scalar.
#[derive(Debug, Clone)]
pub struct Spring {
    params: SpringParams,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// A spring at rest at `position`.
    pub fn new(params: SpringParams, position: f64) -> Self {
        Self {
            params,
            position,
            velocity: 0.0,
            target: position,
        }
    }

    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Move the goal. Position and velocity carry over.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump straight to `position` and stop.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let next = SpringState {
            displacement: self.position - self.target,
            velocity: self.velocity,
        }
        .advance(&self.params, dt);
        self.position = self.target + next.displacement;
        self.velocity = next.velocity;
    }

    /// Close enough to the target and slow enough to stop animating.
    pub fn is_at_rest(&self, rest_delta: f64, rest_speed: f64) -> bool {
        (self.position - self.target).abs() <= rest_delta && self.velocity.abs() <= rest_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_params() -> SpringParams {
        SpringParams::new(300.0, 20.0, 0.5).unwrap()
    }

    /// Step `spring` at 60 fps for `seconds`, tracking the furthest overshoot
    /// past `target` in the direction of travel.
    fn run(spring: &mut Spring, seconds: f64) -> f64 {
        let dir = (spring.target() - spring.position()).signum();
        let mut overshoot: f64 = 0.0;
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
            overshoot = overshoot.max((spring.position() - spring.target()) * dir);
        }
        overshoot
    }

    #[test]
    fn rejects_bad_params() {
        assert!(SpringParams::new(0.0, 10.0, 1.0).is_err());
        assert!(SpringParams::new(100.0, 10.0, -1.0).is_err());
        assert_eq!(
            SpringParams::new(100.0, -1.0, 1.0),
            Err(SpringError::NegativeDamping(-1.0))
        );
        assert!(SpringParams::new(f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn cursor_spring_is_underdamped() {
        let p = cursor_params();
        let zeta = p.damping_ratio();
        assert!(zeta > 0.8 && zeta < 0.82, "zeta was {zeta}");
        assert!(p.max_overshoot() > 0.0 && p.max_overshoot() < 0.02);
    }

    #[test]
    fn overdamped_never_overshoots() {
        let p = SpringParams::new(100.0, 60.0, 1.0).unwrap();
        assert_eq!(p.max_overshoot(), 0.0);
        let mut s = Spring::new(p, 0.0);
        s.set_target(100.0);
        let overshoot = run(&mut s, 3.0);
        assert!(overshoot <= 1e-9, "overshoot {overshoot}");
    }

    #[test]
    fn critically_damped_converges() {
        // zeta = 20 / (2 * sqrt(100 * 1)) = 1
        let p = SpringParams::new(100.0, 20.0, 1.0).unwrap();
        let mut s = Spring::new(p, 0.0);
        s.set_target(50.0);
        let overshoot = run(&mut s, 2.0);
        assert!(overshoot <= 1e-9);
        assert!((s.position() - 50.0).abs() < 0.05);
    }

    #[test]
    fn converges_within_settle_time() {
        let p = cursor_params();
        let settle = p.settle_time(0.001, 5.0);
        let mut s = Spring::new(p, 0.0);
        s.set_target(1.0);
        let mut t = 0.0;
        while t < settle {
            s.step(0.001);
            t += 0.001;
        }
        // Past the settle time the spring stays within epsilon.
        for _ in 0..2000 {
            s.step(0.001);
            assert!((s.position() - 1.0).abs() < 0.001 + 1e-9);
        }
    }

    #[test]
    fn overshoot_bounded_by_damping_ratio() {
        let p = cursor_params();
        let mut s = Spring::new(p, 0.0);
        s.set_target(400.0);
        let overshoot = run(&mut s, 2.0);
        assert!(overshoot > 0.0);
        assert!(overshoot <= p.max_overshoot() * 400.0 + 1e-6);
    }

    #[test]
    fn step_is_frame_rate_independent() {
        let p = cursor_params();
        let mut coarse = Spring::new(p, 0.0);
        let mut fine = Spring::new(p, 0.0);
        coarse.set_target(10.0);
        fine.set_target(10.0);
        coarse.step(0.1);
        for _ in 0..100 {
            fine.step(0.001);
        }
        assert!((coarse.position() - fine.position()).abs() < 1e-9);
        assert!((coarse.velocity() - fine.velocity()).abs() < 1e-6);
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut s = Spring::new(cursor_params(), 0.0);
        s.set_target(100.0);
        s.step(0.05);
        let v = s.velocity();
        assert!(v > 0.0);
        s.set_target(-100.0);
        assert_eq!(s.velocity(), v);
    }

    #[test]
    fn rest_detection() {
        let mut s = Spring::new(cursor_params(), 0.0);
        assert!(s.is_at_rest(0.01, 0.01));
        s.set_target(5.0);
        assert!(!s.is_at_rest(0.01, 0.01));
        s.step(2.0);
        assert!(s.is_at_rest(0.01, 0.01));
    }

    #[test]
    fn snap_stops_motion() {
        let mut s = Spring::new(cursor_params(), 0.0);
        s.set_target(5.0);
        s.step(0.02);
        s.snap_to(3.0);
        assert_eq!(s.position(), 3.0);
        assert_eq!(s.velocity(), 0.0);
        assert_eq!(s.target(), 3.0);
    }
}
