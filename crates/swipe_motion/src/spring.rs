//! Spring-based animated values.
//!
//! A [`Spring`] integrates `F = -k·x - c·v` with mass `m`, where `x` is the
//! displacement from the target. Overdamped profiles (the default) settle
//! without overshoot; `overshoot_clamping` additionally ends the animation the
//! moment the value crosses its target.

use crate::{
    DEFAULT_DAMPING, DEFAULT_MASS, DEFAULT_REST_THRESHOLD, DEFAULT_STIFFNESS, MAX_FRAME_DT,
    MAX_INTEGRATION_STEP,
};
use serde::{Deserialize, Serialize};

/// Spring configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Stiffness `k` (higher = faster response).
    pub stiffness: f64,
    /// Mass `m` of the animated object.
    pub mass: f64,
    /// Stop as soon as the value crosses the target.
    pub overshoot_clamping: bool,
    /// Distance from target under which the spring may come to rest.
    pub rest_displacement_threshold: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            stiffness: DEFAULT_STIFFNESS,
            mass: DEFAULT_MASS,
            overshoot_clamping: true,
            rest_displacement_threshold: DEFAULT_REST_THRESHOLD,
            rest_speed_threshold: DEFAULT_REST_THRESHOLD,
        }
    }
}

impl SpringConfig {
    /// Damping ratio: 1.0 = critically damped, < 1.0 bouncy, > 1.0 sluggish.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether every parameter is usable for integration.
    pub fn is_valid(&self) -> bool {
        self.damping.is_finite()
            && self.damping >= 0.0
            && self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.mass.is_finite()
            && self.mass > 0.0
            && self.rest_displacement_threshold >= 0.0
            && self.rest_speed_threshold >= 0.0
    }
}

/// What happens to the value once the animation settles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum OnRest {
    /// Stay at the target.
    #[default]
    Hold,
    /// Jump to the given value (e.g. back to centre after a fling).
    ResetTo(f64),
}

/// Reported by [`Spring::tick`] on the frame the animation settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringRest {
    /// Target the spring reached.
    pub reached: f64,
    /// Value after the rest action was applied.
    pub value: f64,
}

/// Animated f64 value with spring physics.
///
/// # Usage
/// ```
/// use swipe_motion::{OnRest, Spring, SpringConfig};
///
/// let mut x = Spring::new(0.0);
/// x.animate_to_then(500.0, SpringConfig::default(), OnRest::ResetTo(0.0));
///
/// let mut settled = None;
/// for _ in 0..1200 {
///     if let Some(rest) = x.tick(1.0 / 60.0) {
///         settled = Some(rest);
///     }
/// }
/// assert_eq!(settled.map(|r| r.reached), Some(500.0));
/// assert_eq!(x.get(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    current: f64,
    target: f64,
    velocity: f64,
    config: SpringConfig,
    animating: bool,
    on_rest: OnRest,
}

impl Spring {
    /// Create a resting spring at `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            velocity: 0.0,
            config: SpringConfig::default(),
            animating: false,
            on_rest: OnRest::Hold,
        }
    }

    /// Current animated value.
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Current target value.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current velocity (units per second).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Check if an animation is in progress.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Jump immediately to `value`, cancelling any running animation.
    pub fn set_immediate(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        self.animating = false;
        self.on_rest = OnRest::Hold;
    }

    /// Stop where we are. The pending rest action is discarded.
    pub fn cancel(&mut self) {
        self.target = self.current;
        self.velocity = 0.0;
        self.animating = false;
        self.on_rest = OnRest::Hold;
    }

    /// Start animating toward `target`, keeping the current velocity.
    pub fn animate_to(&mut self, target: f64, config: SpringConfig) -> Option<SpringRest> {
        self.animate_to_then(target, config, OnRest::Hold)
    }

    /// Start animating toward `target` and apply `on_rest` once settled.
    ///
    /// Replaces whatever animation was running. If the spring is already
    /// resting at `target` it settles immediately and the rest is returned.
    pub fn animate_to_then(
        &mut self,
        target: f64,
        config: SpringConfig,
        on_rest: OnRest,
    ) -> Option<SpringRest> {
        self.target = target;
        self.config = config;
        self.on_rest = on_rest;
        self.animating = true;

        if self.at_rest() {
            return Some(self.settle());
        }
        None
    }

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns `Some` on the frame the spring comes to rest.
    pub fn tick(&mut self, dt: f64) -> Option<SpringRest> {
        if !self.animating {
            return None;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let steps = (dt / MAX_INTEGRATION_STEP).ceil().max(1.0) as usize;
        let h = dt / steps as f64;

        for _ in 0..steps {
            let before = self.current - self.target;
            let spring_force = -self.config.stiffness * before;
            let damping_force = -self.config.damping * self.velocity;
            let acceleration = (spring_force + damping_force) / self.config.mass;

            self.velocity += acceleration * h;
            self.current += self.velocity * h;

            let after = self.current - self.target;
            let crossed = before != 0.0 && (after == 0.0 || before.signum() != after.signum());
            if (self.config.overshoot_clamping && crossed) || self.at_rest() {
                return Some(self.settle());
            }
        }

        None
    }

    fn at_rest(&self) -> bool {
        (self.current - self.target).abs() <= self.config.rest_displacement_threshold
            && self.velocity.abs() <= self.config.rest_speed_threshold
    }

    fn settle(&mut self) -> SpringRest {
        let reached = self.target;
        self.current = reached;
        self.velocity = 0.0;
        self.animating = false;

        if let OnRest::ResetTo(value) = std::mem::take(&mut self.on_rest) {
            self.current = value;
            self.target = value;
        }

        SpringRest {
            reached,
            value: self.current,
        }
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f64) -> Option<SpringRest> {
        let frames = (seconds * 60.0) as usize;
        let mut rest = None;
        for _ in 0..frames {
            if let Some(r) = spring.tick(1.0 / 60.0) {
                rest = Some(r);
            }
        }
        rest
    }

    #[test]
    fn spring_converges() {
        let mut spring = Spring::new(0.0);
        spring.animate_to(1.0, SpringConfig::default());

        let rest = run(&mut spring, 10.0);

        assert_eq!(spring.get(), 1.0);
        assert!(!spring.is_animating(), "Spring should stop animating");
        assert_eq!(rest.map(|r| r.reached), Some(1.0));
    }

    #[test]
    fn default_profile_is_overdamped() {
        assert!(SpringConfig::default().damping_ratio() > 1.0);
    }

    #[test]
    fn spring_immediate() {
        let mut spring = Spring::new(0.0);
        spring.animate_to(10.0, SpringConfig::default());
        spring.set_immediate(5.0);

        assert_eq!(spring.get(), 5.0);
        assert!(!spring.is_animating());
        assert_eq!(spring.tick(1.0 / 60.0), None);
    }

    #[test]
    fn animate_to_current_value_settles_at_once() {
        let mut spring = Spring::new(0.0);
        let rest = spring.animate_to(0.0, SpringConfig::default());

        assert_eq!(
            rest,
            Some(SpringRest {
                reached: 0.0,
                value: 0.0
            })
        );
        assert!(!spring.is_animating());
    }

    #[test]
    fn reset_on_rest() {
        let mut spring = Spring::new(0.0);
        spring.animate_to_then(1620.0, SpringConfig::default(), OnRest::ResetTo(0.0));

        spring.tick(1.0 / 60.0);
        assert!(spring.get() > 0.0);

        let rest = run(&mut spring, 20.0);
        assert_eq!(rest.map(|r| r.reached), Some(1620.0));
        assert_eq!(spring.get(), 0.0);
        assert_eq!(spring.target(), 0.0);
    }

    #[test]
    fn cancel_drops_rest_action() {
        let mut spring = Spring::new(0.0);
        spring.animate_to_then(100.0, SpringConfig::default(), OnRest::ResetTo(0.0));
        spring.tick(0.1);
        let mid = spring.get();

        spring.cancel();

        assert!(!spring.is_animating());
        assert_eq!(spring.get(), mid);
        assert_eq!(run(&mut spring, 1.0), None);
        assert_eq!(spring.get(), mid);
    }

    #[test]
    fn overshoot_clamping_stops_at_target() {
        let bouncy = SpringConfig {
            damping: 2.0,
            stiffness: 300.0,
            overshoot_clamping: true,
            ..SpringConfig::default()
        };
        let mut spring = Spring::new(0.0);
        spring.animate_to(1.0, bouncy);

        let mut max_value = 0.0f64;
        for _ in 0..120 {
            spring.tick(1.0 / 60.0);
            max_value = max_value.max(spring.get());
        }

        assert!(max_value <= 1.0, "clamped spring overshot: {max_value}");
        assert_eq!(spring.get(), 1.0);
    }

    #[test]
    fn bouncy_spring_overshoots_without_clamping() {
        let bouncy = SpringConfig {
            damping: 2.0,
            stiffness: 300.0,
            overshoot_clamping: false,
            ..SpringConfig::default()
        };
        let mut spring = Spring::new(0.0);
        spring.animate_to(1.0, bouncy);

        let mut max_value = 0.0f64;
        for _ in 0..60 {
            spring.tick(1.0 / 60.0);
            max_value = max_value.max(spring.get());
        }

        assert!(max_value > 1.0, "Bouncy spring should overshoot target");
    }

    #[test]
    fn retarget_replaces_animation() {
        let mut spring = Spring::new(0.0);
        spring.animate_to(100.0, SpringConfig::default());
        spring.tick(0.1);
        spring.animate_to(-50.0, SpringConfig::default());

        run(&mut spring, 20.0);
        assert_eq!(spring.get(), -50.0);
    }

    #[test]
    fn invalid_configs_are_flagged() {
        assert!(SpringConfig::default().is_valid());
        assert!(!SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        }
        .is_valid());
        assert!(!SpringConfig {
            stiffness: f64::NAN,
            ..SpringConfig::default()
        }
        .is_valid());
    }
}
