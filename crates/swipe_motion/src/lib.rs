//! Animated values for swipe-deck.
//!
//! This crate provides the two numeric building blocks the card engine drives
//! every frame:
//!
//! 1. **Springs** - [`Spring`] moves a value toward a target using a
//!    damping/stiffness/mass profile ([`SpringConfig`]), with optional
//!    overshoot clamping and rest thresholds.
//! 2. **Interpolation** - [`interpolate`] maps a value through a piecewise
//!    linear input → output range, with [`Extrapolation`] at the edges.
//!
//! # Frame Loop
//!
//! ```text
//! drag delta ──► Spring::set_immediate ─┐
//! command    ──► Spring::animate_to    ─┼──► Spring::tick(dt) ──► get()
//!                                       │                          │
//!                                       ▼                          ▼
//!                                   OnRest action            interpolate()
//! ```
//!
//! Values are polled each frame; nothing here calls back into the caller.
//!
//! # Example
//!
//! ```
//! use swipe_motion::{Spring, SpringConfig};
//!
//! let mut offset = Spring::new(0.0);
//! offset.animate_to(100.0, SpringConfig::default());
//! for _ in 0..1200 {
//!     offset.tick(1.0 / 60.0);
//! }
//! assert_eq!(offset.get(), 100.0);
//! ```

mod interpolate;
mod spring;

pub use interpolate::{interpolate, is_integral, Extrapolation};
pub use spring::{OnRest, Spring, SpringConfig, SpringRest};

/// Default spring damping coefficient.
pub const DEFAULT_DAMPING: f64 = 20.0;

/// Default spring stiffness.
pub const DEFAULT_STIFFNESS: f64 = 50.0;

/// Default spring mass.
pub const DEFAULT_MASS: f64 = 1.0;

/// Default rest threshold for both displacement and speed.
pub const DEFAULT_REST_THRESHOLD: f64 = 0.0001;

/// Largest integration step (seconds). Longer frames are subdivided.
pub const MAX_INTEGRATION_STEP: f64 = 1.0 / 240.0;

/// Longest frame a single `tick` will honour (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;
