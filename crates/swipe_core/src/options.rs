//! Deck options: commit ranges, rotation, overlay opacity, disable flags and
//! spring profiles.
//!
//! Defaults depend on the screen, so options are built with
//! [`SwiperOptions::for_viewport`] and then adjusted, either field by field
//! or by applying [`OptionsOverrides`] loaded from configuration.

use crate::error::DeckError;
use crate::FLING_DISTANCE_FACTOR;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use swipe_input::{ActivationOffsets, SwipeDirection};
use swipe_motion::{interpolate, Extrapolation, SpringConfig};

/// Screen dimensions the deck lays out against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Off-screen offset a card is flung to in `direction`.
    pub fn fling_offset(&self, direction: SwipeDirection) -> f64 {
        let extent = match direction {
            SwipeDirection::Left | SwipeDirection::Right => self.width,
            SwipeDirection::Top | SwipeDirection::Bottom => self.height,
        };
        direction.sign() * extent * FLING_DISTANCE_FACTOR
    }
}

/// One boolean per direction; a disabled direction never commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisabledSwipes {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl DisabledSwipes {
    pub fn contains(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
            SwipeDirection::Top => self.top,
            SwipeDirection::Bottom => self.bottom,
        }
    }

    /// Disable one more direction.
    pub fn with(mut self, direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => self.left = true,
            SwipeDirection::Right => self.right = true,
            SwipeDirection::Top => self.top = true,
            SwipeDirection::Bottom => self.bottom = true,
        }
        self
    }

    /// Recognizer activation window matching these flags.
    pub fn activation_offsets(&self) -> ActivationOffsets {
        ActivationOffsets::with_disabled(|direction| self.contains(direction))
    }
}

/// Spring profiles for recovery and for each commit direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringProfiles {
    pub back_x: SpringConfig,
    pub back_y: SpringConfig,
    pub right: SpringConfig,
    pub left: SpringConfig,
    pub top: SpringConfig,
    pub bottom: SpringConfig,
}

impl SpringProfiles {
    /// Profile used to fling a card out in `direction`.
    pub fn for_direction(&self, direction: SwipeDirection) -> SpringConfig {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
            SwipeDirection::Top => self.top,
            SwipeDirection::Bottom => self.bottom,
        }
    }

    fn named(&self) -> [(&'static str, SpringConfig); 6] {
        [
            ("back_x", self.back_x),
            ("back_y", self.back_y),
            ("right", self.right),
            ("left", self.left),
            ("top", self.top),
            ("bottom", self.bottom),
        ]
    }
}

/// Input → output mapping for one overlay label's opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityRange {
    pub input: [f64; 2],
    pub output: [f64; 2],
}

impl OpacityRange {
    pub fn new(input: [f64; 2], output: [f64; 2]) -> Self {
        Self { input, output }
    }

    /// Opacity for an offset, clamped to the output range.
    pub fn opacity(&self, offset: f64) -> f64 {
        interpolate(offset, &self.input, &self.output, Extrapolation::Clamp)
    }
}

/// Opacity ranges for the four overlay slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRanges {
    pub left: OpacityRange,
    pub right: OpacityRange,
    pub top: OpacityRange,
    pub bottom: OpacityRange,
}

impl OverlayRanges {
    /// Fully opaque a third of the screen away, in each direction.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let x = viewport.width / 3.0;
        let y = viewport.height / 3.0;
        Self {
            left: OpacityRange::new([0.0, -x], [0.0, 1.0]),
            right: OpacityRange::new([0.0, x], [0.0, 1.0]),
            top: OpacityRange::new([0.0, -y], [0.0, 1.0]),
            bottom: OpacityRange::new([0.0, y], [0.0, 1.0]),
        }
    }

    pub fn get(&self, direction: SwipeDirection) -> &OpacityRange {
        match direction {
            SwipeDirection::Left => &self.left,
            SwipeDirection::Right => &self.right,
            SwipeDirection::Top => &self.top,
            SwipeDirection::Bottom => &self.bottom,
        }
    }
}

/// Everything configurable about a deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwiperOptions {
    /// Horizontal commit range `[-x, 0, x]`.
    pub translate_x_range: [f64; 3],
    /// Vertical commit range `[-y, 0, y]`.
    pub translate_y_range: [f64; 3],
    pub rotate_input_range: [f64; 3],
    /// Rotation in radians.
    pub rotate_output_range: [f64; 3],
    pub overlay_ranges: OverlayRanges,
    pub disabled: DisabledSwipes,
    pub springs: SpringProfiles,
}

impl Default for SwiperOptions {
    fn default() -> Self {
        Self::for_viewport(Viewport::default())
    }
}

impl SwiperOptions {
    /// Defaults scaled to the screen.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let x = viewport.width / 3.0;
        let y = viewport.height / 3.0;
        Self {
            translate_x_range: [-x, 0.0, x],
            translate_y_range: [-y, 0.0, y],
            rotate_input_range: [-x, 0.0, x],
            rotate_output_range: [-PI / 20.0, 0.0, PI / 20.0],
            overlay_ranges: OverlayRanges::for_viewport(viewport),
            disabled: DisabledSwipes::default(),
            springs: SpringProfiles::default(),
        }
    }

    /// Disable swiping in `direction`.
    pub fn disable(mut self, direction: SwipeDirection) -> Self {
        self.disabled = self.disabled.with(direction);
        self
    }

    /// Use `config` for every spring profile.
    pub fn with_springs(mut self, config: SpringConfig) -> Self {
        self.springs = SpringProfiles {
            back_x: config,
            back_y: config,
            right: config,
            left: config,
            top: config,
            bottom: config,
        };
        self
    }

    /// Check that every range is finite and every spring usable.
    pub fn validate(&self) -> Result<(), DeckError> {
        let ranges: [(&str, &[f64]); 4] = [
            ("translate_x_range", &self.translate_x_range),
            ("translate_y_range", &self.translate_y_range),
            ("rotate_input_range", &self.rotate_input_range),
            ("rotate_output_range", &self.rotate_output_range),
        ];
        for (field, values) in ranges {
            check_finite(field, values)?;
        }

        for direction in SwipeDirection::ALL {
            let range = self.overlay_ranges.get(direction);
            check_finite(&format!("overlay_ranges.{direction}.input"), &range.input)?;
            check_finite(&format!("overlay_ranges.{direction}.output"), &range.output)?;
        }

        for (name, spring) in self.springs.named() {
            if !spring.is_valid() {
                return Err(DeckError::invalid(
                    format!("springs.{name}"),
                    "stiffness and mass must be positive, damping and thresholds non-negative",
                ));
            }
        }

        Ok(())
    }
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), DeckError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DeckError::invalid(field, "values must be finite"))
    }
}

/// Partial overlay ranges; unset slots keep the base value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayRangeOverrides {
    pub left: Option<OpacityRange>,
    pub right: Option<OpacityRange>,
    pub top: Option<OpacityRange>,
    pub bottom: Option<OpacityRange>,
}

/// Partial spring profiles; unset profiles keep the base value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringProfileOverrides {
    pub back_x: Option<SpringConfig>,
    pub back_y: Option<SpringConfig>,
    pub right: Option<SpringConfig>,
    pub left: Option<SpringConfig>,
    pub top: Option<SpringConfig>,
    pub bottom: Option<SpringConfig>,
}

/// Sparse options as read from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverrides {
    pub translate_x_range: Option<[f64; 3]>,
    pub translate_y_range: Option<[f64; 3]>,
    pub rotate_input_range: Option<[f64; 3]>,
    pub rotate_output_range: Option<[f64; 3]>,
    pub overlay_ranges: OverlayRangeOverrides,
    pub disabled: Option<DisabledSwipes>,
    pub springs: SpringProfileOverrides,
}

impl OptionsOverrides {
    /// Layer these overrides on top of `base`.
    pub fn apply(&self, base: SwiperOptions) -> SwiperOptions {
        let overlays = &self.overlay_ranges;
        let springs = &self.springs;
        SwiperOptions {
            translate_x_range: self.translate_x_range.unwrap_or(base.translate_x_range),
            translate_y_range: self.translate_y_range.unwrap_or(base.translate_y_range),
            rotate_input_range: self.rotate_input_range.unwrap_or(base.rotate_input_range),
            rotate_output_range: self.rotate_output_range.unwrap_or(base.rotate_output_range),
            overlay_ranges: OverlayRanges {
                left: overlays.left.unwrap_or(base.overlay_ranges.left),
                right: overlays.right.unwrap_or(base.overlay_ranges.right),
                top: overlays.top.unwrap_or(base.overlay_ranges.top),
                bottom: overlays.bottom.unwrap_or(base.overlay_ranges.bottom),
            },
            disabled: self.disabled.unwrap_or(base.disabled),
            springs: SpringProfiles {
                back_x: springs.back_x.unwrap_or(base.springs.back_x),
                back_y: springs.back_y.unwrap_or(base.springs.back_y),
                right: springs.right.unwrap_or(base.springs.right),
                left: springs.left.unwrap_or(base.springs.left),
                top: springs.top.unwrap_or(base.springs.top),
                bottom: springs.bottom.unwrap_or(base.springs.bottom),
            },
        }
    }
}
