//! Render frames derived from card motion.
//!
//! Frames are computed on demand and never stored. Vertical offset is not
//! part of the transform: it only drives decisions and the top/bottom
//! overlay opacity.

use crate::card::CardMotion;
use crate::options::SwiperOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use swipe_input::SwipeDirection;
use swipe_motion::{interpolate, Extrapolation};

/// Transform for one card on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardFrame {
    pub index: usize,
    pub z_index: i64,
    pub translate_x: f64,
    /// Radians.
    pub rotation: f64,
}

impl CardFrame {
    pub fn of(card: &CardMotion, options: &SwiperOptions) -> Self {
        let x = card.offset_x();
        Self {
            index: card.index(),
            z_index: card.z_index(),
            translate_x: x,
            rotation: interpolate(
                x,
                &options.rotate_input_range,
                &options.rotate_output_range,
                Extrapolation::Clamp,
            ),
        }
    }
}

type LabelFn<O> = Box<dyn Fn(f64) -> O + Send + Sync>;

/// Optional overlay renderers, one per direction. Each takes the live
/// opacity.
pub struct OverlayLabels<O> {
    left: Option<LabelFn<O>>,
    right: Option<LabelFn<O>>,
    top: Option<LabelFn<O>>,
    bottom: Option<LabelFn<O>>,
}

impl<O> Default for OverlayLabels<O> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            top: None,
            bottom: None,
        }
    }
}

impl<O> fmt::Debug for OverlayLabels<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLabels")
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .field("top", &self.top.is_some())
            .field("bottom", &self.bottom.is_some())
            .finish()
    }
}

impl<O> OverlayLabels<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the renderer for `direction`.
    pub fn with(mut self, direction: SwipeDirection, label: impl Fn(f64) -> O + Send + Sync + 'static) -> Self {
        *self.slot_mut(direction) = Some(Box::new(label));
        self
    }

    pub fn left(self, label: impl Fn(f64) -> O + Send + Sync + 'static) -> Self {
        self.with(SwipeDirection::Left, label)
    }

    pub fn right(self, label: impl Fn(f64) -> O + Send + Sync + 'static) -> Self {
        self.with(SwipeDirection::Right, label)
    }

    pub fn top(self, label: impl Fn(f64) -> O + Send + Sync + 'static) -> Self {
        self.with(SwipeDirection::Top, label)
    }

    pub fn bottom(self, label: impl Fn(f64) -> O + Send + Sync + 'static) -> Self {
        self.with(SwipeDirection::Bottom, label)
    }

    /// Check if `direction` has a renderer.
    pub fn has(&self, direction: SwipeDirection) -> bool {
        self.slot(direction).is_some()
    }

    /// Render every supplied slot for `card`. Unsupplied slots are skipped.
    pub fn render(&self, card: &CardMotion, options: &SwiperOptions) -> Vec<(SwipeDirection, O)> {
        SwipeDirection::ALL
            .into_iter()
            .filter_map(|direction| {
                let label = self.slot(direction).as_ref()?;
                let offset = match direction {
                    SwipeDirection::Left | SwipeDirection::Right => card.offset_x(),
                    SwipeDirection::Top | SwipeDirection::Bottom => card.offset_y(),
                };
                let opacity = options.overlay_ranges.get(direction).opacity(offset);
                Some((direction, label(opacity)))
            })
            .collect()
    }

    fn slot(&self, direction: SwipeDirection) -> &Option<LabelFn<O>> {
        match direction {
            SwipeDirection::Left => &self.left,
            SwipeDirection::Right => &self.right,
            SwipeDirection::Top => &self.top,
            SwipeDirection::Bottom => &self.bottom,
        }
    }

    fn slot_mut(&mut self, direction: SwipeDirection) -> &mut Option<LabelFn<O>> {
        match direction {
            SwipeDirection::Left => &mut self.left,
            SwipeDirection::Right => &mut self.right,
            SwipeDirection::Top => &mut self.top,
            SwipeDirection::Bottom => &mut self.bottom,
        }
    }
}

/// One card ready to draw: its frame, the caller's content and overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard<R, O> {
    pub frame: CardFrame,
    pub content: R,
    pub overlays: Vec<(SwipeDirection, O)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Viewport;
    use std::f64::consts::PI;

    fn options() -> SwiperOptions {
        SwiperOptions::for_viewport(Viewport::new(360.0, 720.0))
    }

    #[test]
    fn resting_frame() {
        let card = CardMotion::new(2, &options());
        let frame = CardFrame::of(&card, &options());

        assert_eq!(frame.index, 2);
        assert_eq!(frame.z_index, -2);
        assert_eq!(frame.translate_x, 0.0);
        assert_eq!(frame.rotation, 0.0);
    }

    #[test]
    fn overlays_render_only_supplied_slots() {
        let labels = OverlayLabels::new()
            .right(|opacity| format!("LIKE {opacity:.1}"))
            .top(|opacity| format!("SUPER {opacity:.1}"));
        let card = CardMotion::new(0, &options());

        let rendered = labels.render(&card, &options());

        assert_eq!(
            rendered,
            vec![
                (SwipeDirection::Right, "LIKE 0.0".to_string()),
                (SwipeDirection::Top, "SUPER 0.0".to_string()),
            ]
        );
        assert!(!labels.has(SwipeDirection::Left));
        assert!(format!("{labels:?}").contains("right: true"));
    }

    #[test]
    fn rotation_range_is_clamped() {
        let options = options();
        let rotation = interpolate(
            1000.0,
            &options.rotate_input_range,
            &options.rotate_output_range,
            Extrapolation::Clamp,
        );
        assert_eq!(rotation, PI / 20.0);
    }
}
