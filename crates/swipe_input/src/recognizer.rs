//! Pan gesture recognition with per-direction activation offsets.

use crate::direction::SwipeDirection;
use crate::event::{PanEvent, Vec2};
use crate::{DISABLED_ACTIVE_OFFSET, ENABLED_ACTIVE_OFFSET};
use serde::{Deserialize, Serialize};

/// State of gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Undetermined,
    /// Finger is down but has not left the activation window.
    Began,
    /// Gesture recognized; movement is being delivered.
    Active,
    /// Gesture finished with a release.
    Ended,
    /// Gesture cancelled by the platform.
    Cancelled,
}

/// What the recognizer hands to the consumer for an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanPhase {
    /// Finger went down.
    Begin,
    /// Movement after activation.
    Update(Vec2),
    /// The gesture is over. `activated` is false if movement never left
    /// the activation window or the platform cancelled the touch early.
    Finalize { translation: Vec2, activated: bool },
}

/// Activation window, one signed distance per direction.
///
/// Movement strictly inside the window is withheld. `left` and `top` are
/// negative, `right` and `bottom` positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationOffsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for ActivationOffsets {
    fn default() -> Self {
        Self::with_disabled(|_| false)
    }
}

impl ActivationOffsets {
    /// Narrow window for enabled directions, wide for disabled ones.
    pub fn with_disabled(disabled: impl Fn(SwipeDirection) -> bool) -> Self {
        let offset = |direction: SwipeDirection| {
            let distance = if disabled(direction) {
                DISABLED_ACTIVE_OFFSET
            } else {
                ENABLED_ACTIVE_OFFSET
            };
            distance * direction.sign()
        };
        Self {
            left: offset(SwipeDirection::Left),
            right: offset(SwipeDirection::Right),
            top: offset(SwipeDirection::Top),
            bottom: offset(SwipeDirection::Bottom),
        }
    }

    /// Check if a cumulative translation leaves the window.
    pub fn activates(&self, t: Vec2) -> bool {
        t.x <= self.left || t.x >= self.right || t.y <= self.top || t.y >= self.bottom
    }
}

/// Recognizer for a single-finger pan.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    offsets: ActivationOffsets,
    state: GestureState,
}

impl PanRecognizer {
    /// Create a recognizer with the given activation window.
    pub fn new(offsets: ActivationOffsets) -> Self {
        Self {
            offsets,
            state: GestureState::Undetermined,
        }
    }

    /// Get current gesture state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Activation window in use.
    pub fn offsets(&self) -> ActivationOffsets {
        self.offsets
    }

    /// Check if a gesture is between begin and finalize.
    pub fn in_progress(&self) -> bool {
        matches!(self.state, GestureState::Began | GestureState::Active)
    }

    /// Feed one event. Returns the phase to deliver, if any.
    pub fn handle(&mut self, event: PanEvent) -> Option<PanPhase> {
        match event {
            PanEvent::Begin => {
                self.state = GestureState::Began;
                Some(PanPhase::Begin)
            }
            PanEvent::Update { translation } => match self.state {
                GestureState::Began if self.offsets.activates(translation) => {
                    self.state = GestureState::Active;
                    Some(PanPhase::Update(translation))
                }
                GestureState::Active => Some(PanPhase::Update(translation)),
                _ => None,
            },
            PanEvent::End { translation } => self.finish(translation, GestureState::Ended),
            PanEvent::Cancel { translation } => self.finish(translation, GestureState::Cancelled),
        }
    }

    /// Reset the recognizer.
    pub fn reset(&mut self) {
        self.state = GestureState::Undetermined;
    }

    fn finish(&mut self, translation: Vec2, next: GestureState) -> Option<PanPhase> {
        if !self.in_progress() {
            return None;
        }
        let activated = self.state == GestureState::Active;
        self.state = next;
        Some(PanPhase::Finalize {
            translation,
            activated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_drag_never_activates() {
        let mut recognizer = PanRecognizer::default();

        assert_eq!(recognizer.handle(PanEvent::Begin), Some(PanPhase::Begin));
        assert_eq!(recognizer.handle(PanEvent::update(5.0, 0.0)), None);
        assert_eq!(recognizer.state(), GestureState::Began);

        let phase = recognizer.handle(PanEvent::end(5.0, 0.0));
        assert_eq!(
            phase,
            Some(PanPhase::Finalize {
                translation: Vec2::new(5.0, 0.0),
                activated: false
            })
        );
        assert_eq!(recognizer.state(), GestureState::Ended);
    }

    #[test]
    fn drag_activates_past_offset() {
        let mut recognizer = PanRecognizer::default();
        recognizer.handle(PanEvent::Begin);

        let phase = recognizer.handle(PanEvent::update(40.0, 2.0));

        assert_eq!(phase, Some(PanPhase::Update(Vec2::new(40.0, 2.0))));
        assert_eq!(recognizer.state(), GestureState::Active);

        // once active, small movement is delivered too
        let phase = recognizer.handle(PanEvent::update(1.0, 0.0));
        assert_eq!(phase, Some(PanPhase::Update(Vec2::new(1.0, 0.0))));
    }

    #[test]
    fn vertical_drag_activates() {
        let mut recognizer = PanRecognizer::default();
        recognizer.handle(PanEvent::Begin);
        assert!(recognizer.handle(PanEvent::update(0.0, -30.0)).is_some());
    }

    #[test]
    fn disabled_direction_widens_window() {
        let offsets = ActivationOffsets::with_disabled(|d| d == SwipeDirection::Left);
        assert_eq!(offsets.left, -DISABLED_ACTIVE_OFFSET);
        assert_eq!(offsets.right, ENABLED_ACTIVE_OFFSET);

        let mut recognizer = PanRecognizer::new(offsets);
        recognizer.handle(PanEvent::Begin);
        assert_eq!(recognizer.handle(PanEvent::update(-150.0, 0.0)), None);
        assert!(recognizer.handle(PanEvent::update(-210.0, 0.0)).is_some());
    }

    #[test]
    fn events_without_begin_are_dropped() {
        let mut recognizer = PanRecognizer::default();
        assert_eq!(recognizer.handle(PanEvent::update(50.0, 0.0)), None);
        assert_eq!(recognizer.handle(PanEvent::end(50.0, 0.0)), None);
    }

    #[test]
    fn cancel_finalizes() {
        let mut recognizer = PanRecognizer::default();
        recognizer.handle(PanEvent::Begin);
        recognizer.handle(PanEvent::update(50.0, 0.0));

        let phase = recognizer.handle(PanEvent::cancel(50.0, 0.0));

        assert!(matches!(
            phase,
            Some(PanPhase::Finalize {
                activated: true,
                ..
            })
        ));
        assert_eq!(recognizer.state(), GestureState::Cancelled);
        assert!(!recognizer.in_progress());
    }

    proptest! {
        #[test]
        fn inside_window_is_withheld(x in -9.9f64..9.9, y in -9.9f64..9.9) {
            let mut recognizer = PanRecognizer::default();
            recognizer.handle(PanEvent::Begin);
            prop_assert_eq!(recognizer.handle(PanEvent::update(x, y)), None);
        }
    }
}
