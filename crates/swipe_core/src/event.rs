//! Notifications posted by the deck to the coordination context.

use serde::{Deserialize, Serialize};
use swipe_input::SwipeDirection;

/// Something the caller's callbacks should hear about.
///
/// Posted by the animation side, delivered in order to the coordination
/// side. Never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeckEvent {
    /// A drag began on some card.
    SwipeStart,
    /// A drag moved an owning card.
    SwipeActive,
    /// A drag with nonzero offsets was released.
    SwipeEnd,
    /// A card committed to `direction`.
    Swiped {
        direction: SwipeDirection,
        index: usize,
    },
    /// The active index took a new value.
    IndexChanged { index: f64 },
    /// Every card was swiped.
    Exhausted,
}

impl DeckEvent {
    /// Stable name, used in logs and callback errors.
    pub fn name(&self) -> &'static str {
        match self {
            DeckEvent::SwipeStart => "swipe_start",
            DeckEvent::SwipeActive => "swipe_active",
            DeckEvent::SwipeEnd => "swipe_end",
            DeckEvent::Swiped { direction, .. } => match direction {
                SwipeDirection::Left => "swiped_left",
                SwipeDirection::Right => "swiped_right",
                SwipeDirection::Top => "swiped_top",
                SwipeDirection::Bottom => "swiped_bottom",
            },
            DeckEvent::IndexChanged { .. } => "index_changed",
            DeckEvent::Exhausted => "swiped_all",
        }
    }

    /// Direction and card index for a commit.
    pub fn as_swipe(&self) -> Option<(SwipeDirection, usize)> {
        match *self {
            DeckEvent::Swiped { direction, index } => Some((direction, index)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let swiped = DeckEvent::Swiped {
            direction: SwipeDirection::Top,
            index: 2,
        };
        assert_eq!(swiped.name(), "swiped_top");
        assert_eq!(swiped.as_swipe(), Some((SwipeDirection::Top, 2)));
        assert_eq!(DeckEvent::Exhausted.name(), "swiped_all");
        assert_eq!(DeckEvent::SwipeEnd.as_swipe(), None);
    }

    #[test]
    fn serde_tagging() {
        let json = serde_json::to_string(&DeckEvent::Swiped {
            direction: SwipeDirection::Left,
            index: 0,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"swiped","direction":"left","index":0}"#);

        let back: DeckEvent = serde_json::from_str(r#"{"event":"index_changed","index":1.0}"#).unwrap();
        assert_eq!(back, DeckEvent::IndexChanged { index: 1.0 });
    }
}
