//! Swipe directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction a card leaves the deck in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl SwipeDirection {
    /// All four directions, in overlay slot order.
    pub const ALL: [SwipeDirection; 4] = [
        SwipeDirection::Left,
        SwipeDirection::Right,
        SwipeDirection::Top,
        SwipeDirection::Bottom,
    ];

    /// Axis this direction moves along.
    pub fn axis(self) -> Axis {
        match self {
            SwipeDirection::Left | SwipeDirection::Right => Axis::Horizontal,
            SwipeDirection::Top | SwipeDirection::Bottom => Axis::Vertical,
        }
    }

    /// Sign of the offset when moving this way (screen coordinates, y down).
    pub fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left | SwipeDirection::Top => -1.0,
            SwipeDirection::Right | SwipeDirection::Bottom => 1.0,
        }
    }

    /// Horizontal direction for a signed delta, `None` at zero.
    pub fn horizontal(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(SwipeDirection::Right)
        } else if delta < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    /// Vertical direction for a signed delta, `None` at zero.
    pub fn vertical(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(SwipeDirection::Bottom)
        } else if delta < 0.0 {
            Some(SwipeDirection::Top)
        } else {
            None
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Top => "top",
            SwipeDirection::Bottom => "bottom",
        };
        f.write_str(name)
    }
}
