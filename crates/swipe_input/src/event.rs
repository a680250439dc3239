//! Raw pan events.

use serde::{Deserialize, Serialize};

/// 2D vector in screen pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Single-finger pan event.
///
/// Translations are cumulative from the point where the finger went down,
/// not per-frame deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanEvent {
    /// Finger down.
    Begin,
    /// Finger moved.
    Update { translation: Vec2 },
    /// Finger lifted.
    End { translation: Vec2 },
    /// The platform took the touch away (e.g. an outer scroll view).
    Cancel { translation: Vec2 },
}

impl PanEvent {
    /// Update event at `(x, y)`.
    pub fn update(x: f64, y: f64) -> Self {
        PanEvent::Update {
            translation: Vec2::new(x, y),
        }
    }

    /// Release event at `(x, y)`.
    pub fn end(x: f64, y: f64) -> Self {
        PanEvent::End {
            translation: Vec2::new(x, y),
        }
    }

    /// Cancel event at `(x, y)`.
    pub fn cancel(x: f64, y: f64) -> Self {
        PanEvent::Cancel {
            translation: Vec2::new(x, y),
        }
    }

    /// Translation carried by the event, if any.
    pub fn translation(&self) -> Option<Vec2> {
        match self {
            PanEvent::Begin => None,
            PanEvent::Update { translation }
            | PanEvent::End { translation }
            | PanEvent::Cancel { translation } => Some(*translation),
        }
    }

    /// Check if this event ends the gesture.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PanEvent::End { .. } | PanEvent::Cancel { .. })
    }
}

/// A drag from the origin to `(x, y)`: begin, `steps` evenly spaced updates,
/// then release at the final point.
///
/// Convenient for tests and scripted replays.
pub fn drag_to(x: f64, y: f64, steps: usize) -> Vec<PanEvent> {
    let steps = steps.max(1);
    let mut events = Vec::with_capacity(steps + 2);
    events.push(PanEvent::Begin);
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        events.push(PanEvent::update(x * t, y * t));
    }
    events.push(PanEvent::end(x, y));
    events
}
