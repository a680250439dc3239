//! Pan gesture input for swipe-deck.
//!
//! Platform touch or pointer streams are converted to [`PanEvent`]s (a
//! begin, a series of cumulative translations, and a release or cancel) and
//! fed through a [`PanRecognizer`]. The recognizer withholds movement until
//! the translation leaves the activation window described by
//! [`ActivationOffsets`], so short jitters never reach the card engine and
//! wide windows on disabled directions leave the touch to outer handlers.
//!
//! ```text
//! Touch   ─┐
//! Pointer ─┼──► PanEvent ──► PanRecognizer ──► PanPhase ──► card engine
//! Replay  ─┘                      │
//!                                 ▼
//!                        ActivationOffsets
//! ```

mod direction;
mod event;
mod recognizer;

pub use direction::{Axis, SwipeDirection};
pub use event::{drag_to, PanEvent, Vec2};
pub use recognizer::{ActivationOffsets, GestureState, PanPhase, PanRecognizer};

/// Activation distance (pixels) for a direction that may be swiped.
pub const ENABLED_ACTIVE_OFFSET: f64 = 10.0;

/// Activation distance (pixels) for a direction whose swipe is disabled.
pub const DISABLED_ACTIVE_OFFSET: f64 = 200.0;
