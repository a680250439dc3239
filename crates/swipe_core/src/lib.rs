//! Card gesture engine and deck coordinator for swipe-deck.
//!
//! A [`Deck`] holds one [`CardMotion`] per item plus the two counters every
//! card shares ([`DeckCounters`]). All mutation goes through
//! [`Deck::execute`], which takes a [`DeckInput`] and returns the
//! [`DeckEffects`] it produced. Notifications for the caller's callbacks are
//! queued as [`DeckEvent`]s and drained by the coordination side.
//!
//! # Architecture
//!
//! ```text
//! PanEvent ──► PanRecognizer ──► CardMotion ──┐
//!                                             │  CardContext
//! SwipeCommand ─────────────────► CardMotion ─┼──► DeckCounters
//!                                             │     (active index, z-order)
//! tick(dt) ──► Spring::tick ──────────────────┘
//!                                             │
//!                          Deck::observe ◄────┘
//!                                │
//!                                ▼
//!                  DeckEvent queue ──► drain_events()
//! ```
//!
//! Gesture ownership is decided by snapshot-and-compare: a card snapshots
//! `floor(active index)` when the finger goes down and drops every later
//! event once the live index no longer matches. There is no lock.
//!
//! # Example
//!
//! ```
//! use swipe_core::{Deck, DeckEvent, SwiperOptions, Viewport};
//! use swipe_input::SwipeDirection;
//!
//! let viewport = Viewport::new(360.0, 720.0);
//! let mut deck = Deck::new(vec!["a", "b"], viewport, SwiperOptions::for_viewport(viewport)).unwrap();
//!
//! deck.swipe_right();
//! let events = deck.drain_events();
//! assert!(events.contains(&DeckEvent::Swiped { direction: SwipeDirection::Right, index: 0 }));
//! assert_eq!(deck.active_index().value(), 1.0);
//! ```

mod card;
mod counters;
mod deck;
mod effect;
mod error;
mod event;
mod frame;
mod options;
pub mod replay;

pub use card::{CardContext, CardMotion, CardPhase, GestureOutcome, SwipeCommand};
pub use counters::{ActiveIndex, DeckCounters};
pub use deck::{Deck, DeckInput, DeckSnapshot};
pub use effect::DeckEffects;
pub use error::DeckError;
pub use event::DeckEvent;
pub use frame::{CardFrame, OverlayLabels, RenderedCard};
pub use options::{
    DisabledSwipes, OpacityRange, OptionsOverrides, OverlayRangeOverrides, OverlayRanges,
    SpringProfileOverrides, SpringProfiles, SwiperOptions, Viewport,
};
pub use replay::{GestureLog, TimestampedInput};

/// A committed card is flung this many screen widths (or heights) away.
pub const FLING_DISTANCE_FACTOR: f64 = 1.5;

/// A vertical drag farther than this fraction of the screen height decides
/// the provisional target on the vertical axis.
pub const VERTICAL_DECISION_FRACTION: f64 = 1.0 / 3.0;
