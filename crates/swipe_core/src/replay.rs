//! Gesture replay for deterministic deck reconstruction.
//!
//! A [`GestureLog`] records every deck input with its frame tick. Given the
//! same items and options, replay always produces the same active index,
//! z-order, offsets and notifications. Useful for:
//! - reproducing a user session while debugging
//! - scripted scenarios in tests and the `swipe-replay` tool

use crate::deck::{Deck, DeckInput};
use crate::error::DeckError;
use crate::options::{SwiperOptions, Viewport};
use serde::{Deserialize, Serialize};

/// A deck input with the frame tick it arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedInput {
    pub tick: u64,
    pub input: DeckInput,
}

impl TimestampedInput {
    pub fn new(tick: u64, input: DeckInput) -> Self {
        Self { tick, input }
    }
}

/// Log of deck inputs for replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureLog {
    pub session_id: u64,
    /// Screen the session ran against.
    pub viewport: Viewport,
    pub events: Vec<TimestampedInput>,
}

impl GestureLog {
    pub fn new(session_id: u64, viewport: Viewport) -> Self {
        Self {
            session_id,
            viewport,
            events: Vec::new(),
        }
    }

    /// Record an input.
    pub fn record(&mut self, tick: u64, input: DeckInput) {
        // empty frames change nothing
        if matches!(input, DeckInput::Tick { dt } if dt <= 0.0) {
            return;
        }
        self.events.push(TimestampedInput::new(tick, input));
    }

    /// Replay every input into a fresh deck.
    pub fn replay<T>(&self, items: Vec<T>, options: SwiperOptions) -> Result<Deck<T>, DeckError> {
        self.replay_while(items, options, |_| true)
    }

    /// Replay inputs up to and including `target_tick`.
    pub fn replay_to<T>(
        &self,
        items: Vec<T>,
        options: SwiperOptions,
        target_tick: u64,
    ) -> Result<Deck<T>, DeckError> {
        self.replay_while(items, options, |tick| tick <= target_tick)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn replay_while<T>(
        &self,
        items: Vec<T>,
        options: SwiperOptions,
        keep: impl Fn(u64) -> bool,
    ) -> Result<Deck<T>, DeckError> {
        let mut deck = Deck::new(items, self.viewport, options)?;
        for event in self.events.iter().take_while(|event| keep(event.tick)) {
            deck.execute(event.input)?;
        }
        Ok(deck)
    }
}
