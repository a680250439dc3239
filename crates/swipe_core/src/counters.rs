//! Deck-wide shared counters: the active index and the z-order counter.

use serde::{Deserialize, Serialize};

/// Which item is currently interactive.
///
/// Floating-point so callers may park it between items; only
/// `floor(value)` selects a card.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveIndex(f64);

impl ActiveIndex {
    pub const ZERO: ActiveIndex = ActiveIndex(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn floor(self) -> f64 {
        self.0.floor()
    }

    /// Card position selected by this index, `None` when negative or not finite.
    pub fn slot(self) -> Option<usize> {
        let floor = self.0.floor();
        (floor.is_finite() && floor >= 0.0).then_some(floor as usize)
    }

    /// Check if every card of a deck of `len` has been swiped.
    pub fn is_exhausted(self, len: usize) -> bool {
        self.0.floor() >= len as f64
    }

    pub(crate) fn advance(&mut self) {
        self.0 += 1.0;
    }

    /// Same value, treating NaN as equal to NaN.
    pub(crate) fn same_as(self, other: f64) -> bool {
        self.0 == other || (self.0.is_nan() && other.is_nan())
    }
}

/// The two counters every card of a deck shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeckCounters {
    /// Sole source of truth for the interactive card.
    pub active_index: ActiveIndex,
    /// Next z-index handed to a swiped card. Strictly decreasing.
    pub last_z_index: i64,
}

impl DeckCounters {
    /// Counters for a fresh deck of `len` items.
    pub fn new(len: usize) -> Self {
        Self {
            active_index: ActiveIndex::ZERO,
            last_z_index: -(len as i64 + 1),
        }
    }

    /// Take the current z-order value and decrement the counter.
    pub fn claim_z_index(&mut self) -> i64 {
        let z = self.last_z_index;
        self.last_z_index -= 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slot_selection() {
        assert_eq!(ActiveIndex::new(0.0).slot(), Some(0));
        assert_eq!(ActiveIndex::new(1.7).slot(), Some(1));
        assert_eq!(ActiveIndex::new(-0.5).slot(), None);
        assert_eq!(ActiveIndex::new(f64::NAN).slot(), None);
    }

    #[test]
    fn exhaustion() {
        assert!(!ActiveIndex::new(2.9).is_exhausted(3));
        assert!(ActiveIndex::new(3.0).is_exhausted(3));
        assert!(ActiveIndex::ZERO.is_exhausted(0));
    }

    #[test]
    fn z_order_starts_below_every_card() {
        let mut counters = DeckCounters::new(3);
        assert_eq!(counters.last_z_index, -4);

        assert_eq!(counters.claim_z_index(), -4);
        assert_eq!(counters.claim_z_index(), -5);
        assert_eq!(counters.last_z_index, -6);
    }

    proptest! {
        #[test]
        fn claimed_z_indices_strictly_decrease(len in 0usize..500, claims in 1usize..50) {
            let mut counters = DeckCounters::new(len);
            let mut previous = i64::MAX;
            for _ in 0..claims {
                let z = counters.claim_z_index();
                // below every initial card z-index (-index)
                prop_assert!(z < -(len as i64 - 1).max(0));
                prop_assert!(z < previous);
                previous = z;
            }
        }
    }
}
