//! Effect flags - what a deck input changed.
//!
//! Every [`Deck::execute`](crate::Deck::execute) call returns a
//! [`DeckEffects`] set. The caller checks the flags to decide whether to
//! redraw, keep the frame clock running, or drain notifications.

use bitflags::bitflags;

bitflags! {
    /// Set of effects produced by one deck input.
    ///
    /// ```
    /// use swipe_core::DeckEffects;
    ///
    /// let effects = DeckEffects::COMMITTED | DeckEffects::ANIMATION_STARTED;
    ///
    /// assert!(effects.needs_redraw());
    /// assert!(effects.keeps_animating());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeckEffects: u16 {
        /// Nothing changed.
        const NONE = 0;

        // =====================================================================
        // MOTION
        // =====================================================================

        /// A card offset moved (drag or spring step).
        const OFFSETS_CHANGED = 1 << 0;

        /// A spring animation started or restarted.
        const ANIMATION_STARTED = 1 << 1;

        /// A spring animation came to rest this input.
        const ANIMATION_SETTLED = 1 << 2;

        // =====================================================================
        // GESTURE OUTCOMES
        // =====================================================================

        /// Input was dropped (not owner, disabled direction, zero offsets).
        const GESTURE_IGNORED = 1 << 3;

        /// A swipe committed.
        const COMMITTED = 1 << 4;

        /// A card is springing back to centre.
        const RECOVERING = 1 << 5;

        // =====================================================================
        // DECK
        // =====================================================================

        /// A card took a new z-index.
        const Z_ORDER_CHANGED = 1 << 6;

        /// The active index changed.
        const INDEX_CHANGED = 1 << 7;

        /// Every card was swiped; the index looped to 0.
        const EXHAUSTED = 1 << 8;

        /// Notifications are waiting in the queue.
        const NOTIFIED = 1 << 9;
    }
}

impl Default for DeckEffects {
    fn default() -> Self {
        DeckEffects::NONE
    }
}

impl DeckEffects {
    /// Check if anything visible changed.
    pub fn needs_redraw(&self) -> bool {
        self.intersects(
            DeckEffects::OFFSETS_CHANGED
                | DeckEffects::ANIMATION_STARTED
                | DeckEffects::ANIMATION_SETTLED
                | DeckEffects::Z_ORDER_CHANGED,
        )
    }

    /// Check if the frame clock should keep ticking.
    pub fn keeps_animating(&self) -> bool {
        self.intersects(DeckEffects::ANIMATION_STARTED | DeckEffects::RECOVERING)
    }

    /// Check if the input committed a swipe.
    pub fn committed(&self) -> bool {
        self.contains(DeckEffects::COMMITTED)
    }

    /// Check if the active index moved.
    pub fn index_changed(&self) -> bool {
        self.intersects(DeckEffects::INDEX_CHANGED | DeckEffects::EXHAUSTED)
    }
}
