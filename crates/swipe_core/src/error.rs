//! Deck errors.
//!
//! Gestures never fail: a drag commits, recovers or is silently ignored.
//! The only failures are caller mistakes at the API boundary.

use thiserror::Error;

/// Error raised by deck construction or addressing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeckError {
    /// A per-card command or pan addressed a card that doesn't exist.
    #[error("Card {index} out of range: deck has {len} cards")]
    CardOutOfRange { index: usize, len: usize },

    /// An option value can't drive interpolation or springs.
    #[error("Invalid option {field}: {reason}")]
    InvalidOption { field: String, reason: String },
}

impl DeckError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DeckError::InvalidOption {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from configuration rather than addressing.
    pub fn is_config(&self) -> bool {
        matches!(self, DeckError::InvalidOption { .. })
    }
}
