//! swipe-deck: a headless stack of swipeable cards.
//!
//! Raw drags become discrete swipe outcomes (left, right, top, bottom), the
//! deck's active index advances, and render frames expose translation,
//! rotation and overlay opacity for whatever draws the cards.
//!
//! The workspace is layered leaves first:
//!
//! - [`swipe_motion`]: springs and range interpolation
//! - [`swipe_input`]: pan events, the recognizer, swipe directions
//! - [`swipe_core`]: the card gesture engine and the deck coordinator
//!
//! This crate adds the application edge: caller [`callbacks`], the tokio
//! [`runtime`] that splits animation from coordination, and YAML
//! [`config`] loading.
//!
//! # Example
//!
//! ```no_run
//! use swipe_deck::{spawn_deck, ConfigLoader, Deck, DeckCallbacks};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConfigLoader::from_env().load()?;
//! let deck = Deck::new(vec!["alice", "bob"], config.viewport, config.swiper_options()?)?;
//! let callbacks = DeckCallbacks::new().on_swipe_right(|index| {
//!     println!("liked {index}");
//!     Ok(())
//! });
//!
//! let runtime = spawn_deck(deck, callbacks, config.frame_interval());
//! runtime.handle.swipe_right();
//! drop(runtime.handle);
//! runtime.coordination.await??;
//! # Ok(())
//! # }
//! ```

pub mod callbacks;
pub mod config;
pub mod runtime;

pub use callbacks::{CallbackError, DeckCallbacks};
pub use config::{ConfigLoader, DeckConfig};
pub use runtime::{spawn_deck, CardHandle, DeckRuntime, RuntimeClosed, SwiperHandle};

pub use swipe_core::{
    CardFrame, Deck, DeckEffects, DeckError, DeckEvent, DeckInput, DeckSnapshot, GestureLog,
    OverlayLabels, RenderedCard, SwipeCommand, SwiperOptions, Viewport,
};
pub use swipe_input::{PanEvent, SwipeDirection, Vec2};

pub use swipe_core;
pub use swipe_input;
pub use swipe_motion;
