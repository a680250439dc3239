//! Caller callbacks, run on the coordination side.
//!
//! Every callback is optional and fallible. The first failure stops
//! dispatch and comes back as a [`CallbackError`].

use std::fmt;
use swipe_core::DeckEvent;
use swipe_input::SwipeDirection;
use thiserror::Error;
use tracing::debug;

type IndexCallback = Box<dyn FnMut(usize) -> anyhow::Result<()> + Send>;
type ValueCallback = Box<dyn FnMut(f64) -> anyhow::Result<()> + Send>;
type UnitCallback = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

/// A callback returned an error.
#[derive(Debug, Error)]
#[error("Callback for {event} failed: {source}")]
pub struct CallbackError {
    /// Name of the notification being delivered.
    pub event: &'static str,
    #[source]
    pub source: anyhow::Error,
}

/// Optional handlers for each deck notification.
#[derive(Default)]
pub struct DeckCallbacks {
    on_swipe_left: Option<IndexCallback>,
    on_swipe_right: Option<IndexCallback>,
    on_swipe_top: Option<IndexCallback>,
    on_swipe_bottom: Option<IndexCallback>,
    on_swiped_all: Option<UnitCallback>,
    on_index_change: Option<ValueCallback>,
    on_swipe_start: Option<UnitCallback>,
    on_swipe_active: Option<UnitCallback>,
    on_swipe_end: Option<UnitCallback>,
}

impl fmt::Debug for DeckCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckCallbacks")
            .field("on_swipe_left", &self.on_swipe_left.is_some())
            .field("on_swipe_right", &self.on_swipe_right.is_some())
            .field("on_swipe_top", &self.on_swipe_top.is_some())
            .field("on_swipe_bottom", &self.on_swipe_bottom.is_some())
            .field("on_swiped_all", &self.on_swiped_all.is_some())
            .field("on_index_change", &self.on_index_change.is_some())
            .field("on_swipe_start", &self.on_swipe_start.is_some())
            .field("on_swipe_active", &self.on_swipe_active.is_some())
            .field("on_swipe_end", &self.on_swipe_end.is_some())
            .finish()
    }
}

impl DeckCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_left(mut self, f: impl FnMut(usize) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_left = Some(Box::new(f));
        self
    }

    pub fn on_swipe_right(mut self, f: impl FnMut(usize) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_right = Some(Box::new(f));
        self
    }

    pub fn on_swipe_top(mut self, f: impl FnMut(usize) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_top = Some(Box::new(f));
        self
    }

    pub fn on_swipe_bottom(mut self, f: impl FnMut(usize) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_bottom = Some(Box::new(f));
        self
    }

    pub fn on_swiped_all(mut self, f: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swiped_all = Some(Box::new(f));
        self
    }

    pub fn on_index_change(mut self, f: impl FnMut(f64) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_index_change = Some(Box::new(f));
        self
    }

    pub fn on_swipe_start(mut self, f: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_start = Some(Box::new(f));
        self
    }

    pub fn on_swipe_active(mut self, f: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_active = Some(Box::new(f));
        self
    }

    pub fn on_swipe_end(mut self, f: impl FnMut() -> anyhow::Result<()> + Send + 'static) -> Self {
        self.on_swipe_end = Some(Box::new(f));
        self
    }

    /// Deliver one notification to its handler, if any.
    pub fn dispatch(&mut self, event: &DeckEvent) -> Result<(), CallbackError> {
        debug!(event = event.name(), "dispatching");
        let result = match *event {
            DeckEvent::Swiped { direction, index } => {
                let slot = match direction {
                    SwipeDirection::Left => &mut self.on_swipe_left,
                    SwipeDirection::Right => &mut self.on_swipe_right,
                    SwipeDirection::Top => &mut self.on_swipe_top,
                    SwipeDirection::Bottom => &mut self.on_swipe_bottom,
                };
                slot.as_mut().map_or(Ok(()), |f| f(index))
            }
            DeckEvent::IndexChanged { index } => {
                self.on_index_change.as_mut().map_or(Ok(()), |f| f(index))
            }
            DeckEvent::Exhausted => call(&mut self.on_swiped_all),
            DeckEvent::SwipeStart => call(&mut self.on_swipe_start),
            DeckEvent::SwipeActive => call(&mut self.on_swipe_active),
            DeckEvent::SwipeEnd => call(&mut self.on_swipe_end),
        };
        result.map_err(|source| CallbackError {
            event: event.name(),
            source,
        })
    }

    /// Deliver notifications in order, stopping at the first failure.
    pub fn dispatch_all<'a>(&mut self, events: impl IntoIterator<Item = &'a DeckEvent>) -> Result<(), CallbackError> {
        for event in events {
            self.dispatch(event)?;
        }
        Ok(())
    }
}

fn call(slot: &mut Option<UnitCallback>) -> anyhow::Result<()> {
    slot.as_mut().map_or(Ok(()), |f| f())
}
