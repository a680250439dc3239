//! Two-context deck runtime.
//!
//! The animation task exclusively owns the [`Deck`]: it applies inputs,
//! ticks springs on a frame clock and forwards notifications. The
//! coordination task receives those notifications and runs the caller's
//! [`DeckCallbacks`]. Both channels are unbounded, so neither side ever
//! blocks the other and no notification is dropped.
//!
//! ```text
//! SwiperHandle ──► Request ──► animation task ──► DeckEvent ──► coordination task
//! CardHandle   ─┘               (Deck<T>, interval)               (DeckCallbacks)
//! ```

use crate::callbacks::{CallbackError, DeckCallbacks};
use std::time::Duration;
use swipe_core::{Deck, DeckEvent, DeckInput, DeckSnapshot, SwipeCommand};
use swipe_input::PanEvent;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, instrument, warn};

/// The animation task is gone.
#[derive(Debug, Error)]
#[error("Deck runtime has shut down")]
pub struct RuntimeClosed;

#[derive(Debug)]
enum Request {
    Input(DeckInput),
    Snapshot(oneshot::Sender<DeckSnapshot>),
}

/// Cloneable, fire-and-forget handle to a running deck.
#[derive(Debug, Clone)]
pub struct SwiperHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl SwiperHandle {
    /// Queue an input for the animation task.
    pub fn send(&self, input: DeckInput) -> Result<(), RuntimeClosed> {
        self.requests
            .send(Request::Input(input))
            .map_err(|_| RuntimeClosed)
    }

    pub fn swipe_left(&self) {
        self.command(SwipeCommand::Left);
    }

    pub fn swipe_right(&self) {
        self.command(SwipeCommand::Right);
    }

    pub fn swipe_top(&self) {
        self.command(SwipeCommand::Top);
    }

    pub fn swipe_bottom(&self) {
        self.command(SwipeCommand::Bottom);
    }

    pub fn swipe_back(&self) {
        self.command(SwipeCommand::Back);
    }

    /// Pan event for the top card.
    pub fn pan(&self, event: PanEvent) {
        self.fire(DeckInput::Pan { card: None, event });
    }

    /// Handle bound to card `index`.
    pub fn card(&self, index: usize) -> CardHandle {
        CardHandle {
            index,
            deck: self.clone(),
        }
    }

    /// Current deck state, after every input queued before this call.
    pub async fn snapshot(&self) -> Result<DeckSnapshot, RuntimeClosed> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Snapshot(reply))
            .map_err(|_| RuntimeClosed)?;
        response.await.map_err(|_| RuntimeClosed)
    }

    fn command(&self, command: SwipeCommand) {
        self.fire(DeckInput::Command { command });
    }

    fn fire(&self, input: DeckInput) {
        if self.send(input).is_err() {
            warn!(?input, "deck runtime closed, input dropped");
        }
    }
}

/// Commands bound to one card by position.
#[derive(Debug, Clone)]
pub struct CardHandle {
    index: usize,
    deck: SwiperHandle,
}

impl CardHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn swipe_left(&self) {
        self.command(SwipeCommand::Left);
    }

    pub fn swipe_right(&self) {
        self.command(SwipeCommand::Right);
    }

    pub fn swipe_top(&self) {
        self.command(SwipeCommand::Top);
    }

    pub fn swipe_bottom(&self) {
        self.command(SwipeCommand::Bottom);
    }

    pub fn swipe_back(&self) {
        self.command(SwipeCommand::Back);
    }

    /// Pan event for this card, bypassing hit-testing.
    pub fn pan(&self, event: PanEvent) {
        self.deck.fire(DeckInput::Pan {
            card: Some(self.index),
            event,
        });
    }

    fn command(&self, command: SwipeCommand) {
        self.deck.fire(DeckInput::CardCommand {
            card: self.index,
            command,
        });
    }
}

/// Join handles for a spawned deck.
#[derive(Debug)]
pub struct DeckRuntime<T> {
    pub handle: SwiperHandle,
    /// Yields the deck once every handle is dropped.
    pub animation: JoinHandle<Deck<T>>,
    /// Yields the first callback failure, if any.
    pub coordination: JoinHandle<Result<(), CallbackError>>,
}

/// Spawn the animation and coordination tasks for `deck`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_deck<T>(deck: Deck<T>, callbacks: DeckCallbacks, frame_interval: Duration) -> DeckRuntime<T>
where
    T: Send + 'static,
{
    let (requests, request_rx) = mpsc::unbounded_channel();
    let (events, event_rx) = mpsc::unbounded_channel();

    let animation = tokio::spawn(animate(deck, request_rx, events, frame_interval));
    let coordination = tokio::spawn(coordinate(event_rx, callbacks));

    DeckRuntime {
        handle: SwiperHandle { requests },
        animation,
        coordination,
    }
}

#[instrument(name = "deck_animation", skip_all, fields(cards = deck.len()))]
async fn animate<T>(
    mut deck: Deck<T>,
    mut requests: mpsc::UnboundedReceiver<Request>,
    events: mpsc::UnboundedSender<DeckEvent>,
    frame_interval: Duration,
) -> Deck<T> {
    let mut frames = time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    // an empty deck reports exhaustion at construction
    forward(&mut deck, &events);

    loop {
        tokio::select! {
            request = requests.recv() => match request {
                Some(Request::Input(input)) => {
                    if let Err(err) = deck.execute(input) {
                        warn!(%err, "deck input rejected");
                    }
                }
                Some(Request::Snapshot(reply)) => {
                    let _ = reply.send(deck.snapshot());
                }
                None => break,
            },
            now = frames.tick() => {
                let dt = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;
                if deck.is_animating() {
                    deck.tick(dt);
                }
            }
        }
        forward(&mut deck, &events);
    }

    debug!("all handles dropped, animation task stopping");
    deck
}

fn forward<T>(deck: &mut Deck<T>, events: &mpsc::UnboundedSender<DeckEvent>) {
    for event in deck.drain_events() {
        if events.send(event).is_err() {
            debug!(event = event.name(), "coordination task gone, notification discarded");
        }
    }
}

#[instrument(name = "deck_coordination", skip_all)]
async fn coordinate(
    mut events: mpsc::UnboundedReceiver<DeckEvent>,
    mut callbacks: DeckCallbacks,
) -> Result<(), CallbackError> {
    while let Some(event) = events.recv().await {
        callbacks.dispatch(&event)?;
    }
    Ok(())
}
