//! Deck coordinator: owns the cards and the shared counters.

use crate::card::{CardContext, CardMotion, SwipeCommand};
use crate::counters::{ActiveIndex, DeckCounters};
use crate::effect::DeckEffects;
use crate::error::DeckError;
use crate::event::DeckEvent;
use crate::frame::{CardFrame, OverlayLabels, RenderedCard};
use crate::options::{SwiperOptions, Viewport};
use serde::{Deserialize, Serialize};
use swipe_input::{PanEvent, SwipeDirection};
use tracing::{debug, trace};

/// One input to the deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum DeckInput {
    /// Pan event for an explicit card, or for the top card when `card` is
    /// absent.
    Pan {
        #[serde(default)]
        card: Option<usize>,
        event: PanEvent,
    },
    /// Command for whichever card is active.
    Command { command: SwipeCommand },
    /// Command for one card, regardless of the active index.
    CardCommand { card: usize, command: SwipeCommand },
    /// Caller-driven index change (undo).
    SetActiveIndex { value: f64 },
    /// Advance every spring by `dt` seconds.
    Tick { dt: f64 },
}

/// Serializable view of deck state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub active_index: f64,
    pub last_z_index: i64,
    pub animating: bool,
    /// In draw order.
    pub frames: Vec<CardFrame>,
}

/// A deck of swipeable cards over items of type `T`.
#[derive(Debug)]
pub struct Deck<T> {
    items: Vec<T>,
    cards: Vec<CardMotion>,
    counters: DeckCounters,
    options: SwiperOptions,
    viewport: Viewport,
    /// Last active index value reported to the caller.
    observed: f64,
    exhausted: bool,
    events: Vec<DeckEvent>,
}

impl<T> Deck<T> {
    /// Build a deck over `items`. An empty deck reports exhaustion at once.
    pub fn new(items: Vec<T>, viewport: Viewport, options: SwiperOptions) -> Result<Self, DeckError> {
        options.validate()?;

        let cards = (0..items.len())
            .map(|index| CardMotion::new(index, &options))
            .collect();
        let counters = DeckCounters::new(items.len());

        let mut deck = Self {
            items,
            cards,
            counters,
            options,
            viewport,
            observed: counters.active_index.value(),
            exhausted: false,
            events: Vec::new(),
        };
        deck.observe();
        Ok(deck)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cards(&self) -> &[CardMotion] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&CardMotion> {
        self.cards.get(index)
    }

    pub fn options(&self) -> &SwiperOptions {
        &self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn counters(&self) -> DeckCounters {
        self.counters
    }

    pub fn active_index(&self) -> ActiveIndex {
        self.counters.active_index
    }

    /// Card selected by the active index, if it exists.
    pub fn active_card(&self) -> Option<usize> {
        self.counters
            .active_index
            .slot()
            .filter(|&index| index < self.cards.len())
    }

    /// Card that receives unaddressed pan input: highest z-index, ties to
    /// the lowest index.
    pub fn top_card(&self) -> Option<usize> {
        self.cards
            .iter()
            .rev()
            .max_by_key(|card| card.z_index())
            .map(CardMotion::index)
    }

    /// Check if any card spring is running.
    pub fn is_animating(&self) -> bool {
        self.cards.iter().any(CardMotion::is_animating)
    }

    /// Apply one input.
    pub fn execute(&mut self, input: DeckInput) -> Result<DeckEffects, DeckError> {
        let effects = match input {
            DeckInput::Pan {
                card: Some(card),
                event,
            } => self.pan_card(card, event)?,
            DeckInput::Pan { card: None, event } => self.pan(event),
            DeckInput::Command { command } => self.command(command),
            DeckInput::CardCommand { card, command } => self.command_card(card, command)?,
            DeckInput::SetActiveIndex { value } => self.set_active_index(value),
            DeckInput::Tick { dt } => self.tick(dt),
        };
        Ok(effects)
    }

    /// Route a pan event to the top card.
    pub fn pan(&mut self, event: PanEvent) -> DeckEffects {
        let effects = match self.top_card() {
            Some(index) => self.on_card(index, |card, ctx| {
                card.handle_pan(event, ctx);
            }),
            None => DeckEffects::GESTURE_IGNORED,
        };
        effects | self.observe()
    }

    /// Route a pan event to card `index`.
    pub fn pan_card(&mut self, index: usize, event: PanEvent) -> Result<DeckEffects, DeckError> {
        self.check(index)?;
        let effects = self.on_card(index, |card, ctx| {
            card.handle_pan(event, ctx);
        });
        Ok(effects | self.observe())
    }

    /// Forward a command to the active card. No-op when none is active.
    pub fn command(&mut self, command: SwipeCommand) -> DeckEffects {
        let effects = match self.active_card() {
            Some(index) => self.on_card(index, |card, ctx| {
                card.command(command, ctx);
            }),
            None => DeckEffects::NONE,
        };
        effects | self.observe()
    }

    /// Send a command to card `index` unconditionally.
    pub fn command_card(&mut self, index: usize, command: SwipeCommand) -> Result<DeckEffects, DeckError> {
        self.check(index)?;
        let effects = self.on_card(index, |card, ctx| {
            card.command(command, ctx);
        });
        Ok(effects | self.observe())
    }

    pub fn swipe_left(&mut self) -> DeckEffects {
        self.command(SwipeCommand::Left)
    }

    pub fn swipe_right(&mut self) -> DeckEffects {
        self.command(SwipeCommand::Right)
    }

    pub fn swipe_top(&mut self) -> DeckEffects {
        self.command(SwipeCommand::Top)
    }

    pub fn swipe_bottom(&mut self) -> DeckEffects {
        self.command(SwipeCommand::Bottom)
    }

    pub fn swipe_back(&mut self) -> DeckEffects {
        self.command(SwipeCommand::Back)
    }

    /// Commit the active card in `direction`.
    pub fn swipe(&mut self, direction: SwipeDirection) -> DeckEffects {
        self.command(direction.into())
    }

    /// Overwrite the active index. The caller owns undo semantics.
    pub fn set_active_index(&mut self, value: f64) -> DeckEffects {
        self.counters.active_index = ActiveIndex::new(value);
        self.observe()
    }

    /// Advance every card's springs by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> DeckEffects {
        let Self {
            cards,
            counters,
            options,
            viewport,
            events,
            ..
        } = self;
        let mut ctx = CardContext::new(options, *viewport, counters, events);
        for card in cards.iter_mut() {
            card.tick(dt, &mut ctx);
        }
        let effects = ctx.effects;
        effects | self.observe()
    }

    /// Tick at `dt` until every spring rests or `max_frames` elapse.
    /// Returns the number of frames ticked.
    pub fn settle(&mut self, dt: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.is_animating() {
            self.tick(dt);
            frames += 1;
        }
        trace!(frames, "deck settled");
        frames
    }

    /// Take every queued notification.
    pub fn drain_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[DeckEvent] {
        &self.events
    }

    /// Frames in draw order (reverse array order).
    pub fn frames(&self) -> Vec<CardFrame> {
        self.cards
            .iter()
            .rev()
            .map(|card| CardFrame::of(card, &self.options))
            .collect()
    }

    /// Render every card in draw order with the caller's renderer and
    /// overlay labels.
    pub fn render<R, O>(
        &self,
        mut renderer: impl FnMut(&T, usize) -> R,
        labels: &OverlayLabels<O>,
    ) -> Vec<RenderedCard<R, O>> {
        self.cards
            .iter()
            .zip(&self.items)
            .rev()
            .map(|(card, item)| RenderedCard {
                frame: CardFrame::of(card, &self.options),
                content: renderer(item, card.index()),
                overlays: labels.render(card, &self.options),
            })
            .collect()
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            active_index: self.counters.active_index.value(),
            last_z_index: self.counters.last_z_index,
            animating: self.is_animating(),
            frames: self.frames(),
        }
    }

    fn check(&self, index: usize) -> Result<(), DeckError> {
        if index < self.cards.len() {
            Ok(())
        } else {
            Err(DeckError::CardOutOfRange {
                index,
                len: self.cards.len(),
            })
        }
    }

    fn on_card(&mut self, index: usize, f: impl FnOnce(&mut CardMotion, &mut CardContext<'_>)) -> DeckEffects {
        let Self {
            cards,
            counters,
            options,
            viewport,
            events,
            ..
        } = self;
        let Some(card) = cards.get_mut(index) else {
            return DeckEffects::NONE;
        };
        let mut ctx = CardContext::new(options, *viewport, counters, events);
        f(card, &mut ctx);
        ctx.effects
    }

    /// Report index changes and detect exhaustion.
    fn observe(&mut self) -> DeckEffects {
        let mut effects = DeckEffects::NONE;
        effects |= self.report_index();

        let len = self.items.len();
        if self.counters.active_index.is_exhausted(len) {
            // notify on the edge only; an empty deck stays exhausted after the loop
            if !self.exhausted {
                debug!(len, "deck exhausted, looping to start");
                self.events.push(DeckEvent::Exhausted);
                effects |= DeckEffects::EXHAUSTED | DeckEffects::NOTIFIED;
            }
            self.counters.active_index = ActiveIndex::ZERO;
            effects |= self.report_index();
        }
        self.exhausted = self.counters.active_index.is_exhausted(len);

        effects
    }

    fn report_index(&mut self) -> DeckEffects {
        let live = self.counters.active_index;
        if live.same_as(self.observed) {
            return DeckEffects::NONE;
        }
        self.observed = live.value();
        self.events.push(DeckEvent::IndexChanged { index: live.value() });
        DeckEffects::INDEX_CHANGED | DeckEffects::NOTIFIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deck(len: usize) -> Deck<usize> {
        let viewport = Viewport::new(360.0, 720.0);
        Deck::new((0..len).collect(), viewport, SwiperOptions::for_viewport(viewport)).unwrap()
    }

    #[test]
    fn empty_deck_is_exhausted_once() {
        let mut deck = deck(0);
        assert_eq!(deck.drain_events(), vec![DeckEvent::Exhausted]);

        assert_eq!(deck.swipe_right(), DeckEffects::NONE);
        assert_eq!(deck.tick(0.016), DeckEffects::NONE);
        assert!(deck.drain_events().is_empty());
        assert_eq!(deck.top_card(), None);
    }

    #[test]
    fn empty_deck_loops_external_index_without_renotifying() {
        let mut deck = deck(0);
        deck.drain_events();

        deck.set_active_index(5.0);

        assert_eq!(
            deck.drain_events(),
            vec![
                DeckEvent::IndexChanged { index: 5.0 },
                DeckEvent::IndexChanged { index: 0.0 },
            ]
        );
        assert_eq!(deck.active_index().value(), 0.0);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let viewport = Viewport::new(360.0, 720.0);
        let mut options = SwiperOptions::for_viewport(viewport);
        options.rotate_output_range[2] = f64::INFINITY;

        let err = Deck::new(vec![1], viewport, options).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn card_commands_check_range() {
        let mut deck = deck(2);
        let err = deck
            .execute(DeckInput::CardCommand {
                card: 5,
                command: SwipeCommand::Left,
            })
            .unwrap_err();
        assert_eq!(err, DeckError::CardOutOfRange { index: 5, len: 2 });

        let err = deck.pan_card(2, PanEvent::Begin).unwrap_err();
        assert_eq!(err, DeckError::CardOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn top_card_follows_z_order() {
        let mut deck = deck(3);
        assert_eq!(deck.top_card(), Some(0));

        deck.swipe_left();
        assert_eq!(deck.top_card(), Some(1));
        assert_eq!(deck.card(0).map(CardMotion::z_index), Some(-4));
    }

    #[test]
    fn frames_in_draw_order() {
        let deck = deck(3);
        let order: Vec<usize> = deck.frames().iter().map(|f| f.index).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn render_pairs_items_with_frames() {
        let deck = deck(2);
        let labels = OverlayLabels::new().left(|opacity| opacity);

        let rendered = deck.render(|item, index| format!("{item}@{index}"), &labels);

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].content, "1@1");
        assert_eq!(rendered[1].content, "0@0");
        assert_eq!(rendered[1].overlays, vec![(SwipeDirection::Left, 0.0)]);
    }

    #[test]
    fn set_active_index_reports_change() {
        let mut deck = deck(3);

        let effects = deck.set_active_index(2.0);
        assert!(effects.index_changed());
        assert_eq!(deck.drain_events(), vec![DeckEvent::IndexChanged { index: 2.0 }]);

        // same value again is silent
        assert_eq!(deck.set_active_index(2.0), DeckEffects::NONE);
    }

    #[test]
    fn set_active_index_past_end_exhausts() {
        let mut deck = deck(2);

        deck.set_active_index(2.0);

        assert_eq!(
            deck.drain_events(),
            vec![
                DeckEvent::IndexChanged { index: 2.0 },
                DeckEvent::Exhausted,
                DeckEvent::IndexChanged { index: 0.0 },
            ]
        );
        assert_eq!(deck.active_index(), ActiveIndex::ZERO);
    }

    #[test]
    fn negative_index_has_no_active_card() {
        let mut deck = deck(2);
        deck.set_active_index(-1.0);
        deck.drain_events();

        assert_eq!(deck.active_card(), None);
        assert_eq!(deck.swipe_top(), DeckEffects::NONE);
        assert!(deck.drain_events().is_empty());
    }

    #[test]
    fn settle_stops_when_springs_rest() {
        let mut deck = deck(2);
        deck.swipe_bottom();

        let frames = deck.settle(1.0 / 60.0, 10_000);

        assert!(frames > 0 && frames < 10_000);
        assert!(!deck.is_animating());
        assert_eq!(deck.card(0).map(CardMotion::offset_y), Some(0.0));
    }

    #[test]
    fn input_serde() {
        let input: DeckInput =
            serde_json::from_str(r#"{"input":"pan","event":{"kind":"update","translation":{"x":1.0,"y":2.0}}}"#).unwrap();
        assert_eq!(
            input,
            DeckInput::Pan {
                card: None,
                event: PanEvent::update(1.0, 2.0)
            }
        );

        let input: DeckInput = serde_json::from_str(r#"{"input":"command","command":"back"}"#).unwrap();
        assert_eq!(
            input,
            DeckInput::Command {
                command: SwipeCommand::Back
            }
        );
    }
}
