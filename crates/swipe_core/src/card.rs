//! Card gesture engine: one card's offsets, z-order and drag decisions.
//!
//! A card never owns the shared counters. Every operation gets them through
//! a [`CardContext`] built by the deck for the duration of one input.

use crate::counters::{ActiveIndex, DeckCounters};
use crate::effect::DeckEffects;
use crate::event::DeckEvent;
use crate::options::{SwiperOptions, Viewport};
use crate::VERTICAL_DECISION_FRACTION;
use serde::{Deserialize, Serialize};
use swipe_input::{Axis, GestureState, PanEvent, PanPhase, PanRecognizer, SwipeDirection, Vec2};
use swipe_motion::{interpolate, is_integral, Extrapolation, OnRest, Spring};
use tracing::{debug, trace};

/// Imperative command for a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeCommand {
    Left,
    Right,
    Top,
    Bottom,
    /// Spring the card back to centre.
    Back,
}

impl SwipeCommand {
    /// Commit direction, `None` for [`SwipeCommand::Back`].
    pub fn direction(self) -> Option<SwipeDirection> {
        match self {
            SwipeCommand::Left => Some(SwipeDirection::Left),
            SwipeCommand::Right => Some(SwipeDirection::Right),
            SwipeCommand::Top => Some(SwipeDirection::Top),
            SwipeCommand::Bottom => Some(SwipeDirection::Bottom),
            SwipeCommand::Back => None,
        }
    }
}

impl From<SwipeDirection> for SwipeCommand {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => SwipeCommand::Left,
            SwipeDirection::Right => SwipeCommand::Right,
            SwipeDirection::Top => SwipeCommand::Top,
            SwipeDirection::Bottom => SwipeCommand::Bottom,
        }
    }
}

/// Where a card is in its drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardPhase {
    /// Resting (or never touched).
    #[default]
    Idle,
    /// Following the finger.
    Dragging,
    /// Flying off screen after a commit.
    Committing(SwipeDirection),
    /// Springing back to centre.
    Recovering,
}

/// What a single pan event or command did to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Not this card's gesture, a disabled direction, or nothing to do.
    Ignored,
    /// Gesture begun or offsets moved.
    Tracking,
    /// The card committed and the active index advanced.
    Committed(SwipeDirection),
    /// The card is springing back; the active index is untouched.
    Recovered,
}

/// Deck state lent to a card for one operation.
#[derive(Debug)]
pub struct CardContext<'a> {
    pub options: &'a SwiperOptions,
    pub viewport: Viewport,
    pub counters: &'a mut DeckCounters,
    pub events: &'a mut Vec<DeckEvent>,
    /// Effects accumulated while the context was lent out.
    pub effects: DeckEffects,
}

impl<'a> CardContext<'a> {
    pub fn new(
        options: &'a SwiperOptions,
        viewport: Viewport,
        counters: &'a mut DeckCounters,
        events: &'a mut Vec<DeckEvent>,
    ) -> Self {
        Self {
            options,
            viewport,
            counters,
            events,
            effects: DeckEffects::NONE,
        }
    }

    fn post(&mut self, event: DeckEvent) {
        self.events.push(event);
        self.effects |= DeckEffects::NOTIFIED;
    }

    fn live(&self) -> ActiveIndex {
        self.counters.active_index
    }
}

/// Per-card motion state.
#[derive(Debug, Clone)]
pub struct CardMotion {
    index: usize,
    offset_x: Spring,
    offset_y: Spring,
    z_index: i64,
    /// `floor(active index)` when the current gesture began.
    current_active_index: f64,
    /// Provisional target while dragging.
    next_active_index: f64,
    recognizer: PanRecognizer,
    phase: CardPhase,
}

impl CardMotion {
    /// Resting card at position `index`.
    pub fn new(index: usize, options: &SwiperOptions) -> Self {
        Self {
            index,
            offset_x: Spring::new(0.0),
            offset_y: Spring::new(0.0),
            z_index: -(index as i64),
            current_active_index: 0.0,
            next_active_index: 0.0,
            recognizer: PanRecognizer::new(options.disabled.activation_offsets()),
            phase: CardPhase::Idle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x.get()
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y.get()
    }

    pub fn z_index(&self) -> i64 {
        self.z_index
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn current_active_index(&self) -> f64 {
        self.current_active_index
    }

    pub fn next_active_index(&self) -> f64 {
        self.next_active_index
    }

    pub fn gesture_state(&self) -> GestureState {
        self.recognizer.state()
    }

    /// Check if either offset spring is running.
    pub fn is_animating(&self) -> bool {
        self.offset_x.is_animating() || self.offset_y.is_animating()
    }

    /// Check if this card may act on the current gesture.
    ///
    /// The snapshot taken at begin must be this card, and the live index
    /// must not have moved past it since.
    pub fn owns_gesture(&self, live: ActiveIndex) -> bool {
        self.current_active_index == self.index as f64 && live.floor() == self.current_active_index
    }

    /// Feed one raw pan event through the recognizer.
    pub fn handle_pan(&mut self, event: PanEvent, ctx: &mut CardContext<'_>) -> GestureOutcome {
        match self.recognizer.handle(event) {
            Some(PanPhase::Begin) => self.begin(ctx),
            Some(PanPhase::Update(translation)) => self.update(translation, ctx),
            Some(PanPhase::Finalize { translation, .. }) => self.finalize(translation, ctx),
            None => {
                ctx.effects |= DeckEffects::GESTURE_IGNORED;
                GestureOutcome::Ignored
            }
        }
    }

    /// Run an imperative command.
    pub fn command(&mut self, command: SwipeCommand, ctx: &mut CardContext<'_>) -> GestureOutcome {
        match command.direction() {
            Some(direction) => {
                self.swipe(direction, ctx);
                GestureOutcome::Committed(direction)
            }
            None if self.swipe_back(ctx) => GestureOutcome::Recovered,
            None => GestureOutcome::Ignored,
        }
    }

    /// Commit to `direction`: fling off screen and advance the active index.
    ///
    /// Repeating it mid-flight retargets the same spring.
    pub fn swipe(&mut self, direction: SwipeDirection, ctx: &mut CardContext<'_>) {
        ctx.post(DeckEvent::Swiped {
            direction,
            index: self.index,
        });

        self.z_index = ctx.counters.claim_z_index();

        let target = ctx.viewport.fling_offset(direction);
        let config = ctx.options.springs.for_direction(direction);
        let spring = match direction.axis() {
            Axis::Horizontal => &mut self.offset_x,
            Axis::Vertical => &mut self.offset_y,
        };
        if spring
            .animate_to_then(target, config, OnRest::ResetTo(0.0))
            .is_some()
        {
            ctx.effects |= DeckEffects::ANIMATION_SETTLED;
        }

        ctx.counters.active_index.advance();
        self.phase = CardPhase::Committing(direction);
        ctx.effects |=
            DeckEffects::COMMITTED | DeckEffects::ANIMATION_STARTED | DeckEffects::Z_ORDER_CHANGED;

        debug!(
            card = self.index,
            %direction,
            z_index = self.z_index,
            active_index = ctx.live().value(),
            "card committed"
        );
    }

    /// Spring both offsets back to centre.
    ///
    /// Returns false (and does nothing) when the card is already resting at
    /// the origin.
    pub fn swipe_back(&mut self, ctx: &mut CardContext<'_>) -> bool {
        if self.offset_x.get() == 0.0 && self.offset_y.get() == 0.0 && !self.is_animating() {
            return false;
        }
        self.offset_x.cancel();
        self.offset_y.cancel();
        self.recover(ctx);
        true
    }

    /// Advance both springs by `dt` seconds.
    pub fn tick(&mut self, dt: f64, ctx: &mut CardContext<'_>) {
        if !self.is_animating() {
            return;
        }

        let settled_x = self.offset_x.tick(dt);
        let settled_y = self.offset_y.tick(dt);
        ctx.effects |= DeckEffects::OFFSETS_CHANGED;
        if settled_x.is_some() || settled_y.is_some() {
            ctx.effects |= DeckEffects::ANIMATION_SETTLED;
        }

        trace!(
            card = self.index,
            x = self.offset_x.get(),
            y = self.offset_y.get(),
            "spring step"
        );

        if self.is_animating() {
            return;
        }

        match self.phase {
            CardPhase::Committing(direction) => {
                // the fling spring reset itself; the cross axis still holds the drag
                match direction.axis() {
                    Axis::Horizontal => self.offset_y.set_immediate(0.0),
                    Axis::Vertical => self.offset_x.set_immediate(0.0),
                }
                self.phase = CardPhase::Idle;
                debug!(card = self.index, "fling settled");
            }
            CardPhase::Recovering => self.phase = CardPhase::Idle,
            CardPhase::Idle | CardPhase::Dragging => {}
        }
    }

    fn begin(&mut self, ctx: &mut CardContext<'_>) -> GestureOutcome {
        self.current_active_index = ctx.live().floor();
        self.next_active_index = self.current_active_index;
        ctx.post(DeckEvent::SwipeStart);
        GestureOutcome::Tracking
    }

    fn update(&mut self, translation: Vec2, ctx: &mut CardContext<'_>) -> GestureOutcome {
        let disabled = ctx.options.disabled;
        let blocked = (disabled.left && translation.x < 0.0) || (disabled.right && translation.x > 0.0);
        if !self.owns_gesture(ctx.live()) || blocked {
            ctx.effects |= DeckEffects::GESTURE_IGNORED;
            return GestureOutcome::Ignored;
        }

        self.offset_x.set_immediate(translation.x);
        self.offset_y.set_immediate(translation.y);
        self.phase = CardPhase::Dragging;
        ctx.effects |= DeckEffects::OFFSETS_CHANGED;
        ctx.post(DeckEvent::SwipeActive);

        self.next_active_index = if translation.y.abs() > ctx.viewport.height * VERTICAL_DECISION_FRACTION {
            self.decision(translation.y, &ctx.options.translate_y_range)
        } else {
            self.decision(translation.x, &ctx.options.translate_x_range)
        };

        GestureOutcome::Tracking
    }

    fn finalize(&mut self, translation: Vec2, ctx: &mut CardContext<'_>) -> GestureOutcome {
        let at_origin = self.offset_x.get() == 0.0 && self.offset_y.get() == 0.0;
        if at_origin || !self.owns_gesture(ctx.live()) {
            if self.phase == CardPhase::Dragging {
                self.phase = CardPhase::Idle;
            }
            ctx.effects |= DeckEffects::GESTURE_IGNORED;
            return GestureOutcome::Ignored;
        }

        ctx.post(DeckEvent::SwipeEnd);

        if self.next_active_index == self.current_active_index + 1.0 {
            if let Some(direction) = self.resolve_direction(translation, ctx) {
                self.swipe(direction, ctx);
                return GestureOutcome::Committed(direction);
            }
        }

        debug!(
            card = self.index,
            x = self.offset_x.get(),
            y = self.offset_y.get(),
            "drag released without commit"
        );
        self.recover(ctx);
        GestureOutcome::Recovered
    }

    /// Pick the commit direction at release, honouring disable flags.
    fn resolve_direction(&self, release: Vec2, ctx: &CardContext<'_>) -> Option<SwipeDirection> {
        let disabled = ctx.options.disabled;
        let vertical = self.decision(self.offset_y.get(), &ctx.options.translate_y_range);

        // an integral vertical decision settles the axis, even with no vertical delta
        let direction = if is_integral(vertical) {
            SwipeDirection::vertical(release.y)
        } else {
            SwipeDirection::horizontal(release.x)
        };
        direction.filter(|direction| !disabled.contains(*direction))
    }

    /// Map an offset through `range` onto `[s+1, s, s+1]`.
    fn decision(&self, offset: f64, range: &[f64; 3]) -> f64 {
        let s = self.current_active_index;
        interpolate(offset, range, &[s + 1.0, s, s + 1.0], Extrapolation::Clamp)
    }

    fn recover(&mut self, ctx: &mut CardContext<'_>) {
        let springs = ctx.options.springs;
        self.offset_x.animate_to(0.0, springs.back_x);
        self.offset_y.animate_to(0.0, springs.back_y);
        self.phase = if self.is_animating() {
            ctx.effects |= DeckEffects::ANIMATION_STARTED | DeckEffects::RECOVERING;
            CardPhase::Recovering
        } else {
            CardPhase::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swipe_input::drag_to;

    struct Harness {
        options: SwiperOptions,
        viewport: Viewport,
        counters: DeckCounters,
        events: Vec<DeckEvent>,
    }

    impl Harness {
        fn new(len: usize) -> Self {
            let viewport = Viewport::new(360.0, 720.0);
            Self {
                options: SwiperOptions::for_viewport(viewport),
                viewport,
                counters: DeckCounters::new(len),
                events: Vec::new(),
            }
        }

        fn ctx(&mut self) -> CardContext<'_> {
            CardContext::new(&self.options, self.viewport, &mut self.counters, &mut self.events)
        }

        fn card(&self, index: usize) -> CardMotion {
            CardMotion::new(index, &self.options)
        }

        fn drag(&mut self, card: &mut CardMotion, x: f64, y: f64) -> GestureOutcome {
            let mut last = GestureOutcome::Ignored;
            for event in drag_to(x, y, 8) {
                let mut ctx = self.ctx();
                last = card.handle_pan(event, &mut ctx);
            }
            last
        }

        fn settle(&mut self, card: &mut CardMotion) {
            for _ in 0..2400 {
                let mut ctx = self.ctx();
                card.tick(1.0 / 60.0, &mut ctx);
            }
        }
    }

    #[test]
    fn drag_past_threshold_commits_right() {
        let mut h = Harness::new(3);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, 200.0, 3.0);

        assert_eq!(outcome, GestureOutcome::Committed(SwipeDirection::Right));
        assert_eq!(h.counters.active_index.value(), 1.0);
        assert_eq!(card.z_index(), -4);
        assert_eq!(card.phase(), CardPhase::Committing(SwipeDirection::Right));
        assert_eq!(h.events.first(), Some(&DeckEvent::SwipeStart));
        assert!(h.events.contains(&DeckEvent::SwipeEnd));
        assert_eq!(
            h.events.last(),
            Some(&DeckEvent::Swiped {
                direction: SwipeDirection::Right,
                index: 0
            })
        );

        h.settle(&mut card);
        assert_eq!(card.phase(), CardPhase::Idle);
        assert_eq!(card.offset_x(), 0.0);
        assert_eq!(card.offset_y(), 0.0);
    }

    #[test]
    fn short_drag_recovers() {
        let mut h = Harness::new(1);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, 60.0, 3.0);

        assert_eq!(outcome, GestureOutcome::Recovered);
        assert_eq!(card.phase(), CardPhase::Recovering);
        assert_eq!(h.counters.active_index.value(), 0.0);
        assert!(h.events.iter().all(|e| e.as_swipe().is_none()));

        h.settle(&mut card);
        assert_eq!(card.phase(), CardPhase::Idle);
        assert_eq!((card.offset_x(), card.offset_y()), (0.0, 0.0));
    }

    #[test]
    fn vertical_drag_commits_top() {
        let mut h = Harness::new(2);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, 20.0, -300.0);

        assert_eq!(outcome, GestureOutcome::Committed(SwipeDirection::Top));
    }

    #[test]
    fn disabled_vertical_direction_recovers() {
        let mut h = Harness::new(2);
        h.options = h.options.disable(SwipeDirection::Bottom);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, 0.0, 300.0);

        assert_eq!(outcome, GestureOutcome::Recovered);
        assert_eq!(h.counters.active_index.value(), 0.0);
    }

    #[test]
    fn flat_release_on_vertical_axis_recovers() {
        let mut h = Harness::new(2);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, 200.0, 0.0);

        assert_eq!(outcome, GestureOutcome::Recovered);
        assert_eq!(card.phase(), CardPhase::Recovering);
        assert_eq!(h.counters.active_index.value(), 0.0);
    }

    #[test]
    fn disabled_horizontal_updates_are_dropped() {
        let mut h = Harness::new(2);
        h.options = h.options.disable(SwipeDirection::Left);
        let mut card = h.card(0);

        let outcome = h.drag(&mut card, -300.0, 0.0);

        // offsets never moved, so the release is not this card's business
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(card.offset_x(), 0.0);
        assert!(!h.events.contains(&DeckEvent::SwipeActive));
    }

    #[test]
    fn non_owner_ignores_drag() {
        let mut h = Harness::new(3);
        let mut card = h.card(1);

        let outcome = h.drag(&mut card, 200.0, 0.0);

        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(card.offset_x(), 0.0);
        assert_eq!(h.counters.active_index.value(), 0.0);
    }

    #[test]
    fn swipe_back_at_rest_is_noop() {
        let mut h = Harness::new(1);
        let mut card = h.card(0);

        let mut ctx = h.ctx();
        let outcome = card.command(SwipeCommand::Back, &mut ctx);
        let effects = ctx.effects;

        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(effects, DeckEffects::NONE);
        assert!(h.events.is_empty());
    }

    #[test]
    fn swipe_back_interrupts_fling() {
        let mut h = Harness::new(2);
        let mut card = h.card(0);
        {
            let mut ctx = h.ctx();
            card.command(SwipeCommand::Left, &mut ctx);
            card.tick(0.1, &mut ctx);
        }
        assert!(card.offset_x() < 0.0);

        let mut ctx = h.ctx();
        assert_eq!(card.command(SwipeCommand::Back, &mut ctx), GestureOutcome::Recovered);
        assert_eq!(card.phase(), CardPhase::Recovering);
        // the index stays advanced
        assert_eq!(h.counters.active_index.value(), 1.0);

        h.settle(&mut card);
        assert_eq!(card.offset_x(), 0.0);
    }

    #[test]
    fn repeated_swipe_claims_fresh_z_index() {
        let mut h = Harness::new(2);
        let mut card = h.card(0);
        let mut ctx = h.ctx();

        card.command(SwipeCommand::Bottom, &mut ctx);
        card.command(SwipeCommand::Bottom, &mut ctx);

        assert_eq!(card.z_index(), -5);
        assert_eq!(h.counters.last_z_index, -6);
        assert_eq!(h.counters.active_index.value(), 2.0);
    }

    #[test]
    fn command_conversions() {
        assert_eq!(SwipeCommand::from(SwipeDirection::Top), SwipeCommand::Top);
        assert_eq!(SwipeCommand::Back.direction(), None);
        assert_eq!(SwipeCommand::Left.direction(), Some(SwipeDirection::Left));
    }
}
