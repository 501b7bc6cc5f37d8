use crate::engine::settle::{self, SettlePlan};
use crate::model::gesture::{DragTracker, Offset};
use crate::model::outcome::{DEFAULT_THRESHOLD, Outcome, classify};
use crate::model::session::{Advance, Session};
use serde::{Deserialize, Serialize};

/// Logical width of the host surface; cards fling past this to leave view.
pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;

/// Host-supplied tuning for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineTuning {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_screen_width")]
    pub screen_width: f32,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            screen_width: DEFAULT_SCREEN_WIDTH,
        }
    }
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_screen_width() -> f32 {
    DEFAULT_SCREEN_WIDTH
}

/// Where the engine is in the gesture lifecycle.
///
/// `Flinging` covers the releasing-to-offscreen leg of a decided gesture;
/// reaching the terminal advances the queue and returns to `Idle`.
/// `Settling` is the spring return after an undecided release and never
/// advances the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Flinging { outcome: Outcome },
    Settling,
}

/// What one animation tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    None,
    /// A fling reached its terminal and the queue advanced.
    Advanced(Advance),
    /// An undecided card came to rest at origin; nothing advanced.
    Settled,
}

/// Drives one card through drag, release classification, settle animation,
/// and queue advance. Owns the session exclusively; one gesture in flight
/// at a time.
#[derive(Debug, Clone)]
pub struct SwipeEngine {
    session: Session,
    tuning: EngineTuning,
    tracker: DragTracker,
    phase: SwipePhase,
    position: Offset,
    fling_start: Offset,
    fling_elapsed_ms: f32,
}

impl SwipeEngine {
    pub fn new(session: Session, tuning: EngineTuning) -> Self {
        Self {
            session,
            tuning,
            tracker: DragTracker::new(),
            phase: SwipePhase::Idle,
            position: Offset::ZERO,
            fling_start: Offset::ZERO,
            fling_elapsed_ms: 0.0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn tuning(&self) -> EngineTuning {
        self.tuning
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Current visual position of the card, for the host to render.
    pub fn position(&self) -> Offset {
        self.position
    }

    /// Record a pointer movement. The first sample of an idle engine opens
    /// a gesture; samples arriving mid-transition are dropped, since
    /// upstream sources may keep delivering events while a card is leaving.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        match self.phase {
            SwipePhase::Idle => {
                self.phase = SwipePhase::Dragging;
                self.tracker.update(dx, dy);
                self.position = self.tracker.offset();
            }
            SwipePhase::Dragging => {
                self.tracker.update(dx, dy);
                self.position = self.tracker.offset();
            }
            SwipePhase::Flinging { .. } | SwipePhase::Settling => {}
        }
    }

    /// Close the gesture in flight and classify it. A release outside the
    /// drag phase is a no-op. Returns the classification the release
    /// produced, if any.
    pub fn release(&mut self) -> Option<Outcome> {
        if self.phase != SwipePhase::Dragging {
            return None;
        }

        let outcome = classify(self.tracker.offset(), self.tuning.threshold);
        self.tracker.reset();

        self.phase = match outcome {
            Outcome::Accept | Outcome::Reject => {
                self.fling_start = self.position;
                self.fling_elapsed_ms = 0.0;
                SwipePhase::Flinging { outcome }
            }
            Outcome::Undecided => SwipePhase::Settling,
        };

        Some(outcome)
    }

    /// Advance the settle animation by `dt_ms`. Idle and dragging engines
    /// tick to no effect.
    pub fn tick(&mut self, dt_ms: f32) -> TickEvent {
        match self.phase {
            SwipePhase::Flinging { outcome } => {
                self.fling_elapsed_ms += dt_ms;
                let SettlePlan::Fling {
                    terminal,
                    duration_ms,
                } = SettlePlan::for_outcome(outcome, self.tuning.screen_width)
                else {
                    unreachable!("decided outcome always plans a fling");
                };

                self.position = settle::fling_position(
                    self.fling_start,
                    terminal,
                    self.fling_elapsed_ms,
                    duration_ms,
                );

                if self.fling_elapsed_ms >= duration_ms {
                    let advance = self
                        .session
                        .advance(outcome)
                        .expect("fling outcome is decided");
                    self.position = Offset::ZERO;
                    self.phase = SwipePhase::Idle;
                    return TickEvent::Advanced(advance);
                }

                TickEvent::None
            }
            SwipePhase::Settling => {
                self.position = settle::spring_step(self.position, dt_ms);
                if settle::is_settled(self.position) {
                    self.position = Offset::ZERO;
                    self.phase = SwipePhase::Idle;
                    return TickEvent::Settled;
                }

                TickEvent::None
            }
            SwipePhase::Idle | SwipePhase::Dragging => TickEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineTuning, SwipeEngine, SwipePhase, TickEvent};
    use crate::model::candidate::Candidate;
    use crate::model::gesture::Offset;
    use crate::model::outcome::Outcome;
    use crate::model::session::Session;

    const TICK_MS: f32 = 16.0;

    fn engine() -> SwipeEngine {
        let session = Session::new(
            vec![
                Candidate::new("chair", "Vintage Wooden Chair", 50),
                Candidate::new("books", "Children's Books Collection", 30),
                Candidate::new("guitar", "Electric Guitar", 80),
            ],
            0,
        )
        .unwrap();
        SwipeEngine::new(session, EngineTuning::default())
    }

    fn tick_until_event(engine: &mut SwipeEngine) -> TickEvent {
        for _ in 0..1_000 {
            match engine.tick(TICK_MS) {
                TickEvent::None => continue,
                event => return event,
            }
        }
        panic!("engine never produced an event");
    }

    #[test]
    fn first_drag_opens_the_gesture() {
        let mut engine = engine();
        assert_eq!(engine.phase(), SwipePhase::Idle);
        engine.drag(12.0, 3.0);
        assert_eq!(engine.phase(), SwipePhase::Dragging);
        assert_eq!(engine.position(), Offset::new(12.0, 3.0));
    }

    #[test]
    fn accept_release_flings_then_advances_once() {
        let mut engine = engine();
        engine.drag(80.0, 5.0);
        engine.drag(150.0, 10.0);
        assert_eq!(engine.release(), Some(Outcome::Accept));
        assert_eq!(
            engine.phase(),
            SwipePhase::Flinging {
                outcome: Outcome::Accept
            }
        );

        match tick_until_event(&mut engine) {
            TickEvent::Advanced(advance) => {
                assert_eq!(advance.outcome, Outcome::Accept);
                assert_eq!(advance.score, 50);
                assert_eq!(advance.new_index, 1);
            }
            other => panic!("expected advance, got {other:?}"),
        }

        assert_eq!(engine.phase(), SwipePhase::Idle);
        assert_eq!(engine.position(), Offset::ZERO);
        assert_eq!(engine.session().score(), 50);
    }

    #[test]
    fn fling_takes_the_fixed_duration() {
        let mut engine = engine();
        engine.drag(-200.0, 0.0);
        engine.release();

        // 250 ms at 16 ms ticks lands on the 16th tick.
        let mut ticks = 0;
        loop {
            ticks += 1;
            if engine.tick(TICK_MS) != TickEvent::None {
                break;
            }
        }
        assert_eq!(ticks, 16);
    }

    #[test]
    fn undecided_release_settles_without_advancing() {
        let mut engine = engine();
        engine.drag(50.0, 5.0);
        assert_eq!(engine.release(), Some(Outcome::Undecided));
        assert_eq!(engine.phase(), SwipePhase::Settling);

        assert_eq!(tick_until_event(&mut engine), TickEvent::Settled);
        assert_eq!(engine.phase(), SwipePhase::Idle);
        assert_eq!(engine.session().current_index(), 0);
        assert_eq!(engine.session().score(), 0);
    }

    #[test]
    fn drags_during_transitions_are_dropped() {
        let mut engine = engine();
        engine.drag(300.0, 0.0);
        engine.release();

        let mid_flight = engine.position();
        engine.drag(5.0, 5.0);
        assert_eq!(engine.position(), mid_flight);
        assert!(matches!(engine.phase(), SwipePhase::Flinging { .. }));

        tick_until_event(&mut engine);

        // Settling branch.
        engine.drag(10.0, 0.0);
        engine.release();
        engine.drag(999.0, 0.0);
        assert_eq!(engine.phase(), SwipePhase::Settling);
    }

    #[test]
    fn release_without_drag_is_a_no_op() {
        let mut engine = engine();
        assert_eq!(engine.release(), None);
        assert_eq!(engine.phase(), SwipePhase::Idle);
    }

    #[test]
    fn release_at_origin_settles_immediately() {
        let mut engine = engine();
        engine.drag(0.0, 0.0);
        assert_eq!(engine.release(), Some(Outcome::Undecided));
        assert_eq!(engine.tick(TICK_MS), TickEvent::Settled);
    }

    #[test]
    fn full_feed_pass_reaches_spec_scenario_totals() {
        let mut engine = engine();

        let gestures = [
            (200.0, Outcome::Accept),
            (-200.0, Outcome::Reject),
            (200.0, Outcome::Accept),
        ];

        for (dx, expected) in gestures {
            engine.drag(dx, 0.0);
            assert_eq!(engine.release(), Some(expected));
            match tick_until_event(&mut engine) {
                TickEvent::Advanced(advance) => assert_eq!(advance.outcome, expected),
                other => panic!("expected advance, got {other:?}"),
            }
        }

        let progress = engine.session().snapshot();
        assert_eq!(progress.score, 130);
        assert_eq!(progress.index, 0);
    }

    #[test]
    fn tuning_threshold_changes_the_decision_band() {
        let session = Session::new(vec![Candidate::new("solo", "Only Item", 10)], 0).unwrap();
        let tuning = EngineTuning {
            threshold: 40.0,
            ..EngineTuning::default()
        };
        let mut engine = SwipeEngine::new(session, tuning);
        engine.drag(50.0, 0.0);
        assert_eq!(engine.release(), Some(Outcome::Accept));
    }
}
