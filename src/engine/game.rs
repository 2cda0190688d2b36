use crate::engine::power::PowerMeter;
use crate::session::result::RoundResult;
use crate::session::state::{Phase, Session};

/// Notifications the engine emits for presentation collaborators.
/// Plain data; the engine holds no reference to whatever consumes them.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    /// A keystroke was accepted at `index`. `word_boundary` marks a
    /// correctly typed space.
    Keystroke {
        index: usize,
        correct: bool,
        word_boundary: bool,
    },
    /// Backspace removed these indices, most recent first.
    CharsRemoved { indices: Vec<usize> },
    MultiplierChanged { from: u32, to: u32 },
    EnergyChanged { value: u8 },
    ScoreChanged { value: f64 },
    Completed(RoundResult),
}

/// One round of play: the session state machine plus the power meter fed
/// by its correctness stream. Every operation returns the events it
/// produced, in order.
#[derive(Default)]
pub struct Game {
    session: Session,
    power: PowerMeter,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn power(&self) -> &PowerMeter {
        &self.power
    }

    pub fn multiplier(&self) -> u32 {
        self.power.multiplier()
    }

    /// Start a round. No-op on empty text (the session stays as it was).
    pub fn load_sample(&mut self, text: &str) {
        self.session.load_sample(text);
        if self.session.phase() == Phase::Active && self.session.cursor() == 0 {
            self.power.reset();
        }
    }

    pub fn type_char(&mut self, ch: char) -> Vec<EngineEvent> {
        let energy_before = self.session.energy();
        let score_before = self.session.score();

        let Some(outcome) = self.session.type_char(ch, self.power.multiplier()) else {
            return Vec::new();
        };

        let mut events = vec![EngineEvent::Keystroke {
            index: outcome.index,
            correct: outcome.correct,
            word_boundary: outcome.word_boundary,
        }];

        if outcome.correct {
            if let Some((from, to)) = self.power.on_correct() {
                events.push(EngineEvent::MultiplierChanged { from, to });
            }
            if self.session.score() != score_before {
                events.push(EngineEvent::ScoreChanged {
                    value: self.session.score(),
                });
            }
        } else {
            if let Some((from, to)) = self.power.on_streak_break() {
                events.push(EngineEvent::MultiplierChanged { from, to });
            }
            if self.session.energy() != energy_before {
                events.push(EngineEvent::EnergyChanged {
                    value: self.session.energy(),
                });
            }
        }

        if self.session.phase() == Phase::Completed {
            events.push(EngineEvent::Completed(RoundResult::from_session(
                &self.session,
            )));
        }

        events
    }

    pub fn backspace(&mut self, whole_word: bool) -> Vec<EngineEvent> {
        let energy_before = self.session.energy();
        let indices = self.session.backspace(whole_word);
        if indices.is_empty() {
            return Vec::new();
        }

        let mut events = vec![EngineEvent::CharsRemoved { indices }];
        if let Some((from, to)) = self.power.on_streak_break() {
            events.push(EngineEvent::MultiplierChanged { from, to });
        }
        if self.session.energy() != energy_before {
            events.push(EngineEvent::EnergyChanged {
                value: self.session.energy(),
            });
        }
        events
    }

    /// Advance the power decay clock. Decay only runs while the round is
    /// active with a live streak; otherwise the tick falls through, which
    /// is the "cancelled timer" of the decay model.
    pub fn tick(&mut self, delta_ms: f64) -> Option<EngineEvent> {
        if self.session.phase() != Phase::Active || self.session.streak() == 0 {
            return None;
        }
        self.power
            .tick(delta_ms)
            .map(|(from, to)| EngineEvent::MultiplierChanged { from, to })
    }

    /// Discard the round synchronously. Safe from any state.
    pub fn reset(&mut self) {
        self.session.reset();
        self.power.reset();
    }
}
