use tracing::debug;

use crate::combo::{ComboStep, FocusBurst};
use crate::config::Config;
use crate::error::ConfigError;
use crate::feedback::{
    FeedbackEvent, FeedbackKind, FeedbackPayload, FeedbackQueue, FeedbackTimers, Tint,
    DOUBLE_BONUS_MESSAGE, FOCUS_BURST_MESSAGE,
};
use crate::idle_drain::IdleDrain;
use crate::stability::Stability;
use crate::stats::SessionStatistics;
use crate::travel::TravelLog;
use crate::word_bank::{WordBank, WordSupplier};

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// The word being typed. `remaining` is always a suffix of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWord {
    text: String,
    consumed: usize,
}

impl TargetWord {
    pub fn new(text: String) -> Self {
        Self { text, consumed: 0 }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn remaining(&self) -> &str {
        &self.text[self.consumed..]
    }

    pub fn next_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn is_complete(&self) -> bool {
        self.consumed >= self.text.len()
    }

    fn pop(&mut self) {
        if let Some(c) = self.next_char() {
            self.consumed += c.len_utf8();
        }
    }
}

/// One typing session: consumes keystrokes against the current word and keeps
/// stability, Focus Burst, statistics and feedback in step.
///
/// Time is supplied by the host. `now` passed to [`TypingSession::tick`] is
/// seconds since the session started on a monotonic clock.
#[derive(Debug)]
pub struct TypingSession<S: WordSupplier = WordBank> {
    config: Config,
    supplier: S,
    stability: Stability,
    idle_drain: IdleDrain,
    combo: FocusBurst,
    timers: FeedbackTimers,
    feedback: FeedbackQueue,
    stats: SessionStatistics,
    travel: TravelLog,
    word: TargetWord,
    now: f64,
    last_action: f64,
}

impl TypingSession<WordBank> {
    pub fn with_embedded_words(config: Config) -> Result<Self, ConfigError> {
        Self::new(config, WordBank::embedded()?)
    }
}

impl<S: WordSupplier> TypingSession<S> {
    pub fn new(config: Config, mut supplier: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let stability = Stability::new(&config.stability);
        let word = TargetWord::new(
            supplier.next(stability.current() < config.stability.easy_tier_below),
        );

        Ok(Self {
            idle_drain: IdleDrain::new(config.idle_drain.clone()),
            combo: FocusBurst::new(config.combo.clone()),
            timers: FeedbackTimers::new(config.feedback.clone()),
            feedback: FeedbackQueue::new(config.feedback.max_pending_events),
            stats: SessionStatistics::default(),
            travel: TravelLog::new(),
            now: 0.0,
            last_action: 0.0,
            config,
            supplier,
            stability,
            word,
        })
    }

    /// Feed a raw input packet. Only its first character is typed; the rest
    /// is dropped and an empty packet does nothing.
    pub fn on_input(&mut self, text: &str) -> Option<Outcome> {
        let c = text.chars().next()?;
        Some(self.on_keystroke(c))
    }

    pub fn on_keystroke(&mut self, c: char) -> Outcome {
        self.last_action = self.now;

        let outcome = if self.word.next_char() == Some(c) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.stats.record_keystroke(outcome == Outcome::Correct);

        match outcome {
            Outcome::Correct => self.handle_correct(c),
            Outcome::Incorrect => self.handle_incorrect(c),
        }
        outcome
    }

    fn handle_correct(&mut self, c: char) {
        let s = &self.config.stability;
        if self.stability.current() < s.double_bonus_below {
            self.stability.increase(s.double_bonus_gain);
            self.timers.ability(Tint::Green, DOUBLE_BONUS_MESSAGE);
            self.emit(FeedbackKind::DoubleBonus, Some(c), Some(DOUBLE_BONUS_MESSAGE));
        } else {
            self.stability.increase(s.correct_gain);
            self.emit(FeedbackKind::Correct, Some(c), None);
        }

        self.word.pop();
        self.advance_combo(true);

        if self.word.is_complete() {
            self.complete_word();
        }
    }

    fn handle_incorrect(&mut self, c: char) {
        self.stability.decrease(self.config.stability.mistake_penalty);
        self.timers.mistake();
        self.emit(FeedbackKind::Mistake, Some(c), None);
        self.advance_combo(false);
    }

    fn advance_combo(&mut self, correct: bool) {
        if self.combo.advance(correct, &mut self.stability) == ComboStep::Burst {
            self.timers.ability(Tint::Cyan, FOCUS_BURST_MESSAGE);
            self.emit(FeedbackKind::FocusBurst, None, Some(FOCUS_BURST_MESSAGE));
        }
    }

    fn complete_word(&mut self) {
        self.stats.words_completed += 1;
        self.stability
            .increase(self.config.stability.word_complete_gain);
        debug!(
            word = self.word.text(),
            words_completed = self.stats.words_completed,
            "word complete"
        );
        self.word = TargetWord::new(self.supplier.next(self.use_easy_tier()));
        self.emit(FeedbackKind::WordComplete, None, None);
    }

    /// Tier for the next draw, decided from stability at draw time.
    pub fn use_easy_tier(&self) -> bool {
        self.stability.current() < self.config.stability.easy_tier_below
    }

    fn emit(&mut self, kind: FeedbackKind, character: Option<char>, message: Option<&'static str>) {
        self.feedback.push(FeedbackEvent {
            kind,
            payload: FeedbackPayload {
                stability: self.stability.current(),
                character,
                message,
            },
        });
    }

    /// Advance the session by `dt` seconds to time `now`.
    pub fn tick(&mut self, dt: f64, now: f64) {
        let dt = dt.max(0.0);
        self.now = now;
        self.stats.elapsed_time = now.max(0.0);

        self.idle_drain
            .update(now, self.last_action, dt, &mut self.stability);
        self.combo.tick(dt);
        self.timers.tick(dt);
        self.travel.advance(self.stability.fraction(), dt);
    }

    pub fn current_word(&self) -> &str {
        self.word.text()
    }

    pub fn current_word_remaining(&self) -> &str {
        self.word.remaining()
    }

    pub fn current_stability(&self) -> f64 {
        self.stability.current()
    }

    pub fn stability(&self) -> &Stability {
        &self.stability
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.stats
    }

    pub fn pending_feedback(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.feedback.pending().iter()
    }

    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        self.feedback.drain()
    }

    pub fn combo(&self) -> &FocusBurst {
        &self.combo
    }

    pub fn timers(&self) -> &FeedbackTimers {
        &self.timers
    }

    pub fn travel(&self) -> &TravelLog {
        &self.travel
    }

    pub fn idle_drain(&self) -> &IdleDrain {
        &self.idle_drain
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn last_action(&self) -> f64 {
        self.last_action
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn supplier(&self) -> &S {
        &self.supplier
    }
}
