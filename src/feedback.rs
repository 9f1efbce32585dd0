use std::collections::VecDeque;

use crate::config::FeedbackConfig;
use crate::util::lerp;

pub const DOUBLE_BONUS_MESSAGE: &str = "Focus Boost ×2!";
pub const FOCUS_BURST_MESSAGE: &str = "FOCUS BURST!";

const MISTAKE_FLASH_ALPHA: f64 = 0.5;
const ABILITY_FLASH_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum FeedbackKind {
    Correct,
    Mistake,
    DoubleBonus,
    WordComplete,
    FocusBurst,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackPayload {
    /// Stability right after the event was applied.
    pub stability: f64,
    pub character: Option<char>,
    pub message: Option<&'static str>,
}

/// Something the presentation layer should flash, play or print.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
    pub payload: FeedbackPayload,
}

/// Bounded queue of events waiting for the presentation layer. When nobody
/// drains it the oldest events are dropped first.
#[derive(Debug, Clone)]
pub struct FeedbackQueue {
    events: VecDeque<FeedbackEvent>,
    capacity: usize,
}

impl FeedbackQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: FeedbackEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn pending(&self) -> &VecDeque<FeedbackEvent> {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<FeedbackEvent> {
        self.events.drain(..).collect()
    }
}

/// A remaining-duration record advanced by accumulated tick time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f64,
    total: f64,
}

impl Countdown {
    pub fn new(total: f64) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn elapsed(&self) -> f64 {
        self.total - self.remaining
    }

    /// 0 at start, 1 when done.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            1.0
        } else {
            self.elapsed() / self.total
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Green,
    Cyan,
}

impl Tint {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tint::Red => (255, 0, 0),
            Tint::Green => (51, 255, 51),
            Tint::Cyan => (102, 230, 255),
        }
    }
}

/// Full-screen colour flash fading from `start_alpha` to transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub tint: Tint,
    start_alpha: f64,
    countdown: Countdown,
}

impl Flash {
    pub fn alpha(&self) -> f64 {
        lerp(self.start_alpha, 0.0, self.countdown.progress())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shake {
    strength: f64,
    frequency: f64,
    countdown: Countdown,
}

impl Shake {
    /// Horizontal offset of the current word.
    pub fn offset(&self) -> f64 {
        (self.countdown.elapsed() * self.frequency).sin() * self.strength
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityText {
    pub message: &'static str,
    countdown: Countdown,
}

impl AbilityText {
    pub fn alpha(&self) -> f64 {
        lerp(1.0, 0.0, self.countdown.progress())
    }
}

/// Cosmetic timers. Starting a new effect of a kind replaces the running one.
#[derive(Debug, Clone)]
pub struct FeedbackTimers {
    config: FeedbackConfig,
    flash: Option<Flash>,
    shake: Option<Shake>,
    ability_text: Option<AbilityText>,
}

impl FeedbackTimers {
    pub fn new(config: FeedbackConfig) -> Self {
        Self {
            config,
            flash: None,
            shake: None,
            ability_text: None,
        }
    }

    pub fn mistake(&mut self) {
        self.flash = Some(Flash {
            tint: Tint::Red,
            start_alpha: MISTAKE_FLASH_ALPHA,
            countdown: Countdown::new(self.config.mistake_flash_secs),
        });
        self.shake = Some(Shake {
            strength: self.config.shake_strength,
            frequency: self.config.shake_frequency,
            countdown: Countdown::new(self.config.shake_secs),
        });
    }

    pub fn ability(&mut self, tint: Tint, message: &'static str) {
        self.flash = Some(Flash {
            tint,
            start_alpha: ABILITY_FLASH_ALPHA,
            countdown: Countdown::new(self.config.ability_flash_secs),
        });
        self.ability_text = Some(AbilityText {
            message,
            countdown: Countdown::new(self.config.ability_text_secs),
        });
    }

    pub fn tick(&mut self, dt: f64) {
        advance(&mut self.flash, dt, |f| &mut f.countdown);
        advance(&mut self.shake, dt, |s| &mut s.countdown);
        advance(&mut self.ability_text, dt, |t| &mut t.countdown);
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn shake(&self) -> Option<&Shake> {
        self.shake.as_ref()
    }

    pub fn ability_text(&self) -> Option<&AbilityText> {
        self.ability_text.as_ref()
    }
}

fn advance<T>(slot: &mut Option<T>, dt: f64, countdown: impl Fn(&mut T) -> &mut Countdown) {
    if let Some(effect) = slot {
        let c = countdown(effect);
        c.advance(dt);
        if c.is_done() {
            *slot = None;
        }
    }
}
