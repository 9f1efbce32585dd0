use tracing::debug;

use crate::config::ComboConfig;
use crate::feedback::Countdown;
use crate::stability::Stability;

/// What a single keystroke did to the Focus Burst combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboStep {
    /// Stability is above the low zone; nothing builds.
    OutOfZone,
    /// The streak grew to the given length without triggering.
    Building(u32),
    /// A burst fired and the stability bonus was applied.
    Burst,
    /// A mistake broke the streak.
    Broken,
}

/// Focus Burst: a bonus that fires after a run of correct keystrokes while
/// stability sits in the low zone, then stays armed for a short cooldown.
#[derive(Debug, Clone)]
pub struct FocusBurst {
    config: ComboConfig,
    streak: u32,
    in_low_zone: bool,
    cooldown: Option<Countdown>,
}

impl FocusBurst {
    pub fn new(config: ComboConfig) -> Self {
        Self {
            config,
            streak: 0,
            in_low_zone: false,
            cooldown: None,
        }
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// True while a burst is resolving and cannot re-trigger.
    pub fn is_armed(&self) -> bool {
        self.cooldown.is_some()
    }

    pub fn in_low_zone(&self) -> bool {
        self.in_low_zone
    }

    pub fn advance(&mut self, correct: bool, stability: &mut Stability) -> ComboStep {
        if !correct {
            // A mistake always breaks the streak, whatever the zone.
            self.streak = 0;
        }

        self.in_low_zone = stability.current() <= self.config.low_zone_at_or_below;
        if !self.in_low_zone {
            self.streak = 0;
            return ComboStep::OutOfZone;
        }

        if !correct {
            return ComboStep::Broken;
        }

        self.streak += 1;
        if self.streak < self.config.threshold || self.is_armed() {
            return ComboStep::Building(self.streak);
        }

        self.cooldown = Some(Countdown::new(self.config.cooldown_secs));
        stability.increase(self.config.burst_gain);
        self.streak = 0;
        debug!(stability = stability.current(), "focus burst");
        ComboStep::Burst
    }

    /// Run down the cooldown; disarms once it expires.
    pub fn tick(&mut self, dt: f64) {
        if let Some(cooldown) = self.cooldown.as_mut() {
            cooldown.advance(dt);
            if cooldown.is_done() {
                self.cooldown = None;
            }
        }
    }
}
