use tracing::trace;

use crate::config::IdleDrainConfig;
use crate::stability::Stability;
use crate::util::lerp;

/// Drains stability while the player is not typing. The higher stability is,
/// the shorter the grace period and the faster the drain.
#[derive(Debug, Clone)]
pub struct IdleDrain {
    config: IdleDrainConfig,
    idle_timer: f64,
}

impl IdleDrain {
    pub fn new(config: IdleDrainConfig) -> Self {
        Self {
            config,
            idle_timer: 0.0,
        }
    }

    /// Seconds without input before draining starts, for a stability fraction in [0, 1].
    pub fn delay_for(&self, fraction: f64) -> f64 {
        lerp(self.config.base_idle_delay, self.config.min_idle_delay, fraction)
    }

    /// Seconds between drains once idle, for a stability fraction in [0, 1].
    pub fn rate_for(&self, fraction: f64) -> f64 {
        lerp(self.config.base_drain_rate, self.config.min_drain_rate, fraction)
    }

    pub fn idle_timer(&self) -> f64 {
        self.idle_timer
    }

    /// Advance one tick. Returns true when a drain was applied.
    pub fn update(
        &mut self,
        now: f64,
        last_action: f64,
        dt: f64,
        stability: &mut Stability,
    ) -> bool {
        let fraction = stability.fraction();
        let delay = self.delay_for(fraction);
        let rate = self.rate_for(fraction);

        if now - last_action <= delay {
            self.idle_timer = 0.0;
            return false;
        }

        self.idle_timer += dt;
        if self.idle_timer < rate {
            return false;
        }

        stability.decrease(self.config.drain_amount);
        self.idle_timer = 0.0;
        trace!(
            stability = stability.current(),
            delay,
            rate,
            "idle drain applied"
        );
        true
    }
}
