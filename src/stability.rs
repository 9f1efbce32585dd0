use tracing::trace;

use crate::config::StabilityConfig;
use crate::util::{inverse_lerp, lerp};

/// Maximum word tremble offset at zero stability.
const MAX_TREMBLE: f64 = 10.0;
const TREMBLE_EXPONENT: f64 = 1.2;

/// The single bounded player resource. Every mutation applies the full delta
/// and then clamps, so chained calls in one tick compose predictably.
#[derive(Debug, Clone, PartialEq)]
pub struct Stability {
    value: f64,
    min: f64,
    max: f64,
}

impl Stability {
    pub fn new(config: &StabilityConfig) -> Self {
        Self::with_bounds(config.min, config.max, config.initial)
    }

    pub fn with_bounds(min: f64, max: f64, initial: f64) -> Self {
        Self {
            value: initial.clamp(min, max),
            min,
            max,
        }
    }

    pub fn current(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn increase(&mut self, amount: f64) {
        self.value = (self.value + amount).clamp(self.min, self.max);
        trace!(stability = self.value, amount, "stability increased");
    }

    pub fn decrease(&mut self, amount: f64) {
        self.value = (self.value - amount).clamp(self.min, self.max);
        trace!(stability = self.value, amount, "stability decreased");
    }

    /// Position within the bounds: 0 when empty, 1 when full.
    pub fn fraction(&self) -> f64 {
        inverse_lerp(self.min, self.max, self.value)
    }

    /// Normalized pressure signal for presentation: 0 when full, 1 when empty.
    pub fn intensity(&self) -> f64 {
        1.0 - self.fraction()
    }

    /// How far the current word should tremble, in presentation units.
    pub fn tremble_strength(&self) -> f64 {
        lerp(0.0, MAX_TREMBLE, self.intensity().powf(TREMBLE_EXPONENT))
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self::new(&StabilityConfig::default())
    }
}
