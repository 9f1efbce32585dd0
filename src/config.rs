use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::{ConfigError, StoreError};
use crate::util::is_non_negative;

/// Bounds of the stability resource and how much each keystroke outcome moves it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StabilityConfig {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
    pub correct_gain: f64,
    pub double_bonus_gain: f64,
    /// Correct keystrokes below this value award `double_bonus_gain` instead.
    pub double_bonus_below: f64,
    pub word_complete_gain: f64,
    pub mistake_penalty: f64,
    /// New words come from the easy tier while stability is below this value.
    pub easy_tier_below: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            initial: 100.0,
            correct_gain: 1.0,
            double_bonus_gain: 2.0,
            double_bonus_below: 10.0,
            word_complete_gain: 5.0,
            mistake_penalty: 5.0,
            easy_tier_below: 50.0,
        }
    }
}

/// Endpoints of the idle drain curve. The `base_*` values apply at empty
/// stability and the `min_*` values at full stability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdleDrainConfig {
    pub base_idle_delay: f64,
    pub min_idle_delay: f64,
    pub base_drain_rate: f64,
    pub min_drain_rate: f64,
    pub drain_amount: f64,
}

impl Default for IdleDrainConfig {
    fn default() -> Self {
        Self {
            base_idle_delay: 0.5,
            min_idle_delay: 0.1,
            base_drain_rate: 0.5,
            min_drain_rate: 0.1,
            drain_amount: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComboConfig {
    pub threshold: u32,
    /// Focus Burst can only build while stability is at or below this value.
    pub low_zone_at_or_below: f64,
    pub burst_gain: f64,
    pub cooldown_secs: f64,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            low_zone_at_or_below: 20.0,
            burst_gain: 10.0,
            cooldown_secs: 0.3,
        }
    }
}

/// Durations of the cosmetic timers handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedbackConfig {
    pub mistake_flash_secs: f64,
    pub ability_flash_secs: f64,
    pub shake_secs: f64,
    pub shake_strength: f64,
    pub shake_frequency: f64,
    pub ability_text_secs: f64,
    pub max_pending_events: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            mistake_flash_secs: 0.2,
            ability_flash_secs: 0.25,
            shake_secs: 0.2,
            shake_strength: 10.0,
            shake_frequency: 40.0,
            ability_text_secs: 1.2,
            max_pending_events: 256,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub stability: StabilityConfig,
    pub idle_drain: IdleDrainConfig,
    pub combo: ComboConfig,
    pub feedback: FeedbackConfig,
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stability: StabilityConfig::default(),
            idle_drain: IdleDrainConfig::default(),
            combo: ComboConfig::default(),
            feedback: FeedbackConfig::default(),
            tick_ms: 16,
        }
    }
}

impl Config {
    /// Reject settings a session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.stability;
        if !(s.min.is_finite() && s.max.is_finite() && s.min < s.max) {
            return Err(ConfigError::InvalidBounds {
                min: s.min,
                max: s.max,
            });
        }

        let non_negative = [
            ("stability.correct_gain", s.correct_gain),
            ("stability.double_bonus_gain", s.double_bonus_gain),
            ("stability.word_complete_gain", s.word_complete_gain),
            ("stability.mistake_penalty", s.mistake_penalty),
            ("idle_drain.base_idle_delay", self.idle_drain.base_idle_delay),
            ("idle_drain.min_idle_delay", self.idle_drain.min_idle_delay),
            ("idle_drain.base_drain_rate", self.idle_drain.base_drain_rate),
            ("idle_drain.min_drain_rate", self.idle_drain.min_drain_rate),
            ("idle_drain.drain_amount", self.idle_drain.drain_amount),
            ("combo.burst_gain", self.combo.burst_gain),
            ("combo.cooldown_secs", self.combo.cooldown_secs),
            ("feedback.mistake_flash_secs", self.feedback.mistake_flash_secs),
            ("feedback.ability_flash_secs", self.feedback.ability_flash_secs),
            ("feedback.shake_secs", self.feedback.shake_secs),
            ("feedback.shake_strength", self.feedback.shake_strength),
            ("feedback.shake_frequency", self.feedback.shake_frequency),
            ("feedback.ability_text_secs", self.feedback.ability_text_secs),
        ];
        if let Some((field, value)) = non_negative
            .iter()
            .copied()
            .find(|(_, v)| !is_non_negative(*v))
        {
            return Err(ConfigError::Negative { field, value });
        }

        let within_bounds = [
            ("stability.initial", s.initial),
            ("stability.double_bonus_below", s.double_bonus_below),
            ("stability.easy_tier_below", s.easy_tier_below),
            ("combo.low_zone_at_or_below", self.combo.low_zone_at_or_below),
        ];
        if let Some((field, value)) = within_bounds
            .iter()
            .copied()
            .find(|(_, v)| !(v.is_finite() && *v >= s.min && *v <= s.max))
        {
            return Err(ConfigError::OutOfBounds {
                field,
                value,
                min: s.min,
                max: s.max,
            });
        }

        if self.combo.threshold == 0 {
            return Err(ConfigError::ZeroComboThreshold);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("steadykeys_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), StoreError> {
        write_json(&self.path, cfg)
    }
}

/// Pretty-print `value` to `path`, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, data).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
