use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::ConfigError;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Normal,
    Easy,
}

impl Tier {
    fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// Source of target words for a session.
pub trait WordSupplier {
    /// Draw the next target. Never empty; exhaustion is handled internally.
    fn next(&mut self, use_easy: bool) -> String;
}

#[derive(Deserialize, Clone, Debug)]
struct WordList {
    #[allow(dead_code)]
    name: String,
    words: Vec<String>,
}

/// Shuffle-bag over a fixed set: every entry is drawn once per cycle, and
/// each cycle uses a fresh random order.
#[derive(Debug, Clone)]
pub struct WordPool {
    tier: Tier,
    backing: Vec<String>,
    working: Vec<String>,
    last_cycle: Vec<String>,
}

impl WordPool {
    pub fn new(tier: Tier, backing: Vec<String>) -> Result<Self, ConfigError> {
        if backing.is_empty() {
            return Err(ConfigError::EmptyWordSet { tier });
        }
        if let Some(index) = backing.iter().position(|w| w.trim().is_empty()) {
            return Err(ConfigError::BlankWord { tier, index });
        }
        Ok(Self {
            tier,
            backing,
            working: Vec::new(),
            last_cycle: Vec::new(),
        })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn backing(&self) -> &[String] {
        &self.backing
    }

    /// Words left before the next refill.
    pub fn remaining(&self) -> usize {
        self.working.len()
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        if self.working.is_empty() {
            self.refill(rng);
        }
        // refill guarantees a non-empty queue because backing is never empty
        self.working.pop().unwrap_or_else(|| self.backing[0].clone())
    }

    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.working.clone_from(&self.backing);
        self.working.shuffle(rng);

        // Avoid handing out the exact same order twice in a row. Sets made of
        // a single distinct word only have one order.
        let distinct = self.backing.iter().any(|w| *w != self.backing[0]);
        while distinct && self.working == self.last_cycle {
            self.working.shuffle(rng);
        }
        self.last_cycle.clone_from(&self.working);
        tracing::trace!(tier = %self.tier, size = self.working.len(), "word pool refilled");
    }
}

/// Two independent shuffle-bags: the normal tier and the easy tier.
#[derive(Debug, Clone)]
pub struct WordBank<R: Rng = StdRng> {
    normal: WordPool,
    easy: WordPool,
    rng: R,
}

impl WordBank<StdRng> {
    /// Word lists compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_lists(load_tier(Tier::Normal)?, load_tier(Tier::Easy)?)
    }

    pub fn from_lists(normal: Vec<String>, easy: Vec<String>) -> Result<Self, ConfigError> {
        Self::with_rng(normal, easy, StdRng::from_entropy())
    }

    pub fn seeded(normal: Vec<String>, easy: Vec<String>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(normal, easy, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WordBank<R> {
    pub fn with_rng(normal: Vec<String>, easy: Vec<String>, rng: R) -> Result<Self, ConfigError> {
        Ok(Self {
            normal: WordPool::new(Tier::Normal, normal)?,
            easy: WordPool::new(Tier::Easy, easy)?,
            rng,
        })
    }

    pub fn pool(&self, tier: Tier) -> &WordPool {
        match tier {
            Tier::Normal => &self.normal,
            Tier::Easy => &self.easy,
        }
    }
}

impl<R: Rng> WordSupplier for WordBank<R> {
    fn next(&mut self, use_easy: bool) -> String {
        let pool = if use_easy {
            &mut self.easy
        } else {
            &mut self.normal
        };
        pool.draw(&mut self.rng)
    }
}

fn load_tier(tier: Tier) -> Result<Vec<String>, ConfigError> {
    let name = tier.file_name();
    let contents = WORDS_DIR
        .get_file(&name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| ConfigError::MissingWordList { name: name.clone() })?;
    let list: WordList =
        serde_json::from_str(contents).map_err(|err| ConfigError::MalformedWordList {
            name,
            reason: err.to_string(),
        })?;
    Ok(list.words)
}
