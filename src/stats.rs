use serde::Serialize;

/// Characters per word when converting keystrokes into WPM.
pub const AVERAGE_WORD_LENGTH: f64 = 5.0;

/// Running counters for one session. WPM and accuracy are derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStatistics {
    pub total_characters_typed: u64,
    pub correct_characters_typed: u64,
    pub total_mistakes: u64,
    pub words_completed: u64,
    /// Seconds since the session started.
    pub elapsed_time: f64,
}

impl SessionStatistics {
    pub fn words_per_minute(&self) -> f64 {
        if self.elapsed_time <= 0.0 {
            return 0.0;
        }
        (self.correct_characters_typed as f64 / AVERAGE_WORD_LENGTH) / (self.elapsed_time / 60.0)
    }

    pub fn accuracy(&self) -> f64 {
        if self.total_characters_typed == 0 {
            return 100.0;
        }
        self.correct_characters_typed as f64 / self.total_characters_typed as f64 * 100.0
    }

    pub(crate) fn record_keystroke(&mut self, correct: bool) {
        self.total_characters_typed += 1;
        if correct {
            self.correct_characters_typed += 1;
        } else {
            self.total_mistakes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_perfect_before_typing() {
        let stats = SessionStatistics::default();
        assert_eq!(stats.accuracy(), 100.0);
    }

    #[test]
    fn wpm_is_zero_without_elapsed_time() {
        let stats = SessionStatistics {
            correct_characters_typed: 50,
            total_characters_typed: 50,
            ..Default::default()
        };
        assert_eq!(stats.words_per_minute(), 0.0);

        let negative = SessionStatistics {
            elapsed_time: -1.0,
            ..stats
        };
        assert_eq!(negative.words_per_minute(), 0.0);
    }

    #[test]
    fn wpm_from_correct_characters() {
        let stats = SessionStatistics {
            correct_characters_typed: 250,
            total_characters_typed: 260,
            elapsed_time: 60.0,
            ..Default::default()
        };
        assert_eq!(stats.words_per_minute(), 50.0);
    }

    #[test]
    fn accuracy_counts_mistakes() {
        let mut stats = SessionStatistics::default();
        stats.record_keystroke(true);
        stats.record_keystroke(false);
        stats.record_keystroke(true);
        stats.record_keystroke(true);
        assert_eq!(stats.total_characters_typed, 4);
        assert_eq!(stats.correct_characters_typed, 3);
        assert_eq!(stats.total_mistakes, 1);
        assert_eq!(stats.accuracy(), 75.0);
    }
}
