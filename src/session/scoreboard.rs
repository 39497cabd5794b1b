//! Score, multiplier and high score across rounds
//!
//! Lives as long as the session; nothing is persisted.

use crate::sim::RunTime;

/// What a finished round leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Beat the time, below the win score: pick reset or risk
    Continue { round_score: u64 },
    /// Beat the time and crossed the win score
    Won { beat_high_score: bool },
    /// Did not beat the time to beat
    Lost { beat_high_score: bool },
}

/// Session scalars shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u64,
    /// Score of the last round that beat its time
    pub round_score: u64,
    pub multiplier: u32,
    pub high_score: u64,
    /// Time the next round has to beat
    pub last_run_time: RunTime,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            round_score: 0,
            multiplier: 1,
            high_score: 0,
            last_run_time: RunTime::ZERO,
        }
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for a round: ten points per second times the multiplier
    pub fn round_score_for(&self, run_time: RunTime) -> u64 {
        run_time.tenths() * u64::from(self.multiplier)
    }

    /// Book a finished round
    pub fn finish_round(&mut self, run_time: RunTime, win_score: u64) -> RoundOutcome {
        if run_time > self.last_run_time {
            self.round_score = self.round_score_for(run_time);
            self.score += self.round_score;
            if self.score > win_score {
                RoundOutcome::Won {
                    beat_high_score: self.update_high_score(),
                }
            } else {
                RoundOutcome::Continue {
                    round_score: self.round_score,
                }
            }
        } else {
            RoundOutcome::Lost {
                beat_high_score: self.update_high_score(),
            }
        }
    }

    /// Raise the high score to the current score if it is higher
    fn update_high_score(&mut self) -> bool {
        let beat = self.score > self.high_score;
        if beat {
            self.high_score = self.score;
        }
        beat
    }

    /// Play it safe: back to 1x, any time beats the next round
    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
        self.last_run_time = RunTime::ZERO;
    }

    /// Double down: one more x, but the next round must beat this one
    pub fn raise_stakes(&mut self, run_time: RunTime) {
        self.multiplier += 1;
        self.last_run_time = run_time;
    }

    /// Fresh game, high score survives
    pub fn new_game(&mut self) {
        self.last_run_time = RunTime::ZERO;
        self.round_score = 0;
        self.score = 0;
        self.multiplier = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_round_scores() {
        let mut board = Scoreboard::new();
        let outcome = board.finish_round(RunTime::from_secs(12.3), 2000);
        assert_eq!(outcome, RoundOutcome::Continue { round_score: 123 });
        assert_eq!(board.score, 123);
        assert_eq!(board.round_score, 123);
        assert_eq!(board.high_score, 0, "high score only updates when the game ends");
    }

    #[test]
    fn test_multiplier_scales_score() {
        let mut board = Scoreboard {
            multiplier: 3,
            ..Default::default()
        };
        board.finish_round(RunTime::from_secs(4.5), 2000);
        assert_eq!(board.round_score, 135);
    }

    #[test]
    fn test_win_updates_high_score() {
        let mut board = Scoreboard {
            score: 1900,
            high_score: 1000,
            ..Default::default()
        };
        let outcome = board.finish_round(RunTime::from_secs(15.0), 2000);
        assert_eq!(outcome, RoundOutcome::Won { beat_high_score: true });
        assert_eq!(board.score, 2050);
        assert_eq!(board.high_score, 2050);
    }

    #[test]
    fn test_win_score_is_exclusive() {
        let mut board = Scoreboard {
            score: 1900,
            ..Default::default()
        };
        let outcome = board.finish_round(RunTime::from_secs(10.0), 2000);
        assert_eq!(outcome, RoundOutcome::Continue { round_score: 100 });
    }

    #[test]
    fn test_not_beating_time_loses() {
        let mut board = Scoreboard {
            score: 300,
            round_score: 80,
            multiplier: 2,
            high_score: 500,
            last_run_time: RunTime::from_secs(8.0),
        };
        let outcome = board.finish_round(RunTime::from_secs(8.0), 2000);
        assert_eq!(outcome, RoundOutcome::Lost { beat_high_score: false });
        assert_eq!(board.score, 300);
        assert_eq!(board.round_score, 80);
        assert_eq!(board.high_score, 500);
    }

    #[test]
    fn test_losing_with_best_score_sets_high_score() {
        let mut board = Scoreboard {
            score: 700,
            high_score: 500,
            last_run_time: RunTime::from_secs(20.0),
            ..Default::default()
        };
        let outcome = board.finish_round(RunTime::from_secs(3.0), 2000);
        assert_eq!(outcome, RoundOutcome::Lost { beat_high_score: true });
        assert_eq!(board.high_score, 700);
    }

    #[test]
    fn test_reset_and_risk() {
        let mut board = Scoreboard {
            multiplier: 3,
            last_run_time: RunTime::from_secs(5.0),
            ..Default::default()
        };
        board.raise_stakes(RunTime::from_secs(7.4));
        assert_eq!(board.multiplier, 4);
        assert_eq!(board.last_run_time.to_string(), "7.4");

        board.reset_multiplier();
        assert_eq!(board.multiplier, 1);
        assert_eq!(board.last_run_time, RunTime::ZERO);
    }

    #[test]
    fn test_new_game_keeps_high_score() {
        let mut board = Scoreboard {
            score: 900,
            round_score: 90,
            multiplier: 5,
            high_score: 900,
            last_run_time: RunTime::from_secs(9.0),
        };
        board.new_game();
        assert_eq!(
            board,
            Scoreboard {
                high_score: 900,
                ..Default::default()
            }
        );
    }
}
