//! Adaptive mastery score.
//!
//! Rewards shrink as the score climbs so that the last stretch to mastery
//! needs a sustained run of correct answers:
//!
//! | pre-update score | correct | incorrect (default) |
//! |------------------|---------|---------------------|
//! | `< 50`           | +10     | −4                  |
//! | `50..70`         | +5      | −6                  |
//! | `70..90`         | +2      | −8                  |
//! | `>= 90`          | +1      | −10                 |
//!
//! The score is clamped to `0..=100`. 100 is mastered, 90 and above is the
//! challenge zone.

use serde::Deserialize;

use crate::practice_engine::models::{DifficultyTier, ScoreState};

pub const MAX_SCORE: u8 = 100;
pub const CHALLENGE_ZONE: u8 = 90;

/// Reward for a correct answer given the pre-update score.
pub fn reward_for(score: u8) -> u8 {
    match score {
        0..=49  => 10,
        50..=69 => 5,
        70..=89 => 2,
        _       => 1,
    }
}

/// Penalty bands for incorrect answers, same boundaries as the rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub penalty_below_50: u8,
    pub penalty_below_70: u8,
    pub penalty_below_90: u8,
    pub penalty_top: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            penalty_below_50: 4,
            penalty_below_70: 6,
            penalty_below_90: 8,
            penalty_top: 10,
        }
    }
}

impl ScoringConfig {
    /// No score loss on a wrong answer; only the streak resets.
    pub fn lenient() -> Self {
        ScoringConfig {
            penalty_below_50: 0,
            penalty_below_70: 0,
            penalty_below_90: 0,
            penalty_top: 0,
        }
    }

    pub fn penalty_for(&self, score: u8) -> u8 {
        match score {
            0..=49  => self.penalty_below_50,
            50..=69 => self.penalty_below_70,
            70..=89 => self.penalty_below_90,
            _       => self.penalty_top,
        }
    }

    pub fn apply(&self, state: &mut ScoreState, correct: bool) {
        state.attempt_count = state.attempt_count.saturating_add(1);
        if correct {
            state.streak = state.streak.saturating_add(1);
            state.score = state.score.saturating_add(reward_for(state.score)).min(MAX_SCORE);
        } else {
            state.streak = 0;
            state.score = state.score.saturating_sub(self.penalty_for(state.score));
        }
    }
}

impl ScoreState {
    /// Apply one graded attempt with the default penalty bands.
    pub fn apply(&mut self, correct: bool) {
        ScoringConfig::default().apply(self, correct);
    }

    pub fn tier(&self) -> DifficultyTier {
        next_difficulty(self.score)
    }

    pub fn is_challenge_zone(&self) -> bool {
        is_challenge_zone(self.score)
    }

    pub fn is_mastered(&self) -> bool {
        is_mastered(self.score)
    }
}

pub fn apply_result(state: &mut ScoreState, correct: bool) {
    state.apply(correct);
}

/// Tier the next exercise should be generated at.
pub fn next_difficulty(score: u8) -> DifficultyTier {
    match score {
        0..=39  => DifficultyTier::Easy,
        40..=79 => DifficultyTier::Medium,
        _       => DifficultyTier::Hard,
    }
}

pub fn is_challenge_zone(score: u8) -> bool {
    score >= CHALLENGE_ZONE
}

pub fn is_mastered(score: u8) -> bool {
    score >= MAX_SCORE
}
