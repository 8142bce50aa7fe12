//! Match configuration

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::question::Difficulty;

/// Upper bound on points for a single correct answer
pub const MAX_POINTS: u32 = 1_000;

/// Points awarded for a correct answer, per difficulty bucket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointTable {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl PointTable {
    /// 10 / 15 / 20
    pub fn standard() -> Self {
        Self { easy: 10, medium: 15, hard: 20 }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration for question retrieval and scoring
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Base URL of the trivia API, without trailing slash
    pub api_base: String,
    /// Candidates requested per category
    pub candidate_limit: u32,
    /// Questions taken from each difficulty bucket per round
    pub per_difficulty: usize,
    pub points: PointTable,
}

impl MatchConfig {
    /// the-trivia-api v2, 30 candidates, 2 questions per difficulty
    pub fn standard() -> Self {
        Self {
            api_base: "https://the-trivia-api.com/v2".to_string(),
            candidate_limit: 30,
            per_difficulty: 2,
            points: PointTable::standard(),
        }
    }

    /// Parse a JSON config; missing fields fall back to [`MatchConfig::standard`]
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: MatchConfig = serde_json::from_str(json)
            .map_err(|e| MatchError::InvalidInput(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.api_base.trim().is_empty() {
            return Err(MatchError::InvalidInput("config: api_base is empty".into()));
        }
        if self.per_difficulty == 0 {
            return Err(MatchError::InvalidInput("config: per_difficulty must be >= 1".into()));
        }
        for difficulty in Difficulty::ALL {
            let points = self.points.for_difficulty(difficulty);
            if points > MAX_POINTS {
                return Err(MatchError::InvalidInput(format!(
                    "config: {} points {} exceed {}",
                    difficulty.as_str(),
                    points,
                    MAX_POINTS
                )));
            }
        }
        let round_length = self.round_length() as u32;
        if self.candidate_limit < round_length {
            return Err(MatchError::InvalidInput(format!(
                "config: candidate_limit {} is below round length {}",
                self.candidate_limit, round_length
            )));
        }
        Ok(())
    }

    /// Questions per round (one bucket per difficulty)
    pub fn round_length(&self) -> usize {
        self.per_difficulty * Difficulty::ALL.len()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}
