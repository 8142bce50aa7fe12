//! Match Logic for Trivia Duel
//!
//! Core game logic for a two-player, turn-based trivia match.
//! This crate is compiled to:
//! - Native (for tests and native front ends)
//! - WASM (for the browser page, which performs the question fetch)

mod config;
mod controller;
mod error;
mod presenter;
mod question;
mod random;
mod source;

#[cfg(test)]
mod test_support;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{MatchConfig, PointTable, MAX_POINTS};
pub use controller::{
    AnswerOutcome, MatchController, MatchEvent, Outcome, Phase, Player, QuestionView, Summary,
};
pub use error::{MatchError, SourceError};
pub use presenter::Presenter;
pub use question::{parse_questions, Difficulty, Question};
pub use random::SeededRng;
pub use source::{
    normalize_category, QuestionProvider, QuestionRequest, QuestionSource, TRIVIA_CATEGORIES,
};

/// Points for a correct answer under the standard table
pub fn points_for(difficulty: Difficulty) -> u32 {
    PointTable::standard().for_difficulty(difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(points_for(Difficulty::Easy), 10);
        assert_eq!(points_for(Difficulty::Medium), 15);
        assert_eq!(points_for(Difficulty::Hard), 20);
    }
}
