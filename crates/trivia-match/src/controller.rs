//! Match state machine
//!
//! `Setup → CategorySelect → Question → Answered → RoundEnd → (CategorySelect | MatchEnd)`
//!
//! All state lives in one [`MatchController`]. Every transition returns plain
//! data ([`MatchEvent`], [`AnswerOutcome`]); rendering is left to a
//! [`Presenter`](crate::Presenter).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::{MatchError, SourceError};
use crate::question::{Difficulty, Question};
use crate::random::SeededRng;
use crate::source::{
    normalize_category, QuestionProvider, QuestionRequest, QuestionSource, TRIVIA_CATEGORIES,
};

/// Match phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for player names
    #[default]
    Setup,
    /// Waiting for a category (or for its questions to arrive)
    CategorySelect,
    /// A question is on screen for the active player
    Question,
    /// Transient: an answer was scored, the next turn is being prepared
    Answered,
    /// All questions of the round were answered
    RoundEnd,
    /// Stopped; only a new match can follow
    MatchEnd,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), score: 0 }
    }
}

/// Everything needed to render one turn
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub player_index: usize,
    pub player_name: String,
    pub round: u32,
    /// 1-based position within the round
    pub question_number: usize,
    pub total_questions: usize,
    pub category: String,
    pub difficulty: Difficulty,
    pub question_text: String,
    pub answer_options: Vec<String>,
}

/// Final match result
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Winner { index: usize, name: String },
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner { name, .. } => write!(f, "{} wins!", name),
            Outcome::Tie => write!(f, "It's a tie!"),
        }
    }
}

/// Scores after a round, plus the outcome once the match is stopped
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub round: u32,
    pub scores: Vec<Player>,
    pub outcome: Option<Outcome>,
    pub winner_text: Option<String>,
}

impl Summary {
    pub fn is_final(&self) -> bool {
        self.outcome.is_some()
    }
}

/// What the presentation layer should show next
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum MatchEvent {
    Question(QuestionView),
    RoundOver(Summary),
    MatchOver(Summary),
}

impl MatchEvent {
    pub fn question(&self) -> Option<&QuestionView> {
        match self {
            MatchEvent::Question(view) => Some(view),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            MatchEvent::RoundOver(summary) | MatchEvent::MatchOver(summary) => Some(summary),
            MatchEvent::Question(_) => None,
        }
    }
}

/// Result of scoring one answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub player_index: usize,
    pub correct: bool,
    pub points_awarded: u32,
    pub correct_answer: String,
    pub next: MatchEvent,
}

#[derive(Clone, Debug, Default)]
struct MatchState {
    players: Vec<Player>,
    current_player: usize,
    queue: Vec<Question>,
    current_question: usize,
    /// Grow-only for the lifetime of a match
    used_categories: Vec<String>,
    current_category: Option<String>,
    /// Category whose questions are being retrieved
    pending: Option<String>,
    round: u32,
    ended: bool,
    phase: Phase,
}

/// Owns one match and drives it turn by turn
#[derive(Clone, Debug)]
pub struct MatchController {
    config: MatchConfig,
    source: QuestionSource,
    rng: SeededRng,
    state: MatchState,
}

impl MatchController {
    /// Create a controller; `seed` drives answer shuffling
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Controller with [`MatchConfig::standard`]
    pub fn standard(seed: u64) -> Self {
        Self::build(MatchConfig::standard(), seed)
    }

    fn build(config: MatchConfig, seed: u64) -> Self {
        Self {
            source: QuestionSource::new(&config),
            config,
            rng: SeededRng::new(seed),
            state: MatchState::default(),
        }
    }

    fn require(&self, operation: &'static str, allowed: &[Phase]) -> Result<(), MatchError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(MatchError::InvalidState { operation, phase: self.state.phase })
        }
    }

    /// Begin a fresh match. Valid from `Setup` or after a match has ended.
    pub fn start_match(&mut self, first: &str, second: &str) -> Result<(), MatchError> {
        self.require("start_match", &[Phase::Setup, Phase::MatchEnd])?;

        let names = [first.trim(), second.trim()];
        if let Some(i) = names.iter().position(|n| n.is_empty()) {
            return Err(MatchError::InvalidInput(format!("player {} name is empty", i + 1)));
        }

        self.state = MatchState {
            players: names.iter().map(|n| Player::new(n)).collect(),
            phase: Phase::CategorySelect,
            ..MatchState::default()
        };
        log::info!("match started: {} vs {}", names[0], names[1]);
        Ok(())
    }

    /// First half of a category selection: validate and mark the retrieval
    /// as outstanding. The caller performs the returned request and hands
    /// the outcome to [`complete_category_selection`](Self::complete_category_selection).
    ///
    /// A category already played in this match is reported as
    /// `DuplicateCategory` whatever the phase.
    pub fn begin_category_selection(
        &mut self,
        category: &str,
    ) -> Result<QuestionRequest, MatchError> {
        if let Some(pending) = &self.state.pending {
            return Err(MatchError::OperationInProgress(pending.clone()));
        }

        let category = normalize_category(category)?;
        if self.state.used_categories.contains(&category) {
            return Err(MatchError::DuplicateCategory(category));
        }
        self.require("select_category", &[Phase::CategorySelect])?;

        let request = self.source.request(&category);
        log::debug!("retrieving questions: {}", request.url);
        self.state.pending = Some(category);
        Ok(request)
    }

    /// Second half of a category selection.
    ///
    /// On failure the category stays unused and the match remains in
    /// `CategorySelect`, ready for another attempt.
    pub fn complete_category_selection(
        &mut self,
        fetched: Result<String, SourceError>,
    ) -> Result<MatchEvent, MatchError> {
        let Some(category) = self.state.pending.take() else {
            return Err(MatchError::InvalidState {
                operation: "complete_category_selection",
                phase: self.state.phase,
            });
        };

        let selected = fetched.map_err(MatchError::from).and_then(|body| {
            let candidates = self.source.parse_candidates(&body)?;
            self.source.select_round(candidates)
        });
        let questions = match selected {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("category `{}` rejected: {}", category, err);
                return Err(err);
            }
        };

        self.state.round += 1;
        log::info!("round {}: {} questions from `{}`", self.state.round, questions.len(), category);
        self.state.used_categories.push(category.clone());
        self.state.current_category = Some(category);
        self.state.queue = questions;
        self.state.current_question = 0;
        self.state.phase = Phase::Question;

        Ok(self.present())
    }

    /// Select a category and retrieve its questions through `provider`
    pub fn select_category<P: QuestionProvider + ?Sized>(
        &mut self,
        category: &str,
        provider: &P,
    ) -> Result<MatchEvent, MatchError> {
        let request = self.begin_category_selection(category)?;
        let fetched = provider.fetch(&request);
        self.complete_category_selection(fetched)
    }

    /// The current question with freshly shuffled options, or the round
    /// summary once every question has been answered.
    pub fn present_current_question(&mut self) -> Result<MatchEvent, MatchError> {
        self.require("present_current_question", &[Phase::Question, Phase::Answered])?;
        Ok(self.present())
    }

    fn present(&mut self) -> MatchEvent {
        let Some(question) = self.state.queue.get(self.state.current_question) else {
            self.state.phase = Phase::RoundEnd;
            log::info!("round {} finished", self.state.round);
            return MatchEvent::RoundOver(self.summary());
        };

        let mut options = question.options();
        self.rng.shuffle(&mut options);
        self.state.phase = Phase::Question;

        let player = &self.state.players[self.state.current_player];
        MatchEvent::Question(QuestionView {
            player_index: self.state.current_player,
            player_name: player.name.clone(),
            round: self.state.round,
            question_number: self.state.current_question + 1,
            total_questions: self.state.queue.len(),
            category: self.state.current_category.clone().unwrap_or_default(),
            difficulty: question.difficulty,
            question_text: question.prompt.clone(),
            answer_options: options,
        })
    }

    /// Score `answer` for the active player, then hand the turn over.
    ///
    /// The turn passes and the question index advances whether or not the
    /// answer was correct.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, MatchError> {
        self.require("submit_answer", &[Phase::Question])?;
        let Some(question) = self.state.queue.get(self.state.current_question) else {
            return Err(MatchError::InvalidState {
                operation: "submit_answer",
                phase: self.state.phase,
            });
        };

        let player_index = self.state.current_player;
        let correct = question.is_correct(answer);
        let points_awarded = if correct {
            self.config.points.for_difficulty(question.difficulty)
        } else {
            0
        };
        let correct_answer = question.correct_answer.clone();

        let player = &mut self.state.players[player_index];
        player.score = player.score.saturating_add(points_awarded);
        self.state.phase = Phase::Answered;
        self.state.current_player = (player_index + 1) % 2;
        self.state.current_question += 1;
        log::debug!(
            "{} answered question {}: correct={} (+{})",
            self.state.players[player_index].name,
            self.state.current_question,
            correct,
            points_awarded
        );

        let next = self.present();
        Ok(AnswerOutcome {
            player_index,
            correct,
            points_awarded,
            correct_answer,
            next,
        })
    }

    /// Back to category selection. Scores and used categories carry over.
    pub fn continue_to_next_round(&mut self) -> Result<(), MatchError> {
        self.require("continue_to_next_round", &[Phase::RoundEnd])?;
        self.state.queue.clear();
        self.state.current_question = 0;
        self.state.current_category = None;
        self.state.phase = Phase::CategorySelect;
        log::debug!("continuing to round {}", self.state.round + 1);
        Ok(())
    }

    /// End the match after a round, or abort the current round
    pub fn stop_match(&mut self) -> Result<MatchEvent, MatchError> {
        self.require("stop_match", &[Phase::Question, Phase::RoundEnd])?;
        self.state.ended = true;
        self.state.phase = Phase::MatchEnd;

        let summary = self.summary();
        if let Some(outcome) = &summary.outcome {
            log::info!("match over after {} round(s): {}", summary.round, outcome);
        }
        Ok(MatchEvent::MatchOver(summary))
    }

    /// Drop all state and return to `Setup`
    pub fn reset(&mut self) {
        self.state = MatchState::default();
    }

    /// Current scores; the outcome is only filled in once the match has ended
    pub fn summary(&self) -> Summary {
        let outcome = if self.state.ended { self.outcome() } else { None };
        Summary {
            round: self.state.round,
            scores: self.state.players.clone(),
            winner_text: outcome.as_ref().map(|o| o.to_string()),
            outcome,
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        let [a, b] = self.state.players.as_slice() else {
            return None;
        };
        Some(match a.score.cmp(&b.score) {
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Greater => Outcome::Winner { index: 0, name: a.name.clone() },
            std::cmp::Ordering::Less => Outcome::Winner { index: 1, name: b.name.clone() },
        })
    }

    /// Known categories that have not been played yet in this match
    pub fn available_categories(&self) -> Vec<&'static str> {
        TRIVIA_CATEGORIES
            .iter()
            .copied()
            .filter(|c| !self.state.used_categories.iter().any(|used| used == c))
            .collect()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn current_player_index(&self) -> usize {
        self.state.current_player
    }

    pub fn current_question_index(&self) -> usize {
        self.state.current_question
    }

    /// The unshuffled question awaiting an answer, if any
    pub fn current_question(&self) -> Option<&Question> {
        if self.state.phase != Phase::Question {
            return None;
        }
        self.state.queue.get(self.state.current_question)
    }

    pub fn used_categories(&self) -> &[String] {
        &self.state.used_categories
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn is_ended(&self) -> bool {
        self.state.ended
    }

    /// Whether a category retrieval is outstanding
    pub fn is_retrieving(&self) -> bool {
        self.state.pending.is_some()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
