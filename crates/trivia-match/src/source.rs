//! Question retrieval and balanced round selection
//!
//! The actual transport lives outside the crate: natively behind the
//! [`QuestionProvider`] trait, in the browser as a `fetch` performed by the
//! page, which hands the response body back to the controller.

use serde::Serialize;

use crate::config::MatchConfig;
use crate::error::{MatchError, SourceError};
use crate::question::{parse_questions, Difficulty, Question};

/// Category identifiers understood by the-trivia-api
pub const TRIVIA_CATEGORIES: [&str; 10] = [
    "arts_and_literature",
    "film_and_tv",
    "food_and_drink",
    "general_knowledge",
    "geography",
    "history",
    "music",
    "science",
    "society_and_culture",
    "sport_and_leisure",
];

/// Validate a category identifier.
///
/// Identifiers are placed verbatim in the request query string, so only
/// ASCII alphanumerics, `_` and `-` are accepted.
pub fn normalize_category(raw: &str) -> Result<String, MatchError> {
    let category = raw.trim();
    if category.is_empty() {
        return Err(MatchError::InvalidInput("category is empty".into()));
    }
    if !category
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(MatchError::InvalidInput(format!(
            "category `{}` contains unsupported characters",
            category
        )));
    }
    Ok(category.to_string())
}

/// One outbound retrieval to perform
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub category: String,
    pub limit: u32,
    pub url: String,
}

/// Performs the GET for a [`QuestionRequest`] and returns the raw body
pub trait QuestionProvider {
    fn fetch(&self, request: &QuestionRequest) -> Result<String, SourceError>;
}

/// Builds requests and selects a balanced round from the candidates
#[derive(Clone, Debug)]
pub struct QuestionSource {
    api_base: String,
    candidate_limit: u32,
    per_difficulty: usize,
}

impl QuestionSource {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            candidate_limit: config.candidate_limit,
            per_difficulty: config.per_difficulty,
        }
    }

    /// Request for `category`; the caller has already validated it
    pub fn request(&self, category: &str) -> QuestionRequest {
        QuestionRequest {
            category: category.to_string(),
            limit: self.candidate_limit,
            url: format!(
                "{}/questions?limit={}&categories={}",
                self.api_base, self.candidate_limit, category
            ),
        }
    }

    /// Decode a response body into candidates, keeping at most `candidate_limit`
    pub fn parse_candidates(&self, body: &str) -> Result<Vec<Question>, MatchError> {
        let mut candidates = parse_questions(body).map_err(SourceError::from)?;
        candidates.truncate(self.candidate_limit as usize);
        Ok(candidates)
    }

    /// Take the first `per_difficulty` questions of each bucket, in upstream
    /// order, concatenated easy → medium → hard.
    pub fn select_round(&self, candidates: Vec<Question>) -> Result<Vec<Question>, MatchError> {
        let mut buckets: [Vec<Question>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        let mut counts = [0usize; 3];

        for question in candidates {
            let slot = bucket_index(question.difficulty);
            counts[slot] += 1;
            if buckets[slot].len() < self.per_difficulty {
                buckets[slot].push(question);
            }
        }

        if buckets.iter().any(|b| b.len() < self.per_difficulty) {
            return Err(MatchError::InsufficientQuestions {
                easy: counts[0],
                medium: counts[1],
                hard: counts[2],
                needed: self.per_difficulty,
            });
        }

        Ok(buckets.into_iter().flatten().collect())
    }

    /// Retrieve and select a round for `category` through `provider`
    pub fn fetch_category_questions<P: QuestionProvider + ?Sized>(
        &self,
        category: &str,
        provider: &P,
    ) -> Result<Vec<Question>, MatchError> {
        let request = self.request(category);
        let body = provider.fetch(&request)?;
        self.select_round(self.parse_candidates(&body)?)
    }
}

fn bucket_index(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}
