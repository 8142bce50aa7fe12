//! Fixtures shared by the unit tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;

use crate::error::SourceError;
use crate::question::{Difficulty, Question};
use crate::source::{QuestionProvider, QuestionRequest};

/// Questions named `q{index}` with the given difficulties, in order
pub fn pool(difficulties: &[Difficulty]) -> Vec<Question> {
    difficulties
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            Question::new(
                format!("q{}", i),
                format!("right{}", i),
                vec![format!("wrong{}a", i), format!("wrong{}b", i), format!("wrong{}c", i)],
                d,
            )
        })
        .collect()
}

/// Upstream-shaped JSON body with `counts[0]` easy, `counts[1]` medium and
/// `counts[2]` hard questions, in that order. Correct answers are
/// `{difficulty}-{n}-right`.
pub fn pool_body(counts: &[usize; 3]) -> String {
    let mut items = Vec::new();
    for (difficulty, &count) in Difficulty::ALL.iter().zip(counts) {
        for n in 0..count {
            let tag = difficulty.as_str();
            items.push(json!({
                "id": format!("{}-{}", tag, n),
                "category": "fixture",
                "question": { "text": format!("{} question {}", tag, n) },
                "correctAnswer": format!("{}-{}-right", tag, n),
                "incorrectAnswers": [
                    format!("{}-{}-wrong-a", tag, n),
                    format!("{}-{}-wrong-b", tag, n),
                    format!("{}-{}-wrong-c", tag, n),
                ],
                "difficulty": tag,
            }));
        }
    }
    serde_json::Value::Array(items).to_string()
}

/// Serves canned bodies per category; unknown categories fail like a dead network
#[derive(Default)]
pub struct FixtureProvider {
    bodies: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, category: &str, body: String) -> Self {
        self.bodies.insert(category.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl QuestionProvider for FixtureProvider {
    fn fetch(&self, request: &QuestionRequest) -> Result<String, SourceError> {
        self.calls.borrow_mut().push(request.category.clone());
        self.bodies
            .get(&request.category)
            .cloned()
            .ok_or_else(|| SourceError::Transport("no route to host".into()))
    }
}
