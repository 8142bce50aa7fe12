//! Question model and upstream wire decoding

use serde::{Deserialize, Serialize};

/// Difficulty bucket of a question
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Buckets in round order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse an upstream difficulty tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A fetched trivia question. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Option<String>,
    pub category: Option<String>,
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: None,
            category: None,
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            difficulty,
        }
    }

    /// All answer options, unshuffled: incorrect answers followed by the correct one
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.incorrect_answers.len() + 1);
        options.extend(self.incorrect_answers.iter().cloned());
        options.push(self.correct_answer.clone());
        options
    }

    /// Exact text comparison against the correct answer
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

/// The prompt is either `{"text": "..."}` (v2 API) or a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum PromptField {
    Text { text: String },
    Plain(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    question: PromptField,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
    difficulty: String,
}

impl ApiQuestion {
    fn into_question(self) -> Option<Question> {
        let Some(difficulty) = Difficulty::from_tag(&self.difficulty) else {
            log::debug!("skipping question with unknown difficulty `{}`", self.difficulty);
            return None;
        };
        let prompt = match self.question {
            PromptField::Text { text } => text,
            PromptField::Plain(text) => text,
        };
        Some(Question {
            id: self.id,
            category: self.category,
            prompt,
            correct_answer: self.correct_answer,
            incorrect_answers: self.incorrect_answers,
            difficulty,
        })
    }
}

/// Decode an upstream response body (a JSON array of questions).
///
/// Elements with an unrecognised difficulty tag are dropped; any other
/// shape mismatch fails the whole body.
pub fn parse_questions(body: &str) -> Result<Vec<Question>, serde_json::Error> {
    let raw: Vec<ApiQuestion> = serde_json::from_str(body)?;
    Ok(raw.into_iter().filter_map(ApiQuestion::into_question).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2_BODY: &str = r#"[
        {
            "id": "622a1c357cc59eab6f94fd8c",
            "category": "music",
            "correctAnswer": "Queen",
            "incorrectAnswers": ["ABBA", "Blur", "Oasis"],
            "question": { "text": "Which band released 'Bohemian Rhapsody'?" },
            "tags": ["music"],
            "type": "text_choice",
            "difficulty": "easy",
            "regions": [],
            "isNiche": false
        },
        {
            "correctAnswer": "1969",
            "incorrectAnswers": ["1967", "1971"],
            "question": "When was Woodstock held?",
            "difficulty": "hard"
        }
    ]"#;

    #[test]
    fn test_parse_v2_shape() {
        let questions = parse_questions(V2_BODY).unwrap();
        assert_eq!(questions.len(), 2);

        let q = &questions[0];
        assert_eq!(q.id.as_deref(), Some("622a1c357cc59eab6f94fd8c"));
        assert_eq!(q.category.as_deref(), Some("music"));
        assert_eq!(q.prompt, "Which band released 'Bohemian Rhapsody'?");
        assert_eq!(q.correct_answer, "Queen");
        assert_eq!(q.incorrect_answers, vec!["ABBA", "Blur", "Oasis"]);
        assert_eq!(q.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_parse_plain_prompt() {
        let questions = parse_questions(V2_BODY).unwrap();
        assert_eq!(questions[1].prompt, "When was Woodstock held?");
        assert_eq!(questions[1].difficulty, Difficulty::Hard);
        assert_eq!(questions[1].id, None);
    }

    #[test]
    fn test_unknown_difficulty_dropped() {
        let body = r#"[
            {
                "question": {"text": "a"},
                "correctAnswer": "x",
                "incorrectAnswers": [],
                "difficulty": "expert"
            },
            {
                "question": {"text": "b"},
                "correctAnswer": "y",
                "incorrectAnswers": [],
                "difficulty": "Medium"
            }
        ]"#;
        let questions = parse_questions(body).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_malformed_body() {
        assert!(parse_questions("not json").is_err());
        assert!(parse_questions(r#"{"error": "rate limited"}"#).is_err());
        assert!(parse_questions(r#"[{"question": {"text": "a"}}]"#).is_err());
    }

    #[test]
    fn test_options_and_exact_match() {
        let q = Question::new("2+2?", "4", vec!["3".into(), "5".into()], Difficulty::Easy);
        assert_eq!(q.options(), vec!["3", "5", "4"]);
        assert!(q.is_correct("4"));
        assert!(!q.is_correct(" 4"));
        assert!(!q.is_correct("four"));
    }

    #[test]
    fn test_difficulty_tags() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_tag(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_tag("impossible"), None);
    }
}
