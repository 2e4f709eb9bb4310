//! Lenient parsing of interview feedback.
//!
//! Feedback is stored as free text. Evaluations produced by the interview
//! engine encode a JSON object instead:
//!
//! ```json
//! {
//!   "categories": [{ "name": "System Design", "score": 82 }],
//!   "strengths": ["Clear communication"],
//!   "improvements": ["Discuss trade-offs"],
//!   "questionAnalysis": { "1": { "score": 8, "timeAssessment": "On time" } },
//!   "keyPoints": { "1": { "score": 7 } }
//! }
//! ```
//!
//! Every section is optional and malformed entries are skipped rather than
//! failing the whole record. Only text starting with `{` is parsed; anything
//! that does not decode to an object is shown as plain text.

use serde_json::{Map, Value};

/// Shown when an interview carries no feedback at all.
pub const NO_FEEDBACK: &str = "No detailed feedback available.";

/// How a category score (0-100) is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Strong
        } else if score >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }

    /// CSS modifier used by the HTML templates.
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Strong => "band-strong",
            ScoreBand::Fair => "band-fair",
            ScoreBand::Weak => "band-weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
}

impl CategoryScore {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Per-question breakdown, keyed by the question id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionAnalysis {
    pub id: String,
    pub score: Option<f64>,
    pub time_assessment: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPoint {
    pub id: String,
    pub score: Option<f64>,
}

/// The decoded sections of a structured evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredFeedback {
    pub categories: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub question_analysis: Vec<QuestionAnalysis>,
    pub key_points: Vec<KeyPoint>,
}

impl StructuredFeedback {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.strengths.is_empty()
            && self.improvements.is_empty()
            && self.question_analysis.is_empty()
            && self.key_points.is_empty()
    }
}

/// Feedback as the history tab renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum InterviewFeedback {
    Structured(StructuredFeedback),
    Plain(String),
    Empty,
}

impl InterviewFeedback {
    /// Text for the plain rendering, with the placeholder for empty feedback.
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            InterviewFeedback::Structured(_) => None,
            InterviewFeedback::Plain(text) => Some(text),
            InterviewFeedback::Empty => Some(NO_FEEDBACK),
        }
    }

    pub fn structured(&self) -> Option<&StructuredFeedback> {
        match self {
            InterviewFeedback::Structured(s) => Some(s),
            _ => None,
        }
    }
}

/// Classifies a feedback string. Never fails.
pub fn parse_feedback(raw: Option<&str>) -> InterviewFeedback {
    let text = match raw {
        None | Some("") => return InterviewFeedback::Empty,
        Some(text) => text,
    };

    if !text.starts_with('{') {
        return InterviewFeedback::Plain(text.to_string());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => InterviewFeedback::Structured(from_object(&object)),
        Ok(_) => InterviewFeedback::Plain(text.to_string()),
        Err(e) => {
            tracing::debug!(error = %e, "Feedback is not valid JSON, showing as text");
            InterviewFeedback::Plain(text.to_string())
        }
    }
}

fn from_object(object: &Map<String, Value>) -> StructuredFeedback {
    let categories = object
        .get("categories")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let name = item.get("name")?.as_str()?;
                    let score = item.get("score").and_then(number)?;
                    Some(CategoryScore {
                        name: name.to_string(),
                        score,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let question_analysis = sorted_entries(object.get("questionAnalysis"))
        .into_iter()
        .map(|(id, analysis)| QuestionAnalysis {
            id: id.clone(),
            score: analysis.get("score").and_then(number),
            time_assessment: analysis
                .get("timeAssessment")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            strengths: strings(analysis.get("strengths")),
            improvements: strings(analysis.get("improvements")),
        })
        .collect();

    let key_points = sorted_entries(object.get("keyPoints"))
        .into_iter()
        .map(|(id, point)| KeyPoint {
            id: id.clone(),
            score: point.get("score").and_then(number),
        })
        .collect();

    StructuredFeedback {
        categories,
        strengths: strings(object.get("strengths")),
        improvements: strings(object.get("improvements")),
        question_analysis,
        key_points,
    }
}

/// Scores arrive as numbers, occasionally as numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Object entries whose value is itself an object, numeric ids first in
/// numeric order, then the rest alphabetically.
fn sorted_entries(value: Option<&Value>) -> Vec<(&String, &Map<String, Value>)> {
    let Some(Value::Object(map)) = value else {
        return Vec::new();
    };

    let mut entries: Vec<_> = map
        .iter()
        .filter_map(|(id, v)| v.as_object().map(|obj| (id, obj)))
        .collect();

    entries.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });

    entries
}
