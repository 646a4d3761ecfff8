//! Runtime completion state: one respondent's pass through a form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::Form;
use crate::question::Question;

/// An answer value as submitted by the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Multi(Vec<String>),
    Number(f64),
    Bool(bool),
}

impl AnswerValue {
    /// Empty means "nothing was entered": blank string or empty selection.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Multi(items) => items.is_empty(),
            AnswerValue::Number(_) | AnswerValue::Bool(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric coercion: numbers pass through, strings are parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Human-readable rendering; selections join with `", "`.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Multi(items) => items.join(", "),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Bool(flag) => flag.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AnswerValue::Text(text) => serde_json::Value::String(text.clone()),
            AnswerValue::Multi(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| serde_json::Value::String(item.clone()))
                    .collect(),
            ),
            AnswerValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            AnswerValue::Bool(flag) => serde_json::Value::Bool(*flag),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Multi(value)
    }
}

/// One recorded answer. `question_text` snapshots the text actually shown:
/// LLM-routed forms can display generated text, and the literal prompt must
/// survive for audit and judge context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub question_text: String,
    pub value: AnswerValue,
    pub answered_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(question: &Question, value: AnswerValue) -> Self {
        Self::with_text(&question.id, &question.text, value)
    }

    pub fn with_text(question_id: &str, question_text: &str, value: AnswerValue) -> Self {
        Self {
            question_id: question_id.to_string(),
            question_text: question_text.to_string(),
            value,
            answered_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompletionMetadata {
    /// Every view id shown to the respondent, in order.
    #[serde(default)]
    pub view_history: Vec<String>,
}

/// A respondent's in-progress or finished traversal of a form.
///
/// `current_view_id == None` signals the terminal state: `completed_at` is
/// set exactly once and the completion is never mutated afterwards. The
/// respondent's session is the sole writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFormCompletion {
    pub id: String,
    pub form_id: String,
    pub current_view_id: Option<String>,
    pub answers: Vec<Answer>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: CompletionMetadata,
}

impl LeadFormCompletion {
    /// Open a fresh completion positioned at the form's entry question.
    pub fn start(form: &Form) -> Self {
        let entry = form.entry_question().map(|q| q.id.clone());
        let mut metadata = CompletionMetadata::default();
        if let Some(id) = &entry {
            metadata.view_history.push(id.clone());
        }
        let started_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            form_id: form.id.clone(),
            completed_at: entry.is_none().then_some(started_at),
            current_view_id: entry,
            answers: Vec::new(),
            started_at,
            metadata,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_view_id.is_none()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Record an answer, idempotent by question id: a double-submit replaces
    /// the earlier value in place and keeps the original transcript order.
    pub fn record_answer(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    /// Move to the next view (`Some`) or the terminal state (`None`).
    pub fn advance_to(&mut self, next: Option<String>) {
        match &next {
            Some(id) => self.metadata.view_history.push(id.clone()),
            None => {
                if self.completed_at.is_none() {
                    self.completed_at = Some(Utc::now());
                }
            }
        }
        self.current_view_id = next;
    }
}
