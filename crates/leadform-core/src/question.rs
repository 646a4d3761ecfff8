//! Question model: the closed set of question variants, transition
//! strategies, and the recursive condition tree used for routing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known identity fields a question can supply for account provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl SemanticRole {
    /// Every role a form must cover with exactly one auth identifier.
    pub const ALL: [SemanticRole; 4] = [
        SemanticRole::FirstName,
        SemanticRole::LastName,
        SemanticRole::Email,
        SemanticRole::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::FirstName => "first_name",
            SemanticRole::LastName => "last_name",
            SemanticRole::Email => "email",
            SemanticRole::Phone => "phone",
        }
    }
}

impl std::fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas coordinate for the form builder. No routing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Where the display text of an informational question comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    #[default]
    Static,
    Llm,
}

/// Generation knobs for LLM-sourced informational content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmContentConfig {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Variant payloads, discriminated by the `type` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum QuestionKind {
    ShortText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    LongText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// `max_selections == 1` renders single-select, `> 1` multi-select.
    MultipleChoice {
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_selections: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_selections: Option<usize>,
    },
    LikertScale {
        options: Vec<String>,
    },
    NumberInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
    },
    Email,
    Phone,
    /// Display-only; collects no answer and `required` is always false.
    Informational {
        content: String,
        #[serde(default)]
        content_source: ContentSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        llm_config: Option<LlmContentConfig>,
    },
}

/// A single node of the form graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub transition_strategy: TransitionStrategy,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_role: Option<SemanticRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auth_identifier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

impl Question {
    /// True when this question is the designated identifier for its role.
    pub fn is_auth_identifier(&self) -> bool {
        self.is_auth_identifier.unwrap_or(false)
    }
}

/// How the form advances once a question is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TransitionStrategy {
    /// Unconditional jump; `None` ends the form.
    Simple {
        next_question_id: Option<String>,
    },
    /// Ordered routes, first matching condition wins; `default_next` applies
    /// when no route matches.
    Conditional {
        routes: Vec<ConditionalRoute>,
        /// Outer `None`: no default declared, a save-time configuration
        /// error. `Some(None)`: the default explicitly ends the form.
        #[serde(
            default,
            deserialize_with = "explicit_null",
            skip_serializing_if = "Option::is_none"
        )]
        default_next: Option<Option<String>>,
    },
}

/// Keeps `"defaultNext": null` distinguishable from an absent field.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One `{condition, nextQuestionId}` pair of a conditional transition.
/// `next_question_id: None` explicitly terminates the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRoute {
    pub condition: Condition,
    pub next_question_id: Option<String>,
}

/// Comparison operators for static conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

/// Recursive boolean condition tree. Trees are built top-down per route and
/// never self-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Condition {
    /// Deterministic comparison against a previously recorded answer.
    Static {
        question_id: String,
        operator: ConditionOperator,
        value: Value,
    },
    /// Judged by an external LLM; holds when the judge's trimmed output
    /// equals `expected_result` exactly.
    Llm {
        evaluation_prompt: String,
        expected_result: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature: Option<f32>,
    },
    And {
        conditions: Vec<Condition>,
    },
    Or {
        conditions: Vec<Condition>,
    },
    Not {
        condition: Box<Condition>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_wire_shape() {
        let question = Question {
            id: "q1".into(),
            text: "What is your email?".into(),
            subtext: None,
            required: true,
            kind: QuestionKind::Email,
            transition_strategy: TransitionStrategy::Simple {
                next_question_id: Some("q2".into()),
            },
            position: Position { x: 10.0, y: 20.0 },
            semantic_role: Some(SemanticRole::Email),
            is_auth_identifier: Some(true),
            button_text: None,
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["type"], "email");
        assert_eq!(value["semanticRole"], "email");
        assert_eq!(value["isAuthIdentifier"], true);
        assert_eq!(value["transitionStrategy"]["type"], "simple");
        assert_eq!(value["transitionStrategy"]["nextQuestionId"], "q2");

        let back: Question = serde_json::from_value(value).unwrap();
        assert_eq!(back, question);
    }

    #[test]
    fn variant_fields_are_camel_case() {
        let kind = QuestionKind::MultipleChoice {
            options: vec!["yes".into(), "no".into()],
            min_selections: Some(1),
            max_selections: Some(2),
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], "multiple_choice");
        assert_eq!(value["minSelections"], 1);
        assert_eq!(value["maxSelections"], 2);
    }

    #[test]
    fn condition_tree_round_trips() {
        let condition = Condition::And {
            conditions: vec![
                Condition::Static {
                    question_id: "q1".into(),
                    operator: ConditionOperator::Equals,
                    value: json!("yes"),
                },
                Condition::Not {
                    condition: Box::new(Condition::Llm {
                        evaluation_prompt: "Is the respondent a student?".into(),
                        expected_result: "yes".into(),
                        model: Some("gpt-4o-mini".into()),
                        temperature: Some(0.0),
                    }),
                },
            ],
        };

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["type"], "and");
        assert_eq!(value["conditions"][0]["questionId"], "q1");
        assert_eq!(value["conditions"][0]["operator"], "equals");
        assert_eq!(
            value["conditions"][1]["condition"]["evaluationPrompt"],
            "Is the respondent a student?"
        );

        let back: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(back, condition);
    }

    #[test]
    fn default_next_distinguishes_null_from_absent() {
        let with_null: TransitionStrategy = serde_json::from_value(json!({
            "type": "conditional",
            "routes": [],
            "defaultNext": null,
        }))
        .unwrap();
        let TransitionStrategy::Conditional { default_next, .. } = with_null else {
            panic!("expected conditional");
        };
        assert_eq!(default_next, Some(None));

        let absent: TransitionStrategy = serde_json::from_value(json!({
            "type": "conditional",
            "routes": [],
        }))
        .unwrap();
        let TransitionStrategy::Conditional { default_next, .. } = absent else {
            panic!("expected conditional");
        };
        assert_eq!(default_next, None);
    }

    #[test]
    fn informational_defaults_to_static_content() {
        let parsed: QuestionKind = serde_json::from_value(json!({
            "type": "informational",
            "content": "Welcome aboard",
        }))
        .unwrap();
        match parsed {
            QuestionKind::Informational { content_source, .. } => {
                assert_eq!(content_source, ContentSource::Static);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
