//! Recursive condition evaluation over the accumulated answer set.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use serde_json::Value;

use leadform_core::{
    Answer, AnswerValue, Condition, ConditionOperator, JudgeRequest, LlmJudge,
};

/// Full `Q:/A:` transcript of the answers so far, in answer order. Array
/// values join with `", "`. Also reused by hosts as chat context.
pub fn transcript(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|answer| format!("Q: {}\nA: {}", answer.question_text, answer.value.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluates a condition tree to a boolean.
///
/// Every failure mode resolves to `false` rather than propagating: an
/// unanswered static dependency never satisfies a condition, and a judge
/// transport failure degrades to the default route instead of crashing the
/// respondent's session.
pub struct ConditionEvaluator {
    judge: Arc<dyn LlmJudge>,
}

impl ConditionEvaluator {
    pub fn new(judge: Arc<dyn LlmJudge>) -> Self {
        Self { judge }
    }

    pub fn evaluate<'a>(
        &'a self,
        condition: &'a Condition,
        answers: &'a [Answer],
        form_id: &'a str,
    ) -> BoxFuture<'a, bool> {
        async move {
            match condition {
                Condition::Static {
                    question_id,
                    operator,
                    value,
                } => self.evaluate_static(question_id, *operator, value, answers),
                Condition::Llm {
                    evaluation_prompt,
                    expected_result,
                    model,
                    temperature,
                } => {
                    self.evaluate_llm(
                        evaluation_prompt,
                        expected_result,
                        model.clone(),
                        *temperature,
                        answers,
                        form_id,
                    )
                    .await
                }
                // Children run concurrently; total latency is bounded by the
                // slowest child, not the sum.
                Condition::And { conditions } => {
                    let results = join_all(
                        conditions
                            .iter()
                            .map(|child| self.evaluate(child, answers, form_id)),
                    )
                    .await;
                    results.into_iter().all(|result| result)
                }
                Condition::Or { conditions } => {
                    let results = join_all(
                        conditions
                            .iter()
                            .map(|child| self.evaluate(child, answers, form_id)),
                    )
                    .await;
                    results.into_iter().any(|result| result)
                }
                Condition::Not { condition } => !self.evaluate(condition, answers, form_id).await,
            }
        }
        .boxed()
    }

    fn evaluate_static(
        &self,
        question_id: &str,
        operator: ConditionOperator,
        expected: &Value,
        answers: &[Answer],
    ) -> bool {
        let Some(answer) = answers.iter().find(|a| a.question_id == question_id) else {
            return false;
        };
        let value = &answer.value;
        match operator {
            ConditionOperator::Equals => value_eq(value, expected),
            ConditionOperator::NotEquals => !value_eq(value, expected),
            ConditionOperator::Contains => value_contains(value, expected),
            ConditionOperator::GreaterThan => match (value.as_f64(), numeric(expected)) {
                (Some(left), Some(right)) => left > right,
                _ => false,
            },
            ConditionOperator::LessThan => match (value.as_f64(), numeric(expected)) {
                (Some(left), Some(right)) => left < right,
                _ => false,
            },
        }
    }

    async fn evaluate_llm(
        &self,
        evaluation_prompt: &str,
        expected_result: &str,
        model: Option<String>,
        temperature: Option<f32>,
        answers: &[Answer],
        form_id: &str,
    ) -> bool {
        let request = JudgeRequest {
            form_id: form_id.to_string(),
            evaluation_prompt: evaluation_prompt.to_string(),
            context: transcript(answers),
            model,
            temperature,
        };
        match self.judge.evaluate(&request).await {
            Ok(response) => response.result.trim() == expected_result,
            Err(error) => {
                tracing::warn!(
                    form_id,
                    judge = self.judge.name(),
                    %error,
                    "judge call failed, condition resolves to false"
                );
                false
            }
        }
    }
}

fn value_eq(value: &AnswerValue, expected: &Value) -> bool {
    match (value, expected) {
        (AnswerValue::Text(a), Value::String(b)) => a == b,
        (AnswerValue::Bool(a), Value::Bool(b)) => a == b,
        (AnswerValue::Number(a), Value::Number(b)) => b.as_f64().is_some_and(|b| *a == b),
        (AnswerValue::Multi(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(item, other)| other.as_str() == Some(item))
        }
        _ => false,
    }
}

fn value_contains(value: &AnswerValue, expected: &Value) -> bool {
    let needle = match expected {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    match value {
        // Array membership for multi-selections, substring otherwise.
        AnswerValue::Multi(items) => items.iter().any(|item| item == &needle),
        other => other.display().contains(&needle),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
