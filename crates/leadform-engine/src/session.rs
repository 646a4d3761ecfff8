//! Host-level traversal of a form: one session per respondent, driving a
//! `LeadFormCompletion` through the question graph.

use std::sync::Arc;

use leadform_core::{
    Answer, AnswerValue, Form, FormError, LeadFormCompletion, LlmJudge, Question, Result,
    TransitionStrategy,
};

use crate::router::{RouteOutcome, Router};
use crate::validate::{validate_answer, validate_form};

/// Outcome of one respondent step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Validation failed; the completion is unchanged and the message is
    /// shown to the respondent.
    Rejected { error: String },
    /// Advanced to the named question.
    Advanced { next_question_id: String },
    /// The completion reached its terminal state.
    Completed,
}

/// One respondent's live traversal. The session is the sole writer of its
/// completion; the completion mutates exactly once per step, after routing
/// resolves.
pub struct FormSession {
    form: Form,
    completion: LeadFormCompletion,
    router: Router,
}

impl FormSession {
    /// Open a new session at the form's entry question. The form is
    /// validated up front, like any other machine configuration.
    pub fn start(form: Form, judge: Arc<dyn LlmJudge>) -> Result<Self> {
        validate_form(&form)?;
        let completion = LeadFormCompletion::start(&form);
        Ok(Self {
            form,
            completion,
            router: Router::new(judge),
        })
    }

    /// Rebuild a session from a persisted completion.
    pub fn resume(
        form: Form,
        completion: LeadFormCompletion,
        judge: Arc<dyn LlmJudge>,
    ) -> Result<Self> {
        validate_form(&form)?;
        if completion.form_id != form.id {
            return Err(FormError::Config(format!(
                "completion '{}' belongs to form '{}', not '{}'",
                completion.id, completion.form_id, form.id
            )));
        }
        if let Some(current) = &completion.current_view_id
            && form.question(current).is_none()
        {
            return Err(FormError::Config(format!(
                "completion '{}' points at unknown question '{current}'",
                completion.id
            )));
        }
        Ok(Self {
            form,
            completion,
            router: Router::new(judge),
        })
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn completion(&self) -> &LeadFormCompletion {
        &self.completion
    }

    pub fn into_completion(self) -> LeadFormCompletion {
        self.completion
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.completion
            .current_view_id
            .as_deref()
            .and_then(|id| self.form.question(id))
    }

    /// Submit an answer for the current question: validate, route, then
    /// record the answer and advance in one mutation.
    pub async fn submit_answer(&mut self, value: AnswerValue) -> Result<StepOutcome> {
        let question = self.require_current()?.clone();

        let verdict = validate_answer(&question, Some(&value));
        if !verdict.valid {
            return Ok(StepOutcome::Rejected {
                error: verdict
                    .error
                    .unwrap_or_else(|| "Invalid answer".to_string()),
            });
        }

        let answer = Answer::new(&question, value);

        // Routing sees the answer being submitted, but the completion stays
        // untouched until the decision is final.
        let mut answers = self.completion.answers.clone();
        match answers.iter_mut().find(|a| a.question_id == answer.question_id) {
            Some(existing) => *existing = answer.clone(),
            None => answers.push(answer.clone()),
        }

        let next = self.resolve_transition(&question, &answers).await?;
        self.completion.record_answer(answer);
        self.advance(next)
    }

    /// Advance past a question that collects no input (informational views,
    /// or an optional question the respondent skipped).
    pub async fn skip_current(&mut self) -> Result<StepOutcome> {
        let question = self.require_current()?.clone();

        // Informational views never require input, whatever the flag says.
        let requires_input = question.required
            && !matches!(question.kind, leadform_core::QuestionKind::Informational { .. });
        if requires_input {
            return Ok(StepOutcome::Rejected {
                error: "This field is required".to_string(),
            });
        }

        let answers = self.completion.answers.clone();
        let next = self.resolve_transition(&question, &answers).await?;
        self.advance(next)
    }

    fn require_current(&self) -> Result<&Question> {
        let Some(current_id) = self.completion.current_view_id.as_deref() else {
            return Err(FormError::CompletionClosed(self.completion.id.clone()));
        };
        self.form.question(current_id).ok_or_else(|| {
            FormError::Config(format!(
                "current view '{current_id}' is not a question of form '{}'",
                self.form.id
            ))
        })
    }

    fn advance(&mut self, next: Option<String>) -> Result<StepOutcome> {
        self.completion.advance_to(next.clone());
        match next {
            Some(next_question_id) => {
                tracing::debug!(
                    completion = %self.completion.id,
                    next = %next_question_id,
                    "advanced"
                );
                Ok(StepOutcome::Advanced { next_question_id })
            }
            None => {
                tracing::debug!(completion = %self.completion.id, "completed");
                Ok(StepOutcome::Completed)
            }
        }
    }

    async fn resolve_transition(
        &self,
        question: &Question,
        answers: &[Answer],
    ) -> Result<Option<String>> {
        match &question.transition_strategy {
            TransitionStrategy::Simple { next_question_id } => Ok(next_question_id.clone()),
            TransitionStrategy::Conditional {
                routes,
                default_next,
            } => {
                match self
                    .router
                    .next_question(routes, answers, &self.form.id)
                    .await
                {
                    RouteOutcome::Next(next) => Ok(next),
                    RouteOutcome::NoMatch => match default_next {
                        Some(next) => Ok(next.clone()),
                        // A routing dead end is an authoring mistake, not a
                        // respondent-facing crash; name the question.
                        None => Err(FormError::Config(format!(
                            "conditional transition on '{}' matched no route and declares no defaultNext",
                            question.id
                        ))),
                    },
                }
            }
        }
    }
}
