//! Structural validation for questions and forms, and per-submission answer
//! validation.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use leadform_core::{
    AnswerValue, Form, FormValidationError, Question, QuestionKind, SemanticRole,
    TransitionStrategy,
};

/// Hard cap on question text length.
pub const MAX_QUESTION_TEXT_LEN: usize = 150;

// Permissive local@domain.tld shape; deliverability is not checked.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// E.164: leading +, non-zero first digit, 7-15 digits total.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("phone pattern compiles"));

/// Per-submission verdict. Returned, never thrown: the host UI blocks
/// advancement and shows the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl AnswerValidation {
    pub fn pass() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Structural check for a single question.
pub fn validate_question(question: &Question) -> AnswerValidation {
    if question.text.chars().count() > MAX_QUESTION_TEXT_LEN {
        return AnswerValidation::fail(format!(
            "Question text must be at most {MAX_QUESTION_TEXT_LEN} characters"
        ));
    }
    AnswerValidation::pass()
}

/// Validate a whole form. Must run and pass before a form is persisted;
/// store backends call this synchronously and reject the write on failure.
pub fn validate_form(form: &Form) -> Result<(), FormValidationError> {
    let mut ids = BTreeSet::new();
    for question in &form.questions {
        if !ids.insert(question.id.as_str()) {
            return Err(FormValidationError::DuplicateQuestionId(
                question.id.clone(),
            ));
        }
        if question.text.chars().count() > MAX_QUESTION_TEXT_LEN {
            return Err(FormValidationError::TextTooLong {
                question_id: question.id.clone(),
                max: MAX_QUESTION_TEXT_LEN,
            });
        }
    }

    // Downstream identity provisioning picks exactly one answer per role;
    // any ambiguity here is a hard failure.
    for role in SemanticRole::ALL {
        let with_role: Vec<&Question> = form
            .questions
            .iter()
            .filter(|q| q.semantic_role == Some(role))
            .collect();
        if with_role.is_empty() {
            return Err(FormValidationError::MissingRole { role });
        }
        let identifiers: Vec<String> = with_role
            .iter()
            .filter(|q| q.is_auth_identifier())
            .map(|q| q.id.clone())
            .collect();
        match identifiers.len() {
            0 => return Err(FormValidationError::NoAuthIdentifier { role }),
            1 => {}
            _ => {
                return Err(FormValidationError::AmbiguousAuthIdentifier {
                    role,
                    ids: identifiers,
                });
            }
        }
    }

    if let Some(groups) = &form.groups {
        for group in groups {
            if group.question_ids.is_empty() {
                return Err(FormValidationError::EmptyGroup {
                    group_id: group.id.clone(),
                });
            }
            for question_id in &group.question_ids {
                if !ids.contains(question_id.as_str()) {
                    return Err(FormValidationError::UnknownGroupMember {
                        group_id: group.id.clone(),
                        question_id: question_id.clone(),
                    });
                }
            }
        }
    }

    for question in &form.questions {
        let check_target = |target: &Option<String>| -> Result<(), FormValidationError> {
            if let Some(target) = target
                && !ids.contains(target.as_str())
            {
                return Err(FormValidationError::UnknownRouteTarget {
                    question_id: question.id.clone(),
                    target: target.clone(),
                });
            }
            Ok(())
        };
        match &question.transition_strategy {
            TransitionStrategy::Simple { next_question_id } => check_target(next_question_id)?,
            TransitionStrategy::Conditional {
                routes,
                default_next,
            } => {
                for route in routes {
                    check_target(&route.next_question_id)?;
                }
                match default_next {
                    None => {
                        return Err(FormValidationError::MissingDefaultRoute {
                            question_id: question.id.clone(),
                        });
                    }
                    Some(target) => check_target(target)?,
                }
            }
        }
    }

    Ok(())
}

/// Validate one submitted value against its question.
pub fn validate_answer(question: &Question, value: Option<&AnswerValue>) -> AnswerValidation {
    let provided = value.filter(|v| !v.is_empty());
    let Some(value) = provided else {
        if question.required && !matches!(question.kind, QuestionKind::Informational { .. }) {
            return AnswerValidation::fail("This field is required");
        }
        return AnswerValidation::pass();
    };

    match &question.kind {
        QuestionKind::ShortText { max_length } => {
            let Some(text) = value.as_str() else {
                return AnswerValidation::fail("Expected a text answer");
            };
            if let Some(max) = max_length
                && text.chars().count() > *max
            {
                return AnswerValidation::fail(format!("Answer must be at most {max} characters"));
            }
            AnswerValidation::pass()
        }
        QuestionKind::LongText {
            min_length,
            max_length,
        } => {
            let Some(text) = value.as_str() else {
                return AnswerValidation::fail("Expected a text answer");
            };
            if let Some(min) = min_length
                && text.chars().count() < *min
            {
                return AnswerValidation::fail(format!("Answer must be at least {min} characters"));
            }
            if let Some(max) = max_length
                && text.chars().count() > *max
            {
                return AnswerValidation::fail(format!("Answer must be at most {max} characters"));
            }
            AnswerValidation::pass()
        }
        QuestionKind::MultipleChoice {
            options,
            min_selections,
            max_selections,
        } => {
            // Scalar or array input normalizes to a selection set.
            let selections: Vec<&str> = match value {
                AnswerValue::Multi(items) => items.iter().map(String::as_str).collect(),
                AnswerValue::Text(text) => vec![text.as_str()],
                _ => return AnswerValidation::fail("Expected one or more selections"),
            };
            for selection in &selections {
                if !options.iter().any(|option| option == selection) {
                    return AnswerValidation::fail(format!(
                        "'{selection}' is not one of the available options"
                    ));
                }
            }
            if let Some(min) = min_selections
                && selections.len() < *min
            {
                return AnswerValidation::fail(format!("Select at least {min} option(s)"));
            }
            if let Some(max) = max_selections
                && selections.len() > *max
            {
                return AnswerValidation::fail(format!("Select at most {max} option(s)"));
            }
            AnswerValidation::pass()
        }
        QuestionKind::LikertScale { options } => {
            let Some(text) = value.as_str() else {
                return AnswerValidation::fail("Select one point on the scale");
            };
            if !options.iter().any(|option| option == text) {
                return AnswerValidation::fail("Select one point on the scale");
            }
            AnswerValidation::pass()
        }
        QuestionKind::NumberInput { min, max, .. } => {
            let Some(number) = value.as_f64() else {
                return AnswerValidation::fail("Please enter a valid number");
            };
            if let Some(min) = min
                && number < *min
            {
                return AnswerValidation::fail(format!("Value must be at least {min}"));
            }
            if let Some(max) = max
                && number > *max
            {
                return AnswerValidation::fail(format!("Value must be at most {max}"));
            }
            AnswerValidation::pass()
        }
        QuestionKind::Email => {
            let valid = value
                .as_str()
                .is_some_and(|text| EMAIL_PATTERN.is_match(text.trim()));
            if valid {
                AnswerValidation::pass()
            } else {
                AnswerValidation::fail("Please enter a valid email address")
            }
        }
        QuestionKind::Phone => {
            let Some(text) = value.as_str().map(str::trim) else {
                return AnswerValidation::fail("Please enter a phone number");
            };
            if !text.starts_with('+') {
                return AnswerValidation::fail(
                    "Please select a country and enter the number in international format",
                );
            }
            if !PHONE_PATTERN.is_match(text) {
                return AnswerValidation::fail("Please enter a valid phone number");
            }
            AnswerValidation::pass()
        }
        // Display-only; no input expected.
        QuestionKind::Informational { .. } => AnswerValidation::pass(),
    }
}
