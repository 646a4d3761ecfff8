//! Leadform: a dynamic form engine for lead intake and onboarding
//!
//! A form is a graph of typed questions with transition rules; routing mixes
//! deterministic comparisons with LLM-judged conditions. This crate
//! re-exports the workspace surface by concern.

pub mod model {
    pub use leadform_core::{
        Answer, AnswerValue, CompletionMetadata, Condition, ConditionOperator, ConditionalRoute,
        ContentSource, Form, GroupLayout, LeadFormCompletion, LlmContentConfig, Position,
        Question, QuestionGroup, QuestionKind, SemanticRole, TransitionStrategy, Viewport,
        WelcomeScreen,
    };
}

pub mod engine {
    pub use leadform_engine::{
        AnswerValidation, AuthProfile, ConditionEvaluator, FormSession, MAX_QUESTION_TEXT_LEN,
        RouteOutcome, Router, StepOutcome, extract_auth_profile, resolve_content, transcript,
        validate_answer, validate_form, validate_question,
    };
}

pub mod error {
    pub use leadform_core::{FormError, FormValidationError, Result};
}

pub mod judge {
    pub use leadform_core::{
        ContentGenerator, JudgeError, JudgeRequest, JudgeResponse, LlmJudge,
    };
    pub use leadform_judge::{HttpJudge, MockCall, MockJudge};
}

pub mod store {
    pub use leadform_core::FormStore;
    pub use leadform_store::{FileFormStore, MemoryFormStore, StorageConfig, create_store};
}

// Top-level re-exports for the common path.
pub use engine::{FormSession, StepOutcome, validate_answer, validate_form};
pub use error::{FormError, FormValidationError, Result};
pub use judge::{HttpJudge, LlmJudge};
pub use model::{Answer, AnswerValue, Form, LeadFormCompletion, Question};
pub use store::{FormStore, create_store};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use serde_json::json;

    use crate::engine::extract_auth_profile;
    use crate::judge::MockJudge;
    use crate::model::{
        Condition, ConditionalRoute, Position, QuestionKind, SemanticRole, TransitionStrategy,
    };
    use crate::store::MemoryFormStore;
    use crate::{Form, FormSession, FormStore, Question, StepOutcome};

    fn question(id: &str, kind: QuestionKind, next: Option<&str>) -> Question {
        Question {
            id: id.into(),
            text: format!("Question {id}"),
            subtext: None,
            required: false,
            kind,
            transition_strategy: TransitionStrategy::Simple {
                next_question_id: next.map(String::from),
            },
            position: Position::default(),
            semantic_role: None,
            is_auth_identifier: None,
            button_text: None,
        }
    }

    fn intake_form() -> Form {
        let mut first = question(
            "first",
            QuestionKind::ShortText { max_length: None },
            Some("last"),
        );
        first.semantic_role = Some(SemanticRole::FirstName);
        first.is_auth_identifier = Some(true);
        let mut last = question(
            "last",
            QuestionKind::ShortText { max_length: None },
            Some("email"),
        );
        last.semantic_role = Some(SemanticRole::LastName);
        last.is_auth_identifier = Some(true);
        let mut email = question("email", QuestionKind::Email, Some("phone"));
        email.semantic_role = Some(SemanticRole::Email);
        email.is_auth_identifier = Some(true);
        let mut phone = question("phone", QuestionKind::Phone, Some("interest"));
        phone.semantic_role = Some(SemanticRole::Phone);
        phone.is_auth_identifier = Some(true);

        let mut interest = question(
            "interest",
            QuestionKind::MultipleChoice {
                options: vec!["mentoring".into(), "just browsing".into()],
                min_selections: Some(1),
                max_selections: Some(1),
            },
            None,
        );
        interest.transition_strategy = TransitionStrategy::Conditional {
            routes: vec![ConditionalRoute {
                condition: Condition::Static {
                    question_id: "interest".into(),
                    operator: crate::model::ConditionOperator::Equals,
                    value: json!("mentoring"),
                },
                next_question_id: Some("goals".into()),
            }],
            default_next: Some(None),
        };

        let goals = question(
            "goals",
            QuestionKind::LongText {
                min_length: None,
                max_length: Some(2000),
            },
            None,
        );

        Form {
            id: "intake".into(),
            name: "Mentor intake".into(),
            organization_id: Some("org-1".into()),
            questions: vec![first, last, email, phone, interest, goals],
            groups: None,
            viewport: None,
            welcome: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Store a form, run a respondent through it, persist the completion,
    /// and provision the identity: the full host flow.
    #[tokio::test]
    async fn intake_flow_end_to_end() {
        let store = MemoryFormStore::new();
        store.save_form(&intake_form()).await.unwrap();
        let form = store.get_form("intake").await.unwrap().unwrap();

        let mut session = FormSession::start(form.clone(), Arc::new(MockJudge::new())).unwrap();
        for value in [
            "Ada",
            "Lovelace",
            "ada@example.com",
            "+14155551234",
            "mentoring",
        ] {
            let outcome = session.submit_answer(value.into()).await.unwrap();
            assert!(matches!(outcome, StepOutcome::Advanced { .. }));
        }
        let outcome = session
            .submit_answer("I want to ship my first Rust service".into())
            .await
            .unwrap();
        assert_eq!(outcome, StepOutcome::Completed);

        let completion = session.into_completion();
        store.save_completion(&completion).await.unwrap();

        let stored = store
            .get_completion(&completion.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_complete());

        let profile = extract_auth_profile(&form, &stored).unwrap();
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.first_name, "Ada");
    }
}
