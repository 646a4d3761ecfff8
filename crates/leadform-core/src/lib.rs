//! Core types and traits for the Leadform dynamic form engine

pub mod completion;
pub mod error;
pub mod form;
pub mod question;
pub mod traits;

pub use completion::{Answer, AnswerValue, CompletionMetadata, LeadFormCompletion};
pub use error::{FormError, FormValidationError, Result};
pub use form::{Form, GroupLayout, QuestionGroup, Viewport, WelcomeScreen};
pub use question::{
    Condition, ConditionOperator, ConditionalRoute, ContentSource, LlmContentConfig, Position,
    Question, QuestionKind, SemanticRole, TransitionStrategy,
};
pub use traits::judge::{ContentGenerator, JudgeError, JudgeRequest, JudgeResponse, LlmJudge};
pub use traits::store::FormStore;
