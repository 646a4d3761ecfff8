//! Form engine: structural validation, condition evaluation, routing, and
//! completion traversal

mod content;
mod evaluator;
mod identity;
mod router;
mod session;
mod validate;

pub use content::resolve_content;
pub use evaluator::{ConditionEvaluator, transcript};
pub use identity::{AuthProfile, extract_auth_profile};
pub use leadform_core::{FormError, FormValidationError, Result};
pub use router::{RouteOutcome, Router};
pub use session::{FormSession, StepOutcome};
pub use validate::{
    AnswerValidation, MAX_QUESTION_TEXT_LEN, validate_answer, validate_form, validate_question,
};
