use crate::question::SemanticRole;

/// Structural/configuration failures raised at form-save time. These are
/// authoring errors: not retried, surfaced to the form builder UI with the
/// offending question or group named.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormValidationError {
    #[error("question '{question_id}' text exceeds {max} characters")]
    TextTooLong { question_id: String, max: usize },

    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),

    #[error("no question declares the '{role}' role")]
    MissingRole { role: SemanticRole },

    #[error("no question is designated as the auth identifier for '{role}'")]
    NoAuthIdentifier { role: SemanticRole },

    #[error("ambiguous auth identifier for '{role}': {ids:?}")]
    AmbiguousAuthIdentifier { role: SemanticRole, ids: Vec<String> },

    #[error("group '{group_id}' contains no question ids")]
    EmptyGroup { group_id: String },

    #[error("group '{group_id}' references unknown question '{question_id}'")]
    UnknownGroupMember {
        group_id: String,
        question_id: String,
    },

    #[error("question '{question_id}' routes to unknown question '{target}'")]
    UnknownRouteTarget { question_id: String, target: String },

    #[error("conditional transition on '{question_id}' declares no defaultNext route")]
    MissingDefaultRoute { question_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("invalid form: {0}")]
    Validation(#[from] FormValidationError),

    #[error("form not found: {0}")]
    NotFound(String),

    #[error("completion not found: {0}")]
    CompletionNotFound(String),

    #[error("completion {0} is already terminal")]
    CompletionClosed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("identity provisioning failed: {0}")]
    Provisioning(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
