//! LLM collaborator traits: the condition judge and the informational
//! content generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::LlmContentConfig;

/// One judge call. Serializes to the wire shape the judge endpoint expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    pub form_id: String,
    pub evaluation_prompt: String,
    /// Full transcript of prior Q&A, in answer order.
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeResponse {
    pub result: String,
}

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("judge API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("judge network error: {0}")]
    Network(String),

    #[error("judge returned a malformed payload: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// External LLM judge used as a condition leaf. Calls must be safe to
/// retry; the engine treats any error as judge-says-no.
#[async_trait]
pub trait LlmJudge: Send + Sync {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeResponse, JudgeError>;

    fn name(&self) -> &str;
}

/// Generates display text for `informational` questions with an LLM content
/// source.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        context: &str,
        config: &LlmContentConfig,
    ) -> Result<String, JudgeError>;
}
