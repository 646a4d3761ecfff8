//! LLM judge collaborators for the Leadform dynamic form engine

mod http;
mod mock;

pub use http::HttpJudge;
pub use leadform_core::{JudgeError, JudgeRequest, JudgeResponse, LlmJudge};
pub use mock::{MockCall, MockJudge};
