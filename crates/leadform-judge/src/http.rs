//! HTTP judge client: posts the evaluation request to an external endpoint
//! and expects `{ "result": "..." }` back.

use std::time::Duration;

use async_trait::async_trait;

use leadform_core::{JudgeError, JudgeRequest, JudgeResponse, LlmJudge};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Judge backed by an HTTP endpoint. Calls are idempotent-safe to retry;
/// callers treat any error as judge-says-no, so a tight timeout keeps
/// routing latency bounded.
pub struct HttpJudge {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpJudge {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmJudge for HttpJudge {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeResponse, JudgeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|error| JudgeError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body, "judge endpoint returned an error");
            return Err(JudgeError::Api {
                message: format!("judge endpoint returned {status}"),
                status: Some(status.as_u16()),
            });
        }

        response
            .json::<JudgeResponse>()
            .await
            .map_err(|error| JudgeError::InvalidResponse(error.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}
