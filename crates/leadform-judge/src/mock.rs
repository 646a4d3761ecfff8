//! Mock judge for tests: queued results, error injection, call history.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use leadform_core::{
    ContentGenerator, JudgeError, JudgeRequest, JudgeResponse, LlmContentConfig, LlmJudge,
};

/// Clones share state, so a test can keep a handle for assertions after
/// moving a clone into the evaluator.
#[derive(Clone, Default)]
pub struct MockJudge {
    inner: Arc<RwLock<MockJudgeInner>>,
}

#[derive(Default)]
struct MockJudgeInner {
    results: Vec<String>,
    result_index: usize,
    cycle_results: bool,
    call_history: Vec<MockCall>,
    should_error: bool,
    error_message: String,
    latency_ms: u64,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub request: JudgeRequest,
}

impl MockJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one result string; queued results are returned in order and the
    /// last one repeats.
    pub fn queue_result(&mut self, result: impl Into<String>) {
        self.inner.write().results.push(result.into());
    }

    pub fn set_results(&mut self, results: Vec<String>, cycle: bool) {
        let mut inner = self.inner.write();
        inner.results = results;
        inner.result_index = 0;
        inner.cycle_results = cycle;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.should_error = true;
        inner.error_message = message.into();
    }

    pub fn clear_error(&mut self) {
        self.inner.write().should_error = false;
    }

    pub fn set_latency(&mut self, latency_ms: u64) {
        self.inner.write().latency_ms = latency_ms;
    }

    pub fn call_count(&self) -> usize {
        self.inner.read().call_history.len()
    }

    pub fn last_request(&self) -> Option<JudgeRequest> {
        self.inner
            .read()
            .call_history
            .last()
            .map(|call| call.request.clone())
    }

    pub fn reset(&mut self) {
        *self.inner.write() = MockJudgeInner::default();
    }

    fn next_result(&self) -> String {
        let mut inner = self.inner.write();
        if inner.results.is_empty() {
            return "mock result".to_string();
        }
        let result = inner.results[inner.result_index].clone();
        if inner.cycle_results {
            inner.result_index = (inner.result_index + 1) % inner.results.len();
        } else if inner.result_index < inner.results.len() - 1 {
            inner.result_index += 1;
        }
        result
    }

    fn record(&self, request: &JudgeRequest) {
        self.inner.write().call_history.push(MockCall {
            request: request.clone(),
        });
    }

    async fn simulate_latency(&self) {
        let latency_ms = self.inner.read().latency_ms;
        if latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(latency_ms)).await;
        }
    }

    fn take_error(&self) -> Option<JudgeError> {
        let inner = self.inner.read();
        inner
            .should_error
            .then(|| JudgeError::Network(inner.error_message.clone()))
    }
}

#[async_trait]
impl LlmJudge for MockJudge {
    async fn evaluate(&self, request: &JudgeRequest) -> Result<JudgeResponse, JudgeError> {
        self.record(request);
        self.simulate_latency().await;
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        Ok(JudgeResponse {
            result: self.next_result(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// The mock also stands in for the informational-content generator.
#[async_trait]
impl ContentGenerator for MockJudge {
    async fn generate(
        &self,
        _context: &str,
        _config: &LlmContentConfig,
    ) -> Result<String, JudgeError> {
        self.simulate_latency().await;
        if let Some(error) = self.take_error() {
            return Err(error);
        }
        Ok(self.next_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> JudgeRequest {
        JudgeRequest {
            form_id: "f1".into(),
            evaluation_prompt: "prompt".into(),
            context: "Q: hi\nA: hello".into(),
            model: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn queued_results_return_in_order_then_repeat() {
        let mut judge = MockJudge::new();
        judge.queue_result("yes");
        judge.queue_result("no");

        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "yes");
        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "no");
        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "no");
    }

    #[tokio::test]
    async fn cycling_results_wrap_around() {
        let mut judge = MockJudge::new();
        judge.set_results(vec!["a".into(), "b".into()], true);

        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "a");
        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "b");
        assert_eq!(judge.evaluate(&request()).await.unwrap().result, "a");
    }

    #[tokio::test]
    async fn error_injection_and_recovery() {
        let mut judge = MockJudge::new();
        judge.set_error("boom");
        assert!(judge.evaluate(&request()).await.is_err());

        judge.clear_error();
        assert!(judge.evaluate(&request()).await.is_ok());
    }

    #[tokio::test]
    async fn call_history_records_requests() {
        let judge = MockJudge::new();
        assert_eq!(judge.call_count(), 0);

        judge.evaluate(&request()).await.unwrap();
        assert_eq!(judge.call_count(), 1);
        assert_eq!(judge.last_request().unwrap().form_id, "f1");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mut judge = MockJudge::new();
        judge.queue_result("shared");
        let clone = judge.clone();

        clone.evaluate(&request()).await.unwrap();
        assert_eq!(judge.call_count(), 1);
    }
}
