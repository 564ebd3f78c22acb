//! Mock completion client for testing.
//!
//! Configurable to return scripted responses, inject failures, or add
//! latency, with call tracking so tests can assert how (and whether) the
//! controller reached the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
};

type OnCallHook = Arc<dyn Fn() + Send + Sync>;

/// Mock completion client with scripted outcomes.
#[derive(Clone, Default)]
pub struct MockCompletionClient {
    /// Scripted outcomes, consumed in order.
    script: Arc<Mutex<VecDeque<Result<CompletionResponse, CompletionError>>>>,
    /// Every request this client received.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    /// Simulated latency per request.
    latency: Duration,
    /// Concurrency high-water mark.
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    /// Invoked at the start of every `complete` call.
    on_call: Option<OnCallHook>,
}

impl MockCompletionClient {
    /// Creates a mock that answers `"mock response"` to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(CompletionResponse {
            content: content.into(),
            model: Some("mock-model".to_string()),
        }));
        self
    }

    /// Scripts a failure.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Adds simulated latency to every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Registers a hook invoked when a request arrives.
    pub fn with_on_call(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_call = Some(Arc::new(hook));
        self
    }

    /// Shared handle to the recorded requests.
    pub fn call_log(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.calls)
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Shared handle to the concurrency high-water mark.
    pub fn max_in_flight_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.max_in_flight)
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request);
        if let Some(ref hook) = self.on_call {
            hook();
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(CompletionResponse {
                content: "mock response".to_string(),
                model: Some("mock-model".to_string()),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatMessage;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest {
            model: "mock-model".to_string(),
            messages: vec![ChatMessage::user(content)],
        }
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let client = MockCompletionClient::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(client.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(client.complete(request("b")).await.unwrap().content, "second");
        // Script exhausted: falls back to the default response.
        assert_eq!(
            client.complete(request("c")).await.unwrap().content,
            "mock response"
        );
    }

    #[tokio::test]
    async fn scripted_errors_are_returned() {
        let client =
            MockCompletionClient::new().with_error(CompletionError::upstream(500, "boom"));

        assert!(matches!(
            client.complete(request("a")).await,
            Err(CompletionError::Upstream { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let client = MockCompletionClient::new();
        client.complete(request("hello")).await.unwrap();

        assert_eq!(client.call_count(), 1);
        let calls = client.call_log();
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].messages[0].content, "hello");
    }

    #[tokio::test]
    async fn on_call_hook_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let client = MockCompletionClient::new().with_on_call(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        client.complete(request("a")).await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
