use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use crate::application::ports::{LlmClient, ModelError};

/// Returns a fixed answer and remembers every prompt it was given.
pub struct MockLlmClient {
    answer: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(Option<String>, String)>>,
}

impl MockLlmClient {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system, user)` prompt pairs in call order.
    pub async fn prompts(&self) -> Vec<(Option<String>, String)> {
        self.prompts.lock().await.clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new("Mock answer")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .await
            .push((system_prompt.map(str::to_string), user_prompt.to_string()));
        Ok(self.answer.clone())
    }
}
