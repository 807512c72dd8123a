use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::openai_http::send_json;
use crate::application::ports::{LlmClient, ModelError};

/// Chat completions against the OpenAI API (or any endpoint speaking the same protocol).
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    // Null on refusals and tool calls.
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String, model: String, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            temperature,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        user_prompt: &str,
    ) -> Result<String, ModelError> {
        let messages = system_prompt
            .map(|content| Message {
                role: "system",
                content,
            })
            .into_iter()
            .chain(std::iter::once(Message {
                role: "user",
                content: user_prompt,
            }))
            .collect();

        let request = self.client.post(&self.endpoint).json(&CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        });
        let response: CompletionResponse = send_json(request, &self.api_key).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ModelError::MalformedResponse("completion had no choices".to_string())
        })?;
        choice
            .message
            .content
            .ok_or_else(|| ModelError::MalformedResponse("completion had no content".to_string()))
    }
}
