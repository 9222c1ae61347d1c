//! Groq chat-completion provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use icpulse::{ChatMessage, CompletionResponse, HandlerError, LlmProvider};

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(20);

pub struct GroqProvider {
    http: Client,
    api_key: String,
    model: String,
}

impl GroqProvider {
    pub fn new(http: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl LlmProvider for GroqProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<CompletionResponse, HandlerError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
            max_tokens: 1024,
            stream: false,
        };

        let response = self
            .http
            .post(API_URL)
            .timeout(COMPLETION_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HandlerError::Timeout
                } else {
                    HandlerError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HandlerError::Llm(format!("status {status}: {body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| HandlerError::Parse(e.to_string()))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| HandlerError::Llm("no choices in response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        "groq"
    }
}
