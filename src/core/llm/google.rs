//! Google Generative Language API provider (API key-based).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ChatRequest, ChatResponse, LLMError, LLMProvider, MessageRole, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider over the `generateContent` endpoint.
pub struct GoogleProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GoogleProvider {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(LLMError::HttpError)?;

        // Trim at construction so validation and requests agree
        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Build from an environment variable, failing fast when the key is
    /// absent so no request is ever attempted without a credential.
    pub fn from_env(var: &str, model: String) -> Result<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::new(key, model),
            _ => Err(LLMError::MissingApiKey(var.to_string())),
        }
    }

    /// Point the provider at a different endpoint (tests).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pure format check: Google API keys start with "AIza".
    pub fn is_valid_api_key_format(key: &str) -> bool {
        let trimmed = key.trim();
        !trimmed.is_empty() && trimmed.starts_with("AIza")
    }

    fn build_contents(&self, request: &ChatRequest) -> Vec<serde_json::Value> {
        request
            .messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                })
            })
            .collect()
    }
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    fn id(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let contents = self.build_contents(&request);
        let mut body = serde_json::json!({ "contents": contents });

        if let Some(system) = &request.system_prompt {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system }]
            });
        }

        if request.temperature.is_some() || request.max_tokens.is_some() {
            let mut gen_config = serde_json::Map::new();
            if let Some(temp) = request.temperature {
                gen_config.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max) = request.max_tokens {
                gen_config.insert("maxOutputTokens".to_string(), serde_json::json!(max));
            }
            body["generationConfig"] = serde_json::Value::Object(gen_config);
        }

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let latency = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: serde_json::Value = resp.json().await?;

        let content = json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| LLMError::InvalidResponse("Missing content".to_string()))?
            .to_string();

        log::debug!(
            "Gemini {} answered in {latency}ms ({} chars)",
            self.model,
            content.len()
        );

        Ok(ChatResponse {
            content,
            model: self.model.clone(),
            finish_reason: json["candidates"]
                .as_array()
                .and_then(|arr| arr.first())
                .and_then(|c| c["finishReason"].as_str())
                .map(|s| s.to_string()),
            latency_ms: latency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_format() {
        assert!(GoogleProvider::is_valid_api_key_format("AIzaSyD12345abcdef"));
        assert!(GoogleProvider::is_valid_api_key_format("  AIzaX  "));
        assert!(!GoogleProvider::is_valid_api_key_format("invalid-key"));
        assert!(!GoogleProvider::is_valid_api_key_format(""));
    }

    #[test]
    fn test_from_env_missing_fails_fast() {
        let err = GoogleProvider::from_env(
            "TRAITCLOUD_TEST_NO_SUCH_VAR",
            "gemini-2.0-flash".to_string(),
        )
        .err()
        .expect("must fail without the variable");
        assert!(matches!(err, LLMError::MissingApiKey(_)));
    }

    #[test]
    fn test_build_contents_maps_assistant_to_model_role() {
        let provider =
            GoogleProvider::new("AIzaTest".to_string(), "gemini-2.0-flash".to_string()).unwrap();
        let request = ChatRequest::new(vec![
            crate::core::llm::ChatMessage::user("hi"),
            crate::core::llm::ChatMessage::assistant("hello"),
        ]);
        let contents = provider.build_contents(&request);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "hello");
    }
}
