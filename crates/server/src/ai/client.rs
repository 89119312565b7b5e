use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::image::ImagePayload;
use crate::config::Config;
use crate::error::ServiceError;

/// Один запрос к модели: текст и, для анализа, снимок
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
}

impl ModelRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image: ImagePayload) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

/// Удалённая генеративная модель: получает промпт, возвращает сырой текст
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: ModelRequest) -> Result<String, ServiceError>;
}

// ============================================================================
// Gemini REST API
// ============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ServiceError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.api_base, config.model
            ),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: ModelRequest) -> Result<String, ServiceError> {
        let body = GenerateContentRequest::from_request(&request);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(upstream_error_message(status, &text)));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.into_text()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a ModelRequest) -> Self {
        let mut parts = vec![RequestPart::Text {
            text: &request.prompt,
        }];
        if let Some(image) = &request.image {
            parts.push(RequestPart::Image {
                inline_data: InlineData {
                    mime_type: image.mime_type,
                    data: image.to_base64(),
                },
            });
        }
        Self {
            contents: vec![RequestContent { role: "user", parts }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Текст первого кандидата; служебные "thought"-части пропускаются
    fn into_text(self) -> Result<String, ServiceError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt was blocked ({})", r))
                .unwrap_or_else(|| "model returned no candidates".to_string());
            return Err(ServiceError::Upstream(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(ServiceError::Upstream(format!(
                "model returned no text (finish reason: {})",
                reason
            )));
        }
        Ok(text)
    }
}

fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorInfo,
    }
    #[derive(Deserialize)]
    struct ErrorInfo {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => format!("HTTP {}: {}", status, parsed.error.message),
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}

// ============================================================================
// Fake client for tests
// ============================================================================

/// Подставная модель: отдаёт заранее заданные ответы и запоминает запросы
pub struct FakeModelClient {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<ModelRequest>>,
    delay: Option<Duration>,
}

impl FakeModelClient {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(vec![Err(message.into())])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ModelClient for FakeModelClient {
    async fn generate(&self, request: ModelRequest) -> Result<String, ServiceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = {
            let mut responses = self
                .responses
                .lock()
                .map_err(|_| ServiceError::Upstream("fake client poisoned".to_string()))?;
            // Последний ответ повторяется бесконечно
            if responses.len() > 1 {
                responses.pop_front()
            } else {
                responses.front().cloned()
            }
        };

        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ServiceError::Upstream(message)),
            None => Err(ServiceError::Upstream("fake client has no responses".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_body() {
        let request = ModelRequest::text("hello");
        let body = serde_json::to_value(GenerateContentRequest::from_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_image_request_body() {
        let image = ImagePayload {
            mime_type: "image/png",
            bytes: vec![1, 2, 3],
        };
        let request = ModelRequest::with_image("look", image);
        let body = serde_json::to_value(GenerateContentRequest::from_request(&request)).unwrap();
        assert_eq!(
            body["contents"][0]["parts"][1],
            json!({"inlineData": {"mimeType": "image/png", "data": "AQID"}})
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "```json\n{\"a\":"},
                    {"text": "1}\n```"}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "```json\n{\"a\":1}\n```");
    }

    #[test]
    fn test_blocked_prompt() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let err = response.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_empty_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        let err = response.into_text().unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_upstream_error_message() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        let msg = upstream_error_message(reqwest::StatusCode::FORBIDDEN, body);
        assert_eq!(msg, "HTTP 403 Forbidden: API key not valid");
        assert_eq!(
            upstream_error_message(reqwest::StatusCode::BAD_GATEWAY, ""),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn test_endpoint_uses_model() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("k".to_string()),
            "GEMINI_API_BASE" => Some("http://localhost:1234".to_string()),
            _ => None,
        })
        .unwrap();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_fake_client_sequence() {
        let client = FakeModelClient::new(vec![Ok("one".into()), Err("boom".into())]);
        assert_eq!(client.generate(ModelRequest::text("a")).await.unwrap(), "one");
        assert!(client.generate(ModelRequest::text("b")).await.is_err());
        assert!(client.generate(ModelRequest::text("c")).await.is_err());
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.requests()[1].prompt, "b");
    }
}
