//! Mock Gemini `generateContent` endpoint

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use crate::common::constants::TEST_GOOGLE_API_KEY;

/// Gemini response body carrying `text` as the only part
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 1832,
            "candidatesTokenCount": 611,
            "totalTokenCount": 2443
        }
    })
}

/// Mock Gemini API server wrapper
pub struct MockGemini {
    server: MockServer,
}

impl MockGemini {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn generate_path(model: &str) -> String {
        format!("/models/{}:generateContent", model)
    }

    /// Answer one authenticated call for `model` with `text`
    pub async fn mock_generate_success(&self, model: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path(model)))
            .and(header("x-goog-api-key", TEST_GOOGLE_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(text)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer one call for `model` with an arbitrary JSON body
    pub async fn mock_generate_body(&self, model: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path(model)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail one call for `model` with `status` and a plain-text body
    pub async fn mock_generate_error(&self, model: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path(model)))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if the provider is called at all
    pub async fn mock_never_called(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// Requests the mock has received so far
    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
