//! Mock Anthropic Messages API

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use crate::common::constants::TEST_ANTHROPIC_API_KEY;

/// Messages API response carrying `text` as the only content block
pub fn claude_reply(text: &str) -> Value {
    json!({
        "id": "msg_01TestQuote",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 2104, "output_tokens": 733}
    })
}

/// Mock Anthropic API server wrapper
pub struct MockAnthropic {
    server: MockServer,
}

impl MockAnthropic {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer one authenticated, versioned call with `text`
    pub async fn mock_messages_success(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", TEST_ANTHROPIC_API_KEY))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(claude_reply(text)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail one call with `status` and a JSON error body
    pub async fn mock_messages_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
