//! Common test utilities for the quote relay
//!
//! Builds a real `AppState` whose provider and document URLs point at
//! wiremock servers, wrapped in an axum-test `TestServer`.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use quote_relay::{routes::create_router, AppState, Config, ProviderKind};

/// Test configuration constants
pub mod constants {
    pub const TEST_GOOGLE_API_KEY: &str = "test-google-api-key";
    pub const TEST_ANTHROPIC_API_KEY: &str = "test-anthropic-api-key";
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    pub const GEMINI_3_MODEL: &str = "gemini-3-pro-preview";
    pub const CLAUDE_MODEL: &str = "claude-sonnet-4-5-20250929";
}

/// Configuration pointing every outbound call at the given mock servers
pub fn test_config(provider: ProviderKind, provider_uri: &str, docs_uri: &str) -> Config {
    let (api_key, default_model) = match provider {
        ProviderKind::Gemini => (constants::TEST_GOOGLE_API_KEY, constants::GEMINI_MODEL),
        ProviderKind::Anthropic => (constants::TEST_ANTHROPIC_API_KEY, constants::CLAUDE_MODEL),
    };

    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        provider,
        api_key: api_key.to_string(),
        api_url: provider_uri.to_string(),
        default_model: default_model.to_string(),
        text_only_prefixes: vec!["gemini-3".to_string()],
        temperature: 0.1,
        max_output_tokens: 4096,
        skill_url: format!("{}{}", docs_uri, crate::mocks::SKILL_PATH),
        catalog_url: format!("{}{}", docs_uri, crate::mocks::CATALOG_PATH),
        metrics_addr: None,
        log_json: false,
    }
}

/// Relay server for the given configuration
pub fn create_test_server(config: Config) -> TestServer {
    let state = AppState::new(config).expect("Failed to build app state");
    TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server")
}

/// A caller request with a single user message
pub fn single_message_request(content: &str) -> Value {
    json!({"messages": [{"role": "user", "content": content}]})
}

/// Source text for the Toronto 20'x10' booth fixture
pub const TORONTO_DOCUMENT: &str = "Best Buy Chalet Experience. Booth 20' x 10' at the \
    Enercare Centre, Toronto. Millwork backwall with cabinets, painted MDF side walls, \
    carpet with underpad, two backlit fabric graphics, I&D crew of 4 for 2 days.";

/// A model reply for the Toronto fixture, as the provider would send it
pub fn toronto_quote() -> Value {
    json!({
        "booth_specs": {
            "dimensions": "20' x 10'",
            "square_footage": 200,
            "location": "Toronto, ON",
            "event_name": "Best Buy Chalet Experience"
        },
        "project_type": "toronto_standard",
        "materials": {
            "walls": 41366,
            "walls_line_items": [
                {"item": "Millwork backwall + cabinets", "qty": 1, "unit_price": "$25,284 each", "extended": 25284, "confidence": "high"},
                {"item": "Side walls - painted MDF", "qty": 2, "dimensions": "10' x 8'", "unit_price": "$100.51/sqft", "extended": 16082, "confidence": "medium"}
            ],
            "flooring": 2420,
            "graphics": 1815,
            "other": 3080,
            "subtotal": 48681
        },
        "services": {
            "design_pm": 10010,
            "design_pm_percent": 20.6,
            "install_dismantle": 8360,
            "install_dismantle_line_items": [
                {"item": "I&D crew 4 x 2 days", "qty": 8, "unit_price": "$1,045/day", "extended": 8360}
            ],
            "logistics": 4950,
            "storage": 420,
            "subtotal": 23740
        },
        "subtotal_before_tax": 72421,
        "tax_rate": 0.13,
        "tax_amount": 9415,
        "total": 81836,
        "confidence": "high",
        "notes": ["Side wall finish assumed painted MDF"]
    })
}

/// Whether `actual` is within `tolerance` (a fraction) of `expected`
pub fn within(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= expected * tolerance
}
