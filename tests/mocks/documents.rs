//! Mock document store serving the skill and catalog

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const SKILL_PATH: &str = "/skills/quote-generator/SKILL.md";
pub const CATALOG_PATH: &str = "/MASTER_CATALOG.md";

pub const SKILL_TEXT: &str = "# Quote Generator\nPrice every booth from the catalog.";
pub const CATALOG_TEXT: &str = "| Item | Unit | Price |\n|---|---|---|\n| Carpet | sqft | $12.10 |";

/// Mock document store server wrapper
pub struct MockDocumentStore {
    server: MockServer,
}

impl MockDocumentStore {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve both documents exactly once
    pub async fn mock_documents(&self) {
        Mock::given(method("GET"))
            .and(path(SKILL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(SKILL_TEXT))
            .expect(1)
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG_TEXT))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve the skill but fail the catalog with `status`
    pub async fn mock_catalog_failure(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(SKILL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(SKILL_TEXT))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any document is requested
    pub async fn mock_never_fetched(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// System instruction the relay should compose from the mocked documents
    pub fn expected_system_instruction() -> String {
        format!("{}\n\n---\n\n# REFERENCE DATA\n{}", SKILL_TEXT, CATALOG_TEXT)
    }
}
