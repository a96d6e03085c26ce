//! Common test utilities for the webhook integration tests

use serde_json::Value;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

/// Path the mocked webhook listens on
pub const WEBHOOK_PATH: &str = "/webhook/getLeads";

/// Start a webhook answering one `GET` with `template`
pub async fn webhook_with(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEBHOOK_PATH))
        .and(header("accept", "application/json"))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;

    server
}

/// Start a webhook answering with a JSON body
pub async fn webhook_json(body: Value) -> MockServer {
    webhook_with(ResponseTemplate::new(200).set_body_json(body)).await
}

/// Full URL of the mocked webhook
pub fn webhook_url(server: &MockServer) -> String {
    format!("{}{WEBHOOK_PATH}", server.uri())
}
