//! Mock HTTP server setup for integration tests

use mockito::{Mock, Server, ServerGuard};
use std::time::Duration;
use tuteliq::{TuteliqClient, TuteliqClientBuilder};

pub const TEST_API_KEY: &str = "test-api-key-12345";

/// Test fixture that owns a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Builder pointed at the mock server, with retries disabled.
    pub fn builder(&self) -> TuteliqClientBuilder {
        TuteliqClientBuilder::new()
            .api_key(TEST_API_KEY)
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(5))
            .retries(0)
    }

    pub fn client(&self) -> TuteliqClient {
        self.builder().build().expect("Failed to build client")
    }

    /// Create a mock for a successful JSON response
    pub async fn mock_json(&mut self, method: &str, path: &str, body: serde_json::Value) -> Mock {
        self.server
            .mock(method, path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
