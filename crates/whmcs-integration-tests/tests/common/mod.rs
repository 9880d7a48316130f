//! Common test utilities and helpers

pub mod fake_platform;

use std::time::Duration;

pub use fake_platform::FakePlatform;
use whmcs::Client;
use whmcs_integration_tests::ScenarioContext;
use wiremock::MockServer;

/// Fake platform credential identifier
pub const IDENTIFIER: &str = "scenario-identifier";

/// Fake platform credential secret
pub const SECRET: &str = "scenario-secret";

/// Demo client id on the fake platform
pub const CLIENT_ID: u64 = 7;

/// Install a test subscriber honoring `RUST_LOG`; repeated calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fake platform accepting [`IDENTIFIER`] and [`SECRET`]
#[allow(dead_code)]
pub fn fake() -> FakePlatform {
    FakePlatform::new(IDENTIFIER, SECRET)
}

/// Start a mock server with `platform` mounted on it
#[allow(dead_code)]
pub async fn serve(platform: &FakePlatform) -> MockServer {
    init_tracing();
    let server = MockServer::start().await;
    platform.mount(&server).await;
    server
}

/// Client pointed at `server` with the given secret
#[allow(dead_code)]
pub fn client_with_secret(server: &MockServer, secret: &str) -> Client {
    Client::builder()
        .identifier(IDENTIFIER)
        .secret(secret)
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .slow_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build client")
}

/// Client pointed at `server`
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    client_with_secret(server, SECRET)
}

/// Scenario context for the fake platform's demo records
#[allow(dead_code)]
pub fn context() -> ScenarioContext {
    ScenarioContext::new(CLIENT_ID, "paypal", 1u64)
}
