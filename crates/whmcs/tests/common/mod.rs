//! Common test utilities and helpers

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use whmcs::Client;
use wiremock::{Match, MockServer, Request};

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Test API credential identifier
#[allow(dead_code)]
pub fn test_identifier() -> String {
    "test-identifier-0123456789".to_string()
}

/// Test API credential secret
#[allow(dead_code)]
pub fn test_secret() -> String {
    "test-secret-abcdefghijklmnop".to_string()
}

/// Client pointed at the mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .identifier(test_identifier())
        .secret(test_secret())
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .slow_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build client")
}

/// Decode a form-encoded request body
#[allow(dead_code)]
pub fn form(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

/// Matches a request whose form body has `key` set to `value`
#[allow(dead_code)]
pub struct FormField {
    key: String,
    value: String,
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        form(request).get(&self.key) == Some(&self.value)
    }
}

/// Matcher for one form field
#[allow(dead_code)]
pub fn form_field(key: impl Into<String>, value: impl Into<String>) -> FormField {
    FormField {
        key: key.into(),
        value: value.into(),
    }
}

/// Matches a request whose form body has no field `key`
#[allow(dead_code)]
pub struct FormFieldAbsent(pub &'static str);

impl Match for FormFieldAbsent {
    fn matches(&self, request: &Request) -> bool {
        !form(request).contains_key(self.0)
    }
}
