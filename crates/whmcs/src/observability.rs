//! Centralized structured logging for remote calls
//!
//! Every remote procedure call is logged through this layer. Only the action
//! name, provider and parameter count are recorded; credentials and parameter
//! values never reach a log line.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Remote call metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Remote procedure name
    pub action: String,
    /// Provider that carries the call
    pub provider: String,
    /// Number of procedure parameters (credentials excluded)
    pub param_count: usize,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(action: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            provider: provider.into(),
            param_count: 0,
        }
    }

    /// Set the parameter count
    pub fn with_param_count(mut self, count: usize) -> Self {
        self.param_count = count;
        self
    }

    /// Log request being sent
    pub fn log_request(&self, timeout: Duration) {
        debug!(
            action = %self.action,
            provider = %self.provider,
            param_count = self.param_count,
            timeout_ms = timeout.as_millis(),
            "Sending remote call"
        );
    }
}

/// Remote call reply metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, if a reply arrived
    pub status: Option<u16>,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: Option<u16>, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log successful call
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            action = %request.action,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            outcome = "success",
            "Remote call succeeded"
        );
    }

    /// Log failed call
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            action = %request.action,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            outcome = "error",
            "Remote call failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Log a request rejected before transmission
pub fn log_validation_error(action: &str, reason: &str) {
    debug!(
        action = %action,
        reason = %reason,
        "Request validation failed"
    );
}

/// Log a remote error accepted as an expected business outcome
pub fn log_expected_rejection(action: &str, rejection: &str, message: &str) {
    info!(
        action = %action,
        rejection = %rejection,
        message = %message,
        "Remote call rejected by business rule"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_creation() {
        let metadata = RequestMetadata::new("CreateQuote", "whmcs");
        assert_eq!(metadata.action, "CreateQuote");
        assert_eq!(metadata.param_count, 0);
    }

    #[test]
    fn test_request_metadata_with_param_count() {
        let metadata = RequestMetadata::new("CreateQuote", "x").with_param_count(5);
        assert_eq!(metadata.param_count, 5);
    }

    #[test]
    fn test_response_metadata_creation() {
        let metadata = ResponseMetadata::new(Some(200), Duration::from_millis(100));
        assert_eq!(metadata.status, Some(200));
        assert_eq!(metadata.elapsed, Duration::from_millis(100));
        assert_eq!(metadata.body_size, None);
    }

    #[test]
    fn test_response_metadata_with_body_size() {
        let metadata = ResponseMetadata::new(None, Duration::from_millis(1)).with_body_size(2048);
        assert_eq!(metadata.body_size, Some(2048));
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_logging_does_not_panic_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let request = RequestMetadata::new("GetStats", "x").with_param_count(1);
            request.log_request(Duration::from_secs(30));
            let response = ResponseMetadata::new(Some(200), Duration::from_millis(3));
            response.log_success(&request);
            response.log_error(&request, "boom");
            log_validation_error("GetStats", "empty");
            log_expected_rejection("ApplyCredit", "InsufficientCredit", "Amount exceeds");
        });
    }
}
