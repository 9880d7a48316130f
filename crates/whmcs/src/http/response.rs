//! HTTP response handling

use crate::error::{Error, Result};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// HTTP response wrapper.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
    elapsed: Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, body: Vec<u8>, elapsed: Duration) -> Self {
        Self {
            status,
            body,
            elapsed,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Time from sending the request to receiving the full body.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the platform envelope for `action`.
    ///
    /// A JSON object whose `result` is `"error"` becomes [`Error::Remote`]
    /// regardless of the HTTP status; the platform reports authentication
    /// failures that way too. Otherwise a non-2xx status becomes
    /// [`Error::Http`]. A 2xx body is decoded into `T` only when it is a
    /// JSON object with `result` set to `"success"`.
    pub fn into_result<T: DeserializeOwned>(self, action: &str) -> Result<T> {
        let value: Option<Value> = serde_json::from_slice(&self.body).ok();

        if let Some(Value::Object(map)) = &value
            && map.get("result").and_then(Value::as_str) == Some("error")
        {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("unknown error reported by the platform");
            return Err(Error::remote(action, message));
        }

        if !self.is_success() {
            return Err(Error::from_status(
                self.status.as_u16(),
                &String::from_utf8_lossy(&self.body),
            ));
        }

        let Some(value) = value else {
            return Err(Error::ResponseValidation(format!(
                "{action} reply is not JSON: {}",
                preview(&self.body)
            )));
        };

        match value.get("result") {
            Some(Value::String(result)) if result == "success" => {}
            Some(other) => {
                return Err(Error::ResponseValidation(format!(
                    "{action} reply has unexpected result {other}"
                )));
            }
            None => {
                return Err(Error::ResponseValidation(format!(
                    "{action} reply has no result: {}",
                    preview(&self.body)
                )));
            }
        }

        serde_json::from_value(value)
            .map_err(|e| Error::ResponseValidation(format!("{action} reply did not match: {e}")))
    }
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(120) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
