//! HTTP request builder

use super::Response;
use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

/// Builder for one form POST.
///
/// Form values are never printed by `Debug`; they include credentials.
#[derive(Clone)]
pub struct RequestBuilder {
    url: Url,
    headers: HeaderMap,
    form: Vec<(String, String)>,
    timeout: Duration,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
            form: Vec::new(),
            timeout: crate::config::DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Try to set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Set every header from `headers`, replacing existing ones.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (key, value) in headers {
            self.headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Append one form field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Append form fields in order.
    pub fn fields(mut self, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        self.form.extend(fields);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request and get a response.
    pub async fn send(self) -> Result<Response> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let started = Instant::now();
        let timeout = self.timeout;
        let transport_error = |e: reqwest::Error| {
            if e.is_timeout() {
                Error::Timeout(timeout)
            } else {
                Error::Connection(e.without_url().to_string())
            }
        };

        let resp = client
            .post(self.url.as_str())
            .timeout(timeout)
            .headers(self.headers)
            .form(&self.form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_error)?.to_vec();

        Ok(Response::new(status, body, started.elapsed()))
    }

    /// Get the headers.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Names of the form fields, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.form.iter().map(|(k, _)| k.as_str())
    }

    /// Value of form field `key`.
    pub fn field_value(&self, key: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url.as_str())
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .finish()
    }
}
