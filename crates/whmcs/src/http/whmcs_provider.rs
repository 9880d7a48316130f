//! HTTP provider for a WHMCS installation
//!
//! Authenticates every call with an identifier/secret pair (plus an optional
//! access key) sent as form fields next to the procedure parameters.

use super::{HttpProvider, RequestBuilder, Response};
use crate::error::{Error, Result};
use crate::params::Params;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::Arc, time::Duration};
use url::Url;

/// HTTP provider for the WHMCS remote API.
///
/// Holds one pooled `reqwest::Client`; cloning the provider shares it.
///
/// # Example
///
/// ```rust,no_run
/// use whmcs::http::WhmcsHttpProvider;
///
/// let provider = WhmcsHttpProvider::builder()
///     .identifier("api-identifier")
///     .secret("api-secret")
///     .base_url("https://billing.example.com")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct WhmcsHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) http_client: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) identifier: SecretString,
    pub(crate) secret: SecretString,
    pub(crate) access_key: Option<SecretString>,
    pub(crate) default_headers: http::HeaderMap,
}

impl WhmcsHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> WhmcsHttpProviderBuilder {
        WhmcsHttpProviderBuilder::default()
    }

    /// Build the provider from a client configuration.
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .timeout(config.timeout.max(config.slow_timeout))
            .default_headers(config.default_headers.clone());

        builder.identifier = config.identifier.clone();
        builder.secret = config.secret.clone();
        builder.access_key = config.access_key.clone();
        builder.base_url = config.base_url.clone();
        builder.api_path = config.api_path.clone();
        builder.user_agent = config.user_agent.clone();

        builder.build()
    }

    /// Create a request for `action` carrying credentials but no parameters.
    fn build_request(&self, action: &str) -> RequestBuilder {
        let mut builder = RequestBuilder::new(self.inner.endpoint.clone())
            .with_client(self.inner.http_client.clone())
            .headers(&self.inner.default_headers)
            .field("identifier", self.inner.identifier.expose_secret())
            .field("secret", self.inner.secret.expose_secret());

        if let Some(access_key) = &self.inner.access_key {
            builder = builder.field("accesskey", access_key.expose_secret());
        }

        builder.field("action", action).field("responsetype", "json")
    }
}

impl fmt::Debug for WhmcsHttpProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhmcsHttpProvider")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("access_key", &self.inner.access_key.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpProvider for WhmcsHttpProvider {
    async fn post_form(&self, action: &str, params: Params, timeout: Duration) -> Result<Response> {
        self.build_request(action)
            .fields(params.to_form_pairs())
            .timeout(timeout)
            .send()
            .await
    }

    fn provider_name(&self) -> &'static str {
        "whmcs"
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }
}

/// Builder for creating a `WhmcsHttpProvider` with custom configuration.
#[derive(Default)]
pub struct WhmcsHttpProviderBuilder {
    identifier: Option<SecretString>,
    secret: Option<SecretString>,
    access_key: Option<SecretString>,
    base_url: Option<String>,
    api_path: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: http::HeaderMap,
}

impl WhmcsHttpProviderBuilder {
    /// Set the API credential identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(SecretString::new(identifier.into().into_boxed_str()));
        self
    }

    /// Set the API credential secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(SecretString::new(secret.into().into_boxed_str()));
        self
    }

    /// Set the access key used to bypass the IP allow-list.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(SecretString::new(access_key.into().into_boxed_str()));
        self
    }

    /// Set the base URL of the installation.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the endpoint path.
    ///
    /// Defaults to `/includes/api.php`.
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    /// Set the connection-level timeout ceiling.
    ///
    /// Per-call timeouts are passed with each request; this only bounds the
    /// pooled client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<http::HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<http::HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Replace the default headers.
    pub fn default_headers(mut self, headers: http::HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier, secret or base URL is missing
    /// - The base URL is empty, unparsable or not http(s)
    /// - HTTP client creation fails
    pub fn build(self) -> Result<WhmcsHttpProvider> {
        let Self {
            identifier,
            secret,
            access_key,
            base_url,
            api_path,
            timeout,
            user_agent,
            default_headers,
        } = self;

        let identifier = identifier.ok_or_else(|| {
            Error::MissingConfig("API identifier not set (WHMCS_IDENTIFIER)".to_string())
        })?;
        let secret = secret
            .ok_or_else(|| Error::MissingConfig("API secret not set (WHMCS_SECRET)".to_string()))?;
        let base_url = base_url
            .ok_or_else(|| Error::MissingConfig("Base URL not set (WHMCS_URL)".to_string()))?;

        let endpoint = endpoint_url(&base_url, api_path.as_deref())?;

        let timeout = timeout.unwrap_or(crate::config::DEFAULT_SLOW_TIMEOUT);
        let user_agent =
            user_agent.unwrap_or_else(|| format!("whmcs-rust/{}", crate::VERSION));

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let inner = Arc::new(ProviderInner {
            http_client,
            endpoint,
            identifier,
            secret,
            access_key,
            default_headers,
        });

        Ok(WhmcsHttpProvider { inner })
    }
}

/// Join the base URL and the endpoint path into the full endpoint URL.
fn endpoint_url(base_url: &str, api_path: Option<&str>) -> Result<Url> {
    let base = base_url.trim();
    if base.is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let parsed: Url = base
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            )));
        }
    }

    let path = api_path
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(crate::DEFAULT_API_PATH);
    let joined = format!(
        "{}/{}",
        parsed.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    joined
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> WhmcsHttpProviderBuilder {
        WhmcsHttpProvider::builder()
            .identifier("ident")
            .secret("shh")
            .base_url("https://billing.example.com")
    }

    #[test]
    fn test_builder_with_credentials() {
        let provider = builder().build().unwrap();

        assert_eq!(provider.provider_name(), "whmcs");
        assert_eq!(
            provider.endpoint(),
            "https://billing.example.com/includes/api.php"
        );
    }

    #[test]
    fn test_builder_without_credentials_fails() {
        let result = WhmcsHttpProvider::builder()
            .base_url("https://billing.example.com")
            .build();
        assert!(matches!(result, Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_builder_without_base_url_fails() {
        let result = WhmcsHttpProvider::builder()
            .identifier("ident")
            .secret("shh")
            .build();
        assert!(matches!(result, Err(Error::MissingConfig(msg)) if msg.contains("WHMCS_URL")));
    }

    #[test]
    fn test_endpoint_joins_subdirectory_install() {
        let provider = builder()
            .base_url("https://example.com/billing/")
            .api_path("includes/api.php")
            .build()
            .unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://example.com/billing/includes/api.php"
        );
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = builder().base_url("   ").build();
        match result {
            Err(Error::InvalidUrl(msg)) => assert_eq!(msg, "Base URL cannot be empty"),
            other => panic!("Expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = builder().base_url("ftp://billing.example.com").build();
        match result {
            Err(Error::InvalidUrl(msg)) => assert!(msg.contains("Invalid URL scheme 'ftp'")),
            other => panic!("Expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_build_request_carries_credentials_and_action() {
        let provider = builder().access_key("key-1").build().unwrap();
        let request = provider.build_request("GetStats");

        let names: Vec<_> = request.field_names().collect();
        assert_eq!(
            names,
            vec!["identifier", "secret", "accesskey", "action", "responsetype"]
        );
        assert_eq!(request.field_value("action"), Some("GetStats"));
        assert_eq!(request.field_value("responsetype"), Some("json"));
    }

    #[test]
    fn test_builder_with_custom_headers() {
        let provider = builder()
            .header("X-Tenant", "acme")
            .unwrap()
            .build()
            .unwrap();

        assert!(provider.inner.default_headers.contains_key("x-tenant"));
        let request = provider.build_request("GetStats");
        assert!(request.header_map().contains_key("x-tenant"));
    }

    #[test]
    fn test_debug_does_not_print_credentials() {
        let provider = builder().build().unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("shh"));
    }
}
