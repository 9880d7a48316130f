//! Configuration for the WHMCS client

use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for procedures known to be slow on the platform side
/// (invoice creation, quote acceptance, bulk invoice generation).
pub const DEFAULT_SLOW_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the WHMCS client.
///
/// Credentials are an API identifier/secret pair created under
/// *Setup > Staff Management > Manage API Credentials*. An access key is only
/// needed when the installation restricts API access by IP.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credential identifier
    pub identifier: Option<SecretString>,

    /// API credential secret
    pub secret: Option<SecretString>,

    /// Optional access key that bypasses the IP allow-list
    pub access_key: Option<SecretString>,

    /// Base URL of the installation, e.g. `https://billing.example.com`
    pub base_url: Option<String>,

    /// Path of the API endpoint relative to the base URL
    pub api_path: Option<String>,

    /// Default timeout for requests
    pub timeout: Duration,

    /// Timeout applied to slow procedures
    pub slow_timeout: Duration,

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identifier: None,
            secret: None,
            access_key: None,
            base_url: None,
            api_path: None,
            timeout: DEFAULT_TIMEOUT,
            slow_timeout: DEFAULT_SLOW_TIMEOUT,
            user_agent: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an identifier/secret pair.
    pub fn with_credentials(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: Some(secret_string(identifier)),
            secret: Some(secret_string(secret)),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// This will look for:
    /// - `WHMCS_IDENTIFIER` and `WHMCS_SECRET` for authentication
    /// - `WHMCS_ACCESS_KEY` for the optional access key
    /// - `WHMCS_URL` for the installation base URL
    /// - `WHMCS_API_PATH` for a non-standard endpoint path
    /// - `WHMCS_TIMEOUT` and `WHMCS_SLOW_TIMEOUT` (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(identifier) = env::var("WHMCS_IDENTIFIER") {
            config.identifier = Some(secret_string(identifier));
        }
        if let Ok(secret) = env::var("WHMCS_SECRET") {
            config.secret = Some(secret_string(secret));
        }
        if let Ok(access_key) = env::var("WHMCS_ACCESS_KEY") {
            config.access_key = Some(secret_string(access_key));
        }

        if let Ok(base_url) = env::var("WHMCS_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(api_path) = env::var("WHMCS_API_PATH") {
            config.api_path = Some(api_path);
        }

        if let Ok(timeout_str) = env::var("WHMCS_TIMEOUT") {
            config.timeout = parse_seconds("WHMCS_TIMEOUT", &timeout_str)?;
        }
        if let Ok(timeout_str) = env::var("WHMCS_SLOW_TIMEOUT") {
            config.slow_timeout = parse_seconds("WHMCS_SLOW_TIMEOUT", &timeout_str)?;
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.identifier.is_some() {
            self.identifier = other.identifier;
        }
        if other.secret.is_some() {
            self.secret = other.secret;
        }
        if other.access_key.is_some() {
            self.access_key = other.access_key;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_path.is_some() {
            self.api_path = other.api_path;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.slow_timeout != DEFAULT_SLOW_TIMEOUT {
            self.slow_timeout = other.slow_timeout;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }

        self
    }
}

fn secret_string(value: impl Into<String>) -> SecretString {
    SecretString::new(value.into().into_boxed_str())
}

#[cfg(feature = "env")]
fn parse_seconds(name: &str, value: &str) -> Result<Duration, crate::error::Error> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            crate::error::Error::MissingConfig(format!(
                "{name} must be a whole number of seconds, got '{value}'"
            ))
        })
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API credential identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.config.identifier = Some(secret_string(identifier));
        self
    }

    /// Set the API credential secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(secret_string(secret));
        self
    }

    /// Set the access key.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.config.access_key = Some(secret_string(access_key));
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the endpoint path.
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.config.api_path = Some(api_path.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the timeout used for slow procedures.
    pub fn slow_timeout(mut self, timeout: Duration) -> Self {
        self.config.slow_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
