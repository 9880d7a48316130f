//! Main client implementation for the WHMCS remote API

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    action::{self, ApiRequest},
    classify::{Outcome, classify},
    config::{ClientConfig, DEFAULT_SLOW_TIMEOUT, DEFAULT_TIMEOUT},
    error::{Error, Result},
    http::{HttpProvider, WhmcsHttpProvider},
    observability::{self, RequestMetadata, RequestTimer, ResponseMetadata},
    params::Params,
    resources::{Billing, Clients, Orders, Products, Service, Support, System, Tickets},
};

/// Main client for interacting with a WHMCS installation.
///
/// Cheap to clone; clones share the provider and its connection pool. The
/// client keeps no per-call state.
///
/// # Example
///
/// ```rust,no_run
/// use whmcs::Client;
/// use whmcs::types::GetInvoiceRequest;
///
/// # async fn example() -> whmcs::Result<()> {
/// let client = Client::builder()
///     .identifier("api-identifier")
///     .secret("api-secret")
///     .base_url("https://billing.example.com")
///     .build()?;
///
/// let invoice = client.billing().get_invoice(&GetInvoiceRequest::new(42u64)).await?;
/// println!("balance: {:?}", invoice.balance);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// Transport for remote calls (auth, connection pool)
    provider: Arc<dyn HttpProvider>,
    /// Timeout for ordinary procedures
    timeout: Duration,
    /// Timeout for procedures listed in [`action::SLOW_ACTIONS`]
    slow_timeout: Duration,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials or the base URL are missing or invalid,
    /// or the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let provider = Arc::new(WhmcsHttpProvider::from_config(&config)?);
        Ok(Self::with_timeouts(
            provider,
            config.timeout,
            config.slow_timeout,
        ))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client with a custom HTTP provider and default timeouts.
    pub fn from_provider(provider: Arc<dyn HttpProvider>) -> Self {
        Self::with_timeouts(provider, DEFAULT_TIMEOUT, DEFAULT_SLOW_TIMEOUT)
    }

    /// Create a client with a custom HTTP provider and explicit timeouts.
    pub fn with_timeouts(
        provider: Arc<dyn HttpProvider>,
        timeout: Duration,
        slow_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                timeout,
                slow_timeout,
            }),
        }
    }

    /// Billing procedures: quotes, invoices, pay methods, credits, transactions.
    pub fn billing(&self) -> Billing {
        Billing::new(self.clone())
    }

    /// Service actions: module commands, upgrades, service updates.
    pub fn service(&self) -> Service {
        Service::new(self.clone())
    }

    /// Support procedures: announcements, tickets, notes, cancellations.
    pub fn support(&self) -> Support {
        Support::new(self.clone())
    }

    /// System procedures: settings, logs, staff, notifications.
    pub fn system(&self) -> System {
        System::new(self.clone())
    }

    /// Product catalogue procedures.
    pub fn products(&self) -> Products {
        Products::new(self.clone())
    }

    /// Order procedures.
    pub fn orders(&self) -> Orders {
        Orders::new(self.clone())
    }

    /// Client account procedures.
    pub fn clients(&self) -> Clients {
        Clients::new(self.clone())
    }

    /// Ticket lookups.
    pub fn tickets(&self) -> Tickets {
        Tickets::new(self.clone())
    }

    /// Validate and send a typed request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] without contacting the platform if
    /// local validation fails, [`Error::Remote`] if the platform refuses the
    /// call, and a transport or decoding error otherwise.
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> Result<R::Response> {
        if let Err(error) = request.validate() {
            observability::log_validation_error(R::ACTION, &error.to_string());
            return Err(error);
        }
        let params = request.params()?;
        self.call(R::ACTION, params).await
    }

    /// Send a typed request and classify the result against the rejections
    /// its action may legitimately produce.
    pub async fn execute_classified<R: ApiRequest>(&self, request: &R) -> Outcome<R::Response> {
        classify(R::ACTION, self.execute(request).await)
    }

    /// Call `action` with a flat parameter mapping and decode the reply.
    pub async fn call<T: DeserializeOwned>(&self, action: &str, params: Params) -> Result<T> {
        if action.trim().is_empty() {
            return Err(Error::InvalidRequest("action name cannot be empty".to_string()));
        }

        let timeout = self.timeout_for(action);
        let request_meta = RequestMetadata::new(action, self.provider_name())
            .with_param_count(params.len());
        request_meta.log_request(timeout);

        let timer = RequestTimer::start();
        let response = match self.inner.provider.post_form(action, params, timeout).await {
            Ok(response) => response,
            Err(error) => {
                ResponseMetadata::new(None, timer.elapsed())
                    .log_error(&request_meta, &error.to_string());
                return Err(error);
            }
        };

        let response_meta =
            ResponseMetadata::new(Some(response.status().as_u16()), response.elapsed())
                .with_body_size(response.body().len());

        let result = response.into_result(action);
        match &result {
            Ok(_) => response_meta.log_success(&request_meta),
            Err(error) => response_meta.log_error(&request_meta, &error.to_string()),
        }
        result
    }

    /// Call `action` and return the reply as untyped JSON.
    pub async fn call_raw(&self, action: &str, params: Params) -> Result<Value> {
        self.call(action, params).await
    }

    /// Timeout applied to `action`.
    pub fn timeout_for(&self, action: &str) -> Duration {
        if action::is_slow(action) {
            self.inner.slow_timeout
        } else {
            self.inner.timeout
        }
    }

    /// Get the provider name (for debugging)
    pub fn provider_name(&self) -> &'static str {
        self.inner.provider.provider_name()
    }

    /// Full endpoint URL of the provider.
    pub fn endpoint(&self) -> &str {
        self.inner.provider.endpoint()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.provider_name())
            .field("timeout", &self.inner.timeout)
            .field("slow_timeout", &self.inner.slow_timeout)
            .finish()
    }
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// Set the API credential identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.config.identifier = Some(secrecy::SecretString::new(
            identifier.into().into_boxed_str(),
        ));
        self
    }

    /// Set the API credential secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(secrecy::SecretString::new(secret.into().into_boxed_str()));
        self
    }

    /// Set the access key.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.config.access_key = Some(secrecy::SecretString::new(
            access_key.into().into_boxed_str(),
        ));
        self
    }

    /// Set the base URL of the installation.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the endpoint path.
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.config.api_path = Some(api_path.into());
        self
    }

    /// Set the default timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the timeout for slow procedures.
    pub fn slow_timeout(mut self, timeout: Duration) -> Self {
        self.config.slow_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
