//! Provider seam between the client and the transport
//!
//! The client only needs "post this action with these fields and give me the
//! reply". Tests plug in a mock or a provider pointed at a local fake.

use super::Response;
use crate::error::Result;
use crate::params::Params;
use async_trait::async_trait;
use std::time::Duration;

/// Transport for remote procedure calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpProvider: Send + Sync {
    /// Post `params` as the form for `action` and return the raw reply.
    ///
    /// Credentials and `responsetype` are added by the provider. The reply is
    /// returned whatever its status; interpreting it is left to
    /// [`Response::into_result`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`](crate::Error::Timeout) if no reply arrives
    /// within `timeout` and [`Error::Connection`](crate::Error::Connection)
    /// for any other transport failure.
    async fn post_form(&self, action: &str, params: Params, timeout: Duration) -> Result<Response>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Full endpoint URL, for diagnostics.
    fn endpoint(&self) -> &str;
}
