//! HTTP layer
//!
//! Every remote procedure is a form-encoded POST to one endpoint. No retries
//! happen here; a failed call is reported once.

pub use provider::HttpProvider;
pub use request::RequestBuilder;
pub use response::Response;
pub use whmcs_provider::{WhmcsHttpProvider, WhmcsHttpProviderBuilder};

pub mod provider;
mod request;
mod response;
mod whmcs_provider;

#[cfg(test)]
pub use provider::MockHttpProvider;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
