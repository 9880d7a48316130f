//! Remote procedure contract
//!
//! Every remote procedure is modelled as a request struct implementing
//! [`ApiRequest`]: the action name the platform dispatches on, the typed
//! reply, a local sanity check and the flat parameter mapping.

use crate::error::Result;
use crate::params::Params;
use serde::de::DeserializeOwned;

/// Procedures that routinely take far longer than the rest; they get the
/// client's slow timeout instead of the default one.
pub const SLOW_ACTIONS: &[&str] = &[
    "AcceptQuote",
    "AddOrder",
    "AddProduct",
    "CreateInvoice",
    "GenInvoices",
];

/// Whether `action` should use the slow timeout.
pub fn is_slow(action: &str) -> bool {
    SLOW_ACTIONS.contains(&action)
}

/// A typed remote procedure call.
pub trait ApiRequest: Send + Sync {
    /// Action name as dispatched by the platform, e.g. `CreateQuote`.
    const ACTION: &'static str;

    /// Decoded success reply.
    type Response: DeserializeOwned + Send;

    /// Reject obviously malformed input before anything is sent.
    ///
    /// Only checks what cannot possibly succeed remotely. Whether a field is
    /// required is left to the platform.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Parameters using the platform's field names verbatim.
    fn params(&self) -> Result<Params>;
}

/// Implement [`ApiRequest`] for a request whose fields serialize directly
/// to the parameter mapping.
macro_rules! api_request {
    ($request:ty => $action:literal, $response:ty) => {
        impl $crate::action::ApiRequest for $request {
            const ACTION: &'static str = $action;
            type Response = $response;

            fn params(&self) -> $crate::error::Result<$crate::params::Params> {
                $crate::params::Params::from_serialize(self)
            }
        }
    };
    ($request:ty => $action:literal, $response:ty, validate = $validate:path) => {
        impl $crate::action::ApiRequest for $request {
            const ACTION: &'static str = $action;
            type Response = $response;

            fn validate(&self) -> $crate::error::Result<()> {
                $validate(self)
            }

            fn params(&self) -> $crate::error::Result<$crate::params::Params> {
                $crate::params::Params::from_serialize(self)
            }
        }
    };
}

pub(crate) use api_request;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_actions() {
        assert!(is_slow("CreateInvoice"));
        assert!(is_slow("AcceptQuote"));
        assert!(is_slow("GenInvoices"));
        assert!(!is_slow("GetQuotes"));
        assert!(!is_slow("createinvoice"));
    }
}
