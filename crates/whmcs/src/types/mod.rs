//! Request and response types for the remote procedures
//!
//! One submodule per business area. Field names are the platform's own,
//! verbatim, so a request struct documents exactly what goes over the wire.

// Re-export commonly used types from submodules
pub use billing::*;
pub use common::{Ack, Extra, Id, ResultStatus};
pub use service::*;
pub use support::*;
pub use system::*;

// Submodules
pub mod billing;
pub mod common;
pub mod service;
pub mod support;
pub mod system;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ApiRequest;

    #[test]
    fn test_action_names_are_verbatim() {
        assert_eq!(CreateQuoteRequest::ACTION, "CreateQuote");
        assert_eq!(GetClientsProductsRequest::ACTION, "GetClientsProducts");
        assert_eq!(AddCancelRequest::ACTION, "AddCancelRequest");
        assert_eq!(WhmcsDetailsRequest::ACTION, "WhmcsDetails");
        assert_eq!(UpdateAnnouncementRequest::ACTION, "UpdateAnnouncement");
    }

    #[test]
    fn test_parameterless_requests_send_nothing() {
        assert!(GetAdminDetailsRequest::default().params().unwrap().is_empty());
        assert!(GetCurrenciesRequest::default().params().unwrap().is_empty());
    }
}
