//! Scenario fixture values

use std::env;

use whmcs::{Error, Id, Result};

/// Product group used when `WHMCS_TEST_GID` is not set.
pub const DEFAULT_PRODUCT_GROUP_ID: u64 = 1;

/// Demo records the scenarios operate on.
///
/// The platform has no way to create these from the remote API in a fresh
/// installation, so they are supplied by whoever runs the scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioContext {
    /// Client that owns quotes, invoices, tickets and services
    pub client_id: Id,
    /// Payment gateway module name, e.g. `banktransfer`
    pub payment_method: String,
    /// Support department for tickets
    pub dept_id: Id,
    /// Product group new products are added to
    pub product_group_id: Id,
    /// Existing service for cancellation requests
    pub service_id: Option<Id>,
}

impl ScenarioContext {
    /// Context with the default product group and no demo service.
    pub fn new(
        client_id: impl Into<Id>,
        payment_method: impl Into<String>,
        dept_id: impl Into<Id>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            payment_method: payment_method.into(),
            dept_id: dept_id.into(),
            product_group_id: Id::from(DEFAULT_PRODUCT_GROUP_ID),
            service_id: None,
        }
    }

    /// Use another product group.
    pub fn with_product_group(mut self, gid: impl Into<Id>) -> Self {
        self.product_group_id = gid.into();
        self
    }

    /// Use an existing service for cancellation requests.
    pub fn with_service(mut self, service_id: impl Into<Id>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Load the context from the environment.
    ///
    /// Reads `WHMCS_TEST_CLIENT_ID`, `WHMCS_TEST_PAYMENT_METHOD` and
    /// `WHMCS_TEST_DEPT_ID` (required), `WHMCS_TEST_GID` and
    /// `WHMCS_TEST_SERVICE_ID` (optional). A `.env` file is loaded first if
    /// present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut context = Self::new(
            required("WHMCS_TEST_CLIENT_ID")?,
            required("WHMCS_TEST_PAYMENT_METHOD")?,
            required("WHMCS_TEST_DEPT_ID")?,
        );
        if let Some(gid) = optional("WHMCS_TEST_GID") {
            context = context.with_product_group(gid);
        }
        if let Some(service_id) = optional("WHMCS_TEST_SERVICE_ID") {
            context = context.with_service(service_id);
        }

        tracing::debug!(client_id = %context.client_id, dept_id = %context.dept_id, "Loaded scenario context");
        Ok(context)
    }
}

fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| Error::MissingConfig(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const VARS: [&str; 5] = [
        "WHMCS_TEST_CLIENT_ID",
        "WHMCS_TEST_PAYMENT_METHOD",
        "WHMCS_TEST_DEPT_ID",
        "WHMCS_TEST_GID",
        "WHMCS_TEST_SERVICE_ID",
    ];

    fn with_vars<F: FnOnce()>(values: [Option<&str>; 5], f: F) {
        let pairs: Vec<(&str, Option<&str>)> = VARS.into_iter().zip(values).collect();
        temp_env::with_vars(pairs, f);
    }

    #[test]
    fn test_from_env_with_defaults() {
        with_vars([Some("7"), Some("banktransfer"), Some("2"), None, None], || {
            let context = ScenarioContext::from_env().unwrap();
            assert_eq!(context.client_id, 7u64);
            assert_eq!(context.payment_method, "banktransfer");
            assert_eq!(context.dept_id, 2u64);
            assert_eq!(context.product_group_id, DEFAULT_PRODUCT_GROUP_ID);
            assert!(context.service_id.is_none());
        });
    }

    #[test]
    fn test_from_env_with_overrides() {
        with_vars(
            [Some("7"), Some("paypal"), Some("2"), Some("4"), Some(" 12 ")],
            || {
                let context = ScenarioContext::from_env().unwrap();
                assert_eq!(context.product_group_id, 4u64);
                assert_eq!(context.service_id, Some(Id::from(12u64)));
            },
        );
    }

    #[test]
    fn test_from_env_missing_client() {
        with_vars([None, Some("banktransfer"), Some("2"), None, None], || {
            let err = ScenarioContext::from_env().unwrap_err();
            assert_matches!(err, Error::MissingConfig(name) if name == "WHMCS_TEST_CLIENT_ID");
        });
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        with_vars([Some("7"), Some("  "), Some("2"), None, None], || {
            let err = ScenarioContext::from_env().unwrap_err();
            assert_matches!(err, Error::MissingConfig(name) if name == "WHMCS_TEST_PAYMENT_METHOD");
        });
    }
}
