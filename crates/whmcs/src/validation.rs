//! Local request checks
//!
//! These run before a request leaves the process and only catch input that
//! the platform would certainly reject: blank identifiers, negative money,
//! malformed addresses. Everything else is the platform's call.

use crate::error::{Error, Result};
use crate::types::Id;
use tracing::debug;

/// Reject a blank string.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        debug!(field, "Rejecting blank field");
        return Err(Error::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject an identifier that cannot name a record.
pub fn require_id(field: &str, id: &Id) -> Result<()> {
    if id.is_nil() {
        debug!(field, "Rejecting nil identifier");
        return Err(Error::InvalidRequest(format!(
            "{field} must reference an existing record, got '{id}'"
        )));
    }
    Ok(())
}

/// Reject negative or non-finite amounts.
pub fn require_non_negative(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidRequest(format!(
            "{field} must be a non-negative amount, got {amount}"
        )));
    }
    Ok(())
}

/// Reject zero, negative or non-finite amounts.
pub fn require_positive(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidRequest(format!(
            "{field} must be greater than zero, got {amount}"
        )));
    }
    Ok(())
}

/// Reject an update that changes nothing.
pub fn require_any(action: &str, fields: &[(&str, bool)]) -> Result<()> {
    if fields.iter().any(|(_, present)| *present) {
        return Ok(());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    Err(Error::InvalidRequest(format!(
        "{action} needs at least one of: {}",
        names.join(", ")
    )))
}

/// Reject a string that is not an IPv4 or IPv6 address.
pub fn require_ip(field: &str, value: &str) -> Result<()> {
    value
        .trim()
        .parse::<std::net::IpAddr>()
        .map(|_| ())
        .map_err(|_| Error::InvalidRequest(format!("{field} is not an IP address: '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn test_blank_strings_are_rejected(#[case] value: &str) {
        assert!(matches!(
            require_non_empty("subject", value),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_non_empty_passes() {
        assert!(require_non_empty("subject", "test quote").is_ok());
    }

    #[rstest]
    #[case(Id::from(0u64), false)]
    #[case(Id::from(""), false)]
    #[case(Id::from(12u64), true)]
    #[case(Id::from("ABC-123"), true)]
    fn test_require_id(#[case] id: Id, #[case] ok: bool) {
        assert_eq!(require_id("quoteid", &id).is_ok(), ok);
    }

    #[rstest]
    #[case(0.0, true, false)]
    #[case(0.01, true, true)]
    #[case(-1.0, false, false)]
    #[case(f64::NAN, false, false)]
    #[case(f64::INFINITY, false, false)]
    fn test_amounts(#[case] amount: f64, #[case] non_negative: bool, #[case] positive: bool) {
        assert_eq!(require_non_negative("amount", amount).is_ok(), non_negative);
        assert_eq!(require_positive("amount", amount).is_ok(), positive);
    }

    #[test]
    fn test_require_any() {
        assert!(require_any("UpdateTicket", &[("subject", false), ("status", true)]).is_ok());
        let err = require_any("UpdateTicket", &[("subject", false), ("status", false)])
            .unwrap_err()
            .to_string();
        assert!(err.contains("UpdateTicket"));
        assert!(err.contains("subject, status"));
    }

    #[rstest]
    #[case("1.2.3.4", true)]
    #[case("::1", true)]
    #[case("2001:db8::ff00:42:8329", true)]
    #[case("1.2.3", false)]
    #[case("example.com", false)]
    fn test_require_ip(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(require_ip("ip", value).is_ok(), ok);
    }
}
