//! Expected business rejections
//!
//! Some procedures are legitimately refused by the platform depending on the
//! state of the installation: credit exceeding the balance, a capture on an
//! invoice that cannot be charged, a module action on a service without a
//! module. [`classify`] turns the result of such a call into an [`Outcome`]
//! using a static table of the rejections each action may produce.
//!
//! Matching is a case-sensitive substring test on the platform message.

use crate::error::{Error, Result};
use crate::observability;
use std::fmt;

/// A rejection the platform may legitimately answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Credit applied exceeds the client's credit balance
    InsufficientCredit,
    /// Capture attempted on an invoice the gateway would not charge
    PaymentAttemptFailed,
    /// Ticket sender is a registered client and cannot be blocked
    ClientCannotBeBlocked,
    /// Procedure is only available to the local (internal) API
    RestrictedToInternalApi,
    /// Service has no provisioning module, or the module refused
    ModuleNotAssigned,
    /// Billing cycle not offered by the target product
    InvalidBillingCycle,
    /// Product group does not exist
    InvalidProductGroup,
}

impl Rejection {
    /// Every rejection, in declaration order.
    pub const ALL: [Rejection; 7] = [
        Rejection::InsufficientCredit,
        Rejection::PaymentAttemptFailed,
        Rejection::ClientCannotBeBlocked,
        Rejection::RestrictedToInternalApi,
        Rejection::ModuleNotAssigned,
        Rejection::InvalidBillingCycle,
        Rejection::InvalidProductGroup,
    ];

    /// Message fragments that identify this rejection.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Rejection::InsufficientCredit => &["Amount exceeds customer credit balance"],
            Rejection::PaymentAttemptFailed => &["Payment Attempt Failed"],
            Rejection::ClientCannotBeBlocked => &["A Client Cannot Be Blocked"],
            Rejection::RestrictedToInternalApi => &["API Command Restricted to Internal API"],
            Rejection::ModuleNotAssigned => {
                &["Service not assigned to a module", "Server response message"]
            }
            Rejection::InvalidBillingCycle => &["Invalid Billing Cycle Requested"],
            Rejection::InvalidProductGroup => &["You must supply a valid Product Group ID"],
        }
    }

    /// Whether `message` carries one of this rejection's patterns.
    pub fn matches(self, message: &str) -> bool {
        self.patterns().iter().any(|p| message.contains(p))
    }

    /// Stable name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::InsufficientCredit => "InsufficientCredit",
            Rejection::PaymentAttemptFailed => "PaymentAttemptFailed",
            Rejection::ClientCannotBeBlocked => "ClientCannotBeBlocked",
            Rejection::RestrictedToInternalApi => "RestrictedToInternalApi",
            Rejection::ModuleNotAssigned => "ModuleNotAssigned",
            Rejection::InvalidBillingCycle => "InvalidBillingCycle",
            Rejection::InvalidProductGroup => "InvalidProductGroup",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MODULE_ACTION: &[Rejection] = &[Rejection::ModuleNotAssigned];

/// Action to allowed-rejection table.
pub const ALLOWED_REJECTIONS: &[(&str, &[Rejection])] = &[
    ("ApplyCredit", &[Rejection::InsufficientCredit]),
    ("CapturePayment", &[Rejection::PaymentAttemptFailed]),
    ("BlockTicketSender", &[Rejection::ClientCannotBeBlocked]),
    ("SetConfigurationValue", &[Rejection::RestrictedToInternalApi]),
    ("ModuleCreate", MODULE_ACTION),
    ("ModuleChangePackage", MODULE_ACTION),
    ("ModuleChangePw", MODULE_ACTION),
    ("ModuleCustom", MODULE_ACTION),
    ("ModuleSuspend", MODULE_ACTION),
    ("ModuleUnsuspend", MODULE_ACTION),
    ("UpgradeProduct", &[Rejection::InvalidBillingCycle]),
    ("AddProduct", &[Rejection::InvalidProductGroup]),
];

/// Rejections `action` may legitimately produce; empty for most actions.
pub fn allowed_rejections(action: &str) -> &'static [Rejection] {
    ALLOWED_REJECTIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, rejections)| *rejections)
        .unwrap_or(&[])
}

/// Result of a call whose failure may be an expected business outcome.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The platform accepted the call.
    Success(T),
    /// The platform refused with an allow-listed rejection.
    ExpectedRejection(Rejection),
    /// Anything else: unlisted remote errors, transport, decoding, validation.
    UnexpectedFailure(Error),
}

impl<T> Outcome<T> {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The expected rejection, if that is what happened.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::ExpectedRejection(rejection) => Some(*rejection),
            _ => None,
        }
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Propagate unexpected failures, keeping the two acceptable outcomes.
    ///
    /// `Ok(Some(_))` is a success and `Ok(None)` an expected rejection.
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            Outcome::Success(value) => Ok(Some(value)),
            Outcome::ExpectedRejection(_) => Ok(None),
            Outcome::UnexpectedFailure(error) => Err(error),
        }
    }

    /// Map the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::ExpectedRejection(rejection) => Outcome::ExpectedRejection(rejection),
            Outcome::UnexpectedFailure(error) => Outcome::UnexpectedFailure(error),
        }
    }
}

/// Classify the result of calling `action`.
pub fn classify<T>(action: &str, result: Result<T>) -> Outcome<T> {
    let error = match result {
        Ok(value) => return Outcome::Success(value),
        Err(error) => error,
    };

    let Error::Remote { message, .. } = &error else {
        return Outcome::UnexpectedFailure(error);
    };

    match allowed_rejections(action)
        .iter()
        .copied()
        .find(|rejection| rejection.matches(message))
    {
        Some(rejection) => {
            observability::log_expected_rejection(action, rejection.as_str(), message);
            Outcome::ExpectedRejection(rejection)
        }
        None => Outcome::UnexpectedFailure(error),
    }
}
