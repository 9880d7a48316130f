//! Scenario functions per business area
//!
//! A scenario fails with an error as soon as a step fails unexpectedly or a
//! reply does not have the expected shape. Steps whose procedure has allowed
//! rejections report how they ended as a [`Step`].

use whmcs::{Outcome, Rejection};

pub mod billing;
pub mod service;
pub mod support;
pub mod system;

/// How a step with allowed rejections ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The procedure succeeded and its reply passed the checks
    Completed,
    /// The platform refused with an allowed business rejection
    Rejected(Rejection),
}

impl Step {
    /// Whether the step succeeded.
    pub fn is_completed(self) -> bool {
        self == Step::Completed
    }
}

/// Settle a classified call: check a successful reply, accept an allowed
/// rejection, propagate anything else.
pub(crate) fn settle<T>(
    action: &str,
    outcome: Outcome<T>,
    check: impl FnOnce(&T) -> anyhow::Result<()>,
) -> anyhow::Result<Step> {
    match outcome {
        Outcome::Success(reply) => {
            check(&reply)?;
            Ok(Step::Completed)
        }
        Outcome::ExpectedRejection(rejection) => {
            tracing::info!(action, %rejection, "Step ended with an allowed rejection");
            Ok(Step::Rejected(rejection))
        }
        Outcome::UnexpectedFailure(error) => {
            Err(anyhow::Error::new(error).context(format!("{action} failed")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use whmcs::Error;

    #[test]
    fn test_settle_runs_check_on_success() {
        let step = settle("GetStats", Outcome::Success(3), |n| {
            anyhow::ensure!(*n == 3, "unexpected value");
            Ok(())
        })
        .unwrap();
        assert!(step.is_completed());

        let failed = settle("GetStats", Outcome::Success(4), |n| {
            anyhow::ensure!(*n == 3, "unexpected value");
            Ok(())
        });
        assert!(failed.is_err());
    }

    #[test]
    fn test_settle_accepts_rejection() {
        let step = settle(
            "ApplyCredit",
            Outcome::<()>::ExpectedRejection(Rejection::InsufficientCredit),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(step, Step::Rejected(Rejection::InsufficientCredit));
    }

    #[test]
    fn test_settle_propagates_unexpected_failure() {
        let err = settle(
            "ApplyCredit",
            Outcome::<()>::UnexpectedFailure(Error::remote("ApplyCredit", "Invoice ID Not Found")),
            |_| Ok(()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "ApplyCredit failed");
        assert_matches!(err.downcast_ref::<Error>(), Some(Error::Remote { .. }));
    }
}
