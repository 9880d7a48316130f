//! Business scenarios for the WHMCS client
//!
//! Each scenario drives one area of the platform (billing, service, support,
//! system) through [`whmcs::Client`], checks the shape and values of every
//! reply, and tolerates the business rejections allowed for the procedure.
//! Scenario fixture values come from a [`ScenarioContext`].
//!
//! The scenarios run against an in-process fake platform in this crate's
//! tests, and against a live installation in the `#[ignore]`d live tests:
//!
//! ```bash
//! export WHMCS_URL=https://billing.example.com
//! export WHMCS_IDENTIFIER=...
//! export WHMCS_SECRET=...
//! export WHMCS_TEST_CLIENT_ID=1
//! export WHMCS_TEST_PAYMENT_METHOD=banktransfer
//! export WHMCS_TEST_DEPT_ID=1
//! cargo test -p whmcs-integration-tests -- --ignored --test-threads=1
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod context;
pub mod scenarios;

pub use context::ScenarioContext;
pub use scenarios::Step;
