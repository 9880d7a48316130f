//! # whmcs
//!
//! Async Rust client for the WHMCS remote API:
//! - Typed requests and replies for billing, services, support and system procedures
//! - A flat parameter form for anything not modelled
//! - Line-item encoding for quotes
//! - Classification of expected business rejections
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whmcs::Client;
//! use whmcs::types::{CreateQuoteRequest, QuoteStage};
//! use whmcs::LineItem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let quote = client.billing()
//!         .create_quote(&CreateQuoteRequest::builder()
//!             .subject("Hosting")
//!             .stage(QuoteStage::Draft)
//!             .validuntil(chrono::NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
//!             .userid(1u64)
//!             .lineitems(vec![LineItem::new("Shared hosting", 1, 10.0)])
//!             .build()?)
//!         .await?;
//!
//!     println!("created quote {:?}", quote.quoteid);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use action::ApiRequest;
pub use classify::{Outcome, Rejection, classify};
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use encoding::LineItem;
pub use error::{Error, Result};
pub use params::{IndexStyle, ParamValue, Params};
pub use types::{Ack, Id, ResultStatus};

// Module declarations
pub mod action;
pub mod classify;
pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod observability;
pub mod params;
pub mod resources;
pub mod types;
pub mod validation;

// Re-export key dependencies for convenience
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use whmcs::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        ApiRequest, Client, ClientConfig, Error, Id, LineItem, Outcome, Params, Rejection,
        Result, classify,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path of the API endpoint relative to the installation's base URL
pub const DEFAULT_API_PATH: &str = "/includes/api.php";
