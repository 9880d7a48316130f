//! Remote procedure groups
//!
//! Each handle groups the procedures of one business area. Handles are
//! cheap clones of the [`Client`] and hold no state of their own.

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Declare a resource handle with its constructor and [`Resource`] impl.
macro_rules! resource {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            client: $crate::client::Client,
        }

        impl $name {
            /// Create a new resource handle.
            pub(crate) fn new(client: $crate::client::Client) -> Self {
                Self { client }
            }
        }

        impl $crate::resources::Resource for $name {
            fn client(&self) -> &$crate::client::Client {
                &self.client
            }
        }
    };
}

pub(crate) use resource;

pub mod billing;
pub mod clients;
pub mod orders;
pub mod products;
pub mod service;
pub mod support;
pub mod system;
pub mod tickets;

pub use billing::Billing;
pub use clients::Clients;
pub use orders::Orders;
pub use products::Products;
pub use service::Service;
pub use support::Support;
pub use system::System;
pub use tickets::Tickets;
