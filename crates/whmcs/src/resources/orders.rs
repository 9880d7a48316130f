//! Orders

use super::resource;
use crate::{error::Result, types::*};

resource! {
    /// Orders API resource.
    Orders
}

impl Orders {
    /// Place an order for one or more products.
    pub async fn add_order(&self, request: &AddOrderRequest) -> Result<AddOrderResponse> {
        self.client.execute(request).await
    }
}
