//! Product catalogue

use super::resource;
use crate::{classify::Outcome, error::Result, types::*};

resource! {
    /// Products API resource.
    Products
}

impl Products {
    /// Create a product in a product group.
    ///
    /// Fails with `You must supply a valid Product Group ID` when the group
    /// does not exist.
    pub async fn add_product(&self, request: &AddProductRequest) -> Result<AddProductResponse> {
        self.client.execute(request).await
    }

    /// [`Products::add_product`], classified.
    pub async fn add_product_classified(
        &self,
        request: &AddProductRequest,
    ) -> Outcome<AddProductResponse> {
        self.client.execute_classified(request).await
    }
}
