//! Client accounts

use super::resource;
use crate::{error::Result, types::*};

resource! {
    /// Clients API resource.
    Clients
}

impl Clients {
    /// List services, optionally filtered by client, domain or product.
    pub async fn get_clients_products(
        &self,
        request: &GetClientsProductsRequest,
    ) -> Result<GetClientsProductsResponse> {
        self.client.execute(request).await
    }
}
