//! Ticket lookups

use super::resource;
use crate::{error::Result, types::*};

resource! {
    /// Tickets API resource.
    Tickets
}

impl Tickets {
    /// Fetch a ticket with its replies and notes.
    pub async fn get_ticket(&self, request: &GetTicketRequest) -> Result<GetTicketResponse> {
        self.client.execute(request).await
    }
}
