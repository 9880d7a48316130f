//! Support procedures

use super::resource;
use crate::{classify::Outcome, error::Result, types::*};

resource! {
    /// Support API resource.
    Support
}

impl Support {
    /// Publish an announcement.
    pub async fn add_announcement(
        &self,
        request: &AddAnnouncementRequest,
    ) -> Result<AnnouncementIdResponse> {
        self.client.execute(request).await
    }

    /// List announcements.
    pub async fn get_announcements(
        &self,
        request: &GetAnnouncementsRequest,
    ) -> Result<GetAnnouncementsResponse> {
        self.client.execute(request).await
    }

    /// Delete an announcement.
    pub async fn delete_announcement(
        &self,
        request: &DeleteAnnouncementRequest,
    ) -> Result<AnnouncementIdResponse> {
        self.client.execute(request).await
    }

    /// Request cancellation of a service.
    pub async fn add_cancel_request(
        &self,
        request: &AddCancelRequest,
    ) -> Result<AddCancelRequestResponse> {
        self.client.execute(request).await
    }

    /// Add a note to a client account.
    pub async fn add_client_note(
        &self,
        request: &AddClientNoteRequest,
    ) -> Result<AddClientNoteResponse> {
        self.client.execute(request).await
    }

    /// Open a ticket.
    pub async fn open_ticket(&self, request: &OpenTicketRequest) -> Result<OpenTicketResponse> {
        self.client.execute(request).await
    }

    /// Add a staff note to a ticket.
    pub async fn add_ticket_note(&self, request: &AddTicketNoteRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Reply to a ticket.
    pub async fn add_ticket_reply(&self, request: &AddTicketReplyRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Update a ticket.
    pub async fn update_ticket(&self, request: &UpdateTicketRequest) -> Result<TicketIdResponse> {
        self.client.execute(request).await
    }

    /// Merge other tickets into a ticket.
    pub async fn merge_ticket(&self, request: &MergeTicketRequest) -> Result<TicketIdResponse> {
        self.client.execute(request).await
    }

    /// Block the sender of a ticket.
    ///
    /// Registered clients cannot be blocked; the platform answers
    /// `A Client Cannot Be Blocked`.
    pub async fn block_ticket_sender(&self, request: &BlockTicketSenderRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Support::block_ticket_sender`], classified.
    pub async fn block_ticket_sender_classified(
        &self,
        request: &BlockTicketSenderRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Edit a ticket reply.
    pub async fn update_ticket_reply(
        &self,
        request: &UpdateTicketReplyRequest,
    ) -> Result<UpdateTicketReplyResponse> {
        self.client.execute(request).await
    }

    /// Delete a ticket reply.
    pub async fn delete_ticket_reply(&self, request: &DeleteTicketReplyRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Delete a ticket note.
    pub async fn delete_ticket_note(&self, request: &DeleteTicketNoteRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Delete a ticket.
    pub async fn delete_ticket(&self, request: &DeleteTicketRequest) -> Result<Ack> {
        self.client.execute(request).await
    }
}
