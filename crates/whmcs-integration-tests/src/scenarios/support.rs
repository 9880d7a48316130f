//! Support scenarios: announcements, cancellation requests, client notes and
//! the full ticket lifecycle

use anyhow::{Context, ensure};
use chrono::NaiveDate;
use whmcs::types::{
    AddAnnouncementRequest, AddCancelRequest, AddClientNoteRequest, AddTicketNoteRequest,
    AddTicketReplyRequest, BlockTicketSenderRequest, DeleteAnnouncementRequest,
    DeleteTicketNoteRequest, DeleteTicketReplyRequest, DeleteTicketRequest,
    GetAnnouncementsRequest, GetTicketRequest, GetTicketResponse, MergeTicketRequest,
    OpenTicketRequest, UpdateTicketReplyRequest, UpdateTicketRequest,
};
use whmcs::{Client, Id};

use super::{Step, settle};
use crate::ScenarioContext;

/// Message the platform answers for a ticket that does not exist.
pub const TICKET_NOT_FOUND: &str = "Ticket ID Not Found";

/// Date every demo announcement carries.
pub fn announcement_date() -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(1969, 7, 11).context("valid date")
}

/// Publish the demo announcement and return its id.
pub async fn add_demo_announcement(client: &Client) -> anyhow::Result<Id> {
    let added = client
        .support()
        .add_announcement(
            &AddAnnouncementRequest::builder()
                .date(announcement_date()?)
                .title("There's something wrong")
                .announcement("Your circuit's dead")
                .build()?,
        )
        .await?;
    added
        .announcementid
        .context("AddAnnouncement returned no announcementid")
}

async fn announcement_count(client: &Client, announcement_id: &Id) -> anyhow::Result<usize> {
    let listed = client
        .support()
        .get_announcements(&GetAnnouncementsRequest::default())
        .await?;
    Ok(listed
        .announcements
        .announcement
        .iter()
        .filter(|a| &a.id == announcement_id)
        .count())
}

/// Add an announcement, find it, delete it and check it is gone.
pub async fn announcement_lifecycle(client: &Client) -> anyhow::Result<Id> {
    let announcement_id = add_demo_announcement(client).await?;

    let page = client
        .support()
        .get_announcements(&GetAnnouncementsRequest::page(0, 1))
        .await?;
    ensure!(
        page.announcements.announcement.len() == 1,
        "GetAnnouncements returned {} announcements for limitnum 1",
        page.announcements.announcement.len()
    );
    ensure!(
        announcement_count(client, &announcement_id).await? == 1,
        "announcement {announcement_id} not found exactly once"
    );

    client
        .support()
        .delete_announcement(&DeleteAnnouncementRequest::new(announcement_id.clone()))
        .await?;
    ensure!(
        announcement_count(client, &announcement_id).await? == 0,
        "announcement {announcement_id} still listed after deletion"
    );

    Ok(announcement_id)
}

/// Request cancellation of the context's service, when one is configured.
pub async fn cancel_request(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<Option<Id>> {
    let Some(service_id) = &ctx.service_id else {
        tracing::info!("No demo service configured; skipping the cancellation request");
        return Ok(None);
    };
    let requested = client
        .support()
        .add_cancel_request(&AddCancelRequest::new(service_id.clone()))
        .await?;
    Ok(Some(requested.serviceid.unwrap_or_else(|| service_id.clone())))
}

/// Add a note to the demo client.
pub async fn client_note(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<Id> {
    let added = client
        .support()
        .add_client_note(&AddClientNoteRequest::new(
            ctx.client_id.clone(),
            "Planet Earth is blue and there's nothing I can do",
        ))
        .await?;
    added.noteid.context("AddClientNote returned no noteid")
}

/// Result of [`ticket_lifecycle`].
#[derive(Debug, Clone)]
pub struct TicketReport {
    /// Ticket that was opened and finally deleted
    pub ticket_id: Id,
    /// Ticket merged into it
    pub merged_ticket_id: Id,
    /// How blocking the sender ended
    pub block_sender: Step,
    /// Reply that was edited then deleted
    pub reply_id: Id,
    /// Note that was deleted
    pub note_id: Id,
    /// Message the platform returned for the deleted ticket
    pub lookup_after_delete: String,
}

async fn open_demo_ticket(
    client: &Client,
    ctx: &ScenarioContext,
    subject: &str,
    message: &str,
) -> anyhow::Result<Id> {
    let opened = client
        .support()
        .open_ticket(
            &OpenTicketRequest::builder()
                .deptid(ctx.dept_id.clone())
                .clientid(ctx.client_id.clone())
                .subject(subject)
                .message(message)
                .build()?,
        )
        .await?;
    ensure!(opened.tid.is_some(), "OpenTicket returned no tid");
    ensure!(opened.c.is_some(), "OpenTicket returned no c");
    let ticket_id = opened.id.context("OpenTicket returned no id")?;

    let ticket = fetch(client, &ticket_id).await?;
    ensure!(
        ticket.subject.as_deref() == Some(subject),
        "ticket {ticket_id} has subject {:?}, expected {subject:?}",
        ticket.subject
    );
    Ok(ticket_id)
}

async fn reply(client: &Client, ctx: &ScenarioContext, ticket_id: &Id) -> anyhow::Result<()> {
    client
        .support()
        .add_ticket_reply(
            &AddTicketReplyRequest::builder()
                .ticketid(ticket_id.clone())
                .clientid(ctx.client_id.clone())
                .message("this is a new reply")
                .build()?,
        )
        .await?;
    Ok(())
}

async fn fetch(client: &Client, ticket_id: &Id) -> anyhow::Result<GetTicketResponse> {
    let ticket = client
        .tickets()
        .get_ticket(&GetTicketRequest::new(ticket_id.clone()))
        .await?;
    ensure!(
        ticket.ticketid.as_ref() == Some(ticket_id),
        "GetTicket returned {:?}, expected {ticket_id}",
        ticket.ticketid
    );
    Ok(ticket)
}

/// Open a ticket and exercise notes, replies, updates, merging, blocking and
/// deletion against it.
pub async fn ticket_lifecycle(
    client: &Client,
    ctx: &ScenarioContext,
) -> anyhow::Result<TicketReport> {
    let support = client.support();

    let ticket_id =
        open_demo_ticket(client, ctx, "this is a subject", "this is a message").await?;
    tracing::info!(%ticket_id, "Ticket opened");

    support
        .add_ticket_note(&AddTicketNoteRequest::new(
            ticket_id.clone(),
            "this is a ticket note",
        ))
        .await?;
    reply(client, ctx, &ticket_id).await?;

    let updated = support
        .update_ticket(
            &UpdateTicketRequest::builder()
                .ticketid(ticket_id.clone())
                .subject("this is an updated ticket")
                .build()?,
        )
        .await?;
    ensure!(
        updated.ticketid.as_ref() == Some(&ticket_id),
        "UpdateTicket returned {:?}, expected {ticket_id}",
        updated.ticketid
    );

    let merged_ticket_id =
        open_demo_ticket(client, ctx, "this is another subject", "this is another message").await?;
    let merged = support
        .merge_ticket(
            &MergeTicketRequest::new(ticket_id.clone(), [merged_ticket_id.clone()])
                .newsubject("this is a merged ticket"),
        )
        .await?;
    ensure!(
        merged.ticketid.as_ref() == Some(&ticket_id),
        "MergeTicket returned {:?}, expected {ticket_id}",
        merged.ticketid
    );

    let block_sender = settle(
        "BlockTicketSender",
        support
            .block_ticket_sender_classified(&BlockTicketSenderRequest::new(ticket_id.clone()))
            .await,
        |_| Ok(()),
    )?;

    // Replies: the opening message is listed first without a reply id
    reply(client, ctx, &ticket_id).await?;
    let ticket = fetch(client, &ticket_id).await?;
    let reply_id = ticket
        .replies
        .reply
        .iter()
        .rev()
        .filter_map(|r| r.replyid.clone())
        .find(|id| !id.is_nil())
        .context("GetTicket listed no replies")?;

    let edited = support
        .update_ticket_reply(&UpdateTicketReplyRequest::new(
            reply_id.clone(),
            "this is an updated reply",
        ))
        .await?;
    if let Some(id) = &edited.replyid {
        ensure!(id == &reply_id, "UpdateTicketReply returned {id}, expected {reply_id}");
    }
    support
        .delete_ticket_reply(&DeleteTicketReplyRequest::new(
            ticket_id.clone(),
            reply_id.clone(),
        ))
        .await?;

    // Notes
    support
        .add_ticket_note(&AddTicketNoteRequest::new(
            ticket_id.clone(),
            "this is a ticket note",
        ))
        .await?;
    let ticket = fetch(client, &ticket_id).await?;
    ensure!(
        ticket
            .replies
            .reply
            .iter()
            .all(|r| r.replyid.as_ref() != Some(&reply_id)),
        "reply {reply_id} still listed after deletion"
    );
    let note_id = ticket
        .notes
        .note
        .first()
        .map(|n| n.noteid.clone())
        .context("GetTicket listed no notes")?;
    support
        .delete_ticket_note(&DeleteTicketNoteRequest::new(note_id.clone()))
        .await?;
    let ticket = fetch(client, &ticket_id).await?;
    ensure!(
        ticket.notes.note.iter().all(|n| n.noteid != note_id),
        "note {note_id} still listed after deletion"
    );

    support
        .delete_ticket(&DeleteTicketRequest::new(ticket_id.clone()))
        .await?;
    let lookup_after_delete = match fetch(client, &ticket_id).await {
        Ok(_) => anyhow::bail!("ticket {ticket_id} still readable after deletion"),
        Err(err) => match err.downcast_ref::<whmcs::Error>().and_then(|e| e.remote_message()) {
            Some(message) if message == TICKET_NOT_FOUND => message.to_string(),
            _ => return Err(err),
        },
    };

    Ok(TicketReport {
        ticket_id,
        merged_ticket_id,
        block_sender,
        reply_id,
        note_id,
        lookup_after_delete,
    })
}

/// Every support scenario, in order.
#[derive(Debug, Clone)]
pub struct SupportReport {
    /// Announcement that was added then deleted
    pub announcement_id: Id,
    /// Service a cancellation was requested for
    pub cancelled_service_id: Option<Id>,
    /// Client note id
    pub client_note_id: Id,
    /// Tickets
    pub ticket: TicketReport,
}

/// Run all support scenarios.
pub async fn run(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<SupportReport> {
    Ok(SupportReport {
        announcement_id: announcement_lifecycle(client).await?,
        cancelled_service_id: cancel_request(client, ctx).await?,
        client_note_id: client_note(client, ctx).await?,
        ticket: ticket_lifecycle(client, ctx).await?,
    })
}
