//! Support desk: announcements, cancellation requests, client notes, tickets

use super::common::{Ack, Extra, Id, ResultStatus, comma_separated, empty_as_default, lenient_u64, one_or_many};
use crate::action::api_request;
use crate::error::Result;
use crate::validation::{require_any, require_id, require_non_empty};
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

/// `AddAnnouncement` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddAnnouncementRequest {
    /// Publication date
    pub date: NaiveDate,
    /// Title
    pub title: String,
    /// Body
    pub announcement: String,
    /// Publish immediately
    #[builder(default)]
    pub published: Option<bool>,
}

impl AddAnnouncementRequest {
    /// Create a builder.
    pub fn builder() -> AddAnnouncementRequestBuilder {
        AddAnnouncementRequestBuilder::default()
    }
}

fn validate_add_announcement(request: &AddAnnouncementRequest) -> Result<()> {
    require_non_empty("title", &request.title)?;
    require_non_empty("announcement", &request.announcement)
}

api_request!(AddAnnouncementRequest => "AddAnnouncement", AnnouncementIdResponse, validate = validate_add_announcement);

/// Reply echoing an announcement id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnouncementIdResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Announcement id
    #[serde(default)]
    pub announcementid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetAnnouncements` paging.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAnnouncementsRequest {
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
}

impl GetAnnouncementsRequest {
    /// One page.
    pub fn page(limitstart: u32, limitnum: u32) -> Self {
        Self {
            limitstart: Some(limitstart),
            limitnum: Some(limitnum),
        }
    }
}

api_request!(GetAnnouncementsRequest => "GetAnnouncements", GetAnnouncementsResponse);

/// An announcement record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Announcement {
    /// Announcement id
    pub id: Id,
    /// Date as reported
    #[serde(default)]
    pub date: Option<String>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Body
    #[serde(default)]
    pub announcement: Option<String>,
    /// Other fields, including `published`
    #[serde(flatten)]
    pub extra: Extra,
}

/// `announcements` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AnnouncementList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub announcement: Vec<Announcement>,
}

/// `GetAnnouncements` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetAnnouncementsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub announcements: AnnouncementList,
}

/// `DeleteAnnouncement` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAnnouncementRequest {
    /// Announcement to delete
    pub announcementid: Id,
}

impl DeleteAnnouncementRequest {
    /// Delete an announcement.
    pub fn new(announcementid: impl Into<Id>) -> Self {
        Self {
            announcementid: announcementid.into(),
        }
    }
}

fn validate_delete_announcement(request: &DeleteAnnouncementRequest) -> Result<()> {
    require_id("announcementid", &request.announcementid)
}

api_request!(DeleteAnnouncementRequest => "DeleteAnnouncement", AnnouncementIdResponse, validate = validate_delete_announcement);

// ---------------------------------------------------------------------------
// Cancellation requests and client notes
// ---------------------------------------------------------------------------

/// When a cancellation takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancellationType {
    /// Right away
    Immediate,
    /// At the next due date
    #[serde(rename = "End of Billing Period")]
    EndOfBillingPeriod,
}

/// `AddCancelRequest` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AddCancelRequest {
    /// Service to cancel
    pub serviceid: Id,
    /// When to cancel
    #[serde(rename = "type")]
    pub cancellation_type: Option<CancellationType>,
    /// Reason
    pub reason: Option<String>,
}

impl AddCancelRequest {
    /// Request cancellation of a service.
    pub fn new(serviceid: impl Into<Id>) -> Self {
        Self {
            serviceid: serviceid.into(),
            cancellation_type: None,
            reason: None,
        }
    }

    /// Set when the cancellation takes effect.
    pub fn cancellation_type(mut self, cancellation_type: CancellationType) -> Self {
        self.cancellation_type = Some(cancellation_type);
        self
    }

    /// Set the reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn validate_add_cancel_request(request: &AddCancelRequest) -> Result<()> {
    require_id("serviceid", &request.serviceid)
}

api_request!(AddCancelRequest => "AddCancelRequest", AddCancelRequestResponse, validate = validate_add_cancel_request);

/// `AddCancelRequest` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCancelRequestResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Service the request is for
    #[serde(default)]
    pub serviceid: Option<Id>,
    /// Owning client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `AddClientNote` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AddClientNoteRequest {
    /// Client the note is about
    pub userid: Id,
    /// Note text
    pub notes: String,
    /// Show on the client summary
    pub sticky: Option<bool>,
}

impl AddClientNoteRequest {
    /// Attach a note to a client.
    pub fn new(userid: impl Into<Id>, notes: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            notes: notes.into(),
            sticky: None,
        }
    }
}

fn validate_add_client_note(request: &AddClientNoteRequest) -> Result<()> {
    require_id("userid", &request.userid)?;
    require_non_empty("notes", &request.notes)
}

api_request!(AddClientNoteRequest => "AddClientNote", AddClientNoteResponse, validate = validate_add_client_note);

/// `AddClientNote` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddClientNoteResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New note
    #[serde(default)]
    pub noteid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPriority {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

/// `OpenTicket` parameters.
///
/// Either `clientid` or a `name`/`email` pair identifies the submitter.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct OpenTicketRequest {
    /// Department
    pub deptid: Id,
    /// Subject
    pub subject: String,
    /// First message
    pub message: String,
    /// Submitting client
    #[builder(default)]
    pub clientid: Option<Id>,
    /// Submitting contact
    #[builder(default)]
    pub contactid: Option<Id>,
    /// Name, for non-clients
    #[builder(default)]
    pub name: Option<String>,
    /// Email, for non-clients
    #[builder(default)]
    pub email: Option<String>,
    /// Priority
    #[builder(default)]
    pub priority: Option<TicketPriority>,
    /// Related service
    #[builder(default)]
    pub serviceid: Option<Id>,
    /// Related domain
    #[builder(default)]
    pub domainid: Option<Id>,
    /// Open as staff
    #[builder(default)]
    pub admin: Option<bool>,
    /// Message is markdown
    #[builder(default)]
    pub markdown: Option<bool>,
}

impl OpenTicketRequest {
    /// Create a builder.
    pub fn builder() -> OpenTicketRequestBuilder {
        OpenTicketRequestBuilder::default()
    }
}

fn validate_open_ticket(request: &OpenTicketRequest) -> Result<()> {
    require_id("deptid", &request.deptid)?;
    require_non_empty("subject", &request.subject)?;
    require_non_empty("message", &request.message)?;
    require_any(
        "OpenTicket",
        &[
            ("clientid", request.clientid.is_some()),
            ("email", request.email.is_some()),
        ],
    )
}

api_request!(OpenTicketRequest => "OpenTicket", OpenTicketResponse, validate = validate_open_ticket);

/// `OpenTicket` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenTicketResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Internal ticket id
    #[serde(default)]
    pub id: Option<Id>,
    /// Public ticket number
    #[serde(default)]
    pub tid: Option<String>,
    /// Access key for the client ticket view
    #[serde(default)]
    pub c: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetTicket` parameters; one of `ticketid` or `ticketnum`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTicketRequest {
    /// Internal ticket id
    pub ticketid: Option<Id>,
    /// Public ticket number
    pub ticketnum: Option<String>,
    /// `ASC` or `DESC`
    pub repliessort: Option<String>,
}

impl GetTicketRequest {
    /// Look a ticket up by internal id.
    pub fn new(ticketid: impl Into<Id>) -> Self {
        Self {
            ticketid: Some(ticketid.into()),
            ..Default::default()
        }
    }

    /// Look a ticket up by public number.
    pub fn by_number(ticketnum: impl Into<String>) -> Self {
        Self {
            ticketnum: Some(ticketnum.into()),
            ..Default::default()
        }
    }
}

fn validate_get_ticket(request: &GetTicketRequest) -> Result<()> {
    if let Some(ticketid) = &request.ticketid {
        require_id("ticketid", ticketid)?;
    }
    require_any(
        "GetTicket",
        &[
            ("ticketid", request.ticketid.is_some()),
            ("ticketnum", request.ticketnum.is_some()),
        ],
    )
}

api_request!(GetTicketRequest => "GetTicket", GetTicketResponse, validate = validate_get_ticket);

/// A ticket reply. The opening message is listed first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketReply {
    /// Reply id; `0` for the opening message
    #[serde(default)]
    pub replyid: Option<Id>,
    /// Replying client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Message
    #[serde(default)]
    pub message: Option<String>,
    /// Staff member, when a staff reply
    #[serde(default)]
    pub admin: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `replies` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TicketReplyList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub reply: Vec<TicketReply>,
}

/// A staff-only ticket note.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketNote {
    /// Note id
    pub noteid: Id,
    /// Author
    #[serde(default)]
    pub admin: Option<String>,
    /// Text
    #[serde(default)]
    pub message: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `notes` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TicketNoteList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub note: Vec<TicketNote>,
}

/// `GetTicket` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTicketResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Internal ticket id
    #[serde(default)]
    pub ticketid: Option<Id>,
    /// Public ticket number
    #[serde(default)]
    pub tid: Option<String>,
    /// Department
    #[serde(default)]
    pub deptid: Option<Id>,
    /// Submitting client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Status
    #[serde(default)]
    pub status: Option<String>,
    /// Replies, opening message first
    #[serde(default, deserialize_with = "empty_as_default")]
    pub replies: TicketReplyList,
    /// Staff notes
    #[serde(default, deserialize_with = "empty_as_default")]
    pub notes: TicketNoteList,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `AddTicketNote` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AddTicketNoteRequest {
    /// Ticket
    pub ticketid: Id,
    /// Note text
    pub message: String,
    /// Text is markdown
    pub markdown: Option<bool>,
}

impl AddTicketNoteRequest {
    /// Add a staff note to a ticket.
    pub fn new(ticketid: impl Into<Id>, message: impl Into<String>) -> Self {
        Self {
            ticketid: ticketid.into(),
            message: message.into(),
            markdown: None,
        }
    }
}

fn validate_add_ticket_note(request: &AddTicketNoteRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)?;
    require_non_empty("message", &request.message)
}

api_request!(AddTicketNoteRequest => "AddTicketNote", Ack, validate = validate_add_ticket_note);

/// `AddTicketReply` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddTicketReplyRequest {
    /// Ticket
    pub ticketid: Id,
    /// Reply text
    pub message: String,
    /// Replying client
    #[builder(default)]
    pub clientid: Option<Id>,
    /// Replying contact
    #[builder(default)]
    pub contactid: Option<Id>,
    /// Reply as this staff member
    #[builder(default)]
    pub adminusername: Option<String>,
    /// Name, for non-clients
    #[builder(default)]
    pub name: Option<String>,
    /// Email, for non-clients
    #[builder(default)]
    pub email: Option<String>,
    /// Status to set afterwards
    #[builder(default)]
    pub status: Option<String>,
    /// Suppress the notification email
    #[builder(default)]
    pub noemail: Option<bool>,
    /// Text is markdown
    #[builder(default)]
    pub markdown: Option<bool>,
}

impl AddTicketReplyRequest {
    /// Create a builder.
    pub fn builder() -> AddTicketReplyRequestBuilder {
        AddTicketReplyRequestBuilder::default()
    }
}

fn validate_add_ticket_reply(request: &AddTicketReplyRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)?;
    require_non_empty("message", &request.message)
}

api_request!(AddTicketReplyRequest => "AddTicketReply", Ack, validate = validate_add_ticket_reply);

/// `UpdateTicket` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateTicketRequest {
    /// Ticket to update
    pub ticketid: Id,
    /// Move to department
    #[builder(default)]
    pub deptid: Option<Id>,
    /// New status
    #[builder(default)]
    pub status: Option<String>,
    /// New subject
    #[builder(default)]
    pub subject: Option<String>,
    /// Reassign to client
    #[builder(default)]
    pub userid: Option<Id>,
    /// Submitter name
    #[builder(default)]
    pub name: Option<String>,
    /// Submitter email
    #[builder(default)]
    pub email: Option<String>,
    /// CC recipients
    #[builder(default)]
    pub cc: Option<String>,
    /// New priority
    #[builder(default)]
    pub priority: Option<TicketPriority>,
    /// Flag to staff member
    #[builder(default)]
    pub flag: Option<Id>,
}

impl UpdateTicketRequest {
    /// Create a builder.
    pub fn builder() -> UpdateTicketRequestBuilder {
        UpdateTicketRequestBuilder::default()
    }
}

fn validate_update_ticket(request: &UpdateTicketRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)?;
    require_any(
        "UpdateTicket",
        &[
            ("deptid", request.deptid.is_some()),
            ("status", request.status.is_some()),
            ("subject", request.subject.is_some()),
            ("userid", request.userid.is_some()),
            ("name", request.name.is_some()),
            ("email", request.email.is_some()),
            ("cc", request.cc.is_some()),
            ("priority", request.priority.is_some()),
            ("flag", request.flag.is_some()),
        ],
    )
}

api_request!(UpdateTicketRequest => "UpdateTicket", TicketIdResponse, validate = validate_update_ticket);

/// Reply echoing a ticket id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketIdResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Ticket id
    #[serde(default)]
    pub ticketid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `MergeTicket` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct MergeTicketRequest {
    /// Ticket that survives the merge
    pub ticketid: Id,
    /// Tickets merged into it, sent comma-separated
    #[serde(serialize_with = "comma_separated")]
    pub mergeticketids: Vec<Id>,
    /// Subject of the merged ticket
    pub newsubject: Option<String>,
}

impl MergeTicketRequest {
    /// Merge `others` into `ticketid`.
    pub fn new(ticketid: impl Into<Id>, others: impl IntoIterator<Item = Id>) -> Self {
        Self {
            ticketid: ticketid.into(),
            mergeticketids: others.into_iter().collect(),
            newsubject: None,
        }
    }

    /// Set the merged subject.
    pub fn newsubject(mut self, subject: impl Into<String>) -> Self {
        self.newsubject = Some(subject.into());
        self
    }
}

fn validate_merge_ticket(request: &MergeTicketRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)?;
    if request.mergeticketids.is_empty() {
        return Err(crate::Error::InvalidRequest(
            "mergeticketids must name at least one ticket".to_string(),
        ));
    }
    for id in &request.mergeticketids {
        require_id("mergeticketids", id)?;
        if *id == request.ticketid {
            return Err(crate::Error::InvalidRequest(format!(
                "ticket {id} cannot be merged into itself"
            )));
        }
    }
    Ok(())
}

api_request!(MergeTicketRequest => "MergeTicket", TicketIdResponse, validate = validate_merge_ticket);

/// `BlockTicketSender` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct BlockTicketSenderRequest {
    /// Ticket whose sender to block
    pub ticketid: Id,
    /// Also delete the ticket
    pub delete: Option<bool>,
}

impl BlockTicketSenderRequest {
    /// Block the sender of a ticket.
    pub fn new(ticketid: impl Into<Id>) -> Self {
        Self {
            ticketid: ticketid.into(),
            delete: None,
        }
    }
}

fn validate_block_ticket_sender(request: &BlockTicketSenderRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)
}

api_request!(BlockTicketSenderRequest => "BlockTicketSender", Ack, validate = validate_block_ticket_sender);

/// `UpdateTicketReply` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTicketReplyRequest {
    /// Reply to edit
    pub replyid: Id,
    /// New text
    pub message: String,
    /// Text is markdown
    pub markdown: Option<bool>,
}

impl UpdateTicketReplyRequest {
    /// Replace the text of a reply.
    pub fn new(replyid: impl Into<Id>, message: impl Into<String>) -> Self {
        Self {
            replyid: replyid.into(),
            message: message.into(),
            markdown: None,
        }
    }
}

fn validate_update_ticket_reply(request: &UpdateTicketReplyRequest) -> Result<()> {
    require_id("replyid", &request.replyid)?;
    require_non_empty("message", &request.message)
}

api_request!(UpdateTicketReplyRequest => "UpdateTicketReply", UpdateTicketReplyResponse, validate = validate_update_ticket_reply);

/// `UpdateTicketReply` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateTicketReplyResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Edited reply
    #[serde(default)]
    pub replyid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `DeleteTicketReply` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTicketReplyRequest {
    /// Ticket the reply belongs to
    pub ticketid: Id,
    /// Reply to delete
    pub replyid: Id,
}

impl DeleteTicketReplyRequest {
    /// Delete a reply.
    pub fn new(ticketid: impl Into<Id>, replyid: impl Into<Id>) -> Self {
        Self {
            ticketid: ticketid.into(),
            replyid: replyid.into(),
        }
    }
}

fn validate_delete_ticket_reply(request: &DeleteTicketReplyRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)?;
    require_id("replyid", &request.replyid)
}

api_request!(DeleteTicketReplyRequest => "DeleteTicketReply", Ack, validate = validate_delete_ticket_reply);

/// `DeleteTicketNote` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTicketNoteRequest {
    /// Note to delete
    pub noteid: Id,
}

impl DeleteTicketNoteRequest {
    /// Delete a note.
    pub fn new(noteid: impl Into<Id>) -> Self {
        Self {
            noteid: noteid.into(),
        }
    }
}

fn validate_delete_ticket_note(request: &DeleteTicketNoteRequest) -> Result<()> {
    require_id("noteid", &request.noteid)
}

api_request!(DeleteTicketNoteRequest => "DeleteTicketNote", Ack, validate = validate_delete_ticket_note);

/// `DeleteTicket` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTicketRequest {
    /// Ticket to delete
    pub ticketid: Id,
}

impl DeleteTicketRequest {
    /// Delete a ticket.
    pub fn new(ticketid: impl Into<Id>) -> Self {
        Self {
            ticketid: ticketid.into(),
        }
    }
}

fn validate_delete_ticket(request: &DeleteTicketRequest) -> Result<()> {
    require_id("ticketid", &request.ticketid)
}

api_request!(DeleteTicketRequest => "DeleteTicket", Ack, validate = validate_delete_ticket);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ApiRequest;
    use crate::params::ParamValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_announcement_date_is_iso() {
        let params = AddAnnouncementRequest::builder()
            .date(NaiveDate::from_ymd_opt(1969, 7, 11).unwrap())
            .title("There's something wrong")
            .announcement("Your circuit's dead")
            .build()
            .unwrap()
            .params()
            .unwrap();
        assert_eq!(params.get("date"), Some(&ParamValue::from("1969-07-11")));
    }

    #[test]
    fn test_open_ticket_needs_submitter() {
        let request = OpenTicketRequest::builder()
            .deptid(1u64)
            .subject("this is a subject")
            .message("this is a message")
            .build()
            .unwrap();
        assert!(request.validate().is_err());

        let request = OpenTicketRequest::builder()
            .deptid(1u64)
            .clientid(1u64)
            .subject("this is a subject")
            .message("this is a message")
            .priority(TicketPriority::High)
            .build()
            .unwrap();
        request.validate().unwrap();
        assert_eq!(
            request.params().unwrap().get("priority"),
            Some(&ParamValue::from("High"))
        );
    }

    #[test]
    fn test_merge_ticket_joins_ids() {
        let request = MergeTicketRequest::new(1u64, [Id::from(2u64), Id::from(3u64)])
            .newsubject("this is a merged ticket");
        request.validate().unwrap();
        let params = request.params().unwrap();
        assert_eq!(params.get("mergeticketids"), Some(&ParamValue::from("2,3")));
    }

    #[test]
    fn test_merge_ticket_into_itself_is_rejected() {
        let request = MergeTicketRequest::new(1u64, [Id::from(1u64)]);
        assert!(request.validate().is_err());
        let request = MergeTicketRequest::new(1u64, Vec::new());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_ticket_needs_a_change() {
        let request = UpdateTicketRequest::builder()
            .ticketid(1u64)
            .build()
            .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cancellation_type_spelling() {
        let params = AddCancelRequest::new(3u64)
            .cancellation_type(CancellationType::EndOfBillingPeriod)
            .params()
            .unwrap();
        assert_eq!(
            params.get("type"),
            Some(&ParamValue::from("End of Billing Period"))
        );
    }

    #[test]
    fn test_get_ticket_needs_a_key() {
        assert!(GetTicketRequest::default().validate().is_err());
        assert!(GetTicketRequest::by_number("ABC-123").validate().is_ok());
    }

    #[test]
    fn test_decode_ticket_with_replies_and_notes() {
        let response: GetTicketResponse = serde_json::from_value(json!({
            "result": "success",
            "ticketid": 4,
            "tid": "123456",
            "replies": {"reply": [
                {"replyid": "0", "message": "this is a message"},
                {"replyid": "8", "message": "this is a new reply"}
            ]},
            "notes": {"note": [{"noteid": 2, "message": "this is a ticket note"}]}
        }))
        .unwrap();
        assert_eq!(response.replies.reply.len(), 2);
        assert_eq!(response.replies.reply[1].replyid, Some(Id::from(8u64)));
        assert_eq!(response.notes.note[0].noteid, 2u64);
    }

    #[test]
    fn test_decode_ticket_without_notes() {
        let response: GetTicketResponse = serde_json::from_value(json!({
            "result": "success",
            "ticketid": 4,
            "replies": {"reply": {"replyid": "0", "message": "only"}},
            "notes": ""
        }))
        .unwrap();
        assert_eq!(response.replies.reply.len(), 1);
        assert!(response.notes.note.is_empty());
    }
}
