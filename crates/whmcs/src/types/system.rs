//! System administration: bans, password vault, logs, settings, notifications

use super::common::{Ack, Extra, Id, ResultStatus, empty_as_default, lenient_u64, one_or_many};
use crate::action::{ApiRequest, api_request};
use crate::error::Result;
use crate::params::Params;
use crate::validation::{require_any, require_id, require_ip, require_non_empty};
use chrono::NaiveDate;
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Declare a parameterless request type bound to `action`.
macro_rules! parameterless {
    ($name:ident => $action:literal, $response:ty) => {
        #[doc = concat!("`", $action, "` takes no parameters.")]
        #[derive(Debug, Clone, Copy, Default, Serialize)]
        pub struct $name {}

        api_request!($name => $action, $response);
    };
}

/// `AddBannedIp` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AddBannedIpRequest {
    /// IPv4 or IPv6 address
    pub ip: String,
    /// Reason shown in the ban list
    pub reason: Option<String>,
    /// Ban length in days
    pub days: Option<u32>,
    /// Explicit expiry, `YYYY-MM-DD HH:MM:SS`
    pub expires: Option<String>,
}

impl AddBannedIpRequest {
    /// Ban an address.
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            reason: None,
            days: None,
            expires: None,
        }
    }

    /// Set the reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Ban for `days` days.
    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }
}

fn validate_add_banned_ip(request: &AddBannedIpRequest) -> Result<()> {
    require_ip("ip", &request.ip)
}

api_request!(AddBannedIpRequest => "AddBannedIp", Ack, validate = validate_add_banned_ip);

// ---------------------------------------------------------------------------
// Password vault
// ---------------------------------------------------------------------------

/// `EncryptPassword` parameters. The password never appears in `Debug`.
#[derive(Debug, Clone)]
pub struct EncryptPasswordRequest {
    /// Plain text to encrypt
    pub password2: SecretString,
}

impl EncryptPasswordRequest {
    /// Encrypt `password`.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password2: SecretString::new(password.into().into_boxed_str()),
        }
    }
}

impl ApiRequest for EncryptPasswordRequest {
    const ACTION: &'static str = "EncryptPassword";
    type Response = PasswordResponse;

    fn params(&self) -> Result<Params> {
        Ok(Params::new().with("password2", self.password2.expose_secret()))
    }
}

/// `DecryptPassword` parameters.
#[derive(Debug, Clone)]
pub struct DecryptPasswordRequest {
    /// Cipher text produced by `EncryptPassword`
    pub password2: SecretString,
}

impl DecryptPasswordRequest {
    /// Decrypt `encrypted`.
    pub fn new(encrypted: impl Into<String>) -> Self {
        Self {
            password2: SecretString::new(encrypted.into().into_boxed_str()),
        }
    }
}

impl ApiRequest for DecryptPasswordRequest {
    const ACTION: &'static str = "DecryptPassword";
    type Response = PasswordResponse;

    fn validate(&self) -> Result<()> {
        require_non_empty("password2", self.password2.expose_secret())
    }

    fn params(&self) -> Result<Params> {
        Ok(Params::new().with("password2", self.password2.expose_secret()))
    }
}

/// Reply of `EncryptPassword` and `DecryptPassword`.
#[derive(Clone, Deserialize)]
pub struct PasswordResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Encrypted or decrypted text
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for PasswordResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResponse")
            .field("result", &self.result)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// `GetActivityLog` filters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GetActivityLogRequest {
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
    /// Client filter
    pub clientid: Option<Id>,
    /// Date filter
    pub date: Option<NaiveDate>,
    /// User filter
    pub user: Option<String>,
    /// Description filter
    pub description: Option<String>,
    /// Address filter
    pub ipaddress: Option<String>,
}

impl GetActivityLogRequest {
    /// Create a builder.
    pub fn builder() -> GetActivityLogRequestBuilder {
        GetActivityLogRequestBuilder::default()
    }

    /// One page.
    pub fn page(limitstart: u32, limitnum: u32) -> Self {
        Self {
            limitstart: Some(limitstart),
            limitnum: Some(limitnum),
            ..Default::default()
        }
    }
}

api_request!(GetActivityLogRequest => "GetActivityLog", GetActivityLogResponse);

/// An activity log entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityEntry {
    /// Entry id
    pub id: Id,
    /// Timestamp as reported
    #[serde(default)]
    pub date: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Acting user
    #[serde(default)]
    pub username: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `activity` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ActivityList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub entry: Vec<ActivityEntry>,
}

/// `GetActivityLog` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetActivityLogResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub activity: ActivityList,
}

/// `GetAutomationLog` range.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAutomationLogRequest {
    /// First day
    pub startdate: Option<NaiveDate>,
    /// Last day
    pub enddate: Option<NaiveDate>,
}

api_request!(GetAutomationLogRequest => "GetAutomationLog", GetAutomationLogResponse);

/// `GetAutomationLog` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetAutomationLogResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Platform clock at the time of the call
    #[serde(rename = "currentDatetime", default)]
    pub current_datetime: Option<String>,
    /// Other fields, including the per-task statistics
    #[serde(flatten)]
    pub extra: Extra,
}

/// `LogActivity` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct LogActivityRequest {
    /// Entry text
    pub description: String,
    /// Client the entry relates to
    pub clientid: Option<Id>,
}

impl LogActivityRequest {
    /// Log `description`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            clientid: None,
        }
    }

    /// Relate the entry to a client.
    pub fn client(mut self, clientid: impl Into<Id>) -> Self {
        self.clientid = Some(clientid.into());
        self
    }
}

fn validate_log_activity(request: &LogActivityRequest) -> Result<()> {
    require_non_empty("description", &request.description)
}

api_request!(LogActivityRequest => "LogActivity", Ack, validate = validate_log_activity);

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

parameterless!(GetAdminDetailsRequest => "GetAdminDetails", GetAdminDetailsResponse);

/// `GetAdminDetails` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetAdminDetailsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Calling admin
    #[serde(default)]
    pub adminid: Option<Id>,
    /// Name
    #[serde(default)]
    pub name: Option<String>,
    /// Personal notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Comma-separated permissions
    #[serde(default)]
    pub allowedpermissions: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetAdminUsers` filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAdminUsersRequest {
    /// Role filter
    pub roleid: Option<Id>,
    /// Email filter
    pub email: Option<String>,
    /// Include disabled accounts
    pub include_disabled: Option<bool>,
}

api_request!(GetAdminUsersRequest => "GetAdminUsers", GetAdminUsersResponse);

/// A staff account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminUser {
    /// Admin id
    pub id: Id,
    /// Login name
    #[serde(default)]
    pub username: Option<String>,
    /// Email
    #[serde(default)]
    pub email: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetAdminUsers` reply. The list is a bare array, not a wrapper object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetAdminUsersResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Number of accounts
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub admin_users: Vec<AdminUser>,
}

parameterless!(GetStaffOnlineRequest => "GetStaffOnline", GetStaffOnlineResponse);

/// A signed-in staff member.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaffOnline {
    /// Login name
    #[serde(default)]
    pub adminusername: Option<String>,
    /// Sign-in time
    #[serde(default)]
    pub logintime: Option<String>,
    /// Last activity
    #[serde(default)]
    pub lastvisit: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `staffonline` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StaffOnlineList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub staff: Vec<StaffOnline>,
}

/// `GetStaffOnline` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetStaffOnlineResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub staffonline: StaffOnlineList,
}

/// `UpdateAdminNotes` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAdminNotesRequest {
    /// Replacement notes for the calling admin
    pub notes: String,
}

impl UpdateAdminNotesRequest {
    /// Replace the notes.
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
        }
    }
}

api_request!(UpdateAdminNotesRequest => "UpdateAdminNotes", Ack);

// ---------------------------------------------------------------------------
// Settings and reference data
// ---------------------------------------------------------------------------

/// `GetConfigurationValue` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct GetConfigurationValueRequest {
    /// Setting name, e.g. `Language`
    pub setting: String,
}

impl GetConfigurationValueRequest {
    /// Read one setting.
    pub fn new(setting: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
        }
    }
}

fn validate_get_configuration_value(request: &GetConfigurationValueRequest) -> Result<()> {
    require_non_empty("setting", &request.setting)
}

api_request!(GetConfigurationValueRequest => "GetConfigurationValue", ConfigurationValueResponse, validate = validate_get_configuration_value);

/// `GetConfigurationValue` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigurationValueResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Setting name
    #[serde(default)]
    pub setting: Option<String>,
    /// Setting value as stored
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// `SetConfigurationValue` parameters.
///
/// Most installations only allow this through the internal API.
#[derive(Debug, Clone, Serialize)]
pub struct SetConfigurationValueRequest {
    /// Setting name
    pub setting: String,
    /// New value
    pub value: String,
}

impl SetConfigurationValueRequest {
    /// Write one setting.
    pub fn new(setting: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            value: value.into(),
        }
    }
}

fn validate_set_configuration_value(request: &SetConfigurationValueRequest) -> Result<()> {
    require_non_empty("setting", &request.setting)
}

api_request!(SetConfigurationValueRequest => "SetConfigurationValue", Ack, validate = validate_set_configuration_value);

parameterless!(GetCurrenciesRequest => "GetCurrencies", GetCurrenciesResponse);

/// A configured currency.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Currency {
    /// Currency id
    pub id: Id,
    /// ISO code
    #[serde(default)]
    pub code: Option<String>,
    /// Symbol before amounts
    #[serde(default)]
    pub prefix: Option<String>,
    /// Text after amounts
    #[serde(default)]
    pub suffix: Option<String>,
    /// Other fields, including `rate`
    #[serde(flatten)]
    pub extra: Extra,
}

/// `currencies` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CurrencyList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub currency: Vec<Currency>,
}

/// `GetCurrencies` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetCurrenciesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub currencies: CurrencyList,
}

/// `GetEmailTemplates` filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetEmailTemplatesRequest {
    /// Template group, e.g. `general` or `invoice`
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    /// Language
    pub language: Option<String>,
}

api_request!(GetEmailTemplatesRequest => "GetEmailTemplates", GetEmailTemplatesResponse);

/// An email template.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailTemplate {
    /// Template id
    pub id: Id,
    /// Template name, used as `messagename`
    #[serde(default)]
    pub name: Option<String>,
    /// Subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `emailtemplates` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EmailTemplateList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub emailtemplate: Vec<EmailTemplate>,
}

/// `GetEmailTemplates` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetEmailTemplatesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub emailtemplates: EmailTemplateList,
}

parameterless!(GetPaymentMethodsRequest => "GetPaymentMethods", GetPaymentMethodsResponse);

/// An active payment gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentMethod {
    /// Gateway module name
    #[serde(default)]
    pub module: Option<String>,
    /// Display name
    #[serde(default)]
    pub displayname: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `paymentmethods` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PaymentMethodList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub paymentmethod: Vec<PaymentMethod>,
}

/// `GetPaymentMethods` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetPaymentMethodsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub paymentmethods: PaymentMethodList,
}

/// `GetStats` parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetStatsRequest {
    /// Number of days of timeline data to include
    pub timeline_days: Option<u32>,
}

api_request!(GetStatsRequest => "GetStats", GetStatsResponse);

/// `GetStats` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetStatsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Formatted income for today, e.g. `$0.00 USD`
    #[serde(default)]
    pub income_today: Option<String>,
    /// Formatted income this month
    #[serde(default)]
    pub income_thismonth: Option<String>,
    /// Formatted income this year
    #[serde(default)]
    pub income_thisyear: Option<String>,
    /// Other counters
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetToDoItems` filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetToDoItemsRequest {
    /// Status filter
    pub status: Option<String>,
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
}

api_request!(GetToDoItemsRequest => "GetToDoItems", GetToDoItemsResponse);

/// A to-do entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToDoItem {
    /// Entry id
    pub id: Id,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Status
    #[serde(default)]
    pub status: Option<String>,
    /// Due date as reported
    #[serde(default)]
    pub duedate: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `items` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ToDoItemList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<ToDoItem>,
}

/// `GetToDoItems` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetToDoItemsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub items: ToDoItemList,
}

parameterless!(GetToDoItemStatusesRequest => "GetToDoItemStatuses", GetToDoItemStatusesResponse);

/// Count of to-do entries in one status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToDoItemStatus {
    /// Status name
    #[serde(rename = "type", default)]
    pub status_type: Option<String>,
    /// Number of entries
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `todoitemstatuses` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ToDoItemStatusList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub status: Vec<ToDoItemStatus>,
}

/// `GetToDoItemStatuses` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetToDoItemStatusesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub todoitemstatuses: ToDoItemStatusList,
}

parameterless!(WhmcsDetailsRequest => "WhmcsDetails", WhmcsDetailsResponse);

/// Installation version details.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WhmcsVersion {
    /// Display version
    #[serde(default)]
    pub version: Option<String>,
    /// Canonical version, e.g. `8.10.1-release.1`
    #[serde(default)]
    pub canonicalversion: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `WhmcsDetails` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhmcsDetailsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Version details
    #[serde(default)]
    pub whmcs: Option<WhmcsVersion>,
}

// ---------------------------------------------------------------------------
// Email and notifications
// ---------------------------------------------------------------------------

/// Template group for `SendEmail` custom messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    /// About the client
    General,
    /// About a service
    Product,
    /// About a domain
    Domain,
    /// About an invoice
    Invoice,
    /// About a ticket
    Support,
    /// About an affiliate account
    Affiliate,
}

/// `SendAdminEmail` parameters; either a template or a custom message.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct SendAdminEmailRequest {
    /// Admin template name
    pub messagename: Option<String>,
    /// Custom body
    pub custommessage: Option<String>,
    /// Custom subject
    pub customsubject: Option<String>,
    /// `system`, `account` or `support`
    #[serde(rename = "type")]
    pub email_type: Option<String>,
    /// Department, for support emails
    pub deptid: Option<Id>,
}

impl SendAdminEmailRequest {
    /// Create a builder.
    pub fn builder() -> SendAdminEmailRequestBuilder {
        SendAdminEmailRequestBuilder::default()
    }
}

fn validate_send_admin_email(request: &SendAdminEmailRequest) -> Result<()> {
    require_any(
        "SendAdminEmail",
        &[
            ("messagename", request.messagename.is_some()),
            ("custommessage", request.custommessage.is_some()),
        ],
    )
}

api_request!(SendAdminEmailRequest => "SendAdminEmail", Ack, validate = validate_send_admin_email);

/// `SendEmail` parameters; either a template or a custom message.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct SendEmailRequest {
    /// Related record (client, service, invoice, …)
    pub id: Option<Id>,
    /// Template name
    pub messagename: Option<String>,
    /// Template group for custom messages
    pub customtype: Option<EmailType>,
    /// Custom subject
    pub customsubject: Option<String>,
    /// Custom body
    pub custommessage: Option<String>,
}

impl SendEmailRequest {
    /// Create a builder.
    pub fn builder() -> SendEmailRequestBuilder {
        SendEmailRequestBuilder::default()
    }
}

fn validate_send_email(request: &SendEmailRequest) -> Result<()> {
    if let Some(id) = &request.id {
        require_id("id", id)?;
    }
    require_any(
        "SendEmail",
        &[
            ("messagename", request.messagename.is_some()),
            ("custommessage", request.custommessage.is_some()),
        ],
    )?;
    if request.custommessage.is_some() && request.customtype.is_none() {
        return Err(crate::Error::InvalidRequest(
            "customtype is needed with custommessage".to_string(),
        ));
    }
    Ok(())
}

api_request!(SendEmailRequest => "SendEmail", Ack, validate = validate_send_email);

/// `TriggerNotificationEvent` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct TriggerNotificationEventRequest {
    /// Identifier that notification rules match on
    pub notification_identifier: String,
    /// Title
    #[builder(default)]
    pub title: Option<String>,
    /// Message
    #[builder(default)]
    pub message: Option<String>,
    /// Link
    #[builder(default)]
    pub url: Option<String>,
    /// Status label
    #[builder(default)]
    pub status: Option<String>,
    /// Status style, e.g. `success` or `danger`
    #[serde(rename = "statusStyle")]
    #[builder(default)]
    pub status_style: Option<String>,
}

impl TriggerNotificationEventRequest {
    /// Create a builder.
    pub fn builder() -> TriggerNotificationEventRequestBuilder {
        TriggerNotificationEventRequestBuilder::default()
    }
}

fn validate_trigger_notification_event(request: &TriggerNotificationEventRequest) -> Result<()> {
    require_non_empty("notification_identifier", &request.notification_identifier)
}

api_request!(TriggerNotificationEventRequest => "TriggerNotificationEvent", Ack, validate = validate_trigger_notification_event);

/// `UpdateAnnouncement` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateAnnouncementRequest {
    /// Announcement to update
    pub announcementid: Id,
    /// New date
    #[builder(default)]
    pub date: Option<NaiveDate>,
    /// New title
    #[builder(default)]
    pub title: Option<String>,
    /// New body
    #[builder(default)]
    pub announcement: Option<String>,
    /// Publish or unpublish
    #[builder(default)]
    pub published: Option<bool>,
}

impl UpdateAnnouncementRequest {
    /// Create a builder.
    pub fn builder() -> UpdateAnnouncementRequestBuilder {
        UpdateAnnouncementRequestBuilder::default()
    }
}

fn validate_update_announcement(request: &UpdateAnnouncementRequest) -> Result<()> {
    require_id("announcementid", &request.announcementid)?;
    require_any(
        "UpdateAnnouncement",
        &[
            ("date", request.date.is_some()),
            ("title", request.title.is_some()),
            ("announcement", request.announcement.is_some()),
            ("published", request.published.is_some()),
        ],
    )
}

api_request!(UpdateAnnouncementRequest => "UpdateAnnouncement", super::support::AnnouncementIdResponse, validate = validate_update_announcement);
