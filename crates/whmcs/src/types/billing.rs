//! Billing: quotes, invoices, pay methods, credits, transactions, billable items

use super::common::{Ack, Extra, Id, ResultStatus, empty_as_default, lenient_f64, lenient_u64, one_or_many};
use crate::action::{ApiRequest, api_request};
use crate::encoding::{LineItem, line_items_param};
use crate::error::Result;
use crate::params::{IndexStyle, Params};
use crate::validation::{require_any, require_id, require_non_empty, require_non_negative, require_positive};
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Quote stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStage {
    /// Being prepared
    Draft,
    /// Sent to the client
    Delivered,
    /// Paused
    #[serde(rename = "On Hold")]
    OnHold,
    /// Accepted; an invoice exists
    Accepted,
    /// Declined
    Lost,
    /// Expired or abandoned
    Dead,
}

impl QuoteStage {
    /// Stage name as the platform spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStage::Draft => "Draft",
            QuoteStage::Delivered => "Delivered",
            QuoteStage::OnHold => "On Hold",
            QuoteStage::Accepted => "Accepted",
            QuoteStage::Lost => "Lost",
            QuoteStage::Dead => "Dead",
        }
    }
}

/// `CreateQuote` parameters.
///
/// Line items travel as a single base64 `lineitems` blob, see
/// [`crate::encoding`].
///
/// # Example
///
/// ```rust
/// use whmcs::types::billing::{CreateQuoteRequest, QuoteStage};
/// use whmcs::encoding::LineItem;
/// use chrono::NaiveDate;
///
/// let request = CreateQuoteRequest::builder()
///     .subject("test quote")
///     .stage(QuoteStage::Draft)
///     .validuntil(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
///     .userid(1u64)
///     .lineitems(vec![LineItem::new("quote description", 1, 10.0)])
///     .build()?;
/// # Ok::<(), whmcs::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct CreateQuoteRequest {
    /// Quote subject
    pub subject: String,
    /// Initial stage
    pub stage: QuoteStage,
    /// Last day the quote can be accepted
    pub validuntil: NaiveDate,
    /// Owning client
    #[builder(default)]
    pub userid: Option<Id>,
    /// Creation date, defaults to today remotely
    #[builder(default)]
    pub datecreated: Option<NaiveDate>,
    /// Proposal text
    #[builder(default)]
    pub proposal: Option<String>,
    /// Notes visible to the client
    #[builder(default)]
    pub customernotes: Option<String>,
    /// Staff-only notes
    #[builder(default)]
    pub adminnotes: Option<String>,
    /// Line items, encoded into `lineitems`
    #[serde(skip)]
    #[builder(default)]
    pub lineitems: Vec<LineItem>,
}

impl CreateQuoteRequest {
    /// Create a builder.
    pub fn builder() -> CreateQuoteRequestBuilder {
        CreateQuoteRequestBuilder::default()
    }
}

fn validate_line_items(items: &[LineItem]) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        require_non_empty(&format!("lineitems[{i}].desc"), &item.desc)?;
        if !item.up.is_finite() {
            return Err(crate::Error::InvalidRequest(format!(
                "lineitems[{i}].up must be a finite price"
            )));
        }
    }
    Ok(())
}

impl ApiRequest for CreateQuoteRequest {
    const ACTION: &'static str = "CreateQuote";
    type Response = CreateQuoteResponse;

    fn validate(&self) -> Result<()> {
        require_non_empty("subject", &self.subject)?;
        if let Some(userid) = &self.userid {
            require_id("userid", userid)?;
        }
        validate_line_items(&self.lineitems)
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::from_serialize(self)?;
        if !self.lineitems.is_empty() {
            params.insert("lineitems", line_items_param(&self.lineitems));
        }
        Ok(params)
    }
}

/// `CreateQuote` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateQuoteResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New quote
    pub quoteid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetQuotes` filters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GetQuotesRequest {
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
    /// Single quote lookup
    pub quoteid: Option<Id>,
    /// Owning client
    pub userid: Option<Id>,
    /// Subject filter
    pub subject: Option<String>,
    /// Stage filter
    pub stage: Option<QuoteStage>,
    /// Creation date filter
    pub datecreated: Option<NaiveDate>,
    /// Last modified filter
    pub lastmodified: Option<NaiveDate>,
    /// Validity filter
    pub validuntil: Option<NaiveDate>,
}

impl GetQuotesRequest {
    /// Create a builder.
    pub fn builder() -> GetQuotesRequestBuilder {
        GetQuotesRequestBuilder::default()
    }

    /// Look up one quote.
    pub fn by_id(quoteid: impl Into<Id>) -> Self {
        Self {
            quoteid: Some(quoteid.into()),
            ..Default::default()
        }
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

api_request!(GetQuotesRequest => "GetQuotes", GetQuotesResponse);

/// A quote record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Quote {
    /// Quote id
    pub id: Id,
    /// Subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Stage as reported, e.g. `Draft` or `Accepted`
    #[serde(default)]
    pub stage: Option<String>,
    /// Validity date as reported
    #[serde(default)]
    pub validuntil: Option<String>,
    /// Owning client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Total
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
    /// Other fields, including `items`
    #[serde(flatten)]
    pub extra: Extra,
}

/// `quotes` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct QuoteList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub quote: Vec<Quote>,
}

/// `GetQuotes` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetQuotesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Returned in this page
    #[serde(default, deserialize_with = "lenient_u64")]
    pub numreturned: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub quotes: QuoteList,
}

/// `UpdateQuote` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateQuoteRequest {
    /// Quote to update
    pub quoteid: Id,
    /// New subject
    #[builder(default)]
    pub subject: Option<String>,
    /// New stage
    #[builder(default)]
    pub stage: Option<QuoteStage>,
    /// New validity date
    #[builder(default)]
    pub validuntil: Option<NaiveDate>,
    /// New owner
    #[builder(default)]
    pub userid: Option<Id>,
    /// Proposal text
    #[builder(default)]
    pub proposal: Option<String>,
    /// Client-visible notes
    #[builder(default)]
    pub customernotes: Option<String>,
    /// Staff notes
    #[builder(default)]
    pub adminnotes: Option<String>,
    /// Replacement line items
    #[serde(skip)]
    #[builder(default)]
    pub lineitems: Option<Vec<LineItem>>,
}

impl UpdateQuoteRequest {
    /// Create a builder.
    pub fn builder() -> UpdateQuoteRequestBuilder {
        UpdateQuoteRequestBuilder::default()
    }
}

impl ApiRequest for UpdateQuoteRequest {
    const ACTION: &'static str = "UpdateQuote";
    type Response = UpdateQuoteResponse;

    fn validate(&self) -> Result<()> {
        require_id("quoteid", &self.quoteid)?;
        if let Some(items) = &self.lineitems {
            validate_line_items(items)?;
        }
        Ok(())
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::from_serialize(self)?;
        if let Some(items) = &self.lineitems {
            params.insert("lineitems", line_items_param(items));
        }
        Ok(params)
    }
}

/// `UpdateQuote` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateQuoteResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Updated quote, when echoed
    #[serde(default)]
    pub quoteid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Parameters naming a single quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRef {
    /// Quote id
    pub quoteid: Id,
}

impl QuoteRef {
    /// Reference a quote.
    pub fn new(quoteid: impl Into<Id>) -> Self {
        Self {
            quoteid: quoteid.into(),
        }
    }
}

fn validate_quote_ref(request: &QuoteRef) -> Result<()> {
    require_id("quoteid", &request.quoteid)
}

/// `AcceptQuote` parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AcceptQuoteRequest(pub QuoteRef);

/// `SendQuote` parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SendQuoteRequest(pub QuoteRef);

/// `DeleteQuote` parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DeleteQuoteRequest(pub QuoteRef);

fn validate_accept_quote(request: &AcceptQuoteRequest) -> Result<()> {
    validate_quote_ref(&request.0)
}

fn validate_send_quote(request: &SendQuoteRequest) -> Result<()> {
    validate_quote_ref(&request.0)
}

fn validate_delete_quote(request: &DeleteQuoteRequest) -> Result<()> {
    validate_quote_ref(&request.0)
}

api_request!(AcceptQuoteRequest => "AcceptQuote", AcceptQuoteResponse, validate = validate_accept_quote);
api_request!(SendQuoteRequest => "SendQuote", Ack, validate = validate_send_quote);
api_request!(DeleteQuoteRequest => "DeleteQuote", Ack, validate = validate_delete_quote);

/// `AcceptQuote` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcceptQuoteResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Invoice generated from the quote
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Billable items
// ---------------------------------------------------------------------------

/// Unit of a billable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillableUnit {
    /// Billed per hour
    Hours,
    /// Billed per unit
    Quantity,
}

/// `AddBillableItem` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddBillableItemRequest {
    /// Client to bill
    pub clientid: Id,
    /// Item description
    pub description: String,
    /// Amount
    pub amount: f64,
    /// Unit
    #[builder(default)]
    pub unit: Option<BillableUnit>,
    /// Hours or quantity
    #[builder(default)]
    pub quantity: Option<f64>,
    /// `noinvoice`, `nextcron`, `nextinvoice`, `duedate` or `recur`
    #[builder(default)]
    pub invoiceaction: Option<String>,
    /// Recurrence interval
    #[builder(default)]
    pub recur: Option<u32>,
    /// Recurrence period, e.g. `Months`
    #[builder(default)]
    pub recurcycle: Option<String>,
    /// Number of recurrences
    #[builder(default)]
    pub recurfor: Option<u32>,
    /// Due date
    #[builder(default)]
    pub duedate: Option<NaiveDate>,
}

impl AddBillableItemRequest {
    /// Create a builder.
    pub fn builder() -> AddBillableItemRequestBuilder {
        AddBillableItemRequestBuilder::default()
    }
}

fn validate_add_billable_item(request: &AddBillableItemRequest) -> Result<()> {
    require_id("clientid", &request.clientid)?;
    require_non_empty("description", &request.description)?;
    require_non_negative("amount", request.amount)
}

api_request!(AddBillableItemRequest => "AddBillableItem", AddBillableItemResponse, validate = validate_add_billable_item);

/// `AddBillableItem` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddBillableItemResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New billable item
    #[serde(default)]
    pub billableid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// One invoice line for `CreateInvoice` / `UpdateInvoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Description
    pub description: String,
    /// Amount
    pub amount: f64,
    /// Whether tax applies
    pub taxed: bool,
}

impl InvoiceLine {
    /// Untaxed line.
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        Self {
            description: description.into(),
            amount,
            taxed: false,
        }
    }

    /// Set the tax flag.
    pub fn taxed(mut self, taxed: bool) -> Self {
        self.taxed = taxed;
        self
    }

    fn write(&self, params: &mut Params, prefix: &str, index: usize, style: IndexStyle) {
        params
            .insert_indexed(&format!("{prefix}itemdescription"), index, style, self.description.as_str())
            .insert_indexed(&format!("{prefix}itemamount"), index, style, self.amount)
            .insert_indexed(&format!("{prefix}itemtaxed"), index, style, self.taxed);
    }
}

fn validate_invoice_lines(field: &str, lines: &[InvoiceLine]) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        require_non_empty(&format!("{field}[{i}].description"), &line.description)?;
        if !line.amount.is_finite() {
            return Err(crate::Error::InvalidRequest(format!(
                "{field}[{i}].amount must be a finite amount"
            )));
        }
    }
    Ok(())
}

/// `CreateInvoice` parameters.
///
/// Lines are sent as `itemdescription0`, `itemamount0`, `itemtaxed0`, …
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct CreateInvoiceRequest {
    /// Client to invoice
    pub userid: Id,
    /// Initial status, e.g. `Unpaid` or `Draft`
    #[builder(default)]
    pub status: Option<String>,
    /// Email the invoice on creation
    #[builder(default)]
    pub sendinvoice: Option<bool>,
    /// Payment gateway module name
    #[builder(default)]
    pub paymentmethod: Option<String>,
    /// Tax rate override
    #[builder(default)]
    pub taxrate: Option<f64>,
    /// Invoice date
    #[builder(default)]
    pub date: Option<NaiveDate>,
    /// Due date
    #[builder(default)]
    pub duedate: Option<NaiveDate>,
    /// Invoice notes
    #[builder(default)]
    pub notes: Option<String>,
    /// Apply available credit automatically
    #[builder(default)]
    pub autoapplycredit: Option<bool>,
    /// Invoice lines
    #[serde(skip)]
    #[builder(default)]
    pub items: Vec<InvoiceLine>,
}

impl CreateInvoiceRequest {
    /// Create a builder.
    pub fn builder() -> CreateInvoiceRequestBuilder {
        CreateInvoiceRequestBuilder::default()
    }
}

impl ApiRequest for CreateInvoiceRequest {
    const ACTION: &'static str = "CreateInvoice";
    type Response = CreateInvoiceResponse;

    fn validate(&self) -> Result<()> {
        require_id("userid", &self.userid)?;
        validate_invoice_lines("items", &self.items)
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::from_serialize(self)?;
        for (i, line) in self.items.iter().enumerate() {
            line.write(&mut params, "", i, IndexStyle::Suffix);
        }
        Ok(params)
    }
}

/// `CreateInvoice` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateInvoiceResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// New invoice
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Status of the new invoice
    #[serde(default)]
    pub status: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetInvoices` filters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GetInvoicesRequest {
    /// Offset
    pub limitstart: Option<u32>,
    /// Page size
    pub limitnum: Option<u32>,
    /// Owning client
    pub userid: Option<Id>,
    /// Status filter
    pub status: Option<String>,
    /// Sort column
    pub orderby: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
}

impl GetInvoicesRequest {
    /// Create a builder.
    pub fn builder() -> GetInvoicesRequestBuilder {
        GetInvoicesRequestBuilder::default()
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

api_request!(GetInvoicesRequest => "GetInvoices", GetInvoicesResponse);

/// Invoice summary as listed by `GetInvoices`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceSummary {
    /// Invoice id
    pub id: Id,
    /// Owning client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Status
    #[serde(default)]
    pub status: Option<String>,
    /// Total
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `invoices` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InvoiceList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub invoice: Vec<InvoiceSummary>,
}

/// `GetInvoices` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetInvoicesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub invoices: InvoiceList,
}

/// Parameters naming a single invoice.
#[derive(Debug, Clone, Serialize)]
pub struct GetInvoiceRequest {
    /// Invoice id
    pub invoiceid: Id,
}

impl GetInvoiceRequest {
    /// Reference an invoice.
    pub fn new(invoiceid: impl Into<Id>) -> Self {
        Self {
            invoiceid: invoiceid.into(),
        }
    }
}

fn validate_get_invoice(request: &GetInvoiceRequest) -> Result<()> {
    require_id("invoiceid", &request.invoiceid)
}

api_request!(GetInvoiceRequest => "GetInvoice", GetInvoiceResponse, validate = validate_get_invoice);

/// A line on an invoice.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceItem {
    /// Line id
    pub id: Id,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `items` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InvoiceItems {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub item: Vec<InvoiceItem>,
}

/// `GetInvoice` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetInvoiceResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Invoice id
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Owning client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Status
    #[serde(default)]
    pub status: Option<String>,
    /// Total
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
    /// Outstanding balance
    #[serde(default, deserialize_with = "lenient_f64")]
    pub balance: Option<f64>,
    /// Lines
    #[serde(default, deserialize_with = "empty_as_default")]
    pub items: InvoiceItems,
    /// Other fields, including `transactions`
    #[serde(flatten)]
    pub extra: Extra,
}

/// `UpdateInvoice` parameters.
///
/// `items` rewrite existing lines (`itemdescription[N]`, keyed by position
/// here); `new_items` append lines (`newitemdescription[N]`).
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateInvoiceRequest {
    /// Invoice to update
    pub invoiceid: Id,
    /// New status
    #[builder(default)]
    pub status: Option<String>,
    /// Payment gateway module name
    #[builder(default)]
    pub paymentmethod: Option<String>,
    /// Due date
    #[builder(default)]
    pub duedate: Option<NaiveDate>,
    /// Notes
    #[builder(default)]
    pub notes: Option<String>,
    /// Replacement lines
    #[serde(skip)]
    #[builder(default)]
    pub items: Vec<InvoiceLine>,
    /// Appended lines
    #[serde(skip)]
    #[builder(default)]
    pub new_items: Vec<InvoiceLine>,
}

impl UpdateInvoiceRequest {
    /// Create a builder.
    pub fn builder() -> UpdateInvoiceRequestBuilder {
        UpdateInvoiceRequestBuilder::default()
    }
}

impl ApiRequest for UpdateInvoiceRequest {
    const ACTION: &'static str = "UpdateInvoice";
    type Response = UpdateInvoiceResponse;

    fn validate(&self) -> Result<()> {
        require_id("invoiceid", &self.invoiceid)?;
        validate_invoice_lines("items", &self.items)?;
        validate_invoice_lines("new_items", &self.new_items)
    }

    fn params(&self) -> Result<Params> {
        let mut params = Params::from_serialize(self)?;
        for (i, line) in self.items.iter().enumerate() {
            line.write(&mut params, "", i, IndexStyle::Bracket);
        }
        for (i, line) in self.new_items.iter().enumerate() {
            line.write(&mut params, "new", i, IndexStyle::Bracket);
        }
        Ok(params)
    }
}

/// `UpdateInvoice` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateInvoiceResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Updated invoice
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `AddInvoicePayment` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddInvoicePaymentRequest {
    /// Invoice being paid
    pub invoiceid: Id,
    /// Gateway transaction id
    pub transid: String,
    /// Gateway module name, e.g. `paypal`
    pub gateway: String,
    /// Amount; defaults to the balance remotely
    #[builder(default)]
    pub amount: Option<f64>,
    /// Gateway fees
    #[builder(default)]
    pub fees: Option<f64>,
    /// Payment date
    #[builder(default)]
    pub date: Option<String>,
    /// Suppress the confirmation email
    #[builder(default)]
    pub noemail: Option<bool>,
}

impl AddInvoicePaymentRequest {
    /// Create a builder.
    pub fn builder() -> AddInvoicePaymentRequestBuilder {
        AddInvoicePaymentRequestBuilder::default()
    }
}

fn validate_add_invoice_payment(request: &AddInvoicePaymentRequest) -> Result<()> {
    require_id("invoiceid", &request.invoiceid)?;
    require_non_empty("transid", &request.transid)?;
    require_non_empty("gateway", &request.gateway)?;
    if let Some(amount) = request.amount {
        require_non_negative("amount", amount)?;
    }
    Ok(())
}

api_request!(AddInvoicePaymentRequest => "AddInvoicePayment", Ack, validate = validate_add_invoice_payment);

/// `ApplyCredit` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct ApplyCreditRequest {
    /// Invoice to apply credit to
    pub invoiceid: Id,
    /// Amount of credit
    pub amount: f64,
    /// Suppress the notification email
    #[builder(default)]
    pub noemail: Option<bool>,
}

impl ApplyCreditRequest {
    /// Create a builder.
    pub fn builder() -> ApplyCreditRequestBuilder {
        ApplyCreditRequestBuilder::default()
    }
}

fn validate_apply_credit(request: &ApplyCreditRequest) -> Result<()> {
    require_id("invoiceid", &request.invoiceid)?;
    require_positive("amount", request.amount)
}

api_request!(ApplyCreditRequest => "ApplyCredit", ApplyCreditResponse, validate = validate_apply_credit);

/// `ApplyCredit` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplyCreditResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Invoice id
    #[serde(default)]
    pub invoiceid: Option<Id>,
    /// Credit applied
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    /// Whether the invoice is now paid, as reported (`true`/`false`)
    #[serde(default)]
    pub invoicepaid: Option<serde_json::Value>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `CapturePayment` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct CapturePaymentRequest {
    /// Invoice to capture
    pub invoiceid: Id,
    /// Card security code, if the gateway needs it
    pub cvv: Option<String>,
}

impl CapturePaymentRequest {
    /// Capture payment for an invoice.
    pub fn new(invoiceid: impl Into<Id>) -> Self {
        Self {
            invoiceid: invoiceid.into(),
            cvv: None,
        }
    }
}

fn validate_capture_payment(request: &CapturePaymentRequest) -> Result<()> {
    require_id("invoiceid", &request.invoiceid)
}

api_request!(CapturePaymentRequest => "CapturePayment", Ack, validate = validate_capture_payment);

/// `GenInvoices` parameters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GenInvoicesRequest {
    /// Suppress invoice emails
    pub noemails: Option<bool>,
    /// Only this client
    pub clientid: Option<Id>,
    /// Comma-separated service ids
    pub serviceids: Option<String>,
    /// Comma-separated domain ids
    pub domainids: Option<String>,
    /// Comma-separated addon ids
    pub addonids: Option<String>,
}

impl GenInvoicesRequest {
    /// Create a builder.
    pub fn builder() -> GenInvoicesRequestBuilder {
        GenInvoicesRequestBuilder::default()
    }

    /// Generate due invoices for one client.
    pub fn for_client(clientid: impl Into<Id>) -> Self {
        Self {
            clientid: Some(clientid.into()),
            ..Default::default()
        }
    }
}

api_request!(GenInvoicesRequest => "GenInvoices", GenInvoicesResponse);

/// `GenInvoices` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenInvoicesResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Number of invoices created
    #[serde(default, deserialize_with = "lenient_u64")]
    pub numcreated: Option<u64>,
    /// Most recent invoice created
    #[serde(default)]
    pub latestinvoiceid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

// ---------------------------------------------------------------------------
// Pay methods
// ---------------------------------------------------------------------------

/// Pay method kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayMethodType {
    /// Locally stored bank account
    BankAccount,
    /// Locally stored card
    CreditCard,
    /// Tokenised bank account held by a gateway
    RemoteBankAccount,
    /// Tokenised card held by a gateway
    RemoteCreditCard,
}

/// `AddPayMethod` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddPayMethodRequest {
    /// Owning client
    pub clientid: Id,
    /// Kind of pay method
    #[serde(rename = "type")]
    pub pay_method_type: PayMethodType,
    /// Label
    #[builder(default)]
    pub description: Option<String>,
    /// Gateway for remote pay methods
    #[builder(default)]
    pub gateway_module_name: Option<String>,
    /// Card number
    #[builder(default)]
    pub card_number: Option<String>,
    /// Card expiry, `MMYY`
    #[builder(default)]
    pub card_expiry: Option<String>,
    /// Bank name
    #[builder(default)]
    pub bank_name: Option<String>,
    /// `Checking` or `Savings`
    #[builder(default)]
    pub bank_account_type: Option<String>,
    /// Routing / sort code
    #[builder(default)]
    pub bank_code: Option<String>,
    /// Account number
    #[builder(default)]
    pub bank_account: Option<String>,
    /// Make this the client's default
    #[builder(default)]
    pub set_as_default: Option<bool>,
}

impl AddPayMethodRequest {
    /// Create a builder.
    pub fn builder() -> AddPayMethodRequestBuilder {
        AddPayMethodRequestBuilder::default()
    }
}

fn validate_add_pay_method(request: &AddPayMethodRequest) -> Result<()> {
    require_id("clientid", &request.clientid)
}

api_request!(AddPayMethodRequest => "AddPayMethod", PayMethodIdResponse, validate = validate_add_pay_method);

/// Reply of the pay method mutations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayMethodIdResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Owning client
    #[serde(default)]
    pub clientid: Option<Id>,
    /// Pay method affected
    #[serde(default)]
    pub paymethodid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetPayMethods` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct GetPayMethodsRequest {
    /// Owning client
    pub clientid: Id,
    /// Single pay method lookup
    #[builder(default)]
    pub paymethodid: Option<Id>,
    /// Kind filter
    #[serde(rename = "type")]
    #[builder(default)]
    pub pay_method_type: Option<PayMethodType>,
}

impl GetPayMethodsRequest {
    /// Create a builder.
    pub fn builder() -> GetPayMethodsRequestBuilder {
        GetPayMethodsRequestBuilder::default()
    }
}

fn validate_get_pay_methods(request: &GetPayMethodsRequest) -> Result<()> {
    require_id("clientid", &request.clientid)
}

api_request!(GetPayMethodsRequest => "GetPayMethods", GetPayMethodsResponse, validate = validate_get_pay_methods);

/// A stored pay method.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayMethod {
    /// Pay method id
    pub id: Id,
    /// Kind, as reported
    #[serde(rename = "type", default)]
    pub pay_method_type: Option<String>,
    /// Label
    #[serde(default)]
    pub description: Option<String>,
    /// Gateway holding the token
    #[serde(default)]
    pub gateway_name: Option<String>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetPayMethods` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetPayMethodsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Owning client
    #[serde(default)]
    pub clientid: Option<Id>,
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub paymethods: Vec<PayMethod>,
}

/// `UpdatePayMethod` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdatePayMethodRequest {
    /// Owning client
    pub clientid: Id,
    /// Pay method to update
    pub paymethodid: Id,
    /// Card number
    #[builder(default)]
    pub card_number: Option<String>,
    /// Card expiry, `MMYY`
    #[builder(default)]
    pub card_expiry: Option<String>,
    /// Bank name
    #[builder(default)]
    pub bank_name: Option<String>,
    /// `Checking` or `Savings`
    #[builder(default)]
    pub bank_account_type: Option<String>,
    /// Routing / sort code
    #[builder(default)]
    pub bank_code: Option<String>,
    /// Account number
    #[builder(default)]
    pub bank_account: Option<String>,
    /// Make this the client's default
    #[builder(default)]
    pub set_as_default: Option<bool>,
}

impl UpdatePayMethodRequest {
    /// Create a builder.
    pub fn builder() -> UpdatePayMethodRequestBuilder {
        UpdatePayMethodRequestBuilder::default()
    }
}

fn validate_update_pay_method(request: &UpdatePayMethodRequest) -> Result<()> {
    require_id("clientid", &request.clientid)?;
    require_id("paymethodid", &request.paymethodid)
}

api_request!(UpdatePayMethodRequest => "UpdatePayMethod", PayMethodIdResponse, validate = validate_update_pay_method);

/// `DeletePayMethod` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DeletePayMethodRequest {
    /// Owning client
    pub clientid: Id,
    /// Pay method to delete
    pub paymethodid: Id,
    /// Fail if the gateway cannot delete its token
    pub failonremotefailure: Option<bool>,
}

impl DeletePayMethodRequest {
    /// Delete a pay method.
    pub fn new(clientid: impl Into<Id>, paymethodid: impl Into<Id>) -> Self {
        Self {
            clientid: clientid.into(),
            paymethodid: paymethodid.into(),
            failonremotefailure: None,
        }
    }
}

fn validate_delete_pay_method(request: &DeletePayMethodRequest) -> Result<()> {
    require_id("clientid", &request.clientid)?;
    require_id("paymethodid", &request.paymethodid)
}

api_request!(DeletePayMethodRequest => "DeletePayMethod", PayMethodIdResponse, validate = validate_delete_pay_method);

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// `AddCredit` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddCreditRequest {
    /// Client to credit
    pub clientid: Id,
    /// Reason
    pub description: String,
    /// Amount
    pub amount: f64,
    /// Credit date
    #[builder(default)]
    pub date: Option<NaiveDate>,
    /// Admin recorded as issuing the credit
    #[builder(default)]
    pub adminid: Option<Id>,
    /// `add` or `remove`
    #[serde(rename = "type")]
    #[builder(default)]
    pub credit_type: Option<String>,
}

impl AddCreditRequest {
    /// Create a builder.
    pub fn builder() -> AddCreditRequestBuilder {
        AddCreditRequestBuilder::default()
    }
}

fn validate_add_credit(request: &AddCreditRequest) -> Result<()> {
    require_id("clientid", &request.clientid)?;
    require_non_empty("description", &request.description)?;
    require_positive("amount", request.amount)
}

api_request!(AddCreditRequest => "AddCredit", AddCreditResponse, validate = validate_add_credit);

/// `AddCredit` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCreditResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Client credit balance afterwards
    #[serde(default, deserialize_with = "lenient_f64")]
    pub newbalance: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GetCredits` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct GetCreditsRequest {
    /// Client whose credit log to read
    pub clientid: Id,
}

impl GetCreditsRequest {
    /// Read a client's credit log.
    pub fn new(clientid: impl Into<Id>) -> Self {
        Self {
            clientid: clientid.into(),
        }
    }
}

fn validate_get_credits(request: &GetCreditsRequest) -> Result<()> {
    require_id("clientid", &request.clientid)
}

api_request!(GetCreditsRequest => "GetCredits", GetCreditsResponse, validate = validate_get_credits);

/// A credit log entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credit {
    /// Entry id
    pub id: Id,
    /// Entry date
    #[serde(default)]
    pub date: Option<String>,
    /// Reason
    #[serde(default)]
    pub description: Option<String>,
    /// Amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `credits` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CreditList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub credit: Vec<Credit>,
}

/// `GetCredits` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetCreditsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total entries
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub credits: CreditList,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// `AddTransaction` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct AddTransactionRequest {
    /// Gateway module name
    pub paymentmethod: String,
    /// Client the transaction belongs to
    #[builder(default)]
    pub userid: Option<Id>,
    /// Invoice the transaction pays
    #[builder(default)]
    pub invoiceid: Option<Id>,
    /// Gateway transaction id
    #[builder(default)]
    pub transid: Option<String>,
    /// Description
    #[builder(default)]
    pub description: Option<String>,
    /// Transaction date
    #[builder(default)]
    pub date: Option<String>,
    /// Money received
    #[builder(default)]
    pub amountin: Option<f64>,
    /// Gateway fees
    #[builder(default)]
    pub fees: Option<f64>,
    /// Money refunded
    #[builder(default)]
    pub amountout: Option<f64>,
    /// Exchange rate
    #[builder(default)]
    pub rate: Option<f64>,
    /// Add the amount as credit
    #[builder(default)]
    pub credit: Option<bool>,
}

impl AddTransactionRequest {
    /// Create a builder.
    pub fn builder() -> AddTransactionRequestBuilder {
        AddTransactionRequestBuilder::default()
    }
}

fn validate_add_transaction(request: &AddTransactionRequest) -> Result<()> {
    require_non_empty("paymentmethod", &request.paymentmethod)?;
    for (field, amount) in [
        ("amountin", request.amountin),
        ("fees", request.fees),
        ("amountout", request.amountout),
    ] {
        if let Some(amount) = amount {
            require_non_negative(field, amount)?;
        }
    }
    Ok(())
}

api_request!(AddTransactionRequest => "AddTransaction", Ack, validate = validate_add_transaction);

/// `GetTransactions` filters.
#[derive(Debug, Clone, Default, Serialize, Builder)]
#[builder(setter(into, strip_option), default, build_fn(error = "crate::Error"))]
pub struct GetTransactionsRequest {
    /// Invoice filter
    pub invoiceid: Option<Id>,
    /// Client filter
    pub clientid: Option<Id>,
    /// Gateway transaction id filter
    pub transid: Option<String>,
}

impl GetTransactionsRequest {
    /// Create a builder.
    pub fn builder() -> GetTransactionsRequestBuilder {
        GetTransactionsRequestBuilder::default()
    }

    /// All transactions of a client.
    pub fn for_client(clientid: impl Into<Id>) -> Self {
        Self {
            clientid: Some(clientid.into()),
            ..Default::default()
        }
    }
}

api_request!(GetTransactionsRequest => "GetTransactions", GetTransactionsResponse);

/// A transaction record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transaction {
    /// Transaction id
    pub id: Id,
    /// Client
    #[serde(default)]
    pub userid: Option<Id>,
    /// Gateway module name
    #[serde(default)]
    pub gateway: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Money received
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amountin: Option<f64>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// `transactions` wrapper.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TransactionList {
    /// Records
    #[serde(default, deserialize_with = "one_or_many")]
    pub transaction: Vec<Transaction>,
}

/// `GetTransactions` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTransactionsResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Total matches
    #[serde(default, deserialize_with = "lenient_u64")]
    pub totalresults: Option<u64>,
    /// Records
    #[serde(default, deserialize_with = "empty_as_default")]
    pub transactions: TransactionList,
}

/// `UpdateTransaction` parameters.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct UpdateTransactionRequest {
    /// Transaction to update
    pub transactionid: Id,
    /// Client
    #[builder(default)]
    pub userid: Option<Id>,
    /// Invoice
    #[builder(default)]
    pub invoiceid: Option<Id>,
    /// Gateway transaction id
    #[builder(default)]
    pub transid: Option<String>,
    /// Transaction date
    #[builder(default)]
    pub date: Option<String>,
    /// Gateway module name
    #[builder(default)]
    pub gateway: Option<String>,
    /// Money received
    #[builder(default)]
    pub amountin: Option<f64>,
    /// Gateway fees
    #[builder(default)]
    pub fees: Option<f64>,
    /// Money refunded
    #[builder(default)]
    pub amountout: Option<f64>,
    /// Exchange rate
    #[builder(default)]
    pub rate: Option<f64>,
    /// Credit flag
    #[builder(default)]
    pub credit: Option<bool>,
    /// Description
    #[builder(default)]
    pub description: Option<String>,
}

impl UpdateTransactionRequest {
    /// Create a builder.
    pub fn builder() -> UpdateTransactionRequestBuilder {
        UpdateTransactionRequestBuilder::default()
    }
}

fn validate_update_transaction(request: &UpdateTransactionRequest) -> Result<()> {
    require_id("transactionid", &request.transactionid)?;
    require_any(
        "UpdateTransaction",
        &[
            ("userid", request.userid.is_some()),
            ("invoiceid", request.invoiceid.is_some()),
            ("transid", request.transid.is_some()),
            ("date", request.date.is_some()),
            ("gateway", request.gateway.is_some()),
            ("amountin", request.amountin.is_some()),
            ("fees", request.fees.is_some()),
            ("amountout", request.amountout.is_some()),
            ("rate", request.rate.is_some()),
            ("credit", request.credit.is_some()),
            ("description", request.description.is_some()),
        ],
    )
}

api_request!(UpdateTransactionRequest => "UpdateTransaction", UpdateTransactionResponse, validate = validate_update_transaction);

/// `UpdateTransaction` reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateTransactionResponse {
    /// Discriminator
    pub result: ResultStatus,
    /// Updated transaction
    #[serde(default)]
    pub transactionid: Option<Id>,
    /// Other fields
    #[serde(flatten)]
    pub extra: Extra,
}
