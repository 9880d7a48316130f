//! In-process fake of the platform's remote API
//!
//! Mounted on a wiremock server, it answers every procedure the scenarios
//! use from an in-memory state, with the platform's envelope and its list
//! spellings (wrapper objects, empty strings for empty lists, string ids in
//! some replies and numbers in others).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value, json};
use whmcs::encoding::parse_line_items_param;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

type Reply = Result<Value, String>;

const ENCRYPTED_PREFIX: &str = "enc$";

/// Decoded form body.
struct Form(HashMap<String, String>);

impl Form {
    fn parse(body: &[u8]) -> Self {
        Self(url::form_urlencoded::parse(body).into_owned().collect())
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> Result<&str, String> {
        self.get(key)
            .ok_or_else(|| format!("Missing required parameter: {key}"))
    }

    fn id(&self, key: &str) -> Result<u64, String> {
        let raw = self.require(key)?;
        raw.parse()
            .map_err(|_| format!("Invalid {key}: {raw}"))
    }

    fn opt_id(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn amount(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some("true" | "1" | "on"))
    }

    /// Values of `prefix{N}` (suffix) or `prefix[N]` (bracket) for N = 0, 1, …
    fn indexed(&self, prefix: &str, bracket: bool) -> Vec<&str> {
        (0..)
            .map(|i| {
                if bracket {
                    format!("{prefix}[{i}]")
                } else {
                    format!("{prefix}{i}")
                }
            })
            .map_while(|key| self.0.get(&key).map(String::as_str))
            .collect()
    }

    fn page(&self) -> (usize, usize) {
        let start = self.get("limitstart").and_then(|v| v.parse().ok()).unwrap_or(0);
        let num = self.get("limitnum").and_then(|v| v.parse().ok()).unwrap_or(25);
        (start, num)
    }
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Wrap a list the way the platform does: `{"<item>": [...]}`, or an empty
/// string when there is nothing to list.
fn wrapped(item: &str, records: Vec<Value>) -> Value {
    if records.is_empty() {
        json!("")
    } else {
        json!({ item: records })
    }
}

fn paged(records: Vec<Value>, (start, num): (usize, usize)) -> Vec<Value> {
    records.into_iter().skip(start).take(num).collect()
}

#[derive(Debug, Clone)]
struct Quote {
    subject: String,
    stage: String,
    validuntil: String,
    userid: Option<u64>,
    total: f64,
}

#[derive(Debug, Clone)]
struct InvoiceItem {
    id: u64,
    description: String,
    amount: f64,
}

#[derive(Debug, Clone)]
struct Invoice {
    userid: u64,
    status: String,
    items: Vec<InvoiceItem>,
    paid: f64,
}

impl Invoice {
    fn total(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    fn balance(&self) -> f64 {
        (self.total() - self.paid).max(0.0)
    }

    fn record_payment(&mut self, amount: f64) {
        self.paid += amount;
        if self.balance() <= f64::EPSILON {
            self.status = "Paid".to_string();
        }
    }
}

#[derive(Debug, Clone)]
struct Transaction {
    userid: Option<u64>,
    gateway: String,
    description: String,
    amountin: f64,
}

#[derive(Debug, Clone)]
struct Service {
    clientid: u64,
    orderid: u64,
    pid: u64,
    domain: String,
    billingcycle: String,
    amount: f64,
    notes: String,
}

#[derive(Debug, Clone)]
struct Message {
    id: u64,
    text: String,
}

#[derive(Debug, Clone)]
struct Ticket {
    tid: String,
    deptid: u64,
    userid: Option<u64>,
    subject: String,
    status: String,
    /// The opening message has no reply id
    opening: String,
    replies: Vec<Message>,
    notes: Vec<Message>,
}

#[derive(Debug, Clone)]
struct Announcement {
    date: String,
    title: String,
    text: String,
}

/// Mutable platform state.
#[derive(Debug)]
struct State {
    identifier: String,
    secret: String,
    next_id: u64,
    calls: Vec<String>,
    failures: HashMap<String, (usize, String)>,
    product_groups: Vec<u64>,
    modules_assigned: bool,
    internal_api_only: bool,
    credit_balance: f64,
    admin_notes: String,
    settings: BTreeMap<String, String>,
    quotes: BTreeMap<u64, Quote>,
    invoices: BTreeMap<u64, Invoice>,
    billable_items: BTreeMap<u64, String>,
    pay_methods: BTreeMap<u64, (u64, String)>,
    credits: Vec<(u64, String, f64)>,
    transactions: BTreeMap<u64, Transaction>,
    products: BTreeMap<u64, (u64, String)>,
    services: BTreeMap<u64, Service>,
    announcements: BTreeMap<u64, Announcement>,
    client_notes: BTreeMap<u64, (u64, String)>,
    tickets: BTreeMap<u64, Ticket>,
    activity: Vec<(u64, String)>,
    banned_ips: Vec<String>,
}

impl State {
    fn new(identifier: String, secret: String) -> Self {
        let mut settings = BTreeMap::new();
        settings.insert("Language".to_string(), "english".to_string());
        settings.insert("CompanyName".to_string(), "Demo Hosting".to_string());

        Self {
            identifier,
            secret,
            next_id: 100,
            calls: Vec::new(),
            failures: HashMap::new(),
            product_groups: vec![1],
            modules_assigned: false,
            internal_api_only: true,
            credit_balance: 0.0,
            admin_notes: String::new(),
            settings,
            quotes: BTreeMap::new(),
            invoices: BTreeMap::new(),
            billable_items: BTreeMap::new(),
            pay_methods: BTreeMap::new(),
            credits: Vec::new(),
            transactions: BTreeMap::new(),
            products: BTreeMap::new(),
            services: BTreeMap::new(),
            announcements: BTreeMap::new(),
            client_notes: BTreeMap::new(),
            tickets: BTreeMap::new(),
            activity: Vec::new(),
            banned_ips: Vec::new(),
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn dispatch(&mut self, action: &str, form: &Form) -> Reply {
        if let Some((successes, message)) = self.failures.get(action) {
            let seen = self.calls.iter().filter(|a| *a == action).count();
            if seen > *successes {
                return Err(message.clone());
            }
        }
        match action {
            "CreateQuote" => self.create_quote(form),
            "GetQuotes" => self.get_quotes(form),
            "UpdateQuote" => self.update_quote(form),
            "AcceptQuote" => self.accept_quote(form),
            "SendQuote" => self.send_quote(form),
            "DeleteQuote" => self.delete_quote(form),
            "AddBillableItem" => self.add_billable_item(form),
            "CreateInvoice" => self.create_invoice(form),
            "GetInvoices" => self.get_invoices(form),
            "GetInvoice" => self.get_invoice(form),
            "UpdateInvoice" => self.update_invoice(form),
            "AddInvoicePayment" => self.add_invoice_payment(form),
            "ApplyCredit" => self.apply_credit(form),
            "CapturePayment" => self.capture_payment(form),
            "GenInvoices" => Ok(json!({ "numcreated": 0, "latestinvoiceid": 0 })),
            "AddPayMethod" => self.add_pay_method(form),
            "GetPayMethods" => self.get_pay_methods(form),
            "UpdatePayMethod" => self.update_pay_method(form),
            "DeletePayMethod" => self.delete_pay_method(form),
            "AddCredit" => self.add_credit(form),
            "GetCredits" => self.get_credits(form),
            "AddTransaction" => self.add_transaction(form),
            "GetTransactions" => self.get_transactions(form),
            "UpdateTransaction" => self.update_transaction(form),
            "AddProduct" => self.add_product(form),
            "AddOrder" => self.add_order(form),
            "GetClientsProducts" => self.get_clients_products(form),
            "UpdateClientProduct" => self.update_client_product(form),
            "ModuleCreate" | "ModuleSuspend" | "ModuleUnsuspend" | "ModuleChangePackage"
            | "ModuleChangePw" | "ModuleCustom" => self.module_command(form),
            "UpgradeProduct" => self.upgrade_product(form),
            "AddAnnouncement" => self.add_announcement(form),
            "GetAnnouncements" => self.get_announcements(form),
            "UpdateAnnouncement" => self.update_announcement(form),
            "DeleteAnnouncement" => self.delete_announcement(form),
            "AddCancelRequest" => self.add_cancel_request(form),
            "AddClientNote" => self.add_client_note(form),
            "OpenTicket" => self.open_ticket(form),
            "GetTicket" => self.get_ticket(form),
            "AddTicketNote" => self.add_ticket_note(form),
            "AddTicketReply" => self.add_ticket_reply(form),
            "UpdateTicket" => self.update_ticket(form),
            "MergeTicket" => self.merge_ticket(form),
            "BlockTicketSender" => self.block_ticket_sender(form),
            "UpdateTicketReply" => self.update_ticket_reply(form),
            "DeleteTicketReply" => self.delete_ticket_reply(form),
            "DeleteTicketNote" => self.delete_ticket_note(form),
            "DeleteTicket" => self.delete_ticket(form),
            "AddBannedIp" => {
                self.banned_ips.push(form.require("ip")?.to_string());
                Ok(json!({}))
            }
            "EncryptPassword" => {
                let plain = form.require("password2")?;
                let reversed: String = plain.chars().rev().collect();
                Ok(json!({ "password": format!("{ENCRYPTED_PREFIX}{reversed}") }))
            }
            "DecryptPassword" => {
                let encrypted = form.require("password2")?;
                let reversed = encrypted
                    .strip_prefix(ENCRYPTED_PREFIX)
                    .ok_or_else(|| "Decryption failed".to_string())?;
                Ok(json!({ "password": reversed.chars().rev().collect::<String>() }))
            }
            "GetActivityLog" => {
                let entries: Vec<Value> = self
                    .activity
                    .iter()
                    .rev()
                    .map(|(id, description)| {
                        json!({
                            "id": id,
                            "date": "2026-10-14 09:00:00",
                            "description": description,
                            "username": "admin"
                        })
                    })
                    .collect();
                let total = entries.len();
                Ok(json!({
                    "totalresults": total,
                    "activity": wrapped("entry", paged(entries, form.page()))
                }))
            }
            "GetAdminDetails" => Ok(json!({
                "adminid": 1,
                "name": "Demo Admin",
                "notes": self.admin_notes,
                "signature": "",
                "allowedpermissions": "Main Homepage,My Account"
            })),
            "GetAdminUsers" => Ok(json!({
                "count": 1,
                "admin_users": [{ "id": 1, "username": "admin", "email": "admin@example.com" }]
            })),
            "GetAutomationLog" => Ok(json!({
                "currentDatetime": "2026-10-14 12:00:00",
                "startdate": "2026-10-14",
                "enddate": "2026-10-14",
                "statistics": []
            })),
            "GetConfigurationValue" => {
                let setting = form.require("setting")?;
                let value = self
                    .settings
                    .get(setting)
                    .ok_or_else(|| format!("Invalid Setting '{setting}'"))?;
                Ok(json!({ "setting": setting, "value": value }))
            }
            "SetConfigurationValue" => {
                if self.internal_api_only {
                    return Err("API Command Restricted to Internal API".to_string());
                }
                let setting = form.require("setting")?.to_string();
                let value = form.get("value").unwrap_or_default().to_string();
                self.settings.insert(setting, value);
                Ok(json!({}))
            }
            "GetCurrencies" => Ok(json!({
                "totalresults": 1,
                "currencies": { "currency": [
                    { "id": 1, "code": "USD", "prefix": "$", "suffix": " USD", "format": 1, "rate": "1.00000" }
                ] }
            })),
            "GetEmailTemplates" => Ok(json!({
                "totalresults": 1,
                "emailtemplates": { "emailtemplate": [
                    { "id": 1, "name": "Invoice Created", "subject": "Customer Invoice", "custom": false }
                ] }
            })),
            "GetPaymentMethods" => Ok(json!({
                "totalresults": 2,
                "paymentmethods": { "paymentmethod": [
                    { "module": "banktransfer", "displayname": "Bank Transfer" },
                    { "module": "paypal", "displayname": "PayPal" }
                ] }
            })),
            "GetStaffOnline" => Ok(json!({ "totalresults": 0, "staffonline": "" })),
            "GetStats" => Ok(json!({
                "income_today": "$0.00 USD",
                "income_thismonth": "$0.00 USD",
                "income_thisyear": "$0.00 USD",
                "orders_pending": 0
            })),
            "GetToDoItems" => Ok(json!({ "totalresults": 0, "startnumber": 0, "numreturned": 0 })),
            "GetToDoItemStatuses" => Ok(json!({
                "totalresults": 2,
                "todoitemstatuses": { "status": [
                    { "type": "New", "count": 0 },
                    { "type": "Pending", "count": "0" }
                ] }
            })),
            "LogActivity" => {
                let id = self.allocate();
                self.activity.push((id, form.require("description")?.to_string()));
                Ok(json!({}))
            }
            "SendAdminEmail" => {
                if form.get("messagename").is_none() && form.get("custommessage").is_none() {
                    return Err("A message name or custom message is required".to_string());
                }
                Ok(json!({}))
            }
            "SendEmail" => {
                form.id("id")?;
                Ok(json!({}))
            }
            "TriggerNotificationEvent" => {
                form.require("notification_identifier")?;
                Ok(json!({}))
            }
            "UpdateAdminNotes" => {
                self.admin_notes = form.get("notes").unwrap_or_default().to_string();
                Ok(json!({}))
            }
            "WhmcsDetails" => Ok(json!({
                "whmcs": { "version": "8.10.1", "major": 8, "canonicalversion": "8.10.1-release.1" }
            })),
            _ => Err("Command Not Found".to_string()),
        }
    }

    // Quotes

    fn quote_json(id: u64, quote: &Quote) -> Value {
        json!({
            "id": id.to_string(),
            "subject": quote.subject,
            "stage": quote.stage,
            "validuntil": quote.validuntil,
            "userid": quote.userid.map(|u| u.to_string()).unwrap_or_default(),
            "total": money(quote.total),
        })
    }

    fn create_quote(&mut self, form: &Form) -> Reply {
        let subject = form.require("subject")?.to_string();
        let stage = form.require("stage")?.to_string();
        let validuntil = form.require("validuntil")?.to_string();
        let total = match form.get("lineitems") {
            Some(encoded) => parse_line_items_param(encoded)
                .map_err(|e| format!("Invalid line items: {e}"))?
                .iter()
                .map(|item| f64::from(item.qty) * item.up)
                .sum(),
            None => 0.0,
        };
        let id = self.allocate();
        self.quotes.insert(
            id,
            Quote {
                subject,
                stage,
                validuntil,
                userid: form.opt_id("userid"),
                total,
            },
        );
        Ok(json!({ "quoteid": id }))
    }

    fn get_quotes(&mut self, form: &Form) -> Reply {
        let filter = form.opt_id("quoteid");
        let records: Vec<Value> = self
            .quotes
            .iter()
            .filter(|(id, _)| filter.is_none_or(|f| f == **id))
            .map(|(id, q)| Self::quote_json(*id, q))
            .collect();
        let total = records.len();
        let page = paged(records, form.page());
        Ok(json!({
            "totalresults": total,
            "startnumber": form.page().0,
            "numreturned": page.len(),
            "quotes": wrapped("quote", page),
        }))
    }

    fn quote_mut(&mut self, form: &Form) -> Result<(u64, &mut Quote), String> {
        let id = form.id("quoteid")?;
        self.quotes
            .get_mut(&id)
            .map(|q| (id, q))
            .ok_or_else(|| "Quote ID Not Found".to_string())
    }

    fn update_quote(&mut self, form: &Form) -> Reply {
        let (id, quote) = self.quote_mut(form)?;
        if let Some(subject) = form.get("subject") {
            quote.subject = subject.to_string();
        }
        if let Some(stage) = form.get("stage") {
            quote.stage = stage.to_string();
        }
        Ok(json!({ "quoteid": id }))
    }

    fn accept_quote(&mut self, form: &Form) -> Reply {
        let (_, quote) = self.quote_mut(form)?;
        if quote.stage == "Accepted" {
            return Err("Quote Already Accepted".to_string());
        }
        quote.stage = "Accepted".to_string();
        let (userid, subject, total) = (quote.userid.unwrap_or(0), quote.subject.clone(), quote.total);

        let invoice_id = self.allocate();
        let item_id = self.allocate();
        self.invoices.insert(
            invoice_id,
            Invoice {
                userid,
                status: "Unpaid".to_string(),
                items: vec![InvoiceItem {
                    id: item_id,
                    description: subject,
                    amount: total,
                }],
                paid: 0.0,
            },
        );
        Ok(json!({ "invoiceid": invoice_id }))
    }

    fn send_quote(&mut self, form: &Form) -> Reply {
        let (_, quote) = self.quote_mut(form)?;
        if quote.stage == "Draft" {
            quote.stage = "Delivered".to_string();
        }
        Ok(json!({}))
    }

    fn delete_quote(&mut self, form: &Form) -> Reply {
        let id = form.id("quoteid")?;
        self.quotes
            .remove(&id)
            .map(|_| json!({}))
            .ok_or_else(|| "Quote ID Not Found".to_string())
    }

    // Billable items and invoices

    fn add_billable_item(&mut self, form: &Form) -> Reply {
        form.id("clientid")?;
        let description = form.require("description")?.to_string();
        form.require("amount")?;
        let id = self.allocate();
        self.billable_items.insert(id, description);
        Ok(json!({ "billableid": id }))
    }

    fn create_invoice(&mut self, form: &Form) -> Reply {
        let userid = form.id("userid")?;
        let descriptions = form.indexed("itemdescription", false);
        let amounts = form.indexed("itemamount", false);
        let mut items = Vec::new();
        for (i, description) in descriptions.into_iter().enumerate() {
            let amount = amounts.get(i).and_then(|a| a.parse().ok()).unwrap_or(0.0);
            items.push(InvoiceItem {
                id: self.allocate(),
                description: description.to_string(),
                amount,
            });
        }
        let status = form.get("status").unwrap_or("Unpaid").to_string();
        let id = self.allocate();
        self.invoices.insert(
            id,
            Invoice {
                userid,
                status: status.clone(),
                items,
                paid: 0.0,
            },
        );
        Ok(json!({ "invoiceid": id, "status": status }))
    }

    fn get_invoices(&mut self, form: &Form) -> Reply {
        let userid = form.opt_id("userid");
        let records: Vec<Value> = self
            .invoices
            .iter()
            .filter(|(_, inv)| userid.is_none_or(|u| u == inv.userid))
            .map(|(id, inv)| {
                json!({
                    "id": id.to_string(),
                    "userid": inv.userid.to_string(),
                    "status": inv.status,
                    "total": money(inv.total()),
                })
            })
            .collect();
        let total = records.len();
        let page = paged(records, form.page());
        Ok(json!({
            "totalresults": total,
            "numreturned": page.len(),
            "invoices": wrapped("invoice", page),
        }))
    }

    fn invoice_mut(&mut self, form: &Form) -> Result<(u64, &mut Invoice), String> {
        let id = form.id("invoiceid")?;
        self.invoices
            .get_mut(&id)
            .map(|inv| (id, inv))
            .ok_or_else(|| "Invoice ID Not Found".to_string())
    }

    fn get_invoice(&mut self, form: &Form) -> Reply {
        let (id, invoice) = self.invoice_mut(form)?;
        let items: Vec<Value> = invoice
            .items
            .iter()
            .map(|item| {
                json!({
                    "id": item.id.to_string(),
                    "type": "",
                    "relid": "0",
                    "description": item.description,
                    "amount": money(item.amount),
                    "taxed": "0",
                })
            })
            .collect();
        Ok(json!({
            "invoiceid": id.to_string(),
            "userid": invoice.userid.to_string(),
            "status": invoice.status,
            "total": money(invoice.total()),
            "balance": money(invoice.balance()),
            "items": wrapped("item", items),
            "transactions": "",
        }))
    }

    fn update_invoice(&mut self, form: &Form) -> Reply {
        let descriptions: Vec<String> = form
            .indexed("itemdescription", true)
            .into_iter()
            .map(str::to_string)
            .collect();
        let amounts: Vec<Option<f64>> = form
            .indexed("itemamount", true)
            .into_iter()
            .map(|a| a.parse().ok())
            .collect();
        let new_descriptions: Vec<String> = form
            .indexed("newitemdescription", true)
            .into_iter()
            .map(str::to_string)
            .collect();
        let new_amounts: Vec<f64> = form
            .indexed("newitemamount", true)
            .into_iter()
            .map(|a| a.parse().unwrap_or(0.0))
            .collect();
        let mut new_ids = Vec::new();
        for _ in &new_descriptions {
            new_ids.push(self.allocate());
        }

        let (id, invoice) = self.invoice_mut(form)?;
        for (i, description) in descriptions.into_iter().enumerate() {
            let item = invoice
                .items
                .get_mut(i)
                .ok_or_else(|| format!("Invoice item {i} not found"))?;
            item.description = description;
            if let Some(Some(amount)) = amounts.get(i) {
                item.amount = *amount;
            }
        }
        for ((description, item_id), i) in new_descriptions.into_iter().zip(new_ids).zip(0..) {
            invoice.items.push(InvoiceItem {
                id: item_id,
                description,
                amount: new_amounts.get(i).copied().unwrap_or(0.0),
            });
        }
        if let Some(status) = form.get("status") {
            invoice.status = status.to_string();
        }
        Ok(json!({ "invoiceid": id }))
    }

    fn add_invoice_payment(&mut self, form: &Form) -> Reply {
        form.require("transid")?;
        form.require("gateway")?;
        let amount = form.amount("amount");
        let (_, invoice) = self.invoice_mut(form)?;
        let amount = amount.unwrap_or_else(|| invoice.balance());
        invoice.record_payment(amount);
        Ok(json!({}))
    }

    fn apply_credit(&mut self, form: &Form) -> Reply {
        let amount = form
            .amount("amount")
            .ok_or_else(|| "Missing required parameter: amount".to_string())?;
        if amount > self.credit_balance {
            return Err("Amount exceeds customer credit balance".to_string());
        }
        self.credit_balance -= amount;
        let (id, invoice) = self.invoice_mut(form)?;
        invoice.record_payment(amount);
        let paid = invoice.status == "Paid";
        Ok(json!({
            "invoiceid": id,
            "amount": money(amount),
            "invoicepaid": if paid { "true" } else { "false" },
        }))
    }

    fn capture_payment(&mut self, form: &Form) -> Reply {
        let (_, invoice) = self.invoice_mut(form)?;
        if invoice.status != "Paid" {
            // No card on file for the demo client
            return Err("Payment Attempt Failed".to_string());
        }
        Ok(json!({}))
    }

    // Pay methods, credits, transactions

    fn add_pay_method(&mut self, form: &Form) -> Reply {
        let clientid = form.id("clientid")?;
        let kind = form.get("type").unwrap_or("BankAccount").to_string();
        let id = self.allocate();
        self.pay_methods.insert(id, (clientid, kind));
        Ok(json!({ "paymethodid": id, "clientid": clientid }))
    }

    fn get_pay_methods(&mut self, form: &Form) -> Reply {
        let clientid = form.id("clientid")?;
        let filter = form.opt_id("paymethodid");
        let records: Vec<Value> = self
            .pay_methods
            .iter()
            .filter(|(id, (owner, _))| *owner == clientid && filter.is_none_or(|f| f == **id))
            .map(|(id, (_, kind))| {
                json!({
                    "id": id,
                    "type": kind,
                    "description": "",
                    "gateway_name": "",
                    "bank_name": "",
                })
            })
            .collect();
        Ok(json!({ "clientid": clientid, "paymethods": records }))
    }

    fn pay_method_id(&self, form: &Form) -> Result<(u64, u64), String> {
        let clientid = form.id("clientid")?;
        let id = form.id("paymethodid")?;
        match self.pay_methods.get(&id) {
            Some((owner, _)) if *owner == clientid => Ok((clientid, id)),
            _ => Err("Pay Method ID Not Found".to_string()),
        }
    }

    fn update_pay_method(&mut self, form: &Form) -> Reply {
        let (clientid, id) = self.pay_method_id(form)?;
        Ok(json!({ "paymethodid": id, "clientid": clientid }))
    }

    fn delete_pay_method(&mut self, form: &Form) -> Reply {
        let (clientid, id) = self.pay_method_id(form)?;
        self.pay_methods.remove(&id);
        Ok(json!({ "paymethodid": id, "clientid": clientid }))
    }

    fn add_credit(&mut self, form: &Form) -> Reply {
        form.id("clientid")?;
        let description = form.require("description")?.to_string();
        let amount = form
            .amount("amount")
            .ok_or_else(|| "Missing required parameter: amount".to_string())?;
        let id = self.allocate();
        self.credits.push((id, description, amount));
        self.credit_balance += amount;
        Ok(json!({ "newbalance": money(self.credit_balance) }))
    }

    fn get_credits(&mut self, form: &Form) -> Reply {
        let clientid = form.id("clientid")?;
        let records: Vec<Value> = self
            .credits
            .iter()
            .map(|(id, description, amount)| {
                json!({
                    "id": id,
                    "date": "2026-10-14",
                    "description": description,
                    "amount": money(*amount),
                    "relid": 0,
                })
            })
            .collect();
        Ok(json!({
            "totalresults": records.len(),
            "clientid": clientid,
            "credits": wrapped("credit", records),
        }))
    }

    fn add_transaction(&mut self, form: &Form) -> Reply {
        let gateway = form.require("paymentmethod")?.to_string();
        let id = self.allocate();
        self.transactions.insert(
            id,
            Transaction {
                userid: form.opt_id("userid"),
                gateway,
                description: form.get("description").unwrap_or_default().to_string(),
                amountin: form.amount("amountin").unwrap_or(0.0),
            },
        );
        Ok(json!({}))
    }

    fn get_transactions(&mut self, form: &Form) -> Reply {
        let clientid = form.opt_id("clientid");
        let records: Vec<Value> = self
            .transactions
            .iter()
            .filter(|(_, t)| clientid.is_none_or(|c| t.userid == Some(c)))
            .map(|(id, t)| {
                json!({
                    "id": id.to_string(),
                    "userid": t.userid.map(|u| u.to_string()).unwrap_or_default(),
                    "gateway": t.gateway,
                    "description": t.description,
                    "amountin": money(t.amountin),
                })
            })
            .collect();
        Ok(json!({
            "totalresults": records.len(),
            "transactions": wrapped("transaction", records),
        }))
    }

    fn update_transaction(&mut self, form: &Form) -> Reply {
        let id = form.id("transactionid")?;
        let transaction = self
            .transactions
            .get_mut(&id)
            .ok_or_else(|| "Transaction ID Not Found".to_string())?;
        if let Some(description) = form.get("description") {
            transaction.description = description.to_string();
        }
        Ok(json!({ "transactionid": id }))
    }

    // Products, orders, services

    fn add_product(&mut self, form: &Form) -> Reply {
        let name = form.require("name")?.to_string();
        let gid = form.opt_id("gid").unwrap_or(0);
        if !self.product_groups.contains(&gid) {
            return Err("You must supply a valid Product Group ID".to_string());
        }
        let id = self.allocate();
        self.products.insert(id, (gid, name));
        Ok(json!({ "pid": id }))
    }

    fn add_order(&mut self, form: &Form) -> Reply {
        let clientid = form.id("clientid")?;
        form.require("paymentmethod")?;
        let pids = form.indexed("pid", true);
        if pids.is_empty() {
            return Err("No items added to cart so order cannot proceed".to_string());
        }
        let domains = form.indexed("domain", true);
        let cycles = form.indexed("billingcycle", true);
        let prices = form.indexed("priceoverride", true);

        let orderid = self.allocate();
        let mut serviceids = Vec::new();
        for (i, pid) in pids.iter().enumerate() {
            let pid: u64 = pid.parse().map_err(|_| format!("Invalid pid[{i}]"))?;
            if !self.products.contains_key(&pid) {
                return Err(format!("Invalid Product ID: {pid}"));
            }
            let id = self.allocate();
            self.services.insert(
                id,
                Service {
                    clientid,
                    orderid,
                    pid,
                    domain: domains.get(i).copied().unwrap_or_default().to_string(),
                    billingcycle: cycles.get(i).copied().unwrap_or("monthly").to_string(),
                    amount: prices.get(i).and_then(|p| p.parse().ok()).unwrap_or(0.0),
                    notes: String::new(),
                },
            );
            serviceids.push(id.to_string());
        }
        let invoiceid = self.allocate();
        Ok(json!({
            "orderid": orderid,
            "serviceids": serviceids.join(","),
            "addonids": "",
            "domainids": "",
            "invoiceid": invoiceid,
        }))
    }

    fn get_clients_products(&mut self, form: &Form) -> Reply {
        let clientid = form.opt_id("clientid");
        let serviceid = form.opt_id("serviceid");
        let domain = form.get("domain");
        let records: Vec<Value> = self
            .services
            .iter()
            .filter(|(id, s)| {
                clientid.is_none_or(|c| c == s.clientid)
                    && serviceid.is_none_or(|sid| sid == **id)
                    && domain.is_none_or(|d| d == s.domain)
            })
            .map(|(id, s)| {
                let name = self
                    .products
                    .get(&s.pid)
                    .map(|(_, name)| name.clone())
                    .unwrap_or_default();
                let mut cycle = s.billingcycle.clone();
                if let Some(first) = cycle.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                json!({
                    "id": id.to_string(),
                    "clientid": s.clientid.to_string(),
                    "orderid": s.orderid.to_string(),
                    "pid": s.pid.to_string(),
                    "name": name,
                    "domain": s.domain,
                    "status": "Pending",
                    "billingcycle": cycle,
                    "firstpaymentamount": money(s.amount),
                    "recurringamount": money(s.amount),
                    "notes": s.notes,
                })
            })
            .collect();
        let total = records.len();
        let page = paged(records, form.page());
        Ok(json!({
            "clientid": clientid,
            "totalresults": total,
            "startnumber": form.page().0,
            "numreturned": page.len(),
            "products": wrapped("product", page),
        }))
    }

    fn service_mut(&mut self, form: &Form) -> Result<(u64, &mut Service), String> {
        let id = form.id("serviceid")?;
        self.services
            .get_mut(&id)
            .map(|s| (id, s))
            .ok_or_else(|| "Service ID Not Found".to_string())
    }

    fn update_client_product(&mut self, form: &Form) -> Reply {
        let (id, service) = self.service_mut(form)?;
        if let Some(notes) = form.get("notes") {
            service.notes = notes.to_string();
        }
        if let Some(domain) = form.get("domain") {
            service.domain = domain.to_string();
        }
        Ok(json!({ "serviceid": id }))
    }

    fn module_command(&mut self, form: &Form) -> Reply {
        let modules_assigned = self.modules_assigned;
        self.service_mut(form)?;
        if !modules_assigned {
            return Err("Service not assigned to a module".to_string());
        }
        Ok(json!({}))
    }

    fn upgrade_product(&mut self, form: &Form) -> Reply {
        self.service_mut(form)?;
        // Products added through the API carry no pricing, so only a free
        // cycle can be priced
        match form.get("newproductbillingcycle") {
            Some("free") | None => {}
            Some(_) => return Err("Invalid Billing Cycle Requested".to_string()),
        }
        if form.flag("calconly") {
            return Ok(json!({ "price": "0.00", "daysuntilrenewal": 30 }));
        }
        let orderid = self.allocate();
        Ok(json!({ "orderid": orderid }))
    }

    // Announcements

    fn add_announcement(&mut self, form: &Form) -> Reply {
        let announcement = Announcement {
            date: form.require("date")?.to_string(),
            title: form.require("title")?.to_string(),
            text: form.require("announcement")?.to_string(),
        };
        let id = self.allocate();
        self.announcements.insert(id, announcement);
        Ok(json!({ "announcementid": id }))
    }

    fn get_announcements(&mut self, form: &Form) -> Reply {
        let records: Vec<Value> = self
            .announcements
            .iter()
            .rev()
            .map(|(id, a)| {
                json!({
                    "id": id,
                    "date": format!("{} 00:00:00", a.date),
                    "title": a.title,
                    "announcement": a.text,
                    "published": 1,
                })
            })
            .collect();
        let total = records.len();
        Ok(json!({
            "totalresults": total,
            "announcements": wrapped("announcement", paged(records, form.page())),
        }))
    }

    fn update_announcement(&mut self, form: &Form) -> Reply {
        let id = form.id("announcementid")?;
        let announcement = self
            .announcements
            .get_mut(&id)
            .ok_or_else(|| "Announcement ID Not Found".to_string())?;
        if let Some(title) = form.get("title") {
            announcement.title = title.to_string();
        }
        if let Some(text) = form.get("announcement") {
            announcement.text = text.to_string();
        }
        Ok(json!({ "announcementid": id }))
    }

    fn delete_announcement(&mut self, form: &Form) -> Reply {
        let id = form.id("announcementid")?;
        self.announcements
            .remove(&id)
            .map(|_| json!({ "announcementid": id }))
            .ok_or_else(|| "Announcement ID Not Found".to_string())
    }

    // Client records

    fn add_cancel_request(&mut self, form: &Form) -> Reply {
        let (id, service) = self.service_mut(form)?;
        Ok(json!({ "serviceid": id, "userid": service.clientid }))
    }

    fn add_client_note(&mut self, form: &Form) -> Reply {
        let userid = form.id("userid")?;
        let notes = form.require("notes")?.to_string();
        let id = self.allocate();
        self.client_notes.insert(id, (userid, notes));
        Ok(json!({ "noteid": id }))
    }

    // Tickets

    fn ticket_mut(&mut self, form: &Form) -> Result<(u64, &mut Ticket), String> {
        let id = form.id("ticketid")?;
        self.tickets
            .get_mut(&id)
            .map(|t| (id, t))
            .ok_or_else(|| "Ticket ID Not Found".to_string())
    }

    fn open_ticket(&mut self, form: &Form) -> Reply {
        let deptid = form.id("deptid")?;
        let subject = form.require("subject")?.to_string();
        let message = form.require("message")?.to_string();
        let userid = form.opt_id("clientid");
        if userid.is_none() && form.get("email").is_none() {
            return Err("A client id or email address is required".to_string());
        }
        let id = self.allocate();
        let tid = format!("{:06}", 480_000 + id);
        self.tickets.insert(
            id,
            Ticket {
                tid: tid.clone(),
                deptid,
                userid,
                subject,
                status: "Open".to_string(),
                opening: message,
                replies: Vec::new(),
                notes: Vec::new(),
            },
        );
        Ok(json!({ "id": id, "tid": tid, "c": format!("c{id:x}Qn") }))
    }

    fn get_ticket(&mut self, form: &Form) -> Reply {
        let (id, ticket) = self.ticket_mut(form)?;
        let userid = ticket.userid.map(|u| u.to_string()).unwrap_or_default();
        let mut replies = vec![json!({
            "replyid": "0",
            "userid": userid,
            "date": "2026-10-14 09:00:00",
            "message": ticket.opening,
            "admin": "",
        })];
        replies.extend(ticket.replies.iter().map(|r| {
            json!({
                "replyid": r.id.to_string(),
                "userid": userid,
                "date": "2026-10-14 09:10:00",
                "message": r.text,
                "admin": "",
            })
        }));
        let notes: Vec<Value> = ticket
            .notes
            .iter()
            .map(|n| {
                json!({
                    "noteid": n.id.to_string(),
                    "date": "2026-10-14 09:05:00",
                    "message": n.text,
                    "admin": "admin",
                })
            })
            .collect();
        Ok(json!({
            "ticketid": id.to_string(),
            "tid": ticket.tid,
            "deptid": ticket.deptid.to_string(),
            "userid": userid,
            "subject": ticket.subject,
            "status": ticket.status,
            "replies": { "reply": replies },
            "notes": wrapped("note", notes),
        }))
    }

    fn add_ticket_note(&mut self, form: &Form) -> Reply {
        let message = form.require("message")?.to_string();
        let note_id = self.allocate();
        let (_, ticket) = self.ticket_mut(form)?;
        ticket.notes.push(Message {
            id: note_id,
            text: message,
        });
        Ok(json!({}))
    }

    fn add_ticket_reply(&mut self, form: &Form) -> Reply {
        let message = form.require("message")?.to_string();
        let reply_id = self.allocate();
        let (_, ticket) = self.ticket_mut(form)?;
        ticket.replies.push(Message {
            id: reply_id,
            text: message,
        });
        ticket.status = "Customer-Reply".to_string();
        Ok(json!({}))
    }

    fn update_ticket(&mut self, form: &Form) -> Reply {
        let (id, ticket) = self.ticket_mut(form)?;
        if let Some(subject) = form.get("subject") {
            ticket.subject = subject.to_string();
        }
        if let Some(status) = form.get("status") {
            ticket.status = status.to_string();
        }
        Ok(json!({ "ticketid": id }))
    }

    fn merge_ticket(&mut self, form: &Form) -> Reply {
        let target = form.id("ticketid")?;
        if !self.tickets.contains_key(&target) {
            return Err("Ticket ID Not Found".to_string());
        }
        let others: Vec<u64> = form
            .require("mergeticketids")?
            .split(',')
            .map(|id| {
                id.trim()
                    .parse()
                    .map_err(|_| format!("Invalid Merge Ticket ID: {id}"))
            })
            .collect::<Result<_, String>>()?;
        let mut merged = Vec::new();
        for other in others {
            let ticket = self
                .tickets
                .remove(&other)
                .ok_or_else(|| format!("Invalid Merge Ticket ID: {other}"))?;
            merged.push(ticket);
        }
        let ticket = self
            .tickets
            .get_mut(&target)
            .ok_or_else(|| "Ticket ID Not Found".to_string())?;
        for other in merged {
            ticket.replies.extend(other.replies);
            ticket.notes.extend(other.notes);
        }
        if let Some(subject) = form.get("newsubject") {
            ticket.subject = subject.to_string();
        }
        Ok(json!({ "ticketid": target }))
    }

    fn block_ticket_sender(&mut self, form: &Form) -> Reply {
        let (_, ticket) = self.ticket_mut(form)?;
        if ticket.userid.is_some() {
            return Err("A Client Cannot Be Blocked".to_string());
        }
        Ok(json!({}))
    }

    fn update_ticket_reply(&mut self, form: &Form) -> Reply {
        let reply_id = form.id("replyid")?;
        let message = form.require("message")?.to_string();
        let reply = self
            .tickets
            .values_mut()
            .flat_map(|t| t.replies.iter_mut())
            .find(|r| r.id == reply_id)
            .ok_or_else(|| "Reply ID Not Found".to_string())?;
        reply.text = message;
        Ok(json!({ "replyid": reply_id }))
    }

    fn delete_ticket_reply(&mut self, form: &Form) -> Reply {
        let reply_id = form.id("replyid")?;
        let (_, ticket) = self.ticket_mut(form)?;
        let before = ticket.replies.len();
        ticket.replies.retain(|r| r.id != reply_id);
        if ticket.replies.len() == before {
            return Err("Reply ID Not Found".to_string());
        }
        Ok(json!({}))
    }

    fn delete_ticket_note(&mut self, form: &Form) -> Reply {
        let note_id = form.id("noteid")?;
        for ticket in self.tickets.values_mut() {
            let before = ticket.notes.len();
            ticket.notes.retain(|n| n.id != note_id);
            if ticket.notes.len() != before {
                return Ok(json!({}));
            }
        }
        Err("Note ID Not Found".to_string())
    }

    fn delete_ticket(&mut self, form: &Form) -> Reply {
        let id = form.id("ticketid")?;
        self.tickets
            .remove(&id)
            .map(|_| json!({}))
            .ok_or_else(|| "Ticket ID Not Found".to_string())
    }
}

/// Stateful fake platform; clones share the same state.
#[derive(Debug, Clone)]
pub struct FakePlatform {
    state: Arc<Mutex<State>>,
}

#[allow(dead_code)]
impl FakePlatform {
    /// Fake accepting the given API credentials.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::new(identifier.into(), secret.into()))),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake platform state poisoned")
    }

    /// Mount the fake on the API endpoint of `server`.
    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(whmcs::DEFAULT_API_PATH))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    /// Give the demo client credit to spend.
    pub fn with_credit_balance(self, amount: f64) -> Self {
        self.state().credit_balance = amount;
        self
    }

    /// Replace the existing product groups.
    pub fn with_product_groups(self, groups: impl IntoIterator<Item = u64>) -> Self {
        self.state().product_groups = groups.into_iter().collect();
        self
    }

    /// Assign a provisioning module to every product.
    pub fn with_modules_assigned(self) -> Self {
        self.state().modules_assigned = true;
        self
    }

    /// Allow `SetConfigurationValue` from the remote API.
    pub fn with_remote_settings(self) -> Self {
        self.state().internal_api_only = false;
        self
    }

    /// Answer `action` with an error envelope carrying `message`.
    pub fn failing(self, action: &str, message: &str) -> Self {
        self.failing_after(action, 0, message)
    }

    /// Answer the first `successes` calls to `action` normally, then fail.
    pub fn failing_after(self, action: &str, successes: usize, message: &str) -> Self {
        self.state()
            .failures
            .insert(action.to_string(), (successes, message.to_string()));
        self
    }

    /// Add a service owned by `clientid` outside of any order.
    pub fn seed_service(&self, clientid: u64) -> u64 {
        let mut state = self.state();
        let id = state.allocate();
        state.services.insert(
            id,
            Service {
                clientid,
                orderid: 0,
                pid: 0,
                domain: "seeded.example.com".to_string(),
                billingcycle: "monthly".to_string(),
                amount: 0.0,
                notes: String::new(),
            },
        );
        id
    }

    /// Actions received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of times `action` was received.
    pub fn count(&self, action: &str) -> usize {
        self.state().calls.iter().filter(|a| *a == action).count()
    }

    /// Open tickets.
    pub fn ticket_count(&self) -> usize {
        self.state().tickets.len()
    }

    /// Stored quotes.
    pub fn quote_count(&self) -> usize {
        self.state().quotes.len()
    }

    /// Current value of a setting.
    pub fn setting(&self, name: &str) -> Option<String> {
        self.state().settings.get(name).cloned()
    }

    /// Latest admin notes.
    pub fn admin_notes(&self) -> String {
        self.state().admin_notes.clone()
    }
}

impl Respond for FakePlatform {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let form = Form::parse(&request.body);
        let mut state = self.state();

        if form.get("identifier") != Some(state.identifier.as_str())
            || form.get("secret") != Some(state.secret.as_str())
        {
            return ResponseTemplate::new(403).set_body_json(json!({
                "result": "error",
                "message": "Authentication Failed"
            }));
        }
        if form.get("responsetype") != Some("json") {
            return ResponseTemplate::new(200).set_body_string("result=error;message=Unsupported response type;");
        }

        let action = form.get("action").unwrap_or_default().to_string();
        state.calls.push(action.clone());

        let body = match state.dispatch(&action, &form) {
            Ok(Value::Object(fields)) => {
                let mut body = Map::new();
                body.insert("result".to_string(), json!("success"));
                body.extend(fields);
                Value::Object(body)
            }
            Ok(other) => json!({ "result": "success", "data": other }),
            Err(message) => json!({ "result": "error", "message": message }),
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}
