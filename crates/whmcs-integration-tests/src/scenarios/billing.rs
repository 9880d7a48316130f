//! Billing scenarios: quotes, billable items, invoices, pay methods, credits
//! and transactions

use anyhow::{Context, ensure};
use chrono::NaiveDate;
use whmcs::types::{
    AcceptQuoteRequest, AddBillableItemRequest, AddCreditRequest, AddInvoicePaymentRequest,
    AddPayMethodRequest, AddTransactionRequest, ApplyCreditRequest, BillableUnit,
    CapturePaymentRequest, CreateInvoiceRequest, CreateQuoteRequest, DeletePayMethodRequest,
    DeleteQuoteRequest, GenInvoicesRequest, GetCreditsRequest, GetInvoiceRequest,
    GetInvoicesRequest, GetPayMethodsRequest, GetQuotesRequest, GetTransactionsRequest,
    InvoiceLine, PayMethodType, QuoteRef, QuoteStage, SendQuoteRequest,
    UpdateInvoiceRequest, UpdatePayMethodRequest, UpdateQuoteRequest, UpdateTransactionRequest,
};
use whmcs::{Client, Id, LineItem};

use super::{Step, settle};
use crate::ScenarioContext;

/// Result of [`quote_lifecycle`].
#[derive(Debug, Clone)]
pub struct QuoteReport {
    /// Quote that was created and later deleted
    pub quote_id: Id,
    /// Invoice produced by accepting the quote
    pub invoice_id: Id,
    /// Stage reported after acceptance
    pub stage_after_accept: String,
}

/// Result of [`invoice_lifecycle`].
#[derive(Debug, Clone)]
pub struct InvoiceReport {
    /// Invoice that was created
    pub invoice_id: Id,
    /// How applying credit ended
    pub apply_credit: Step,
    /// How capturing payment ended
    pub capture_payment: Step,
}

/// Result of [`credits`].
#[derive(Debug, Clone)]
pub struct CreditReport {
    /// Balance after adding credit
    pub new_balance: f64,
    /// Credit log entries for the client
    pub entries: usize,
}

/// Every billing scenario, in order.
#[derive(Debug, Clone)]
pub struct BillingReport {
    /// Quotes
    pub quote: QuoteReport,
    /// Billable item id
    pub billable_item_id: Id,
    /// Invoices
    pub invoice: InvoiceReport,
    /// Pay method that was added then removed
    pub pay_method_id: Id,
    /// Invoices generated
    pub generated_invoices: u64,
    /// Credits
    pub credit: CreditReport,
    /// Transaction that was updated
    pub transaction_id: Id,
}

/// Run all billing scenarios.
pub async fn run(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<BillingReport> {
    Ok(BillingReport {
        quote: quote_lifecycle(client, ctx).await?,
        billable_item_id: billable_item(client, ctx).await?,
        invoice: invoice_lifecycle(client, ctx).await?,
        pay_method_id: pay_method_lifecycle(client, ctx).await?,
        generated_invoices: generate_invoices(client, ctx).await?,
        credit: credits(client, ctx).await?,
        transaction_id: transaction_lifecycle(client, ctx).await?,
    })
}

/// Message the platform answers for a pay method that does not exist.
pub const PAY_METHOD_NOT_FOUND: &str = "Pay Method ID Not Found";

fn valid_until() -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2099, 1, 1).context("valid date")
}

async fn quote_count(client: &Client, quote_id: &Id) -> anyhow::Result<usize> {
    let quotes = client
        .billing()
        .get_quotes(&GetQuotesRequest::by_id(quote_id.clone()))
        .await?;
    let listed = &quotes.quotes.quote;
    ensure!(
        listed.iter().all(|q| &q.id == quote_id),
        "GetQuotes for {quote_id} listed other quotes"
    );
    Ok(listed.len())
}

/// Create a draft quote with one line item, read it back, update, accept,
/// send and delete it.
pub async fn quote_lifecycle(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<QuoteReport> {
    let billing = client.billing();

    let created = billing
        .create_quote(
            &CreateQuoteRequest::builder()
                .subject("test quote")
                .stage(QuoteStage::Draft)
                .validuntil(valid_until()?)
                .userid(ctx.client_id.clone())
                .lineitems(vec![LineItem::new("quote description", 1, 10.0)])
                .build()?,
        )
        .await?;
    let quote_id = created.quoteid.context("CreateQuote returned no quoteid")?;
    tracing::info!(%quote_id, "Quote created");

    let page = billing.get_quotes(&GetQuotesRequest::page(0, 1)).await?;
    ensure!(page.quotes.quote.len() <= 1, "GetQuotes ignored limitnum");

    ensure!(
        quote_count(client, &quote_id).await? == 1,
        "quote {quote_id} not found exactly once"
    );

    let updated = billing
        .update_quote(
            &UpdateQuoteRequest::builder()
                .quoteid(quote_id.clone())
                .subject("this is an updated quote")
                .build()?,
        )
        .await?;
    ensure!(
        updated.quoteid.as_ref() == Some(&quote_id),
        "UpdateQuote returned {:?}, expected {quote_id}",
        updated.quoteid
    );

    let accepted = billing
        .accept_quote(&AcceptQuoteRequest(QuoteRef::new(quote_id.clone())))
        .await?;
    let invoice_id = accepted
        .invoiceid
        .filter(|id| !id.is_nil())
        .context("AcceptQuote returned no invoiceid")?;

    let after = billing
        .get_quotes(&GetQuotesRequest::by_id(quote_id.clone()))
        .await?;
    let stage_after_accept = after
        .quotes
        .quote
        .iter()
        .find(|q| q.id == quote_id)
        .and_then(|q| q.stage.clone())
        .context("accepted quote has no stage")?;
    ensure!(
        stage_after_accept != QuoteStage::Draft.as_str(),
        "quote {quote_id} is still a draft after acceptance"
    );

    billing
        .send_quote(&SendQuoteRequest(QuoteRef::new(quote_id.clone())))
        .await?;
    billing
        .delete_quote(&DeleteQuoteRequest(QuoteRef::new(quote_id.clone())))
        .await?;
    ensure!(
        quote_count(client, &quote_id).await? == 0,
        "quote {quote_id} still listed after deletion"
    );

    Ok(QuoteReport {
        quote_id,
        invoice_id,
        stage_after_accept,
    })
}

/// Add a billable item to the demo client.
pub async fn billable_item(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<Id> {
    let item = client
        .billing()
        .add_billable_item(
            &AddBillableItemRequest::builder()
                .clientid(ctx.client_id.clone())
                .description("this is a billable item")
                .amount(10.0)
                .unit(BillableUnit::Quantity)
                .build()?,
        )
        .await?;
    item.billableid.context("AddBillableItem returned no billableid")
}

/// Create an invoice, update and read it, record a payment, then try to
/// apply credit and capture payment.
pub async fn invoice_lifecycle(
    client: &Client,
    ctx: &ScenarioContext,
) -> anyhow::Result<InvoiceReport> {
    let billing = client.billing();

    let created = billing
        .create_invoice(
            &CreateInvoiceRequest::builder()
                .userid(ctx.client_id.clone())
                .autoapplycredit(false)
                .items(vec![InvoiceLine::new("this is a test invoice", 1.0)])
                .build()?,
        )
        .await?;
    let invoice_id = created.invoiceid.context("CreateInvoice returned no invoiceid")?;
    tracing::info!(%invoice_id, "Invoice created");

    billing.get_invoices(&GetInvoicesRequest::page(0, 1)).await?;

    let updated = billing
        .update_invoice(
            &UpdateInvoiceRequest::builder()
                .invoiceid(invoice_id.clone())
                .items(vec![InvoiceLine::new("this is an updated invoice", 1.0)])
                .build()?,
        )
        .await?;
    ensure!(
        updated.invoiceid.as_ref() == Some(&invoice_id),
        "UpdateInvoice returned {:?}, expected {invoice_id}",
        updated.invoiceid
    );

    let invoice = billing
        .get_invoice(&GetInvoiceRequest::new(invoice_id.clone()))
        .await?;
    ensure!(
        invoice.items.item.len() == 1,
        "invoice {invoice_id} has {} items, expected 1",
        invoice.items.item.len()
    );

    billing
        .add_invoice_payment(
            &AddInvoicePaymentRequest::builder()
                .invoiceid(invoice_id.clone())
                .transid("1234")
                .amount(0.01)
                .gateway("paypal")
                .build()?,
        )
        .await?;

    let apply_credit = settle(
        "ApplyCredit",
        billing
            .apply_credit_classified(
                &ApplyCreditRequest::builder()
                    .invoiceid(invoice_id.clone())
                    .amount(0.01)
                    .noemail(true)
                    .build()?,
            )
            .await,
        |reply| {
            ensure!(reply.invoicepaid.is_some(), "ApplyCredit reply lacks invoicepaid");
            Ok(())
        },
    )?;

    let capture_payment = settle(
        "CapturePayment",
        billing
            .capture_payment_classified(&CapturePaymentRequest::new(invoice_id.clone()))
            .await,
        |_| Ok(()),
    )?;

    Ok(InvoiceReport {
        invoice_id,
        apply_credit,
        capture_payment,
    })
}

async fn pay_methods_matching(
    client: &Client,
    ctx: &ScenarioContext,
    pay_method_id: &Id,
) -> anyhow::Result<usize> {
    let listed = client
        .billing()
        .get_pay_methods(
            &GetPayMethodsRequest::builder()
                .clientid(ctx.client_id.clone())
                .paymethodid(pay_method_id.clone())
                .build()?,
        )
        .await;
    match listed {
        Ok(reply) => {
            ensure!(
                reply.paymethods.iter().all(|m| &m.id == pay_method_id),
                "GetPayMethods for {pay_method_id} listed other pay methods"
            );
            Ok(reply.paymethods.len())
        }
        // A lookup of a removed pay method may be refused outright
        Err(err) if err.remote_message() == Some(PAY_METHOD_NOT_FOUND) => Ok(0),
        Err(err) => Err(err.into()),
    }
}

/// Add a bank account pay method, read, update and delete it.
pub async fn pay_method_lifecycle(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<Id> {
    let billing = client.billing();

    let added = billing
        .add_pay_method(
            &AddPayMethodRequest::builder()
                .clientid(ctx.client_id.clone())
                .pay_method_type(PayMethodType::BankAccount)
                .bank_code("1234")
                .bank_account("999999999")
                .build()?,
        )
        .await?;
    let pay_method_id = added.paymethodid.context("AddPayMethod returned no paymethodid")?;

    ensure!(
        pay_methods_matching(client, ctx, &pay_method_id).await? == 1,
        "pay method {pay_method_id} not found exactly once"
    );

    let updated = billing
        .update_pay_method(
            &UpdatePayMethodRequest::builder()
                .clientid(ctx.client_id.clone())
                .paymethodid(pay_method_id.clone())
                .build()?,
        )
        .await?;
    ensure!(
        updated.paymethodid.as_ref() == Some(&pay_method_id),
        "UpdatePayMethod returned {:?}, expected {pay_method_id}",
        updated.paymethodid
    );

    let deleted = billing
        .delete_pay_method(&DeletePayMethodRequest::new(
            ctx.client_id.clone(),
            pay_method_id.clone(),
        ))
        .await?;
    ensure!(deleted.paymethodid.is_some(), "DeletePayMethod returned no paymethodid");
    ensure!(
        pay_methods_matching(client, ctx, &pay_method_id).await? == 0,
        "pay method {pay_method_id} still listed after deletion"
    );

    Ok(pay_method_id)
}

/// Generate due invoices for the demo client.
pub async fn generate_invoices(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<u64> {
    let generated = client
        .billing()
        .gen_invoices(&GenInvoicesRequest::for_client(ctx.client_id.clone()))
        .await?;
    generated.numcreated.context("GenInvoices returned no numcreated")
}

/// Add credit to the demo client and list the credit log.
pub async fn credits(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<CreditReport> {
    let billing = client.billing();

    let added = billing
        .add_credit(
            &AddCreditRequest::builder()
                .clientid(ctx.client_id.clone())
                .description("this is a credit test")
                .amount(1.0)
                .build()?,
        )
        .await?;
    let new_balance = added.newbalance.context("AddCredit returned no newbalance")?;

    let listed = billing
        .get_credits(&GetCreditsRequest::new(ctx.client_id.clone()))
        .await?;

    Ok(CreditReport {
        new_balance,
        entries: listed.credits.credit.len(),
    })
}

/// Record a transaction, list the client's transactions and update the first.
pub async fn transaction_lifecycle(client: &Client, ctx: &ScenarioContext) -> anyhow::Result<Id> {
    let billing = client.billing();

    billing
        .add_transaction(
            &AddTransactionRequest::builder()
                .paymentmethod(ctx.payment_method.clone())
                .userid(ctx.client_id.clone())
                .build()?,
        )
        .await?;

    let listed = billing
        .get_transactions(&GetTransactionsRequest::for_client(ctx.client_id.clone()))
        .await?;
    let first = listed
        .transactions
        .transaction
        .first()
        .map(|t| t.id.clone())
        .context("GetTransactions returned no transactions")?;

    let updated = billing
        .update_transaction(
            &UpdateTransactionRequest::builder()
                .transactionid(first.clone())
                .description("this transaction has been updated")
                .build()?,
        )
        .await?;
    ensure!(
        updated.transactionid.as_ref() == Some(&first),
        "UpdateTransaction returned {:?}, expected {first}",
        updated.transactionid
    );

    Ok(first)
}
