//! Billing procedures

use super::resource;
use crate::{classify::Outcome, error::Result, types::*};

resource! {
    /// Billing API resource.
    ///
    /// Quotes, invoices, pay methods, credits, transactions and billable
    /// items.
    Billing
}

impl Billing {
    /// Create a quote. Line items are encoded into `lineitems`.
    pub async fn create_quote(&self, request: &CreateQuoteRequest) -> Result<CreateQuoteResponse> {
        self.client.execute(request).await
    }

    /// List quotes, optionally filtered.
    pub async fn get_quotes(&self, request: &GetQuotesRequest) -> Result<GetQuotesResponse> {
        self.client.execute(request).await
    }

    /// Update a quote.
    pub async fn update_quote(&self, request: &UpdateQuoteRequest) -> Result<UpdateQuoteResponse> {
        self.client.execute(request).await
    }

    /// Accept a quote, producing an invoice.
    pub async fn accept_quote(&self, request: &AcceptQuoteRequest) -> Result<AcceptQuoteResponse> {
        self.client.execute(request).await
    }

    /// Email a quote to its client.
    pub async fn send_quote(&self, request: &SendQuoteRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Delete a quote.
    pub async fn delete_quote(&self, request: &DeleteQuoteRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Add a billable item to a client.
    pub async fn add_billable_item(
        &self,
        request: &AddBillableItemRequest,
    ) -> Result<AddBillableItemResponse> {
        self.client.execute(request).await
    }

    /// Create an invoice.
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<CreateInvoiceResponse> {
        self.client.execute(request).await
    }

    /// List invoices.
    pub async fn get_invoices(&self, request: &GetInvoicesRequest) -> Result<GetInvoicesResponse> {
        self.client.execute(request).await
    }

    /// Fetch one invoice with its items.
    pub async fn get_invoice(&self, request: &GetInvoiceRequest) -> Result<GetInvoiceResponse> {
        self.client.execute(request).await
    }

    /// Update an invoice.
    pub async fn update_invoice(
        &self,
        request: &UpdateInvoiceRequest,
    ) -> Result<UpdateInvoiceResponse> {
        self.client.execute(request).await
    }

    /// Record a payment against an invoice.
    pub async fn add_invoice_payment(&self, request: &AddInvoicePaymentRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// Apply client credit to an invoice.
    ///
    /// Refused with `Amount exceeds customer credit balance` when the client
    /// has too little credit; see [`Billing::apply_credit_classified`].
    pub async fn apply_credit(&self, request: &ApplyCreditRequest) -> Result<ApplyCreditResponse> {
        self.client.execute(request).await
    }

    /// [`Billing::apply_credit`], classified.
    pub async fn apply_credit_classified(
        &self,
        request: &ApplyCreditRequest,
    ) -> Outcome<ApplyCreditResponse> {
        self.client.execute_classified(request).await
    }

    /// Attempt to capture payment on an unpaid invoice.
    pub async fn capture_payment(&self, request: &CapturePaymentRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// [`Billing::capture_payment`], classified.
    pub async fn capture_payment_classified(
        &self,
        request: &CapturePaymentRequest,
    ) -> Outcome<Ack> {
        self.client.execute_classified(request).await
    }

    /// Generate invoices that are due.
    pub async fn gen_invoices(&self, request: &GenInvoicesRequest) -> Result<GenInvoicesResponse> {
        self.client.execute(request).await
    }

    /// Add a pay method to a client.
    pub async fn add_pay_method(&self, request: &AddPayMethodRequest) -> Result<PayMethodIdResponse> {
        self.client.execute(request).await
    }

    /// List a client's pay methods.
    pub async fn get_pay_methods(
        &self,
        request: &GetPayMethodsRequest,
    ) -> Result<GetPayMethodsResponse> {
        self.client.execute(request).await
    }

    /// Update a pay method.
    pub async fn update_pay_method(
        &self,
        request: &UpdatePayMethodRequest,
    ) -> Result<PayMethodIdResponse> {
        self.client.execute(request).await
    }

    /// Delete a pay method.
    pub async fn delete_pay_method(
        &self,
        request: &DeletePayMethodRequest,
    ) -> Result<PayMethodIdResponse> {
        self.client.execute(request).await
    }

    /// Add credit to a client.
    pub async fn add_credit(&self, request: &AddCreditRequest) -> Result<AddCreditResponse> {
        self.client.execute(request).await
    }

    /// List a client's credits.
    pub async fn get_credits(&self, request: &GetCreditsRequest) -> Result<GetCreditsResponse> {
        self.client.execute(request).await
    }

    /// Record a transaction.
    pub async fn add_transaction(&self, request: &AddTransactionRequest) -> Result<Ack> {
        self.client.execute(request).await
    }

    /// List transactions.
    pub async fn get_transactions(
        &self,
        request: &GetTransactionsRequest,
    ) -> Result<GetTransactionsResponse> {
        self.client.execute(request).await
    }

    /// Update a transaction.
    pub async fn update_transaction(
        &self,
        request: &UpdateTransactionRequest,
    ) -> Result<UpdateTransactionResponse> {
        self.client.execute(request).await
    }
}
