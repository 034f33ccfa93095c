use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::{AppError, Result, TenantRepository};
use crate::modules::clients::Client;
use crate::modules::documents::{closing_date, next_number, price_items, DocumentKind};
use crate::modules::products::{ensure_line_products, Product};
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus,
};
use crate::modules::invoices::repositories::InvoiceRepository;

/// Service for invoice business logic
pub struct InvoiceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn TenantRepository<Client>>,
    product_repo: Arc<dyn TenantRepository<Product>>,
    invoice_due_days: u32,
}

impl InvoiceService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        client_repo: Arc<dyn TenantRepository<Client>>,
        product_repo: Arc<dyn TenantRepository<Product>>,
        invoice_due_days: u32,
    ) -> Self {
        Self {
            invoice_repo,
            client_repo,
            product_repo,
            invoice_due_days,
        }
    }

    /// Create a DRAFT invoice with priced line items and the next invoice number
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
        tenant_id: &str,
    ) -> Result<InvoiceResponse> {
        let client = self
            .client_repo
            .find_by_id(&request.client_id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let currency = request.currency.unwrap_or(client.currency);
        let priced = price_items(&request.items, currency)?;
        ensure_line_products(self.product_repo.as_ref(), &request.items, tenant_id).await?;

        let now = Utc::now();
        let issue_date = request.issue_date.unwrap_or_else(|| now.date_naive());
        let due_date = closing_date(
            issue_date,
            request.due_date,
            self.invoice_due_days,
            "Due date",
        )?;

        let count = self.invoice_repo.count_all().await?;
        let invoice_number = next_number(DocumentKind::Invoice.prefix(), count, now.year());

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            user_id: tenant_id.to_string(),
            client_id: client.id.clone(),
            status: InvoiceStatus::Draft,
            issue_date,
            due_date,
            currency,
            subtotal: priced.totals.subtotal,
            tax_amount: priced.totals.tax_amount,
            total_amount: priced.totals.total_amount,
            paid_amount: Decimal::ZERO,
            payment_date: None,
            notes: request.notes,
            terms: request.terms,
            created_at: now,
            updated_at: now,
        };

        let created = self.invoice_repo.create(&invoice, &priced.items).await?;

        tracing::info!(
            invoice_id = %created.id,
            invoice_number = %created.invoice_number,
            tenant_id,
            total = %created.currency.format_amount(created.total_amount),
            "Invoice created"
        );

        Ok(InvoiceResponse {
            invoice: created,
            client: Some(client),
            items: priced.items,
        })
    }

    pub async fn get_invoice(&self, id: &str, tenant_id: &str) -> Result<InvoiceResponse> {
        let invoice = self.find_invoice(id, tenant_id).await?;
        self.to_response(invoice, tenant_id).await
    }

    pub async fn list_invoices(
        &self,
        tenant_id: &str,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>> {
        self.invoice_repo
            .list(tenant_id, status, limit, offset)
            .await
    }

    /// Move an invoice along its lifecycle
    pub async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        tenant_id: &str,
    ) -> Result<InvoiceResponse> {
        let mut invoice = self.find_invoice(id, tenant_id).await?;
        let previous = invoice.status;

        invoice.transition_to(status)?;
        self.invoice_repo.update_status(&invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            from = %previous,
            to = %invoice.status,
            "Invoice status changed"
        );

        self.to_response(invoice, tenant_id).await
    }

    async fn find_invoice(&self, id: &str, tenant_id: &str) -> Result<Invoice> {
        self.invoice_repo
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))
    }

    async fn to_response(&self, invoice: Invoice, tenant_id: &str) -> Result<InvoiceResponse> {
        let items = self.invoice_repo.find_items(&invoice.id).await?;
        let client = self
            .client_repo
            .find_by_id(&invoice.client_id, tenant_id)
            .await?;

        Ok(InvoiceResponse {
            invoice,
            client,
            items,
        })
    }
}
