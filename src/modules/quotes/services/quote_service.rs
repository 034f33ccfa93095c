use std::sync::Arc;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::core::{AppError, Result, TenantRepository};
use crate::modules::clients::Client;
use crate::modules::documents::{closing_date, next_number, price_items, DocumentKind};
use crate::modules::products::{ensure_line_products, Product};
use crate::modules::quotes::models::{CreateQuoteRequest, Quote, QuoteResponse, QuoteStatus};
use crate::modules::quotes::repositories::QuoteRepository;

/// Service for quote business logic
pub struct QuoteService {
    quote_repo: Arc<dyn QuoteRepository>,
    client_repo: Arc<dyn TenantRepository<Client>>,
    product_repo: Arc<dyn TenantRepository<Product>>,
    validity_days: u32,
}

impl QuoteService {
    pub fn new(
        quote_repo: Arc<dyn QuoteRepository>,
        client_repo: Arc<dyn TenantRepository<Client>>,
        product_repo: Arc<dyn TenantRepository<Product>>,
        validity_days: u32,
    ) -> Self {
        Self {
            quote_repo,
            client_repo,
            product_repo,
            validity_days,
        }
    }

    pub async fn create_quote(
        &self,
        request: CreateQuoteRequest,
        tenant_id: &str,
    ) -> Result<QuoteResponse> {
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
        let valid_until = closing_date(
            issue_date,
            request.valid_until,
            self.validity_days,
            "Valid until date",
        )?;

        let count = self.quote_repo.count_all().await?;

        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            quote_number: next_number(DocumentKind::Quote.prefix(), count, now.year()),
            user_id: tenant_id.to_string(),
            client_id: client.id.clone(),
            status: QuoteStatus::Draft,
            issue_date,
            valid_until,
            currency,
            subtotal: priced.totals.subtotal,
            tax_amount: priced.totals.tax_amount,
            total_amount: priced.totals.total_amount,
            notes: request.notes,
            terms: request.terms,
            created_at: now,
            updated_at: now,
        };

        let created = self.quote_repo.create(&quote, &priced.items).await?;

        tracing::info!(
            quote_id = %created.id,
            quote_number = %created.quote_number,
            tenant_id,
            "Quote created"
        );

        Ok(QuoteResponse {
            quote: created,
            client: Some(client),
            items: priced.items,
        })
    }

    pub async fn get_quote(&self, id: &str, tenant_id: &str) -> Result<QuoteResponse> {
        let quote = self.find_quote(id, tenant_id).await?;
        self.to_response(quote, tenant_id).await
    }

    pub async fn list_quotes(&self, tenant_id: &str, limit: i64, offset: i64) -> Result<Vec<Quote>> {
        self.quote_repo.list(tenant_id, limit, offset).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: QuoteStatus,
        tenant_id: &str,
    ) -> Result<QuoteResponse> {
        let mut quote = self.find_quote(id, tenant_id).await?;
        quote.transition_to(status)?;
        self.quote_repo.update_status(&quote).await?;

        tracing::info!(quote_id = %quote.id, status = %quote.status, "Quote status changed");

        self.to_response(quote, tenant_id).await
    }

    async fn find_quote(&self, id: &str, tenant_id: &str) -> Result<Quote> {
        self.quote_repo
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Quote not found"))
    }

    async fn to_response(&self, quote: Quote, tenant_id: &str) -> Result<QuoteResponse> {
        let items = self.quote_repo.find_items(&quote.id).await?;
        let client = self
            .client_repo
            .find_by_id(&quote.client_id, tenant_id)
            .await?;

        Ok(QuoteResponse {
            quote,
            client,
            items,
        })
    }
}
