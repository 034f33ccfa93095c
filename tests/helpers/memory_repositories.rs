// In-memory Repositories
//
// Stand-ins for the MySQL repositories. They honour the same tenant
// scoping and the same uniqueness rule on document numbers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use bizdesk::core::{AppError, Result, TenantRepository};
use bizdesk::modules::clients::Client;
use bizdesk::modules::dashboard::models::InvoiceSummary;
use bizdesk::modules::dashboard::DashboardRepository;
use bizdesk::modules::documents::DocumentItem;
use bizdesk::modules::invoices::{Invoice, InvoiceRepository, InvoiceStatus};
use bizdesk::modules::products::Product;
use bizdesk::modules::quotes::{Quote, QuoteRepository};

/// Clients kept in a vector, newest last
///
/// When built with `referenced_by`, deleting a client that still has
/// invoices or quotes fails the way the foreign key does in MySQL.
#[derive(Default)]
pub struct InMemoryClientRepository {
    clients: Mutex<Vec<Client>>,
    documents: Option<(Arc<InMemoryInvoiceRepository>, Arc<InMemoryQuoteRepository>)>,
}

impl InMemoryClientRepository {
    pub fn referenced_by(
        invoices: Arc<InMemoryInvoiceRepository>,
        quotes: Arc<InMemoryQuoteRepository>,
    ) -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            documents: Some((invoices, quotes)),
        }
    }
}

#[async_trait]
impl TenantRepository<Client> for InMemoryClientRepository {
    async fn create(&self, entity: &Client) -> Result<Client> {
        self.clients.lock().unwrap().push(entity.clone());
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.user_id == tenant_id)
            .cloned())
    }

    async fn update(&self, entity: &Client) -> Result<Option<Client>> {
        let mut clients = self.clients.lock().unwrap();
        match clients
            .iter_mut()
            .find(|c| c.id == entity.id && c.user_id == entity.user_id)
        {
            Some(existing) => {
                *existing = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str, tenant_id: &str) -> Result<bool> {
        if let Some((invoices, quotes)) = &self.documents {
            if invoices.references_client(id) || quotes.references_client(id) {
                return Err(AppError::conflict(
                    "Client is still referenced and cannot be deleted",
                ));
            }
        }

        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        clients.retain(|c| !(c.id == id && c.user_id == tenant_id));
        Ok(clients.len() < before)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Client>> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| c.user_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn count(&self, tenant_id: &str) -> Result<i64> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == tenant_id)
            .count() as i64)
    }
}

/// Invoices with their items
#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    invoices: Mutex<Vec<(Invoice, Vec<DocumentItem>)>>,
    forced_count: Mutex<Option<u64>>,
}

impl InMemoryInvoiceRepository {
    /// Make `count_all` report `count` regardless of what is stored
    pub fn force_count(&self, count: u64) {
        *self.forced_count.lock().unwrap() = Some(count);
    }

    pub fn references_client(&self, client_id: &str) -> bool {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .any(|(invoice, _)| invoice.client_id == client_id)
    }

    pub fn stored(&self) -> Vec<Invoice> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .map(|(invoice, _)| invoice.clone())
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn count_all(&self) -> Result<u64> {
        if let Some(count) = *self.forced_count.lock().unwrap() {
            return Ok(count);
        }
        Ok(self.invoices.lock().unwrap().len() as u64)
    }

    async fn create(&self, invoice: &Invoice, items: &[DocumentItem]) -> Result<Invoice> {
        let mut invoices = self.invoices.lock().unwrap();
        if invoices
            .iter()
            .any(|(existing, _)| existing.invoice_number == invoice.invoice_number)
        {
            return Err(AppError::conflict(format!(
                "Invoice {} already exists, retry the request",
                invoice.invoice_number
            )));
        }

        invoices.push((invoice.clone(), items.to_vec()));
        Ok(invoice.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|(inv, _)| inv.id == id && inv.user_id == tenant_id)
            .map(|(inv, _)| inv.clone()))
    }

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<DocumentItem>> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|(inv, _)| inv.id == invoice_id)
            .map(|(_, items)| items.clone())
            .unwrap_or_default())
    }

    async fn list(
        &self,
        tenant_id: &str,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|(inv, _)| inv)
            .filter(|inv| inv.user_id == tenant_id)
            .filter(|inv| status.map_or(true, |s| inv.status == s))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_status(&self, invoice: &Invoice) -> Result<()> {
        let mut invoices = self.invoices.lock().unwrap();
        let (stored, _) = invoices
            .iter_mut()
            .find(|(inv, _)| inv.id == invoice.id && inv.user_id == invoice.user_id)
            .ok_or_else(|| AppError::not_found("Invoice not found"))?;

        stored.status = invoice.status;
        stored.paid_amount = invoice.paid_amount;
        stored.payment_date = invoice.payment_date;
        stored.updated_at = invoice.updated_at;
        Ok(())
    }
}

/// Quotes with their items
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: Mutex<Vec<(Quote, Vec<DocumentItem>)>>,
}

impl InMemoryQuoteRepository {
    pub fn references_client(&self, client_id: &str) -> bool {
        self.quotes
            .lock()
            .unwrap()
            .iter()
            .any(|(quote, _)| quote.client_id == client_id)
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn count_all(&self) -> Result<u64> {
        Ok(self.quotes.lock().unwrap().len() as u64)
    }

    async fn create(&self, quote: &Quote, items: &[DocumentItem]) -> Result<Quote> {
        let mut quotes = self.quotes.lock().unwrap();
        if quotes
            .iter()
            .any(|(existing, _)| existing.quote_number == quote.quote_number)
        {
            return Err(AppError::conflict(format!(
                "Quote {} already exists, retry the request",
                quote.quote_number
            )));
        }

        quotes.push((quote.clone(), items.to_vec()));
        Ok(quote.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .find(|(q, _)| q.id == id && q.user_id == tenant_id)
            .map(|(q, _)| q.clone()))
    }

    async fn find_items(&self, quote_id: &str) -> Result<Vec<DocumentItem>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .find(|(q, _)| q.id == quote_id)
            .map(|(_, items)| items.clone())
            .unwrap_or_default())
    }

    async fn list(&self, tenant_id: &str, limit: i64, offset: i64) -> Result<Vec<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .map(|(q, _)| q)
            .filter(|q| q.user_id == tenant_id)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_status(&self, quote: &Quote) -> Result<()> {
        let mut quotes = self.quotes.lock().unwrap();
        let (stored, _) = quotes
            .iter_mut()
            .find(|(q, _)| q.id == quote.id && q.user_id == quote.user_id)
            .ok_or_else(|| AppError::not_found("Quote not found"))?;

        stored.status = quote.status;
        stored.updated_at = quote.updated_at;
        Ok(())
    }
}

/// Products kept in a vector, newest last
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl TenantRepository<Product> for InMemoryProductRepository {
    async fn create(&self, entity: &Product) -> Result<Product> {
        self.products.lock().unwrap().push(entity.clone());
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.user_id == tenant_id)
            .cloned())
    }

    async fn update(&self, entity: &Product) -> Result<Option<Product>> {
        let mut products = self.products.lock().unwrap();
        match products
            .iter_mut()
            .find(|p| p.id == entity.id && p.user_id == entity.user_id)
        {
            Some(existing) => {
                *existing = entity.clone();
                Ok(Some(entity.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str, tenant_id: &str) -> Result<bool> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| !(p.id == id && p.user_id == tenant_id));
        Ok(products.len() < before)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|p| p.user_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn count(&self, tenant_id: &str) -> Result<i64> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == tenant_id)
            .count() as i64)
    }
}

/// Dashboard aggregates computed over the in-memory invoices
pub struct InMemoryDashboardRepository {
    invoices: Arc<InMemoryInvoiceRepository>,
}

impl InMemoryDashboardRepository {
    pub fn new(invoices: Arc<InMemoryInvoiceRepository>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardRepository {
    async fn invoice_summary(
        &self,
        tenant_id: &str,
        revenue_since: DateTime<Utc>,
    ) -> Result<InvoiceSummary> {
        let invoices: Vec<Invoice> = self
            .invoices
            .stored()
            .into_iter()
            .filter(|inv| inv.user_id == tenant_id)
            .collect();

        let monthly_revenue = invoices
            .iter()
            .filter(|inv| inv.status == InvoiceStatus::Paid)
            .filter(|inv| inv.payment_date.map_or(false, |paid| paid >= revenue_since))
            .map(|inv| inv.total_amount)
            .sum::<Decimal>();

        let pending_payments = invoices
            .iter()
            .filter(|inv| matches!(inv.status, InvoiceStatus::Sent | InvoiceStatus::Overdue))
            .map(|inv| inv.total_amount)
            .sum::<Decimal>();

        Ok(InvoiceSummary {
            total_invoices: invoices.len() as i64,
            monthly_revenue,
            pending_payments,
            overdue_invoices: invoices
                .iter()
                .filter(|inv| inv.status == InvoiceStatus::Overdue)
                .count() as i64,
        })
    }
}
