// Test Application Helpers
//
// Wires the production services to in-memory repositories. The
// `test_app!` macro builds an actix test service around that state, with
// the tenant taken from the `x-test-tenant` header in place of API-key auth.

use std::sync::Arc;

use bizdesk::core::{Currency, TenantRepository};
use bizdesk::modules::clients::{Client, ClientService};
use bizdesk::modules::dashboard::{DashboardRepository, DashboardService};
use bizdesk::modules::invoices::{InvoiceRepository, InvoiceService};
use bizdesk::modules::products::{Product, ProductService};
use bizdesk::modules::quotes::{QuoteRepository, QuoteService};

use super::memory_repositories::{
    InMemoryClientRepository, InMemoryDashboardRepository, InMemoryInvoiceRepository,
    InMemoryProductRepository, InMemoryQuoteRepository,
};

pub const TENANT_HEADER: &str = "x-test-tenant";
pub const DEFAULT_TENANT: &str = "tenant-a";

/// Services plus direct handles on their backing stores
pub struct TestState {
    pub clients: Arc<InMemoryClientRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub invoices: Arc<InMemoryInvoiceRepository>,
    pub quotes: Arc<InMemoryQuoteRepository>,
    pub client_service: Arc<ClientService>,
    pub product_service: Arc<ProductService>,
    pub invoice_service: Arc<InvoiceService>,
    pub quote_service: Arc<QuoteService>,
    pub dashboard_service: Arc<DashboardService>,
}

impl TestState {
    /// Defaults mirror the shipped configuration: USD, 30 due days, 30 validity days
    pub fn new() -> Self {
        let invoices = Arc::new(InMemoryInvoiceRepository::default());
        let quotes = Arc::new(InMemoryQuoteRepository::default());
        let clients = Arc::new(InMemoryClientRepository::referenced_by(
            invoices.clone(),
            quotes.clone(),
        ));
        let products = Arc::new(InMemoryProductRepository::default());

        let client_repo: Arc<dyn TenantRepository<Client>> = clients.clone();
        let product_repo: Arc<dyn TenantRepository<Product>> = products.clone();
        let invoice_repo: Arc<dyn InvoiceRepository> = invoices.clone();
        let quote_repo: Arc<dyn QuoteRepository> = quotes.clone();
        let dashboard_repo: Arc<dyn DashboardRepository> =
            Arc::new(InMemoryDashboardRepository::new(invoices.clone()));

        Self {
            client_service: Arc::new(ClientService::new(client_repo.clone(), Currency::USD)),
            product_service: Arc::new(ProductService::new(product_repo.clone(), Currency::USD)),
            invoice_service: Arc::new(InvoiceService::new(
                invoice_repo.clone(),
                client_repo.clone(),
                product_repo.clone(),
                30,
            )),
            quote_service: Arc::new(QuoteService::new(
                quote_repo,
                client_repo.clone(),
                product_repo.clone(),
                30,
            )),
            dashboard_service: Arc::new(DashboardService::new(
                dashboard_repo,
                invoice_repo,
                client_repo,
                product_repo,
            )),
            clients,
            products,
            invoices,
            quotes,
        }
    }
}

/// Build an initialised test service from a `TestState`
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {{
        use actix_web::dev::Service as _;
        use actix_web::HttpMessage as _;

        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.client_service.clone()))
                .app_data(actix_web::web::Data::new($state.product_service.clone()))
                .app_data(actix_web::web::Data::new($state.invoice_service.clone()))
                .app_data(actix_web::web::Data::new($state.quote_service.clone()))
                .app_data(actix_web::web::Data::new($state.dashboard_service.clone()))
                .wrap_fn(|req, srv| {
                    let tenant = req
                        .headers()
                        .get("x-test-tenant")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("tenant-a")
                        .to_string();
                    req.extensions_mut()
                        .insert(bizdesk::middleware::TenantId(tenant));
                    srv.call(req)
                })
                .configure(bizdesk::modules::clients::controllers::configure)
                .configure(bizdesk::modules::products::controllers::configure)
                .configure(bizdesk::modules::invoices::controllers::configure)
                .configure(bizdesk::modules::quotes::controllers::configure)
                .configure(bizdesk::modules::dashboard::controllers::configure),
        )
        .await
    }};
}
