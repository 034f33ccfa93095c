use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, InvoiceStatus, UpdateInvoiceStatusRequest,
};
use crate::modules::invoices::services::InvoiceService;

const MAX_LIMIT: i64 = 100;

/// Query parameters for listing invoices
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<InvoiceStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl ListInvoicesQuery {
    /// Limit clamped to 1..=100, offset floored at 0
    fn page(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}

/// POST /api/invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    tenant_id: TenantId,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .create_invoice(request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// GET /api/invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(&path.into_inner(), &tenant_id.0).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// GET /api/invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    tenant_id: TenantId,
    query: web::Query<ListInvoicesQuery>,
) -> Result<HttpResponse, AppError> {
    let (limit, offset) = query.page();
    let invoices = service
        .list_invoices(&tenant_id.0, query.status, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// PATCH /api/invoices/{id}/status
pub async fn update_invoice_status(
    service: web::Data<Arc<InvoiceService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
    request: web::Json<UpdateInvoiceStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .update_status(&path.into_inner(), request.status, &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}/status", web::patch().to(update_invoice_status)),
    );
}
