use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::quotes::models::{CreateQuoteRequest, UpdateQuoteStatusRequest};
use crate::modules::quotes::services::QuoteService;

#[derive(Debug, Deserialize)]
pub struct ListQuotesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// POST /api/quotes
pub async fn create_quote(
    service: web::Data<Arc<QuoteService>>,
    tenant_id: TenantId,
    request: web::Json<CreateQuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let quote = service
        .create_quote(request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Created().json(quote))
}

/// GET /api/quotes/{id}
pub async fn get_quote(
    service: web::Data<Arc<QuoteService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quote = service.get_quote(&path.into_inner(), &tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(quote))
}

/// GET /api/quotes
pub async fn list_quotes(
    service: web::Data<Arc<QuoteService>>,
    tenant_id: TenantId,
    query: web::Query<ListQuotesQuery>,
) -> Result<HttpResponse, AppError> {
    let quotes = service
        .list_quotes(&tenant_id.0, query.limit.clamp(1, 100), query.offset.max(0))
        .await?;

    Ok(HttpResponse::Ok().json(quotes))
}

/// PATCH /api/quotes/{id}/status
pub async fn update_quote_status(
    service: web::Data<Arc<QuoteService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
    request: web::Json<UpdateQuoteStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let quote = service
        .update_status(&path.into_inner(), request.status, &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(quote))
}

/// Configure quote routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/quotes")
            .route("", web::post().to(create_quote))
            .route("", web::get().to(list_quotes))
            .route("/{id}", web::get().to(get_quote))
            .route("/{id}/status", web::patch().to(update_quote_status)),
    );
}
