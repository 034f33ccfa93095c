use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::products::models::ProductRequest;
use crate::modules::products::services::ProductService;

/// GET /api/products
pub async fn list_products(
    service: web::Data<Arc<ProductService>>,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let products = service.list_products(&tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(products))
}

/// POST /api/products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    tenant_id: TenantId,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .create_product(request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Created().json(product))
}

/// GET /api/products/{id}
pub async fn get_product(
    service: web::Data<Arc<ProductService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(&path.into_inner(), &tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// PUT /api/products/{id}
pub async fn update_product(
    service: web::Data<Arc<ProductService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .update_product(&path.into_inner(), request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    service: web::Data<Arc<ProductService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_product(&path.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
