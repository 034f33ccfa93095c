use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::clients::models::ClientRequest;
use crate::modules::clients::services::ClientService;

/// GET /api/clients
pub async fn list_clients(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let clients = service.list_clients(&tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(clients))
}

/// POST /api/clients
pub async fn create_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    request: web::Json<ClientRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service
        .create_client(request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Created().json(client))
}

/// GET /api/clients/{id}
pub async fn get_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = service.get_client(&path.into_inner(), &tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(client))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
    request: web::Json<ClientRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service
        .update_client(&path.into_inner(), request.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(client))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_client(&path.into_inner(), &tenant_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Client deleted successfully"
    })))
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/clients")
            .route("", web::get().to(list_clients))
            .route("", web::post().to(create_client))
            .route("/{id}", web::get().to(get_client))
            .route("/{id}", web::put().to(update_client))
            .route("/{id}", web::delete().to(delete_client)),
    );
}
