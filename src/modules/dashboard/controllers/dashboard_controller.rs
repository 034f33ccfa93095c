use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::dashboard::services::DashboardService;

/// GET /api/dashboard
pub async fn get_dashboard(
    service: web::Data<Arc<DashboardService>>,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let dashboard = service.get_dashboard(&tenant_id.0).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/dashboard", web::get().to(get_dashboard));
}
