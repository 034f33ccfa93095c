use actix_web::web;

pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod invoices;
pub mod products;
pub mod quotes;

/// Register every HTTP route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(clients::controllers::configure)
        .configure(products::controllers::configure)
        .configure(invoices::controllers::configure)
        .configure(quotes::controllers::configure)
        .configure(dashboard::controllers::configure);
}
