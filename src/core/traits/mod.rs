pub mod repository;

pub use repository::TenantRepository;
