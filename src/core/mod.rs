pub mod currency;
pub mod error;
pub mod traits;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use traits::TenantRepository;
