pub mod numbering;
pub mod pricing;
pub mod schedule;
pub mod totals_calculator;

pub use numbering::next_number;
pub use pricing::{price_items, PricedDocument};
pub use schedule::closing_date;
pub use totals_calculator::compute_totals;
