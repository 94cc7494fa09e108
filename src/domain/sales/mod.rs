// Sales domain module
// Sale rows, the visit form and currency rendering

pub mod money;
pub mod sale_record;

pub use sale_record::{NewSaleRecord, SaleRecord};
