//! Roster extraction from the payroll sheet.
//!
//! This module turns the fixed layout of the monthly report into typed
//! records: store totals, consultants, salaried staff, and the product-sale
//! tally. Every coordinate lives in [`CellSchema`]. Extraction never fails;
//! absent grids and blank cells produce empty lists and zeros.

mod consultants;
mod product_sales;
mod schema;
mod staff;

pub use consultants::{extract_consultants, read_store_figures};
pub use product_sales::tally_product_sales;
pub use schema::{CellSchema, StaffBlock};
pub use staff::extract_staff;
