//! HTTP API module for the salon payroll engine.
//!
//! This module exposes the payroll pipeline over a single JSON endpoint,
//! `POST /calculate`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
