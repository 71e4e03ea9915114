//! HTTP API module for the Payroll Generation Engine.
//!
//! A thin controller over [`PayslipService`](crate::service::PayslipService):
//! generate a payslip, list an employee's payslips and download a payslip
//! document. Authentication is left to the surrounding deployment.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::GeneratePayslipBody;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
