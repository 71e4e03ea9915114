//! Application state for the Payroll Generation Engine API.

use crate::service::PayslipService;

/// Shared application state.
///
/// Wraps the payslip service; cloning is cheap because the service only
/// holds shared handles.
#[derive(Clone)]
pub struct AppState {
    service: PayslipService,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: PayslipService) -> Self {
        Self { service }
    }

    /// Returns the payslip service.
    pub fn service(&self) -> &PayslipService {
        &self.service
    }
}
