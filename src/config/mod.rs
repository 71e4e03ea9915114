//! Configuration loading and management for the Payroll Generation Engine.
//!
//! This module loads the organization identity, currency labels and the
//! payroll rate table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/staffsync").unwrap();
//! println!("EPF rate: {}", config.config().rates.epf_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrencyConfig, EngineConfig, OrganizationConfig, OrganizationProfile, OvertimeRates,
    PayrollRates,
};
