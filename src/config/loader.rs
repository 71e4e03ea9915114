//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, OrganizationConfig, PayrollRates};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/staffsync/
/// ├── organization.yaml   # Header identity and currency labels
/// └── payroll.yaml        # Overtime rates, EPF/SOCSO rates, bounds
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/staffsync").unwrap();
/// println!("Organization: {}", loader.config().organization.name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any rate is negative, or a percentage rate exceeds 1
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization_path = path.join("organization.yaml");
        let organization = Self::load_yaml::<OrganizationConfig>(&organization_path)?;

        let payroll_path = path.join("payroll.yaml");
        let rates = Self::load_yaml::<PayrollRates>(&payroll_path)?;
        Self::validate_rates(&rates, &payroll_path)?;

        Ok(Self {
            config: EngineConfig {
                organization: organization.organization,
                currency: organization.currency,
                rates,
            },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_rates(rates: &PayrollRates, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if rates.overtime.full_time.is_negative() || rates.overtime.part_time.is_negative() {
            return Err(invalid("overtime rates must not be negative".to_string()));
        }
        for (name, rate) in [("epf_rate", rates.epf_rate), ("socso_rate", rates.socso_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(format!("{} must be between 0 and 1, got {}", name, rate)));
            }
        }
        if rates.max_overtime_hours < Decimal::ZERO {
            return Err(invalid("max_overtime_hours must not be negative".to_string()));
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
