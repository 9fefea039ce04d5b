//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BracketTables, PayrollConfig, PositionTable, RulesConfig, SalonMetadata};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/salon/
/// ├── salon.yaml      # Rule set metadata
/// ├── brackets.yaml   # Progressive bonus tables
/// ├── positions.yaml  # Base salary and allowances per position
/// └── rules.yaml      # Pool shares, gates and flat bonuses
/// ```
///
/// # Example
///
/// ```no_run
/// use salon_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/salon").unwrap();
/// let brackets = &loader.config().brackets().store_performance;
/// println!("{} store performance brackets", brackets.brackets().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A bracket table is not in ascending, non-overlapping order
    /// - A pool share is not strictly between 0 and 1
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SalonMetadata>(&path.join("salon.yaml"))?;
        let brackets = Self::load_yaml::<BracketTables>(&path.join("brackets.yaml"))?;
        let positions = Self::load_yaml::<PositionTable>(&path.join("positions.yaml"))?;
        let rules = Self::load_yaml::<RulesConfig>(&path.join("rules.yaml"))?;

        Self::validate_brackets(&brackets)?;
        Self::validate_rules(&rules)?;

        Ok(Self {
            config: PayrollConfig::new(metadata, brackets, positions, rules),
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

    fn validate_brackets(brackets: &BracketTables) -> EngineResult<()> {
        for (name, table) in brackets.named() {
            if table.brackets().is_empty() {
                return Err(EngineError::InvalidConfig {
                    message: format!("bracket table '{}' is empty", name),
                });
            }
            if !table.is_well_ordered() {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "bracket table '{}' must be ascending and non-overlapping",
                        name
                    ),
                });
            }
        }
        Ok(())
    }

    fn validate_rules(rules: &RulesConfig) -> EngineResult<()> {
        let shares = [
            (
                "consultant_performance_share",
                rules.pools.consultant_performance_share,
            ),
            (
                "consultant_consumption_share",
                rules.pools.consultant_consumption_share,
            ),
        ];
        for (name, share) in shares {
            // The staff pool is derived by dividing by the share.
            if share <= Decimal::ZERO || share >= Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be between 0 and 1, got {}", name, share),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the salon metadata.
    pub fn salon(&self) -> &super::SalonMetadata {
        self.config.salon()
    }
}
