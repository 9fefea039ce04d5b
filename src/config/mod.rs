//! Configuration loading and management for the salon payroll engine.
//!
//! This module loads bracket tables, position rates and bonus rules from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salon_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/salon").unwrap();
//! println!("Loaded rules for: {}", config.salon().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Bracket, BracketTable, BracketTables, FrontDeskRules, IncentiveRules, PayrollConfig,
    PoolRules, PositionRates, PositionTable, ProductRules, RulesConfig, SalonMetadata,
};
