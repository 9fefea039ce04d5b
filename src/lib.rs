//! Salon Payroll Engine
//!
//! This crate computes monthly staff pay for a salon from its monthly
//! report workbook: progressive bracket bonuses, shared bonus pools split
//! between consultants and staff, personal bracket bonuses, and
//! position-specific salary lines.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
