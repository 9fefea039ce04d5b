//! Request types for the payroll API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint and their validation into engine inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollInput;
use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, Grid, Sheet, Workbook};

/// Request body for the `/calculate` endpoint.
///
/// Contains the monthly report workbook and the run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The monthly report.
    pub workbook: WorkbookRequest,
    /// Number of people the staff pool is split across. Must be at least 1.
    pub staff_count: i64,
    /// Name of the store manager.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// Store performance target for high-target bonuses. Must be positive.
    #[serde(default)]
    pub high_target_amount: Option<Decimal>,
    /// Worksheet to read; defaults to the latest numeric sheet.
    #[serde(default)]
    pub sheet_name: Option<String>,
}

/// Workbook in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkbookRequest {
    /// The worksheets.
    #[serde(default)]
    pub sheets: Vec<SheetRequest>,
}

/// Worksheet in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRequest {
    /// The worksheet name.
    pub name: String,
    /// Cell rows; each cell is `null`, a number, or a string.
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl From<WorkbookRequest> for Workbook {
    fn from(req: WorkbookRequest) -> Self {
        Workbook::new(req.sheets.into_iter().map(Into::into).collect())
    }
}

impl From<SheetRequest> for Sheet {
    fn from(req: SheetRequest) -> Self {
        Sheet::new(req.name, Grid::new(req.rows))
    }
}

impl CalculationRequest {
    /// Validates the run parameters and converts the request into engine inputs.
    pub fn into_parts(self) -> EngineResult<(Workbook, PayrollInput)> {
        if self.staff_count < 1 {
            return Err(EngineError::InvalidParameter {
                field: "staff_count".to_string(),
                message: format!("must be at least 1, got {}", self.staff_count),
            });
        }
        let staff_count = u32::try_from(self.staff_count).map_err(|_| EngineError::InvalidParameter {
            field: "staff_count".to_string(),
            message: format!("{} is too large", self.staff_count),
        })?;

        if let Some(target) = self.high_target_amount
            && target <= Decimal::ZERO
        {
            return Err(EngineError::InvalidParameter {
                field: "high_target_amount".to_string(),
                message: format!("must be positive, got {}", target),
            });
        }

        let manager_name = self
            .manager_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let sheet_name = self
            .sheet_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok((
            self.workbook.into(),
            PayrollInput {
                staff_count,
                manager_name,
                high_target_amount: self.high_target_amount,
                sheet_name,
            },
        ))
    }
}
