//! Tabular input model.
//!
//! A [`Workbook`] is a list of named [`Sheet`]s, each holding a [`Grid`] of
//! [`Cell`]s addressed by zero-based `(row, column)`. Reading spreadsheet
//! files into this shape is left to the caller; the engine only reads
//! cells.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single spreadsheet cell.
///
/// In JSON a cell is `null`, a number, or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A numeric cell.
    Number(Decimal),
    /// A text cell.
    Text(String),
    /// A blank or missing cell.
    #[default]
    Empty,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Returns true for empty cells and text cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Returns the trimmed text of the cell, or `None` if it is blank.
    ///
    /// Numeric cells are rendered without trailing zeros so that an
    /// identifier typed as `7` reads back as `"7"`.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Number(value) => Some(value.normalize().to_string()),
        }
    }

    /// Returns the numeric value of the cell.
    ///
    /// Blank cells and text that does not parse as a number are coerced
    /// to zero. Thousands separators in text are ignored.
    pub fn number(&self) -> Decimal {
        self.number_or(Decimal::ZERO)
    }

    /// Returns the numeric value of the cell, or `default` if it is blank.
    ///
    /// Non-blank text that does not parse still coerces to zero.
    pub fn number_or(&self, default: Decimal) -> Decimal {
        match self {
            Cell::Number(value) => *value,
            cell if cell.is_blank() => default,
            Cell::Text(text) => {
                Decimal::from_str(&text.trim().replace(',', "")).unwrap_or(Decimal::ZERO)
            }
            Cell::Empty => default,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(Decimal::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(Decimal::from(value))
    }
}

/// A zero-based address into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRef {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl CellRef {
    /// Creates a new cell reference.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A 2-D grid of cells. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates a grid from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Creates an empty grid of the given size.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at `(row, col)`, or an empty cell when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Returns the cell at a [`CellRef`].
    pub fn at(&self, cell: CellRef) -> &Cell {
        self.cell(cell.row, cell.col)
    }

    /// Writes a cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<Cell>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value.into();
    }
}

/// A named worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// The worksheet name (e.g., "202506").
    pub name: String,
    /// The worksheet cells.
    pub rows: Grid,
}

impl Sheet {
    /// Creates a new sheet.
    pub fn new(name: impl Into<String>, rows: Grid) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the pay month encoded in a six-digit `YYYYMM` sheet name.
    ///
    /// # Examples
    ///
    /// ```
    /// use salon_payroll::models::{Grid, Sheet};
    /// use chrono::NaiveDate;
    ///
    /// let sheet = Sheet::new("202506", Grid::default());
    /// assert_eq!(sheet.period(), NaiveDate::from_ymd_opt(2025, 6, 1));
    /// assert_eq!(Sheet::new("7", Grid::default()).period(), None);
    /// ```
    pub fn period(&self) -> Option<NaiveDate> {
        let name = self.name.trim();
        if name.len() != 6 || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = name[..4].parse().ok()?;
        let month: u32 = name[4..].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    }

    fn numeric_name(&self) -> Option<Decimal> {
        Decimal::from_str(self.name.trim()).ok()
    }
}

/// A collection of worksheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    /// The worksheets in workbook order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates a workbook from sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Finds a sheet by exact (trimmed) name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let name = name.trim();
        self.sheets.iter().find(|s| s.name.trim() == name)
    }

    /// Returns the sheet whose name is the largest number.
    ///
    /// Sheets named by month (`202505`, `202506`) therefore resolve to the
    /// latest month. Sheets with non-numeric names are ignored.
    pub fn latest_numeric_sheet(&self) -> Option<&Sheet> {
        self.sheets
            .iter()
            .filter_map(|s| s.numeric_name().map(|n| (n, s)))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, sheet)| sheet)
    }
}
