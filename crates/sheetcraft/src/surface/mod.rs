//! Grid surface adapter
//!
//! [`GridSurface`] is the narrow contract the renderer drives. Every mutating
//! call is buffered and only becomes observable once [`GridSurface::commit`]
//! returns successfully, in submission order.

mod memory;

pub use memory::{MemorySurface, PlacedChart, SurfaceOp};

use sheetcraft_chart::ChartSpec;
use sheetcraft_core::{CellRange, CellValue, ColumnSpan, SheetRange, StyleAttributes};

use crate::error::SurfaceResult;

/// Handle to a sheet created (or found) on a surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetHandle {
    name: String,
}

impl SheetHandle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// The sheet's name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Handle to a chart added to a sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    /// Sheet the chart lives on
    pub sheet: String,
    /// Position among that sheet's charts
    pub index: usize,
}

/// The host's current selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Sheet-qualified address of the selected range
    pub address: SheetRange,
    /// Selected values, row-major, from the top-left corner of the selection
    ///
    /// Trailing rows and columns past the sheet's used range are left out, so
    /// the matrix can be smaller than the selection.
    pub values: Vec<Vec<CellValue>>,
}

impl Selection {
    pub fn new(address: SheetRange, values: Vec<Vec<CellValue>>) -> Self {
        Self { address, values }
    }

    pub fn row_count(&self) -> u32 {
        self.address.range.row_count()
    }

    pub fn column_count(&self) -> u16 {
        self.address.range.col_count()
    }

    /// Number of selected cells (rows x columns)
    pub fn cell_count(&self) -> u64 {
        self.address.range.cell_count()
    }
}

/// Content written into a range
#[derive(Debug, Clone, PartialEq)]
pub enum RangeContent {
    /// Literal values (may include formula values)
    Values(Vec<Vec<CellValue>>),
    /// Formula text for every cell
    Formulas(Vec<Vec<String>>),
}

impl RangeContent {
    /// Number of rows in the matrix
    pub fn row_count(&self) -> usize {
        match self {
            RangeContent::Values(rows) => rows.len(),
            RangeContent::Formulas(rows) => rows.len(),
        }
    }

    /// Check the matrix against a target range
    pub fn check_shape(&self, range: &CellRange) -> sheetcraft_core::Result<()> {
        match self {
            RangeContent::Values(rows) => sheetcraft_core::Worksheet::check_shape(range, rows),
            RangeContent::Formulas(rows) => sheetcraft_core::Worksheet::check_shape(range, rows),
        }
    }

    /// Convert to cell values
    pub fn into_values(self) -> Vec<Vec<CellValue>> {
        match self {
            RangeContent::Values(rows) => rows,
            RangeContent::Formulas(rows) => rows
                .into_iter()
                .map(|row| row.into_iter().map(CellValue::formula).collect())
                .collect(),
        }
    }
}

/// A spreadsheet host the renderer can write to
pub trait GridSurface {
    /// Create a new, empty sheet
    ///
    /// Fails with [`SurfaceError::DuplicateName`](crate::SurfaceError::DuplicateName)
    /// when a committed or pending sheet already uses the name (ignoring case).
    fn create_sheet(&mut self, name: &str) -> SurfaceResult<SheetHandle>;

    /// Check whether a committed or pending sheet uses the name (ignoring case)
    fn sheet_exists(&self, name: &str) -> bool;

    /// Write a values or formulas matrix; its shape must match the range
    fn write_range(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        content: RangeContent,
    ) -> SurfaceResult<()>;

    /// Patch the style of every cell in a range
    fn apply_style(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        attrs: &StyleAttributes,
    ) -> SurfaceResult<()>;

    /// Set the number format pattern of a range
    fn set_number_format(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        pattern: &str,
    ) -> SurfaceResult<()>;

    /// Merge a range into one cell
    fn merge_cells(&mut self, sheet: &SheetHandle, range: &CellRange) -> SurfaceResult<()>;

    /// Size columns to their content
    fn autofit_columns(&mut self, sheet: &SheetHandle, span: ColumnSpan) -> SurfaceResult<()>;

    /// Add a chart to a sheet
    fn add_chart(&mut self, sheet: &SheetHandle, chart: ChartSpec) -> SurfaceResult<ChartHandle>;

    /// Make a sheet the active one
    fn activate(&mut self, sheet: &SheetHandle) -> SurfaceResult<()>;

    /// Read the current selection (committed state)
    fn selection(&self) -> SurfaceResult<Selection>;

    /// Apply every buffered operation, all or nothing
    fn commit(&mut self) -> SurfaceResult<()>;

    /// Drop every buffered operation
    fn discard(&mut self);
}
