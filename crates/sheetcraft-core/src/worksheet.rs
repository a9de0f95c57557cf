//! Worksheet type

use crate::cell::{
    CellAddress, CellData, CellRange, CellStorage, CellValue, ColumnSpan, DEFAULT_COLUMN_WIDTH,
};
use crate::error::{Error, Result};
use crate::style::{BorderEdge, NumberFormat, Style, StyleAttributes, DEFAULT_FONT_SIZE};
use crate::{MAX_COLS, MAX_COLUMN_WIDTH, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value by address string
    pub fn value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get the formula text of a cell, if it holds one
    pub fn formula_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cells.get(row, col).and_then(|c| c.value.formula_text())
    }

    /// Get the resolved style of a cell (default style for untouched cells)
    pub fn style_at(&self, row: u32, col: u16) -> &Style {
        let idx = self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.cells
            .style_pool()
            .get(idx)
            .unwrap_or_else(|| self.cells.style_pool().default_style())
    }

    /// Get the resolved style of a cell by address string
    pub fn style(&self, address: &str) -> Result<&Style> {
        let addr = CellAddress::parse(address)?;
        Ok(self.style_at(addr.row, addr.col))
    }

    /// Values of a range as a row-major matrix
    pub fn range_values(&self, range: &CellRange) -> Vec<Vec<CellValue>> {
        (range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| self.value_at(row, col))
                    .collect()
            })
            .collect()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        Self::validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Write a row-major matrix into a range
    ///
    /// The matrix must have exactly the range's shape.
    pub fn write_range(&mut self, range: &CellRange, rows: &[Vec<CellValue>]) -> Result<()> {
        Self::check_shape(range, rows)?;
        Self::validate_range(range)?;
        for (addr, value) in range.cells().zip(rows.iter().flatten()) {
            self.cells.set_value(addr.row, addr.col, value.clone());
        }
        Ok(())
    }

    /// Apply a partial style to every cell of a range
    ///
    /// Border sides are resolved per cell: perimeter cells get the edge lines,
    /// interior boundaries get the inside lines.
    pub fn apply_attributes(&mut self, range: &CellRange, attrs: &StyleAttributes) -> Result<()> {
        Self::validate_range(range)?;
        for addr in range.cells() {
            let mut style = self.style_at(addr.row, addr.col).clone();
            style.apply(attrs);
            if let Some(sides) = attrs.border_sides {
                let edges = sides.edges_for(range, addr, BorderEdge::continuous());
                style.border.overlay(&edges);
            }
            let idx = self.cells.style_pool_mut().get_or_insert(style);
            self.cells.set_style(addr.row, addr.col, idx);
        }
        Ok(())
    }

    /// Set the number format of every cell in a range
    pub fn set_number_format(&mut self, range: &CellRange, format: &NumberFormat) -> Result<()> {
        let attrs = StyleAttributes {
            number_format: Some(format.clone()),
            ..StyleAttributes::default()
        };
        self.apply_attributes(range, &attrs)
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merge cells
    ///
    /// Re-merging an identical region is a no-op; any other overlap fails.
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        Self::validate_range(range)?;
        for existing in self.cells.merged_regions() {
            if existing == range {
                return Ok(());
            }
            if range.overlaps(existing) {
                return Err(Error::MergedCellConflict(range.to_string()));
            }
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// Check whether a cell is covered by a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        let addr = CellAddress::new(row, col);
        self.cells.merged_regions().iter().any(|r| r.contains(&addr))
    }

    // === Columns ===

    /// Get column width in characters
    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Set column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells
            .set_column_width(col, width.clamp(0.0, MAX_COLUMN_WIDTH));
    }

    /// Size each column in the span to its widest displayed value
    ///
    /// Merged cells are skipped. Text width scales with font size. Columns
    /// with no content keep the default width.
    pub fn autofit_columns(&mut self, span: &ColumnSpan) -> Result<()> {
        if span.last >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(span.last as u32, MAX_COLS - 1));
        }
        for col in span.columns() {
            let widest = self
                .cells
                .iter()
                .filter(|(row, c, data)| *c == col && !data.value.is_empty() && !self.is_merged(*row, col))
                .map(|(row, _, data)| {
                    let chars = data.value.to_string().chars().count() as f64;
                    let scale = self.style_at(row, col).font.size / DEFAULT_FONT_SIZE;
                    (chars * scale).ceil() + 2.0
                })
                .fold(DEFAULT_COLUMN_WIDTH, f64::max);
            self.set_column_width(col, widest);
        }
        Ok(())
    }

    // === Inspection ===

    /// Get the used range (bounds of all cells holding a value)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(r0, c0, r1, c1)| CellRange::from_indices(r0, c0, r1, c1))
    }

    /// Number of stored cells (values or non-default styles)
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the sheet has no stored cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Iterate over formula cells
    pub fn formula_cells(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.cells
            .iter()
            .filter_map(|(row, col, data)| data.value.formula_text().map(|f| (row, col, f)))
    }

    fn validate_cell_position(row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }

    fn validate_range(range: &CellRange) -> Result<()> {
        Self::validate_cell_position(range.end.row, range.end.col)
    }

    /// Check that a matrix has exactly the shape of a range
    pub fn check_shape<T>(range: &CellRange, rows: &[Vec<T>]) -> Result<()> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let ragged = rows.iter().any(|r| r.len() != width);
        if ragged || rows.len() != range.row_count() as usize || width != range.col_count() as usize
        {
            return Err(Error::ShapeMismatch {
                range: range.to_string(),
                expected_rows: range.row_count(),
                expected_cols: range.col_count(),
                rows: rows.len(),
                cols: width,
            });
        }
        Ok(())
    }
}
