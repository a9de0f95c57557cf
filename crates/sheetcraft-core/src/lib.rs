//! # sheetcraft-core
//!
//! Core data structures for sheetcraft.
//!
//! This crate provides the grid types every other sheetcraft crate builds on:
//! - [`CellValue`] - Cell contents (numbers, strings, booleans, formula text)
//! - [`CellAddress`], [`CellRange`], [`ColumnSpan`], [`SheetRange`] - Addressing
//! - [`Style`] and [`StyleAttributes`] - Resolved cell styles and partial updates
//! - [`Workbook`], [`Worksheet`] - An in-memory document
//!
//! ## Example
//!
//! ```rust
//! use sheetcraft_core::{CellRange, CellValue, StyleAttributes, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "Total Income").unwrap();
//! sheet.set_cell_value("C1", CellValue::formula("SUM(C4:C7)")).unwrap();
//!
//! let header = CellRange::parse("A1:C1").unwrap();
//! sheet.apply_attributes(&header, &StyleAttributes::bold()).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{
    CellAddress, CellData, CellRange, CellValue, ColumnSpan, SheetRange, DEFAULT_COLUMN_WIDTH,
};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderSides, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, Style, StyleAttributes, StylePool,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum column width in characters
pub const MAX_COLUMN_WIDTH: f64 = 255.0;
