//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`], [`CellRange`], [`ColumnSpan`], [`SheetRange`] - Locations
//! - [`CellData`] - Value plus style index

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator, ColumnSpan, SheetRange};
pub use storage::{CellData, CellStorage, DEFAULT_COLUMN_WIDTH};
pub use value::CellValue;
