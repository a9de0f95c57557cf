//! Prelude module - common imports for sheetcraft users
//!
//! ```rust
//! use sheetcraft::prelude::*;
//! ```

pub use crate::{
    // Session
    Assistant,
    // Core types
    CellAddress,
    CellRange,
    CellValue,
    // Charts
    ChartSpec,
    ChartType,
    // Surface
    GridSurface,
    MemorySurface,
    RangeContent,
    // Errors
    RenderError,
    // Rendering
    Renderer,
    Selection,
    SheetHandle,
    SheetRange,
    Status,
    SurfaceError,
    TemplateId,
    TemplateRequest,
    Workbook,
    Worksheet,
};
