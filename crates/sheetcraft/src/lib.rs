//! # sheetcraft
//!
//! Preformatted worksheet templates for spreadsheet hosts.
//!
//! sheetcraft writes four ready-made sheets (a monthly budget, a statistical
//! summary of the selection, a formula reference and an executive dashboard)
//! through a narrow [`GridSurface`] contract, and resolves chat commands to
//! the right template by keyword.
//!
//! ## Features
//!
//! - Declarative template definitions, interpreted by the [`Renderer`]
//! - Buffered, all-or-nothing surface commits
//! - Collision-free sheet naming (`Budget_Template`, `Budget_Template_2`, ...)
//! - An [`Assistant`] session with quick actions, chat and a transcript
//! - Settings persistence through [`settings::SettingsStore`]
//!
//! ## Example
//!
//! ```rust
//! use sheetcraft::prelude::*;
//!
//! let mut surface = MemorySurface::new();
//! let sheet = Renderer::render(&mut surface, TemplateId::Budget.definition(), None).unwrap();
//! assert_eq!(sheet.name(), "Budget_Template");
//!
//! let ws = surface.workbook().worksheet_by_name("Budget_Template").unwrap();
//! assert_eq!(ws.formula_at(7, 2), Some("=SUM(C4:C7)"));
//! ```

pub mod assistant;
pub mod error;
pub mod prelude;
pub mod render;
pub mod resolve;
pub mod settings;
pub mod surface;
pub mod template;

pub use assistant::{Assistant, ChatMessage, Sender, Status};
pub use error::{RenderError, RenderResult, SettingsError, SurfaceError, SurfaceResult};
pub use render::{PlanOp, RenderPlan, Renderer, TemplateRequest};
pub use resolve::{resolve, Resolution};
pub use settings::{JsonFileStore, MemoryStore, Session, SettingsStore};
pub use surface::{
    ChartHandle, GridSurface, MemorySurface, RangeContent, Selection, SheetHandle, SurfaceOp,
};
pub use template::{TemplateDefinition, TemplateId};

// Re-export core types
pub use sheetcraft_core::{
    CellAddress, CellRange, CellValue, Color, ColumnSpan, SheetRange, Style, StyleAttributes,
    Workbook, Worksheet,
};

// Re-export chart types
pub use sheetcraft_chart::{ChartAnchor, ChartSpec, ChartType, LegendPosition, SeriesBy};
