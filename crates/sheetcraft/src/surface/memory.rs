//! In-memory grid surface over a [`Workbook`]

use log::{debug, warn};
use sheetcraft_chart::ChartSpec;
use sheetcraft_core::{
    CellAddress, CellRange, ColumnSpan, NumberFormat, SheetRange, StyleAttributes, Workbook,
    Worksheet,
};

use super::{ChartHandle, GridSurface, RangeContent, Selection, SheetHandle};
use crate::error::{SurfaceError, SurfaceResult};

/// One buffered surface mutation
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    CreateSheet {
        name: String,
    },
    Write {
        sheet: String,
        range: CellRange,
        content: RangeContent,
    },
    Style {
        sheet: String,
        range: CellRange,
        attrs: StyleAttributes,
    },
    NumberFormat {
        sheet: String,
        range: CellRange,
        pattern: String,
    },
    Merge {
        sheet: String,
        range: CellRange,
    },
    AutoFit {
        sheet: String,
        span: ColumnSpan,
    },
    Chart {
        sheet: String,
        chart: ChartSpec,
    },
    Activate {
        sheet: String,
    },
}

impl SurfaceOp {
    /// The sheet this operation targets
    pub fn sheet(&self) -> &str {
        match self {
            SurfaceOp::CreateSheet { name } => name,
            SurfaceOp::Write { sheet, .. }
            | SurfaceOp::Style { sheet, .. }
            | SurfaceOp::NumberFormat { sheet, .. }
            | SurfaceOp::Merge { sheet, .. }
            | SurfaceOp::AutoFit { sheet, .. }
            | SurfaceOp::Chart { sheet, .. }
            | SurfaceOp::Activate { sheet } => sheet,
        }
    }

    /// Short name of the operation, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SurfaceOp::CreateSheet { .. } => "create_sheet",
            SurfaceOp::Write { .. } => "write_range",
            SurfaceOp::Style { .. } => "apply_style",
            SurfaceOp::NumberFormat { .. } => "set_number_format",
            SurfaceOp::Merge { .. } => "merge_cells",
            SurfaceOp::AutoFit { .. } => "autofit_columns",
            SurfaceOp::Chart { .. } => "add_chart",
            SurfaceOp::Activate { .. } => "activate",
        }
    }
}

/// A chart placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedChart {
    pub sheet: String,
    pub chart: ChartSpec,
}

/// A [`GridSurface`] backed by an in-memory [`Workbook`]
///
/// Mutations queue up until [`commit`](GridSurface::commit), which replays
/// them against a copy of the workbook and swaps it in only if every
/// operation succeeded. A surface built with
/// [`with_journal`](MemorySurface::with_journal) also keeps the applied
/// operations.
#[derive(Debug, Default)]
pub struct MemorySurface {
    workbook: Workbook,
    charts: Vec<PlacedChart>,
    selection: Option<SheetRange>,
    pending: Vec<SurfaceOp>,
    journal: Option<Vec<SurfaceOp>>,
}

impl MemorySurface {
    /// Create a surface over a new workbook holding an empty `Sheet1`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface over an existing workbook
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            workbook,
            ..Self::default()
        }
    }

    /// Record every committed operation
    pub fn with_journal(mut self) -> Self {
        self.journal.get_or_insert_with(Vec::new);
        self
    }

    /// The committed workbook
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Consume the surface, returning the committed workbook
    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    /// Committed charts, in the order they were added
    pub fn charts(&self) -> &[PlacedChart] {
        &self.charts
    }

    /// Committed charts on one sheet
    pub fn charts_on<'a>(&'a self, sheet: &'a str) -> impl Iterator<Item = &'a ChartSpec> + 'a {
        let wanted = sheet.to_lowercase();
        self.charts
            .iter()
            .filter(move |c| c.sheet.to_lowercase() == wanted)
            .map(|c| &c.chart)
    }

    /// Operations applied by successful commits
    ///
    /// Always empty unless the surface was built [`with_journal`](Self::with_journal).
    pub fn journal(&self) -> &[SurfaceOp] {
        self.journal.as_deref().unwrap_or_default()
    }

    /// Operations waiting for the next commit
    pub fn pending(&self) -> &[SurfaceOp] {
        &self.pending
    }

    /// Select a range, as a user clicking in the host would
    ///
    /// An unqualified range selects on the active sheet.
    pub fn select(&mut self, range: SheetRange) -> SurfaceResult<()> {
        let range = match range.sheet {
            Some(_) => range,
            None => {
                let active = self
                    .workbook
                    .active_worksheet()
                    .ok_or(SurfaceError::NoSelection)?;
                range.or_sheet(active.name())
            }
        };
        let sheet = range.sheet.as_deref().unwrap_or_default();
        let canonical = self
            .workbook
            .worksheet_by_name(sheet)
            .ok_or_else(|| SurfaceError::SheetNotFound(sheet.to_string()))?
            .name()
            .to_string();

        self.selection = Some(SheetRange::new(canonical, range.range));
        Ok(())
    }

    fn pending_sheet(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.pending.iter().any(|op| match op {
            SurfaceOp::CreateSheet { name } => name.to_lowercase() == wanted,
            _ => false,
        })
    }

    fn require_sheet(&self, sheet: &SheetHandle) -> SurfaceResult<String> {
        if self.sheet_exists(sheet.name()) {
            Ok(sheet.name().to_string())
        } else {
            Err(SurfaceError::SheetNotFound(sheet.name().to_string()))
        }
    }

    fn sheet_mut<'a>(workbook: &'a mut Workbook, name: &str) -> SurfaceResult<&'a mut Worksheet> {
        workbook
            .worksheet_by_name_mut(name)
            .ok_or_else(|| SurfaceError::SheetNotFound(name.to_string()))
    }

    fn apply(workbook: &mut Workbook, charts: &mut Vec<PlacedChart>, op: &SurfaceOp) -> SurfaceResult<()> {
        match op {
            SurfaceOp::CreateSheet { name } => {
                if workbook.contains_sheet(name) {
                    return Err(SurfaceError::DuplicateName(name.clone()));
                }
                workbook.add_worksheet_with_name(name)?;
            }
            SurfaceOp::Write {
                sheet,
                range,
                content,
            } => {
                let values = content.clone().into_values();
                Self::sheet_mut(workbook, sheet)?.write_range(range, &values)?;
            }
            SurfaceOp::Style {
                sheet,
                range,
                attrs,
            } => Self::sheet_mut(workbook, sheet)?.apply_attributes(range, attrs)?,
            SurfaceOp::NumberFormat {
                sheet,
                range,
                pattern,
            } => {
                let format = NumberFormat::from_code(pattern.as_str());
                Self::sheet_mut(workbook, sheet)?.set_number_format(range, &format)?;
            }
            SurfaceOp::Merge { sheet, range } => Self::sheet_mut(workbook, sheet)?.merge_cells(range)?,
            SurfaceOp::AutoFit { sheet, span } => {
                Self::sheet_mut(workbook, sheet)?.autofit_columns(span)?
            }
            SurfaceOp::Chart { sheet, chart } => {
                Self::sheet_mut(workbook, sheet)?;
                if let Some(source) = chart.source.sheet.as_deref() {
                    if !workbook.contains_sheet(source) {
                        return Err(SurfaceError::SheetNotFound(source.to_string()));
                    }
                }
                charts.push(PlacedChart {
                    sheet: sheet.clone(),
                    chart: chart.clone(),
                });
            }
            SurfaceOp::Activate { sheet } => {
                let index = workbook
                    .sheet_index(sheet)
                    .ok_or_else(|| SurfaceError::SheetNotFound(sheet.clone()))?;
                workbook.set_active_sheet(index)?;
            }
        }
        Ok(())
    }
}

impl GridSurface for MemorySurface {
    fn create_sheet(&mut self, name: &str) -> SurfaceResult<SheetHandle> {
        Workbook::check_sheet_name(name)?;
        if self.sheet_exists(name) {
            return Err(SurfaceError::DuplicateName(name.to_string()));
        }
        self.pending.push(SurfaceOp::CreateSheet {
            name: name.to_string(),
        });
        Ok(SheetHandle::new(name))
    }

    fn sheet_exists(&self, name: &str) -> bool {
        self.workbook.contains_sheet(name) || self.pending_sheet(name)
    }

    fn write_range(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        content: RangeContent,
    ) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        content.check_shape(range)?;
        self.pending.push(SurfaceOp::Write {
            sheet,
            range: *range,
            content,
        });
        Ok(())
    }

    fn apply_style(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        attrs: &StyleAttributes,
    ) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        self.pending.push(SurfaceOp::Style {
            sheet,
            range: *range,
            attrs: attrs.clone(),
        });
        Ok(())
    }

    fn set_number_format(
        &mut self,
        sheet: &SheetHandle,
        range: &CellRange,
        pattern: &str,
    ) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        self.pending.push(SurfaceOp::NumberFormat {
            sheet,
            range: *range,
            pattern: pattern.to_string(),
        });
        Ok(())
    }

    fn merge_cells(&mut self, sheet: &SheetHandle, range: &CellRange) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        self.pending.push(SurfaceOp::Merge {
            sheet,
            range: *range,
        });
        Ok(())
    }

    fn autofit_columns(&mut self, sheet: &SheetHandle, span: ColumnSpan) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        self.pending.push(SurfaceOp::AutoFit { sheet, span });
        Ok(())
    }

    fn add_chart(&mut self, sheet: &SheetHandle, chart: ChartSpec) -> SurfaceResult<ChartHandle> {
        let sheet = self.require_sheet(sheet)?;
        let queued = self
            .pending
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Chart { .. }) && op.sheet().eq_ignore_ascii_case(&sheet))
            .count();
        let index = self.charts_on(&sheet).count() + queued;

        self.pending.push(SurfaceOp::Chart {
            sheet: sheet.clone(),
            chart,
        });
        Ok(ChartHandle { sheet, index })
    }

    fn activate(&mut self, sheet: &SheetHandle) -> SurfaceResult<()> {
        let sheet = self.require_sheet(sheet)?;
        self.pending.push(SurfaceOp::Activate { sheet });
        Ok(())
    }

    fn selection(&self) -> SurfaceResult<Selection> {
        let address = match &self.selection {
            Some(range) => range.clone(),
            None => {
                let active = self
                    .workbook
                    .active_worksheet()
                    .ok_or(SurfaceError::NoSelection)?;
                SheetRange::new(active.name(), CellRange::single(CellAddress::new(0, 0)))
            }
        };

        let sheet = address.sheet.as_deref().unwrap_or_default();
        let worksheet = self
            .workbook
            .worksheet_by_name(sheet)
            .ok_or_else(|| SurfaceError::SheetNotFound(sheet.to_string()))?;
        // Only the part that can hold data is read
        let start = address.range.start;
        let values = match worksheet.used_range() {
            Some(used) if used.end.row >= start.row && used.end.col >= start.col => {
                let end = CellAddress::new(
                    used.end.row.min(address.range.end.row),
                    used.end.col.min(address.range.end.col),
                );
                worksheet.range_values(&CellRange::new(start, end))
            }
            _ => Vec::new(),
        };
        Ok(Selection::new(address, values))
    }

    fn commit(&mut self) -> SurfaceResult<()> {
        let ops = std::mem::take(&mut self.pending);
        if ops.is_empty() {
            return Ok(());
        }

        let mut workbook = self.workbook.clone();
        let mut charts = self.charts.clone();
        for op in &ops {
            if let Err(e) = Self::apply(&mut workbook, &mut charts, op) {
                warn!(
                    "commit failed at {} on '{}', dropping {} operations: {e}",
                    op.kind(),
                    op.sheet(),
                    ops.len()
                );
                return Err(e);
            }
        }

        debug!("committed {} operations", ops.len());
        self.workbook = workbook;
        self.charts = charts;
        if let Some(journal) = &mut self.journal {
            journal.extend(ops);
        }
        Ok(())
    }

    fn discard(&mut self) {
        if !self.pending.is_empty() {
            warn!("discarding {} pending operations", self.pending.len());
            self.pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetcraft_chart::ChartType;
    use sheetcraft_core::CellValue;

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    #[test]
    fn test_mutations_are_invisible_until_commit() {
        let mut surface = MemorySurface::new().with_journal();
        let sheet = surface.create_sheet("Budget_Template").unwrap();
        surface
            .write_range(
                &sheet,
                &range("A1"),
                RangeContent::Values(vec![vec!["Monthly Budget Template".into()]]),
            )
            .unwrap();

        assert!(surface.sheet_exists("Budget_Template"));
        assert!(!surface.workbook().contains_sheet("Budget_Template"));
        assert_eq!(surface.pending().len(), 2);

        surface.commit().unwrap();
        let ws = surface.workbook().worksheet_by_name("Budget_Template").unwrap();
        assert_eq!(ws.value("A1").unwrap(), CellValue::from("Monthly Budget Template"));
        assert_eq!(surface.journal().len(), 2);
        assert!(surface.pending().is_empty());
    }

    #[test]
    fn test_operations_apply_in_order() {
        let mut surface = MemorySurface::new();
        let sheet = surface.create_sheet("S").unwrap();
        for text in ["first", "second"] {
            surface
                .write_range(&sheet, &range("A1"), RangeContent::Values(vec![vec![text.into()]]))
                .unwrap();
        }
        surface.commit().unwrap();

        let ws = surface.workbook().worksheet_by_name("S").unwrap();
        assert_eq!(ws.value("A1").unwrap(), CellValue::from("second"));
    }

    #[test]
    fn test_failed_commit_applies_nothing() {
        let mut surface = MemorySurface::new().with_journal();
        let sheet = surface.create_sheet("S").unwrap();
        surface.merge_cells(&sheet, &range("A1:D1")).unwrap();
        surface.merge_cells(&sheet, &range("C1:E2")).unwrap();

        let err = surface.commit().unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Grid(sheetcraft_core::Error::MergedCellConflict(_))
        ));
        assert!(!surface.sheet_exists("S"));
        assert!(surface.pending().is_empty());
        assert!(surface.journal().is_empty());
    }

    #[test]
    fn test_duplicate_names() {
        let mut surface = MemorySurface::new();
        assert!(matches!(
            surface.create_sheet("sheet1"),
            Err(SurfaceError::DuplicateName(_))
        ));

        surface.create_sheet("Data_Analysis").unwrap();
        assert!(matches!(
            surface.create_sheet("DATA_ANALYSIS"),
            Err(SurfaceError::DuplicateName(_))
        ));

        assert!(matches!(
            surface.create_sheet("bad/name"),
            Err(SurfaceError::Grid(_))
        ));
    }

    #[test]
    fn test_shape_is_checked_when_queued() {
        let mut surface = MemorySurface::new();
        let sheet = surface.create_sheet("S").unwrap();
        let err = surface
            .write_range(
                &sheet,
                &range("A4:C5"),
                RangeContent::Formulas(vec![vec!["=1".into()]]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::Grid(sheetcraft_core::Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_sheet() {
        let mut surface = MemorySurface::new();
        let ghost = SheetHandle::new("Ghost");
        assert_eq!(
            surface.activate(&ghost),
            Err(SurfaceError::SheetNotFound("Ghost".into()))
        );
    }

    #[test]
    fn test_discard() {
        let mut surface = MemorySurface::new();
        surface.create_sheet("S").unwrap();
        surface.discard();
        assert!(!surface.sheet_exists("S"));
        surface.commit().unwrap();
        assert_eq!(surface.workbook().sheet_count(), 1);
    }

    #[test]
    fn test_selection() {
        let mut workbook = Workbook::new();
        let ws = workbook.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Month").unwrap();
        ws.set_cell_value("A2", 10.0).unwrap();
        let mut surface = MemorySurface::with_workbook(workbook);

        let default = surface.selection().unwrap();
        assert_eq!(default.address.to_string(), "Sheet1!A1");
        assert_eq!(default.row_count(), 1);

        surface.select(SheetRange::parse("a1:A2").unwrap()).unwrap();
        let selection = surface.selection().unwrap();
        assert_eq!(selection.address.to_string(), "Sheet1!A1:A2");
        assert_eq!(
            selection.values,
            vec![vec![CellValue::from("Month")], vec![CellValue::Number(10.0)]]
        );

        assert!(surface.select(SheetRange::parse("Nope!A1").unwrap()).is_err());
    }

    #[test]
    fn test_selection_values_stop_at_used_range() {
        let mut workbook = Workbook::new();
        let ws = workbook.worksheet_mut(0).unwrap();
        ws.set_cell_value("B2", 1.0).unwrap();
        ws.set_cell_value("C3", 2.0).unwrap();
        let mut surface = MemorySurface::with_workbook(workbook);

        surface
            .select(SheetRange::parse("A1:XFD1048576").unwrap())
            .unwrap();
        let selection = surface.selection().unwrap();
        assert_eq!(selection.row_count(), 1_048_576);
        assert_eq!(selection.cell_count(), 1_048_576 * 16_384);
        assert_eq!(selection.values.len(), 3);
        assert_eq!(selection.values[2], vec![CellValue::Empty, CellValue::Empty, 2.0.into()]);

        surface.select(SheetRange::parse("D4:Z100").unwrap()).unwrap();
        assert!(surface.selection().unwrap().values.is_empty());
    }

    #[test]
    fn test_journal_is_opt_in() {
        let mut surface = MemorySurface::new();
        surface.create_sheet("S").unwrap();
        surface.commit().unwrap();
        assert!(surface.workbook().contains_sheet("S"));
        assert!(surface.journal().is_empty());
    }

    #[test]
    fn test_charts_and_activation() {
        let mut surface = MemorySurface::new();
        let sheet = surface.create_sheet("Executive_Dashboard").unwrap();
        let chart = ChartSpec::new(
            ChartType::ColumnClustered,
            SheetRange::new("Executive_Dashboard", range("E5:G11")),
        );
        let handle = surface.add_chart(&sheet, chart.clone()).unwrap();
        surface.activate(&sheet).unwrap();
        surface.commit().unwrap();

        assert_eq!(handle.index, 0);
        assert_eq!(surface.charts_on("executive_dashboard").collect::<Vec<_>>(), vec![&chart]);
        assert_eq!(surface.workbook().active_sheet(), 1);
    }
}
