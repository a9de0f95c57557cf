//! Template renderer
//!
//! Rendering is split in two. [`Renderer::plan`] is pure: it validates the
//! input and expands a [`TemplateDefinition`] into a [`RenderPlan`], a list of
//! surface operations that does not depend on the target sheet.
//! [`Renderer::render`] picks a free sheet name, replays the plan against a
//! [`GridSurface`] and commits. A failure anywhere discards the batch.

use log::{debug, info, warn};
use sheetcraft_chart::ChartSpec;
use sheetcraft_core::{
    CellRange, CellValue, ColumnSpan, SheetRange, StyleAttributes, Worksheet,
};

use crate::error::{RenderError, RenderResult, SurfaceResult};
use crate::surface::{GridSurface, RangeContent, Selection, SheetHandle};
use crate::template::{
    ChartSource, ChartTemplate, InputRequirement, KpiDeck, SourceField, TemplateCell,
    TemplateDefinition, TemplateId, SOURCE_TOKEN,
};

/// One planned surface operation on the new sheet
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOp {
    Write {
        range: CellRange,
        content: RangeContent,
    },
    Merge {
        range: CellRange,
    },
    Style {
        range: CellRange,
        attrs: StyleAttributes,
    },
    NumberFormat {
        range: CellRange,
        pattern: String,
    },
    /// A chart whose unqualified source refers to the new sheet
    Chart(ChartSpec),
    AutoFit(ColumnSpan),
}

/// The ordered operations a template expands to for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub template: TemplateId,
    pub ops: Vec<PlanOp>,
}

impl RenderPlan {
    /// Content writes, in order
    pub fn writes(&self) -> impl Iterator<Item = (&CellRange, &RangeContent)> {
        self.ops.iter().filter_map(|op| match op {
            PlanOp::Write { range, content } => Some((range, content)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A request to render one template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRequest {
    pub template: TemplateId,
    /// The host selection, for templates that read it
    pub selection: Option<Selection>,
}

impl TemplateRequest {
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// Interprets template definitions against a grid surface
pub struct Renderer;

impl Renderer {
    /// Render a request, returning the new sheet
    pub fn render_request<S: GridSurface + ?Sized>(
        surface: &mut S,
        request: &TemplateRequest,
    ) -> RenderResult<SheetHandle> {
        Self::render(
            surface,
            request.template.definition(),
            request.selection.as_ref(),
        )
    }

    /// Render a template onto a new sheet and commit
    ///
    /// Invalid input is rejected before the surface is touched. If the surface
    /// fails, the pending batch is discarded and no sheet is left behind.
    pub fn render<S: GridSurface + ?Sized>(
        surface: &mut S,
        definition: &TemplateDefinition,
        selection: Option<&Selection>,
    ) -> RenderResult<SheetHandle> {
        let plan = Self::plan(definition, selection)?;
        let name = Self::allocate_sheet_name(surface, definition.sheet_name);

        match Self::apply(surface, &name, &plan) {
            Ok(sheet) => {
                info!("rendered {} template into '{}'", definition.id, sheet.name());
                Ok(sheet)
            }
            Err(e) => {
                warn!("rendering {} into '{name}' failed: {e}", definition.id);
                surface.discard();
                Err(e.into())
            }
        }
    }

    /// First free name among `base`, `base_2`, `base_3`, ...
    pub fn allocate_sheet_name<S: GridSurface + ?Sized>(surface: &S, base: &str) -> String {
        if !surface.sheet_exists(base) {
            return base.to_string();
        }
        (2u32..)
            .map(|n| format!("{base}_{n}"))
            .find(|name| !surface.sheet_exists(name))
            .unwrap_or_else(|| base.to_string())
    }

    /// Check a selection against what the template needs
    pub fn validate(
        definition: &TemplateDefinition,
        selection: Option<&Selection>,
    ) -> RenderResult<()> {
        match definition.input {
            InputRequirement::Selection { min_rows, min_cols } => {
                let fits = selection
                    .map(|s| s.row_count() >= min_rows && s.column_count() >= min_cols)
                    .unwrap_or(false);
                if !fits {
                    return Err(RenderError::InvalidInput(format!(
                        "Please select a range with at least {min_rows} rows of data"
                    )));
                }
            }
            InputRequirement::None if selection.is_none() && definition.uses_selection() => {
                return Err(RenderError::template(
                    definition.sheet_name,
                    "reads the selection but does not require one",
                ));
            }
            InputRequirement::None => {}
        }
        Ok(())
    }

    /// Expand a definition into surface operations
    pub fn plan(
        definition: &TemplateDefinition,
        selection: Option<&Selection>,
    ) -> RenderResult<RenderPlan> {
        Self::validate(definition, selection)?;

        let mut planner = Planner {
            definition,
            selection,
            ops: Vec::new(),
        };
        for region in &definition.regions {
            let range = planner.parse_range(region.target)?;
            if let Some(rows) = &region.content {
                Worksheet::check_shape(&range, rows)
                    .map_err(|e| RenderError::template(definition.sheet_name, e.to_string()))?;
                let content = planner.content(rows)?;
                planner.ops.push(PlanOp::Write { range, content });
            }
            if region.merge {
                planner.ops.push(PlanOp::Merge { range });
            }
            if let Some(style) = &region.style {
                planner.style(range, style);
            }
        }
        if let Some(deck) = &definition.kpis {
            planner.cards(deck);
        }
        if let Some(chart) = &definition.chart {
            let spec = planner.chart(chart)?;
            planner.ops.push(PlanOp::Chart(spec));
        }
        let span = ColumnSpan::parse(definition.autofit)
            .map_err(|e| RenderError::template(definition.sheet_name, e.to_string()))?;
        planner.ops.push(PlanOp::AutoFit(span));

        debug!(
            "planned {} operations for {}",
            planner.ops.len(),
            definition.id
        );
        Ok(RenderPlan {
            template: definition.id,
            ops: planner.ops,
        })
    }

    fn apply<S: GridSurface + ?Sized>(
        surface: &mut S,
        name: &str,
        plan: &RenderPlan,
    ) -> SurfaceResult<SheetHandle> {
        let sheet = surface.create_sheet(name)?;
        for op in &plan.ops {
            match op {
                PlanOp::Write { range, content } => {
                    surface.write_range(&sheet, range, content.clone())?
                }
                PlanOp::Merge { range } => surface.merge_cells(&sheet, range)?,
                PlanOp::Style { range, attrs } => surface.apply_style(&sheet, range, attrs)?,
                PlanOp::NumberFormat { range, pattern } => {
                    surface.set_number_format(&sheet, range, pattern)?
                }
                PlanOp::Chart(spec) => {
                    let chart = ChartSpec {
                        source: spec.source.clone().or_sheet(sheet.name()),
                        ..spec.clone()
                    };
                    surface.add_chart(&sheet, chart)?;
                }
                PlanOp::AutoFit(span) => surface.autofit_columns(&sheet, *span)?,
            }
        }
        surface.activate(&sheet)?;
        surface.commit()?;
        Ok(sheet)
    }
}

/// Accumulates operations for one definition and selection
struct Planner<'a> {
    definition: &'a TemplateDefinition,
    selection: Option<&'a Selection>,
    ops: Vec<PlanOp>,
}

impl Planner<'_> {
    fn parse_range(&self, target: &str) -> RenderResult<CellRange> {
        CellRange::parse(target)
            .map_err(|e| RenderError::template(self.definition.sheet_name, e.to_string()))
    }

    fn selection(&self) -> RenderResult<&Selection> {
        self.selection.ok_or_else(|| {
            RenderError::template(self.definition.sheet_name, "no selection to read from")
        })
    }

    fn substitute(&self, text: &str) -> RenderResult<String> {
        if !text.contains(SOURCE_TOKEN) {
            return Ok(text.to_string());
        }
        let address = self.selection()?.address.to_string();
        Ok(text.replace(SOURCE_TOKEN, &address))
    }

    /// Formula-only regions become a formulas matrix, anything else a values matrix
    fn content(&self, rows: &[Vec<TemplateCell>]) -> RenderResult<RangeContent> {
        let formulas: Option<Vec<Vec<&String>>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        TemplateCell::Formula(f) => Some(f),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        if let Some(formulas) = formulas {
            let formulas = formulas
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|f| self.substitute(f))
                        .collect::<RenderResult<Vec<_>>>()
                })
                .collect::<RenderResult<Vec<_>>>()?;
            return Ok(RangeContent::Formulas(formulas));
        }

        let values = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.value(cell))
                    .collect::<RenderResult<Vec<_>>>()
            })
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(RangeContent::Values(values))
    }

    fn value(&self, cell: &TemplateCell) -> RenderResult<CellValue> {
        Ok(match cell {
            TemplateCell::Value(CellValue::String(s)) => CellValue::String(self.substitute(s)?),
            TemplateCell::Value(v) => v.clone(),
            TemplateCell::Formula(f) => CellValue::formula(self.substitute(f)?),
            TemplateCell::Source(SourceField::Address) => {
                CellValue::String(self.selection()?.address.to_string())
            }
            TemplateCell::Source(SourceField::CellCount) => {
                CellValue::Number(self.selection()?.cell_count() as f64)
            }
        })
    }

    /// Style patch, with the number format split out into its own operation
    fn style(&mut self, range: CellRange, style: &StyleAttributes) {
        let (attrs, format) = style.clone().split_number_format();
        if !attrs.is_empty() {
            self.ops.push(PlanOp::Style { range, attrs });
        }
        if let Some(format) = format {
            self.ops.push(PlanOp::NumberFormat {
                range,
                pattern: format.code().to_string(),
            });
        }
    }

    fn cards(&mut self, deck: &KpiDeck) {
        for (i, card) in deck.cards.iter().enumerate() {
            let (top, bottom) = deck.card_rows(i);
            let row = top - 1;

            self.ops.push(PlanOp::Write {
                range: CellRange::from_indices(row, 0, row, 2),
                content: RangeContent::Values(vec![vec![
                    CellValue::string(card.name),
                    CellValue::string(card.value),
                    CellValue::string(card.change),
                ]]),
            });
            for (col, style) in [&deck.name_style, &deck.value_style, &deck.change_style]
                .into_iter()
                .enumerate()
            {
                self.style(CellRange::from_indices(row, col as u16, row, col as u16), style);
            }
            self.style(CellRange::from_indices(row, 0, bottom - 1, 2), &deck.card_style);
        }
    }

    fn chart(&self, chart: &ChartTemplate) -> RenderResult<ChartSpec> {
        let source = match chart.source {
            ChartSource::Range(target) => SheetRange::local(self.parse_range(target)?),
            ChartSource::Selection => self.selection()?.address.clone(),
        };
        let anchor = self.parse_range(chart.anchor)?;

        let mut spec = ChartSpec::new(chart.chart_type, source)
            .anchored_at(&anchor)
            .with_title(chart.title)
            .with_series_by(chart.series_by);
        if let Some(position) = chart.legend {
            spec = spec.with_legend(position);
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use pretty_assertions::assert_eq;
    use sheetcraft_chart::LegendPosition;
    use sheetcraft_core::BorderSides;

    fn selection(address: &str) -> Selection {
        let address = SheetRange::parse(address).unwrap();
        let rows = address.range.row_count() as usize;
        let cols = address.range.col_count() as usize;
        Selection::new(address, vec![vec![CellValue::Number(1.0); cols]; rows])
    }

    fn write_at<'a>(plan: &'a RenderPlan, target: &str) -> Option<&'a RangeContent> {
        let target = CellRange::parse(target).unwrap();
        plan.writes()
            .find(|(range, _)| **range == target)
            .map(|(_, content)| content)
    }

    #[test]
    fn test_budget_formulas() {
        let plan = Renderer::plan(&crate::template::BUDGET, None).unwrap();
        assert_eq!(
            write_at(&plan, "C8"),
            Some(&RangeContent::Formulas(vec![vec!["=SUM(C4:C7)".into()]]))
        );
        assert_eq!(
            write_at(&plan, "C19"),
            Some(&RangeContent::Formulas(vec![vec!["=SUM(C11:C18)".into()]]))
        );
        assert_eq!(
            write_at(&plan, "C21"),
            Some(&RangeContent::Formulas(vec![vec!["=C8-C19".into()]]))
        );
    }

    #[test]
    fn test_budget_merge_precedes_title_style() {
        let plan = Renderer::plan(&crate::template::BUDGET, None).unwrap();
        let title = CellRange::parse("A1:D1").unwrap();
        assert_eq!(plan.ops[0], PlanOp::Merge { range: title });
        assert!(plan.ops.contains(&PlanOp::NumberFormat {
            range: CellRange::parse("C4:C21").unwrap(),
            pattern: "$#,##0.00".into(),
        }));
        assert_eq!(
            plan.ops.last(),
            Some(&PlanOp::AutoFit(ColumnSpan::parse("A:C").unwrap()))
        );
    }

    #[test]
    fn test_analysis_substitutes_the_selection() {
        let sel = selection("Sheet1!A1:B10");
        let plan = Renderer::plan(&crate::template::ANALYSIS, Some(&sel)).unwrap();

        assert_eq!(
            write_at(&plan, "A3:B4"),
            Some(&RangeContent::Values(vec![
                vec!["Source Range:".into(), "Sheet1!A1:B10".into()],
                vec!["Data Points:".into(), CellValue::Number(20.0)],
            ]))
        );
        let Some(RangeContent::Formulas(stats)) = write_at(&plan, "B8:B14") else {
            panic!("statistics should be a formulas matrix");
        };
        assert_eq!(stats[0][0], "=COUNTA(Sheet1!A1:B10)");
        assert_eq!(stats[6][0], "=STDEV(Sheet1!A1:B10)");

        let chart = plan
            .ops
            .iter()
            .find_map(|op| match op {
                PlanOp::Chart(spec) => Some(spec),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart.source, sel.address);
        assert_eq!(chart.anchor.to_string(), "D6:H20");
        assert_eq!(chart.title.as_deref(), Some("Data Visualization"));
    }

    #[test]
    fn test_analysis_rejects_single_row() {
        let err = Renderer::plan(&crate::template::ANALYSIS, Some(&selection("A1:D1"))).unwrap_err();
        assert!(matches!(err, RenderError::InvalidInput(_)));

        let err = Renderer::plan(&crate::template::ANALYSIS, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select a range with at least 2 rows of data"
        );
    }

    #[test]
    fn test_formula_reference_is_text() {
        let plan = Renderer::plan(&crate::template::FORMULA_REFERENCE, None).unwrap();
        let Some(RangeContent::Values(rows)) = write_at(&plan, "A3:C16") else {
            panic!("reference table should be values");
        };
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[1][1], CellValue::from("=VLOOKUP(A2,D:F,2,FALSE)"));
        assert!(rows.iter().flatten().all(|v| !v.is_formula()));
    }

    #[test]
    fn test_dashboard_cards() {
        let plan = Renderer::plan(&crate::template::DASHBOARD, None).unwrap();
        let card_ranges: Vec<String> = plan
            .ops
            .iter()
            .filter_map(|op| match op {
                PlanOp::Style { range, attrs } if attrs.border_sides == Some(BorderSides::OUTLINE) => {
                    Some(range.to_string())
                }
                _ => None,
            })
            .collect();
        assert_eq!(card_ranges, vec!["A5:C6", "A8:C9", "A11:C12", "A14:C15"]);

        let chart = plan
            .ops
            .iter()
            .find_map(|op| match op {
                PlanOp::Chart(spec) => Some(spec),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart.source, SheetRange::parse("E5:G11").unwrap());
        assert_eq!(chart.legend, Some(LegendPosition::Bottom));
    }

    #[test]
    fn test_render_names_and_activates() {
        let mut surface = MemorySurface::new();
        let first = Renderer::render(&mut surface, &crate::template::BUDGET, None).unwrap();
        let second = Renderer::render(&mut surface, &crate::template::BUDGET, None).unwrap();

        assert_eq!(first.name(), "Budget_Template");
        assert_eq!(second.name(), "Budget_Template_2");
        assert_eq!(
            surface.workbook().active_worksheet().unwrap().name(),
            "Budget_Template_2"
        );
    }

    #[test]
    fn test_dashboard_chart_points_at_new_sheet() {
        let mut surface = MemorySurface::new();
        let sheet = Renderer::render(&mut surface, &crate::template::DASHBOARD, None).unwrap();
        let charts: Vec<_> = surface.charts_on(sheet.name()).collect();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].source.to_string(), "Executive_Dashboard!E5:G11");
    }
}
