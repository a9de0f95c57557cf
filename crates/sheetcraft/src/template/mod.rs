//! Template definitions
//!
//! A [`TemplateDefinition`] is declarative: an ordered list of
//! [`RegionWrite`]s plus an optional KPI card deck, chart and auto-fit span.
//! The renderer interprets it; nothing here touches a surface.
//!
//! Definitions are process-wide immutable data, built once on first use.

mod analysis;
mod budget;
mod dashboard;
mod formulas;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use sheetcraft_chart::{ChartType, LegendPosition, SeriesBy};
use sheetcraft_core::{CellValue, Color, StyleAttributes};

/// Identifies one of the built-in templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Budget,
    Analysis,
    FormulaReference,
    Dashboard,
}

impl TemplateId {
    /// All templates, in resolver order
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Budget,
        TemplateId::Analysis,
        TemplateId::FormulaReference,
        TemplateId::Dashboard,
    ];

    /// Short name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Budget => "budget",
            TemplateId::Analysis => "analysis",
            TemplateId::FormulaReference => "formulas",
            TemplateId::Dashboard => "dashboard",
        }
    }

    /// The template's definition
    pub fn definition(&self) -> &'static TemplateDefinition {
        match self {
            TemplateId::Budget => &BUDGET,
            TemplateId::Analysis => &ANALYSIS,
            TemplateId::FormulaReference => &FORMULA_REFERENCE,
            TemplateId::Dashboard => &DASHBOARD,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a template name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template '{0}' (expected one of: budget, analysis, formulas, dashboard)")]
pub struct ParseTemplateIdError(pub String);

impl FromStr for TemplateId {
    type Err = ParseTemplateIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(TemplateId::Budget),
            "analysis" | "analyze" => Ok(TemplateId::Analysis),
            "formulas" | "formula" | "formula-reference" => Ok(TemplateId::FormulaReference),
            "dashboard" => Ok(TemplateId::Dashboard),
            _ => Err(ParseTemplateIdError(s.to_string())),
        }
    }
}

/// Budget template (`Budget_Template`)
pub static BUDGET: Lazy<TemplateDefinition> = Lazy::new(budget::definition);

/// Data analysis template (`Data_Analysis`)
pub static ANALYSIS: Lazy<TemplateDefinition> = Lazy::new(analysis::definition);

/// Formula reference template (`Advanced_Formulas`)
pub static FORMULA_REFERENCE: Lazy<TemplateDefinition> = Lazy::new(formulas::definition);

/// Executive dashboard template (`Executive_Dashboard`)
pub static DASHBOARD: Lazy<TemplateDefinition> = Lazy::new(dashboard::definition);

/// Placeholder token replaced by the selection address in text and formulas
pub const SOURCE_TOKEN: &str = "{source}";

/// Selection facts a cell can be filled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    /// The selection's sheet-qualified address, as text
    Address,
    /// rows x columns of the selection, as a number
    CellCount,
}

/// Content of one template cell
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateCell {
    /// A literal value (text, number, blank)
    Value(CellValue),
    /// Formula text, may contain [`SOURCE_TOKEN`]
    Formula(String),
    /// Filled from the selection at render time
    Source(SourceField),
}

impl TemplateCell {
    pub fn text(s: &str) -> Self {
        TemplateCell::Value(CellValue::string(s))
    }

    pub fn number(n: f64) -> Self {
        TemplateCell::Value(CellValue::Number(n))
    }

    pub fn blank() -> Self {
        TemplateCell::Value(CellValue::string(""))
    }

    pub fn formula(f: &str) -> Self {
        TemplateCell::Formula(f.to_string())
    }

    /// Check if rendering this cell needs a selection
    pub fn uses_selection(&self) -> bool {
        match self {
            TemplateCell::Source(_) => true,
            TemplateCell::Formula(f) => f.contains(SOURCE_TOKEN),
            TemplateCell::Value(CellValue::String(s)) => s.contains(SOURCE_TOKEN),
            TemplateCell::Value(_) => false,
        }
    }
}

/// One step of a template: content, merge and style for a target range
///
/// Later writes override earlier ones on overlapping cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionWrite {
    /// A1 range on the new sheet
    pub target: &'static str,
    /// Row-major content matching the target shape, if any
    pub content: Option<Vec<Vec<TemplateCell>>>,
    /// Style patch for the whole target
    pub style: Option<StyleAttributes>,
    /// Merge the target into one cell
    pub merge: bool,
}

impl RegionWrite {
    /// An empty step on a target range
    pub fn at(target: &'static str) -> Self {
        Self {
            target,
            content: None,
            style: None,
            merge: false,
        }
    }

    /// A single-cell text write
    pub fn text(target: &'static str, text: &str) -> Self {
        Self::at(target).cells(vec![vec![TemplateCell::text(text)]])
    }

    /// A single-cell formula write
    pub fn formula(target: &'static str, formula: &str) -> Self {
        Self::at(target).cells(vec![vec![TemplateCell::formula(formula)]])
    }

    /// A row-major text matrix
    pub fn table(target: &'static str, rows: &[&[&str]]) -> Self {
        let cells = rows
            .iter()
            .map(|row| row.iter().map(|s| TemplateCell::text(s)).collect())
            .collect();
        Self::at(target).cells(cells)
    }

    pub fn cells(mut self, cells: Vec<Vec<TemplateCell>>) -> Self {
        self.content = Some(cells);
        self
    }

    pub fn style(mut self, style: StyleAttributes) -> Self {
        self.style = Some(style);
        self
    }

    pub fn merged(mut self) -> Self {
        self.merge = true;
        self
    }
}

/// One KPI card: a name, a headline value and its change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCard {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

/// A vertical stack of KPI cards
///
/// Card `i` covers rows `first_row + stride * i` and the row below it,
/// across columns A to C.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiDeck {
    pub cards: Vec<KpiCard>,
    /// 1-based row of the first card
    pub first_row: u32,
    /// Rows from one card to the next
    pub stride: u32,
    pub name_style: StyleAttributes,
    pub value_style: StyleAttributes,
    pub change_style: StyleAttributes,
    /// Applied to the whole card range
    pub card_style: StyleAttributes,
}

impl KpiDeck {
    /// 1-based rows covered by card `index`
    pub fn card_rows(&self, index: usize) -> (u32, u32) {
        let top = self.first_row + self.stride * index as u32;
        (top, top + 1)
    }
}

/// Where a chart takes its data from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    /// A fixed range on the new sheet
    Range(&'static str),
    /// The user's selection
    Selection,
}

/// Chart placed by a template
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTemplate {
    pub source: ChartSource,
    pub chart_type: ChartType,
    pub series_by: SeriesBy,
    /// A1 range the chart floats over
    pub anchor: &'static str,
    pub title: &'static str,
    pub legend: Option<LegendPosition>,
}

/// Input a template needs from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequirement {
    None,
    /// A selection of at least this shape
    Selection { min_rows: u32, min_cols: u16 },
}

/// A complete template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDefinition {
    pub id: TemplateId,
    /// Base name of the sheet the template creates
    pub sheet_name: &'static str,
    pub input: InputRequirement,
    pub regions: Vec<RegionWrite>,
    pub kpis: Option<KpiDeck>,
    pub chart: Option<ChartTemplate>,
    /// Columns to auto-fit, e.g. "A:C"
    pub autofit: &'static str,
}

impl TemplateDefinition {
    /// Check if any part of the template reads the selection
    pub fn uses_selection(&self) -> bool {
        let mut cells = self
            .regions
            .iter()
            .filter_map(|r| r.content.as_ref())
            .flatten()
            .flatten();
        let chart = matches!(
            self.chart.as_ref().map(|c| c.source),
            Some(ChartSource::Selection)
        );
        chart || cells.any(TemplateCell::uses_selection)
    }
}

// Palette shared by the templates
pub(crate) const HEADER_BLUE: Color = Color::rgb(0x44, 0x72, 0xC4);
pub(crate) const DARK_BLUE: Color = Color::rgb(0x1F, 0x4E, 0x79);
pub(crate) const LIGHT_GREEN: Color = Color::rgb(0xE2, 0xEF, 0xDA);

/// Colored header band with white text
pub(crate) fn banner(fill: Color) -> StyleAttributes {
    StyleAttributes::new()
        .with_fill(fill)
        .with_font_color(Color::WHITE)
}

/// Bold text at a size
pub(crate) fn heading(size: f64) -> StyleAttributes {
    StyleAttributes::bold().with_font_size(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetcraft_core::CellRange;

    #[test]
    fn test_template_names() {
        for id in TemplateId::ALL {
            assert_eq!(id.to_string().parse::<TemplateId>(), Ok(id));
            assert_eq!(id.definition().id, id);
        }
        assert_eq!("Analyze".parse::<TemplateId>(), Ok(TemplateId::Analysis));
        assert!("pivot".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_sheet_names() {
        let names: Vec<_> = TemplateId::ALL
            .iter()
            .map(|id| id.definition().sheet_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Budget_Template",
                "Data_Analysis",
                "Advanced_Formulas",
                "Executive_Dashboard"
            ]
        );
    }

    #[test]
    fn test_region_content_matches_target_shape() {
        for id in TemplateId::ALL {
            for region in &id.definition().regions {
                let range = CellRange::parse(region.target).unwrap();
                if let Some(rows) = &region.content {
                    assert_eq!(rows.len(), range.row_count() as usize, "{}", region.target);
                    for row in rows {
                        assert_eq!(row.len(), range.col_count() as usize, "{}", region.target);
                    }
                }
            }
        }
    }

    #[test]
    fn test_only_analysis_reads_the_selection() {
        for id in TemplateId::ALL {
            let def = id.definition();
            assert_eq!(def.uses_selection(), id == TemplateId::Analysis);
            assert_eq!(
                def.input != InputRequirement::None,
                id == TemplateId::Analysis
            );
        }
    }

    #[test]
    fn test_card_rows() {
        let deck = DASHBOARD.kpis.as_ref().unwrap();
        let rows: Vec<_> = (0..deck.cards.len()).map(|i| deck.card_rows(i)).collect();
        assert_eq!(rows, vec![(5, 6), (8, 9), (11, 12), (14, 15)]);
    }
}
