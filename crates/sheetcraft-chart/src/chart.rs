//! Chart types

use std::fmt;
use std::str::FromStr;

use sheetcraft_core::{CellAddress, CellRange, SheetRange};

use crate::legend::LegendPosition;
use crate::series::SeriesBy;

/// Chart types a template can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartType {
    ColumnClustered,
}

impl ChartType {
    /// All chart types, in declaration order
    pub const ALL: [ChartType; 1] = [ChartType::ColumnClustered];

    /// The host's name for this chart type
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::ColumnClustered => "ColumnClustered",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a chart type name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart type: {0}")]
pub struct ParseChartTypeError(pub String);

impl FromStr for ChartType {
    type Err = ParseChartTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseChartTypeError(s.to_string()))
    }
}

/// Chart anchor position
///
/// The chart's top-left corner sits on `from` and its bottom-right corner on
/// `to`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartAnchor {
    /// Start column
    pub from_col: u16,
    /// Start row
    pub from_row: u32,
    /// End column
    pub to_col: u16,
    /// End row
    pub to_row: u32,
}

impl ChartAnchor {
    /// Anchor a chart over a cell range
    pub fn from_range(range: &CellRange) -> Self {
        Self {
            from_col: range.start.col,
            from_row: range.start.row,
            to_col: range.end.col,
            to_row: range.end.row,
        }
    }

    /// The covered cell range
    pub fn range(&self) -> CellRange {
        CellRange::new(
            CellAddress::new(self.from_row, self.from_col),
            CellAddress::new(self.to_row, self.to_col),
        )
    }
}

impl fmt::Display for ChartAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range())
    }
}

/// Chart definition, ready to hand to a host
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Chart type
    pub chart_type: ChartType,
    /// Data range, possibly on another sheet
    pub source: SheetRange,
    /// How the source splits into series
    pub series_by: SeriesBy,
    /// Position anchor
    pub anchor: ChartAnchor,
    /// Chart title
    pub title: Option<String>,
    /// Legend position, `None` keeps the host default
    pub legend: Option<LegendPosition>,
}

impl ChartSpec {
    /// Create a new chart over a data range
    pub fn new(chart_type: ChartType, source: SheetRange) -> Self {
        Self {
            chart_type,
            source,
            series_by: SeriesBy::Auto,
            anchor: ChartAnchor::default(),
            title: None,
            legend: None,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Place the chart over a cell range
    pub fn anchored_at(mut self, range: &CellRange) -> Self {
        self.anchor = ChartAnchor::from_range(range);
        self
    }

    pub fn with_series_by(mut self, series_by: SeriesBy) -> Self {
        self.series_by = series_by;
        self
    }

    pub fn with_legend(mut self, position: LegendPosition) -> Self {
        self.legend = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chart_type_names() {
        assert_eq!("ColumnClustered".parse::<ChartType>(), Ok(ChartType::ColumnClustered));
        assert_eq!(" columnclustered ".parse::<ChartType>(), Ok(ChartType::ColumnClustered));
        assert_eq!(
            "XYScatter".parse::<ChartType>(),
            Err(ParseChartTypeError("XYScatter".into()))
        );
        for t in ChartType::ALL {
            assert_eq!(t.to_string().parse::<ChartType>(), Ok(t));
        }
    }

    #[test]
    fn test_anchor_round_trip() {
        let range = CellRange::parse("E13:K25").unwrap();
        let anchor = ChartAnchor::from_range(&range);
        assert_eq!((anchor.from_row, anchor.from_col), (12, 4));
        assert_eq!((anchor.to_row, anchor.to_col), (24, 10));
        assert_eq!(anchor.to_string(), "E13:K25");
    }

    #[test]
    fn test_builder() {
        let source = SheetRange::parse("Executive_Dashboard!E5:G11").unwrap();
        let chart = ChartSpec::new(ChartType::ColumnClustered, source.clone())
            .anchored_at(&CellRange::parse("E13:K25").unwrap())
            .with_title("Revenue & Profit Trend")
            .with_legend(LegendPosition::Bottom);

        assert_eq!(chart.source, source);
        assert_eq!(chart.series_by, SeriesBy::Auto);
        assert_eq!(chart.title.as_deref(), Some("Revenue & Profit Trend"));
        assert_eq!(chart.legend, Some(LegendPosition::Bottom));
    }
}
