//! # sheetcraft-chart
//!
//! Chart descriptors for sheetcraft.
//!
//! A [`ChartSpec`] names a data range, a chart type and the cell range the
//! chart floats over. Hosts turn it into a real chart object.

mod chart;
mod legend;
mod series;

pub use chart::{ChartAnchor, ChartSpec, ChartType, ParseChartTypeError};
pub use legend::LegendPosition;
pub use series::SeriesBy;
