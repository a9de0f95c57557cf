//! Series orientation

/// How a chart splits its source range into series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeriesBy {
    /// Let the host decide from the range shape
    #[default]
    Auto,
    /// One series per column
    Columns,
    /// One series per row
    Rows,
}

impl SeriesBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesBy::Auto => "Auto",
            SeriesBy::Columns => "Columns",
            SeriesBy::Rows => "Rows",
        }
    }
}
