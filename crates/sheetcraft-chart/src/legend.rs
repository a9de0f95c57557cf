//! Legend types

/// Legend position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendPosition {
    #[default]
    Right,
    Top,
    Bottom,
    Left,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::Right => "Right",
            LegendPosition::Top => "Top",
            LegendPosition::Bottom => "Bottom",
            LegendPosition::Left => "Left",
        }
    }
}
