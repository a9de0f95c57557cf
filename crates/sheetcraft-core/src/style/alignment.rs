//! Text alignment types

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
    /// Wrap text
    pub wrap_text: bool,
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
    /// Center across selection
    CenterAcrossSelection,
}

impl HorizontalAlignment {
    /// Host-facing name ("Center", "Left", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlignment::General => "General",
            HorizontalAlignment::Left => "Left",
            HorizontalAlignment::Center => "Center",
            HorizontalAlignment::Right => "Right",
            HorizontalAlignment::CenterAcrossSelection => "CenterAcrossSelection",
        }
    }
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HorizontalAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(HorizontalAlignment::General),
            "left" => Ok(HorizontalAlignment::Left),
            "center" => Ok(HorizontalAlignment::Center),
            "right" => Ok(HorizontalAlignment::Right),
            "centeracrossselection" => Ok(HorizontalAlignment::CenterAcrossSelection),
            _ => Err(Error::other(format!("unknown horizontal alignment '{}'", s))),
        }
    }
}
