//! Number format types

use std::fmt;

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Custom format code (e.g., "$#,##0.00")
    Custom(String),
}

impl NumberFormat {
    /// Create a number format from a format code
    ///
    /// `"General"` (any case) maps to [`NumberFormat::General`].
    pub fn from_code<S: Into<String>>(code: S) -> Self {
        let code = code.into();
        if code.eq_ignore_ascii_case("general") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(code)
        }
    }

    /// The format code as a host would see it
    pub fn code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Custom(code) => code,
        }
    }

    /// Check if this is the general format
    pub fn is_general(&self) -> bool {
        matches!(self, NumberFormat::General)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
