//! Cell styling types
//!
//! - [`Style`] - The fully resolved style of a cell
//! - [`StyleAttributes`] - A partial update applied to a range
//! - [`FontStyle`], [`FillStyle`], [`BorderStyle`], [`Alignment`] - Parts
//! - [`Color`], [`NumberFormat`] - Values

mod alignment;
mod attributes;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment};
pub use attributes::{BorderSides, StyleAttributes};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::FillStyle;
pub use font::{FontStyle, DEFAULT_FONT_SIZE};
pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Border settings
    pub border: BorderStyle,
    /// Text alignment
    pub alignment: Alignment,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the non-border fields of `attrs` in place
    ///
    /// Borders depend on where the cell sits in the styled range, so the
    /// worksheet resolves them separately.
    pub fn apply(&mut self, attrs: &StyleAttributes) {
        if let Some(bold) = attrs.bold {
            self.font.bold = bold;
        }
        if let Some(size) = attrs.font_size {
            self.font.size = size;
        }
        if let Some(color) = attrs.font_color {
            self.font.color = color;
        }
        if let Some(color) = attrs.fill_color {
            self.fill = FillStyle::solid(color);
        }
        if let Some(align) = attrs.horizontal_alignment {
            self.alignment.horizontal = align;
        }
        if let Some(format) = &attrs.number_format {
            self.number_format = format.clone();
        }
    }

    /// Builder form of [`Style::apply`]
    pub fn patched(mut self, attrs: &StyleAttributes) -> Self {
        self.apply(attrs);
        self
    }
}
