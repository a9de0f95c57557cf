//! Partial style updates applied to ranges

use super::{BorderEdge, BorderStyle, Color, HorizontalAlignment, NumberFormat};
use crate::cell::{CellAddress, CellRange};

/// Which border lines to draw when styling a range
///
/// Edges apply to the range perimeter, inside lines apply between adjacent
/// cells of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub inside_horizontal: bool,
    pub inside_vertical: bool,
}

impl BorderSides {
    /// The four outer edges
    pub const OUTLINE: BorderSides = BorderSides {
        top: true,
        bottom: true,
        left: true,
        right: true,
        inside_horizontal: false,
        inside_vertical: false,
    };

    /// Outer edges plus every inside line
    pub const GRID: BorderSides = BorderSides {
        top: true,
        bottom: true,
        left: true,
        right: true,
        inside_horizontal: true,
        inside_vertical: true,
    };

    /// Check if no side is selected
    pub fn is_empty(&self) -> bool {
        *self == BorderSides::default()
    }

    /// The borders a single cell of `range` receives
    pub fn edges_for(&self, range: &CellRange, cell: CellAddress, edge: BorderEdge) -> BorderStyle {
        let first_row = cell.row == range.start.row;
        let last_row = cell.row == range.end.row;
        let first_col = cell.col == range.start.col;
        let last_col = cell.col == range.end.col;

        let line = |perimeter: bool, outer: bool, inner: bool| {
            let draw = if perimeter { outer } else { inner };
            draw.then_some(edge)
        };

        BorderStyle {
            top: line(first_row, self.top, self.inside_horizontal),
            bottom: line(last_row, self.bottom, self.inside_horizontal),
            left: line(first_col, self.left, self.inside_vertical),
            right: line(last_col, self.right, self.inside_vertical),
        }
    }
}

/// A partial style: every field is optional and `None` keeps what the cell
/// already has
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleAttributes {
    pub bold: Option<bool>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub number_format: Option<NumberFormat>,
    pub border_sides: Option<BorderSides>,
}

impl StyleAttributes {
    /// No attributes set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for bold text
    pub fn bold() -> Self {
        Self::new().with_bold(true)
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal_alignment = Some(align);
        self
    }

    pub fn with_number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = Some(NumberFormat::from_code(code));
        self
    }

    pub fn with_borders(mut self, sides: BorderSides) -> Self {
        self.border_sides = Some(sides);
        self
    }

    /// Check if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == StyleAttributes::default()
    }

    /// Split off the number format, returning (rest, number format)
    pub fn split_number_format(mut self) -> (StyleAttributes, Option<NumberFormat>) {
        let format = self.number_format.take();
        (self, format)
    }
}
