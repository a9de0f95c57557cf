//! Cell addresses, ranges, column spans and sheet-qualified ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "$B$2")
///
/// Indices are 0-based internally. A1 text is 1-based, so `A1` is
/// `(row 0, col 0)` and row `0` in text is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
    /// Whether the row reference is absolute ($)
    pub row_absolute: bool,
    /// Whether the column reference is absolute ($)
    pub col_absolute: bool,
}

impl CellAddress {
    /// Create a new cell address with relative references
    pub const fn new(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
        }
    }

    /// Create an absolute cell address ($A$1 style)
    pub const fn absolute(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: true,
            col_absolute: true,
        }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheetcraft_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("C8").unwrap();
    /// assert_eq!((addr.row, addr.col), (7, 2));
    ///
    /// let addr = CellAddress::parse("$B$2").unwrap();
    /// assert!(addr.row_absolute && addr.col_absolute);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let (col_absolute, rest) = match s.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let letters_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (letters, rest) = rest.split_at(letters_end);
        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        let col = Self::letters_to_column(letters)?;

        let (row_absolute, digits) = match rest.strip_prefix('$') {
            Some(digits) => (true, digits),
            None => (false, rest),
        };
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("invalid row number in '{}'", s)));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row - 1, MAX_ROWS - 1));
        }

        Ok(Self {
            row: row - 1,
            col,
            row_absolute,
            col_absolute,
        })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = col as u32 + 1;

        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}{}{}{}",
            if self.col_absolute { "$" } else { "" },
            Self::column_to_letters(self.col),
            if self.row_absolute { "$" } else { "" },
            self.row + 1
        )
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }

    /// The same address with both absolute markers cleared
    pub fn relative(&self) -> Self {
        Self::new(self.row, self.col)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
///
/// `start` is always the top-left corner and `end` the bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalizing the corners
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        let mut start = a;
        let mut end = b;
        if a.row > b.row {
            start.row = b.row;
            end.row = a.row;
        }
        if a.col > b.col {
            start.col = b.col;
            end.col = a.col;
        }
        Self { start, end }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation (or a single cell)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => {
                let start = CellAddress::parse(a)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                let end = CellAddress::parse(b)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::new(start, end))
            }
            None => CellAddress::parse(s).map(Self::single),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&addr.row)
            && (self.start.col..=self.end.col).contains(&addr.col)
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            next: Some(self.start.relative()),
        }
    }

    /// Format as A1:B10 string (a single cell formats as "A1")
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current.col < self.range.end.col {
            Some(CellAddress::new(current.row, current.col + 1))
        } else if current.row < self.range.end.row {
            Some(CellAddress::new(current.row + 1, self.range.start.col))
        } else {
            None
        };
        Some(current)
    }
}

/// A span of whole columns (e.g., "A:C")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnSpan {
    /// First column (0-based)
    pub first: u16,
    /// Last column (0-based, inclusive)
    pub last: u16,
}

impl ColumnSpan {
    /// Create a span, normalizing the bounds
    pub fn new(a: u16, b: u16) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// Parse "A:C" (or a single "B")
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (a, b) = s.split_once(':').unwrap_or((s, s));
        let first = CellAddress::letters_to_column(a.trim())
            .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
        let last = CellAddress::letters_to_column(b.trim())
            .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
        Ok(Self::new(first, last))
    }

    /// Iterate over the column indices in the span
    pub fn columns(&self) -> impl Iterator<Item = u16> {
        self.first..=self.last
    }
}

impl fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            CellAddress::column_to_letters(self.first),
            CellAddress::column_to_letters(self.last)
        )
    }
}

impl FromStr for ColumnSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range optionally qualified with a sheet name (e.g., "Sheet1!A1:B10")
///
/// Names that are not plain identifiers are quoted on output
/// (`'Q1 Sales'!A1:B2`), with embedded quotes doubled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetRange {
    /// Sheet the range lives on, or `None` for "the current sheet"
    pub sheet: Option<String>,
    /// The cell range
    pub range: CellRange,
}

impl SheetRange {
    /// Create a sheet-qualified range
    pub fn new<S: Into<String>>(sheet: S, range: CellRange) -> Self {
        Self {
            sheet: Some(sheet.into()),
            range,
        }
    }

    /// Create an unqualified range
    pub fn local(range: CellRange) -> Self {
        Self { sheet: None, range }
    }

    /// Parse "Sheet1!A1:B2", "'My Sheet'!A1" or a bare "A1:B2"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(bang) = s.rfind('!') else {
            return CellRange::parse(s).map(Self::local);
        };

        let (raw_sheet, raw_range) = (&s[..bang], &s[bang + 1..]);
        let sheet = match raw_sheet
            .strip_prefix('\'')
            .and_then(|q| q.strip_suffix('\''))
        {
            Some(quoted) => quoted.replace("''", "'"),
            None => raw_sheet.to_string(),
        };
        if sheet.is_empty() {
            return Err(Error::InvalidRange(format!("empty sheet name in '{}'", s)));
        }

        Ok(Self {
            sheet: Some(sheet),
            range: CellRange::parse(raw_range)?,
        })
    }

    /// Fill in a sheet name if the range is unqualified
    pub fn or_sheet(mut self, sheet: &str) -> Self {
        if self.sheet.is_none() {
            self.sheet = Some(sheet.to_string());
        }
        self
    }

    /// Names that are not plain identifiers, or that read as a cell
    /// reference in A1 or R1C1 style, must be quoted
    fn needs_quotes(name: &str) -> bool {
        name.starts_with(|c: char| c.is_ascii_digit())
            || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
            || CellAddress::parse(name).is_ok()
            || looks_like_r1c1(name)
    }
}

/// `R`, `C`, `R2`, `C3`, `RC`, `R2C3` and the like, in any case
fn looks_like_r1c1(name: &str) -> bool {
    fn skip_digits(s: &str) -> &str {
        s.trim_start_matches(|c: char| c.is_ascii_digit())
    }

    let upper = name.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut marker = false;
    if let Some(after) = rest.strip_prefix('R') {
        rest = skip_digits(after);
        marker = true;
    }
    if let Some(after) = rest.strip_prefix('C') {
        rest = skip_digits(after);
        marker = true;
    }
    marker && rest.is_empty()
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(name) if Self::needs_quotes(name) => {
                write!(f, "'{}'!{}", name.replace('\'', "''"), self.range)
            }
            Some(name) => write!(f, "{}!{}", name, self.range),
            None => write!(f, "{}", self.range),
        }
    }
}

impl FromStr for SheetRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");

        assert_eq!(CellAddress::letters_to_column("K").unwrap(), 10);
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 26);
        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("C21").unwrap();
        assert_eq!((addr.row, addr.col), (20, 2));
        assert!(!addr.row_absolute && !addr.col_absolute);

        let addr = CellAddress::parse("$A1").unwrap();
        assert!(addr.col_absolute);
        assert!(!addr.row_absolute);

        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("7").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse("A1048577").is_err());
    }

    #[test]
    fn test_range_normalizes_corners() {
        let range = CellRange::parse("C16:A3").unwrap();
        assert_eq!(range.to_string(), "A3:C16");
        assert_eq!(range.row_count(), 14);
        assert_eq!(range.col_count(), 3);
    }

    #[test]
    fn test_range_iterator_is_row_major() {
        let cells: Vec<String> = CellRange::parse("E5:F6")
            .unwrap()
            .cells()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(cells, vec!["E5", "F5", "E6", "F6"]);
    }

    #[test]
    fn test_range_overlap() {
        let a = CellRange::parse("A1:D1").unwrap();
        assert!(a.overlaps(&CellRange::parse("D1:D4").unwrap()));
        assert!(!a.overlaps(&CellRange::parse("A2:F2").unwrap()));
    }

    #[test]
    fn test_column_span() {
        let span = ColumnSpan::parse("A:K").unwrap();
        assert_eq!((span.first, span.last), (0, 10));
        assert_eq!(span.columns().count(), 11);
        assert_eq!(span.to_string(), "A:K");
        assert_eq!(ColumnSpan::parse("C").unwrap(), ColumnSpan::new(2, 2));
    }

    #[test]
    fn test_sheet_range() {
        let r = SheetRange::parse("Sheet1!A1:B10").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Sheet1"));
        assert_eq!(r.range, CellRange::parse("A1:B10").unwrap());
        assert_eq!(r.to_string(), "Sheet1!A1:B10");

        let r = SheetRange::parse("'Q1 ''Plan'''!C3").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Q1 'Plan'"));
        assert_eq!(r.to_string(), "'Q1 ''Plan'''!C3");

        let r = SheetRange::parse("B2:C4").unwrap();
        assert!(r.sheet.is_none());
        assert_eq!(r.or_sheet("Data").to_string(), "Data!B2:C4");

        assert!(SheetRange::parse("!A1").is_err());
    }

    #[test]
    fn test_reference_like_sheet_names_are_quoted() {
        let range = CellRange::parse("A1:A2").unwrap();
        for name in ["Q1", "A1", "ab12", "$B$2", "R1C1", "r2c3", "RC", "R", "C5"] {
            let quoted = SheetRange::new(name, range).to_string();
            assert_eq!(quoted, format!("'{}'!A1:A2", name));
            assert_eq!(SheetRange::parse(&quoted).unwrap().sheet.as_deref(), Some(name));
        }
        for name in ["Sheet1", "Data_Analysis", "Revenue", "RCA", "Q1Plan", "XFE1"] {
            assert_eq!(SheetRange::new(name, range).to_string(), format!("{}!A1:A2", name));
        }
    }
}
