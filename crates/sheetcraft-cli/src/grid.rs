//! CSV input and worksheet output for the CLI

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sheetcraft::{CellAddress, CellValue, Workbook, Worksheet};
use sheetcraft_core::{Error, MAX_COLS, MAX_ROWS};

/// Widest column shown in grid output
const MAX_GRID_WIDTH: usize = 40;

/// Load a headerless CSV file into the first sheet of a new workbook
pub fn load_csv(path: &Path) -> Result<Workbook> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    read_csv(file).with_context(|| format!("Failed to read '{}'", path.display()))
}

pub fn read_csv<R: Read>(reader: R) -> Result<Workbook> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut workbook = Workbook::new();
    let sheet = workbook
        .worksheet_mut(0)
        .context("Workbook has no sheet")?;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row =
            u32::try_from(row).map_err(|_| Error::RowOutOfBounds(u32::MAX, MAX_ROWS - 1))?;
        for (col, field) in record.iter().enumerate() {
            let value = detect_type(field);
            if !value.is_empty() {
                let col = u16::try_from(col).map_err(|_| {
                    Error::ColumnOutOfBounds(u32::try_from(col).unwrap_or(u32::MAX), MAX_COLS - 1)
                })?;
                sheet.set_cell_value_at(row, col, value)?;
            }
        }
    }

    Ok(workbook)
}

fn detect_type(field: &str) -> CellValue {
    let field = field.trim();
    if field.is_empty() {
        return CellValue::Empty;
    }
    if field.starts_with('=') {
        return CellValue::formula(field);
    }
    match field.to_ascii_uppercase().as_str() {
        "TRUE" => return CellValue::Boolean(true),
        "FALSE" => return CellValue::Boolean(false),
        _ => {}
    }
    match field.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::string(field),
    }
}

/// Text shown for a cell; formulas show their source
pub fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        CellValue::String(s) => s.clone(),
        CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        CellValue::Formula(text) => text.clone(),
    }
}

/// Rows of cell text from A1 to the end of the used range
fn used_rows(sheet: &Worksheet) -> Vec<Vec<String>> {
    let Some(used) = sheet.used_range() else {
        return Vec::new();
    };
    (0..=used.end.row)
        .map(|row| {
            (0..=used.end.col)
                .map(|col| cell_text(&sheet.value_at(row, col)))
                .collect()
        })
        .collect()
}

/// Write the used part of a sheet as CSV
pub fn write_csv<W: Write>(sheet: &Worksheet, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for row in used_rows(sheet) {
        writer.write_record(&row)?;
    }
    writer.flush().context("Failed to write CSV")?;
    Ok(())
}

/// Write the used part of a sheet as an aligned text grid with A1 headings
pub fn write_grid<W: Write>(sheet: &Worksheet, mut out: W) -> Result<()> {
    let rows = used_rows(sheet);
    if rows.is_empty() {
        writeln!(out, "(empty)")?;
        return Ok(());
    }

    let columns = rows[0].len();
    let letters: Vec<String> = (0..columns)
        .map(|col| CellAddress::column_to_letters(col as u16))
        .collect();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(letters[col].len()))
                .max()
                .unwrap_or(0)
                .min(MAX_GRID_WIDTH)
        })
        .collect();
    let gutter = rows.len().to_string().len();

    write!(out, "{:gutter$}", "")?;
    for (letter, width) in letters.iter().zip(&widths) {
        write!(out, " | {:width$}", letter)?;
    }
    writeln!(out)?;

    for (i, row) in rows.iter().enumerate() {
        write!(out, "{:>gutter$}", i + 1)?;
        for (text, width) in row.iter().zip(&widths) {
            write!(out, " | {:width$}", clip(text, *width))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_csv_detects_types() {
        let data = "Month,Sales,Flag\nJan,1200.5,true\nFeb,,=B2*2\n";
        let workbook = read_csv(data.as_bytes()).unwrap();
        let sheet = workbook.worksheet(0).unwrap();

        assert_eq!(sheet.value("A1").unwrap(), CellValue::from("Month"));
        assert_eq!(sheet.value("B2").unwrap(), CellValue::Number(1200.5));
        assert_eq!(sheet.value("C2").unwrap(), CellValue::Boolean(true));
        assert!(sheet.value("B3").unwrap().is_empty());
        assert_eq!(sheet.formula_at(2, 2), Some("=B2*2"));
    }

    #[test]
    fn test_read_csv_rejects_too_many_columns() {
        let mut line = ",".repeat(65_536);
        line.push_str("late");
        let err = read_csv(line.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ColumnOutOfBounds(65_536, _))
        ));

        let mut line = ",".repeat(16_384);
        line.push_str("late");
        let err = read_csv(line.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ColumnOutOfBounds(16_384, _))
        ));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&CellValue::Number(42.0)), "42");
        assert_eq!(cell_text(&CellValue::Number(0.25)), "0.25");
        assert_eq!(cell_text(&CellValue::Boolean(false)), "FALSE");
        assert_eq!(cell_text(&CellValue::formula("SUM(A1:A2)")), "=SUM(A1:A2)");
    }

    #[test]
    fn test_write_csv_quotes_fields() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_cell_value("A1", "a, b").unwrap();
        sheet.set_cell_value("B2", 3.0).unwrap();

        let mut out = Vec::new();
        write_csv(&sheet, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"a, b\",\n,3\n");
    }

    #[test]
    fn test_write_grid() {
        let mut sheet = Worksheet::new("Data");
        sheet.set_cell_value("A1", "Name").unwrap();
        sheet.set_cell_value("B2", 10.0).unwrap();

        let mut out = Vec::new();
        write_grid(&sheet, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  | A    | B \n1 | Name |   \n2 |      | 10\n"
        );
    }

    #[test]
    fn test_empty_sheet_grid() {
        let mut out = Vec::new();
        write_grid(&Worksheet::new("Empty"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(empty)\n");
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("abcdef", 4), "abc…");
        assert_eq!(clip("abc", 4), "abc");
    }
}
