//! Addressing properties across the A1 text form

use proptest::prelude::*;
use sheetcraft_core::{CellAddress, CellRange, ColumnSpan, SheetRange, MAX_COLS, MAX_ROWS};

proptest! {
    #[test]
    fn address_text_parses_back(row in 0u32..MAX_ROWS, col in 0u16..MAX_COLS) {
        let addr = CellAddress::new(row, col);
        prop_assert_eq!(CellAddress::parse(&addr.to_a1_string()).unwrap(), addr);
    }

    #[test]
    fn column_letters_parse_back(col in 0u16..MAX_COLS) {
        let letters = CellAddress::column_to_letters(col);
        prop_assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), col);
    }

    #[test]
    fn range_iteration_covers_every_cell(
        r0 in 0u32..40, c0 in 0u16..20, r1 in 0u32..40, c1 in 0u16..20,
    ) {
        let range = CellRange::from_indices(r0, c0, r1, c1);
        let cells: Vec<_> = range.cells().collect();
        prop_assert_eq!(cells.len() as u64, range.cell_count());
        prop_assert!(cells.iter().all(|c| range.contains(c)));
        prop_assert!(cells.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn sheet_range_quoting() {
    let range = CellRange::parse("A1:B10").unwrap();
    assert_eq!(SheetRange::new("Sheet1", range).to_string(), "Sheet1!A1:B10");
    assert_eq!(
        SheetRange::new("Q1 Sales", range).to_string(),
        "'Q1 Sales'!A1:B10"
    );
    assert_eq!(
        SheetRange::new("Bob's", range).to_string(),
        "'Bob''s'!A1:B10"
    );

    let parsed = SheetRange::parse("'Bob''s'!A1:B10").unwrap();
    assert_eq!(parsed.sheet.as_deref(), Some("Bob's"));
    assert_eq!(parsed.range, range);
}

#[test]
fn unqualified_ranges_take_a_sheet() {
    let local = SheetRange::parse("D6:H20").unwrap();
    assert_eq!(local.sheet, None);
    assert_eq!(local.or_sheet("Data").to_string(), "Data!D6:H20");
}

#[test]
fn rejects_bad_text() {
    assert!(CellAddress::parse("A0").is_err());
    assert!(CellAddress::parse("1A").is_err());
    assert!(CellRange::parse("A1:").is_err());
    assert!(ColumnSpan::parse("A:1").is_err());
    assert!(SheetRange::parse("!A1").is_err());
}
