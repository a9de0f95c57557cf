//! Monthly budget template

use sheetcraft_core::{BorderSides, Color, HorizontalAlignment, StyleAttributes};

use super::{
    banner, heading, InputRequirement, RegionWrite, TemplateCell, TemplateDefinition, TemplateId,
    HEADER_BLUE, LIGHT_GREEN,
};

const EXPENSE_FILL: Color = Color::rgb(0xFC, 0xE4, 0xD6);
const NET_FILL: Color = Color::rgb(0xD5, 0xE8, 0xD4);

const INCOME_ITEMS: [&str; 4] = [
    "Salary",
    "Freelance Income",
    "Investment Returns",
    "Other Income",
];

const EXPENSE_ITEMS: [&str; 8] = [
    "Rent/Mortgage",
    "Utilities",
    "Food & Groceries",
    "Transportation",
    "Insurance",
    "Entertainment",
    "Savings",
    "Other Expenses",
];

/// Label, blank note column, zero amount
fn line_items(labels: &[&str]) -> Vec<Vec<TemplateCell>> {
    labels
        .iter()
        .map(|label| {
            vec![
                TemplateCell::text(label),
                TemplateCell::blank(),
                TemplateCell::number(0.0),
            ]
        })
        .collect()
}

pub(super) fn definition() -> TemplateDefinition {
    let bold = StyleAttributes::bold;

    TemplateDefinition {
        id: TemplateId::Budget,
        sheet_name: "Budget_Template",
        input: InputRequirement::None,
        regions: vec![
            RegionWrite::at("A1:D1").merged().style(banner(HEADER_BLUE)),
            RegionWrite::text("A1", "Monthly Budget Template")
                .style(heading(16.0).with_alignment(HorizontalAlignment::Center)),
            // Income
            RegionWrite::text("A3", "INCOME").style(heading(14.0)),
            RegionWrite::at("A3:D3").style(StyleAttributes::new().with_fill(LIGHT_GREEN)),
            RegionWrite::at("A4:C7").cells(line_items(&INCOME_ITEMS)),
            RegionWrite::text("A8", "Total Income").style(bold()),
            RegionWrite::formula("C8", "=SUM(C4:C7)").style(bold()),
            // Expenses
            RegionWrite::text("A10", "EXPENSES").style(heading(14.0)),
            RegionWrite::at("A10:D10").style(StyleAttributes::new().with_fill(EXPENSE_FILL)),
            RegionWrite::at("A11:C18").cells(line_items(&EXPENSE_ITEMS)),
            RegionWrite::text("A19", "Total Expenses").style(bold()),
            RegionWrite::formula("C19", "=SUM(C11:C18)").style(bold()),
            // Net
            RegionWrite::text("A21", "Net Income").style(heading(14.0)),
            RegionWrite::formula("C21", "=C8-C19").style(bold()),
            RegionWrite::at("A21:C21").style(StyleAttributes::new().with_fill(NET_FILL)),
            RegionWrite::at("C4:C21").style(StyleAttributes::new().with_number_format("$#,##0.00")),
            RegionWrite::at("A1:C21").style(StyleAttributes::new().with_borders(BorderSides::GRID)),
        ],
        kpis: None,
        chart: None,
        autofit: "A:C",
    }
}
