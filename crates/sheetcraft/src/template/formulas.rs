//! Reference sheet of common formulas
//!
//! Examples are written as text so the sheet shows them instead of
//! evaluating them.

use sheetcraft_core::{BorderSides, StyleAttributes};

use super::{
    banner, heading, InputRequirement, RegionWrite, TemplateDefinition, TemplateId, HEADER_BLUE,
    LIGHT_GREEN,
};

const REFERENCE: [[&str; 3]; 14] = [
    ["Formula Type", "Example", "Description"],
    ["VLOOKUP", "=VLOOKUP(A2,D:F,2,FALSE)", "Lookup value in table"],
    ["INDEX/MATCH", "=INDEX(F:F,MATCH(A2,D:D,0))", "Flexible lookup function"],
    ["SUMIFS", "=SUMIFS(C:C,A:A,\"Criteria1\",B:B,\">100\")", "Sum with multiple criteria"],
    ["COUNTIFS", "=COUNTIFS(A:A,\"Product\",B:B,\">50\")", "Count with multiple criteria"],
    ["IF with AND", "=IF(AND(A2>100,B2<50),\"Good\",\"Review\")", "Multiple condition check"],
    ["IF with OR", "=IF(OR(A2=\"A\",A2=\"B\"),\"Priority\",\"Normal\")", "Alternative condition check"],
    ["IFERROR", "=IFERROR(VLOOKUP(A2,D:F,2,FALSE),\"Not Found\")", "Error handling"],
    ["CONCATENATE", "=CONCATENATE(A2,\" - \",B2)", "Combine text values"],
    ["TEXT", "=TEXT(A2,\"mm/dd/yyyy\")", "Format numbers as text"],
    ["ROUND", "=ROUND(A2*B2,2)", "Round to specific decimals"],
    ["NETWORKDAYS", "=NETWORKDAYS(A2,B2)", "Business days between dates"],
    ["SUMPRODUCT", "=SUMPRODUCT((A:A=\"Criteria\")*(B:B))", "Array-like calculations"],
    ["CHOOSE", "=CHOOSE(A2,\"Option1\",\"Option2\",\"Option3\")", "Select from list by index"],
];

pub(super) fn definition() -> TemplateDefinition {
    let rows: Vec<&[&str]> = REFERENCE.iter().map(|row| row.as_slice()).collect();

    TemplateDefinition {
        id: TemplateId::FormulaReference,
        sheet_name: "Advanced_Formulas",
        input: InputRequirement::None,
        regions: vec![
            RegionWrite::text("A1", "Advanced Excel Formulas").style(heading(16.0)),
            RegionWrite::at("A1:C1").style(banner(HEADER_BLUE)),
            RegionWrite::table("A3:C16", &rows),
            RegionWrite::at("A3:C3").style(StyleAttributes::bold().with_fill(LIGHT_GREEN)),
            RegionWrite::at("A3:C16").style(StyleAttributes::new().with_borders(BorderSides::GRID)),
        ],
        kpis: None,
        chart: None,
        autofit: "A:C",
    }
}
