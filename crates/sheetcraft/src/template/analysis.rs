//! Statistical summary of the selection

use sheetcraft_chart::{ChartType, SeriesBy};
use sheetcraft_core::StyleAttributes;

use super::{
    banner, heading, ChartSource, ChartTemplate, InputRequirement, RegionWrite, SourceField,
    TemplateCell, TemplateDefinition, TemplateId, HEADER_BLUE,
};

/// Summary rows: label and formula over the selection
const STATISTICS: [(&str, &str); 7] = [
    ("Count:", "=COUNTA({source})"),
    ("Sum:", "=SUM({source})"),
    ("Average:", "=AVERAGE({source})"),
    ("Median:", "=MEDIAN({source})"),
    ("Maximum:", "=MAX({source})"),
    ("Minimum:", "=MIN({source})"),
    ("Standard Deviation:", "=STDEV({source})"),
];

pub(super) fn definition() -> TemplateDefinition {
    let labels = STATISTICS
        .iter()
        .map(|(label, _)| vec![TemplateCell::text(label)])
        .collect();
    let formulas = STATISTICS
        .iter()
        .map(|(_, formula)| vec![TemplateCell::formula(formula)])
        .collect();

    TemplateDefinition {
        id: TemplateId::Analysis,
        sheet_name: "Data_Analysis",
        input: InputRequirement::Selection {
            min_rows: 2,
            min_cols: 1,
        },
        regions: vec![
            RegionWrite::text("A1", "Data Analysis Results").style(heading(16.0)),
            RegionWrite::at("A1:E1").style(banner(HEADER_BLUE)),
            // Source information
            RegionWrite::at("A3:B4").cells(vec![
                vec![
                    TemplateCell::text("Source Range:"),
                    TemplateCell::Source(SourceField::Address),
                ],
                vec![
                    TemplateCell::text("Data Points:"),
                    TemplateCell::Source(SourceField::CellCount),
                ],
            ]),
            RegionWrite::text("A6", "Statistical Summary").style(heading(14.0)),
            RegionWrite::at("A8:A14").cells(labels),
            RegionWrite::at("B8:B14").cells(formulas),
            RegionWrite::at("B9:B14").style(StyleAttributes::new().with_number_format("#,##0.00")),
        ],
        kpis: None,
        chart: Some(ChartTemplate {
            source: ChartSource::Selection,
            chart_type: ChartType::ColumnClustered,
            series_by: SeriesBy::Auto,
            anchor: "D6:H20",
            title: "Data Visualization",
            legend: None,
        }),
        autofit: "A:E",
    }
}
