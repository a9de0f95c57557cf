//! Executive dashboard with KPI cards and a monthly trend chart

use sheetcraft_chart::{ChartType, LegendPosition, SeriesBy};
use sheetcraft_core::{BorderSides, Color, HorizontalAlignment, StyleAttributes};

use super::{
    banner, heading, ChartSource, ChartTemplate, InputRequirement, KpiCard, KpiDeck, RegionWrite,
    TemplateCell, TemplateDefinition, TemplateId, DARK_BLUE, LIGHT_GREEN,
};

const CHANGE_GREEN: Color = Color::rgb(0x0F, 0x7B, 0x0F);
const CARD_FILL: Color = Color::rgb(0xF2, 0xF2, 0xF2);

const KPIS: [KpiCard; 4] = [
    KpiCard {
        name: "Revenue",
        value: "$1,250,000",
        change: "↗ 15.3%",
    },
    KpiCard {
        name: "Profit Margin",
        value: "23.7%",
        change: "↗ 2.1%",
    },
    KpiCard {
        name: "Customer Satisfaction",
        value: "94.2%",
        change: "↗ 1.8%",
    },
    KpiCard {
        name: "Market Share",
        value: "18.5%",
        change: "↗ 0.7%",
    },
];

const MONTHLY: [(&str, f64, f64); 6] = [
    ("Jan", 980_000.0, 230_000.0),
    ("Feb", 1_050_000.0, 245_000.0),
    ("Mar", 1_120_000.0, 265_000.0),
    ("Apr", 1_180_000.0, 280_000.0),
    ("May", 1_250_000.0, 295_000.0),
    ("Jun", 1_320_000.0, 315_000.0),
];

fn monthly_table() -> Vec<Vec<TemplateCell>> {
    let header = ["Month", "Revenue", "Profit"]
        .iter()
        .map(|s| TemplateCell::text(s))
        .collect();
    let rows = MONTHLY.iter().map(|(month, revenue, profit)| {
        vec![
            TemplateCell::text(month),
            TemplateCell::number(*revenue),
            TemplateCell::number(*profit),
        ]
    });
    std::iter::once(header).chain(rows).collect()
}

pub(super) fn definition() -> TemplateDefinition {
    TemplateDefinition {
        id: TemplateId::Dashboard,
        sheet_name: "Executive_Dashboard",
        input: InputRequirement::None,
        regions: vec![
            RegionWrite::at("A1:F1").merged().style(banner(DARK_BLUE)),
            RegionWrite::text("A1", "Executive Dashboard")
                .style(heading(20.0).with_alignment(HorizontalAlignment::Center)),
            RegionWrite::text("A3", "Key Performance Indicators").style(heading(14.0)),
            // Monthly performance
            RegionWrite::text("E3", "Monthly Performance").style(heading(14.0)),
            RegionWrite::at("E5:G11").cells(monthly_table()),
            RegionWrite::at("E5:G5").style(StyleAttributes::bold().with_fill(LIGHT_GREEN)),
            RegionWrite::at("F6:G11").style(StyleAttributes::new().with_number_format("$#,##0")),
        ],
        kpis: Some(KpiDeck {
            cards: KPIS.to_vec(),
            first_row: 5,
            stride: 3,
            name_style: heading(12.0),
            value_style: heading(16.0).with_font_color(DARK_BLUE),
            change_style: StyleAttributes::bold().with_font_color(CHANGE_GREEN),
            card_style: StyleAttributes::new()
                .with_borders(BorderSides::OUTLINE)
                .with_fill(CARD_FILL),
        }),
        chart: Some(ChartTemplate {
            source: ChartSource::Range("E5:G11"),
            chart_type: ChartType::ColumnClustered,
            series_by: SeriesBy::Auto,
            anchor: "E13:K25",
            title: "Revenue & Profit Trend",
            legend: Some(LegendPosition::Bottom),
        }),
        autofit: "A:K",
    }
}
