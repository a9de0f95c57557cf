//! Keyword resolver for chat commands
//!
//! Commands are matched case-insensitively by substring against an ordered
//! keyword table. The first template with a matching keyword wins.

use crate::template::TemplateId;

/// Outcome of resolving a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Template to render, if any keyword matched
    pub template: Option<TemplateId>,
    /// Text to show the user
    pub acknowledgment: String,
}

struct Rule {
    template: TemplateId,
    keywords: &'static [&'static str],
    acknowledgment: &'static str,
}

static RULES: [Rule; 4] = [
    Rule {
        template: TemplateId::Budget,
        keywords: &["template", "budget"],
        acknowledgment: "✅ Budget Template Created!\n\
            📊 Features Added:\n\
            • Income categories with automatic formulas\n\
            • Expense tracking with calculations\n\
            • Net income calculation with conditional formatting\n\
            • Professional color coding and borders\n\
            • Currency formatting throughout\n\
            • Created in new worksheet: Budget_Template",
    },
    Rule {
        template: TemplateId::Analysis,
        keywords: &["analyze", "data"],
        acknowledgment: "🔍 Data Analysis Complete!\n\
            📈 Analysis Results:\n\
            • Statistical summary generated\n\
            • Count, sum, average, median calculated\n\
            • Maximum and minimum values identified\n\
            • Standard deviation computed\n\
            • Visual chart created for data trends\n\
            • Results saved in: Data_Analysis worksheet",
    },
    Rule {
        template: TemplateId::FormulaReference,
        keywords: &["formula", "calculation"],
        acknowledgment: "⚡ Advanced Formulas Generated!\n\
            🧮 Formula Library Created:\n\
            • VLOOKUP for data lookup operations\n\
            • INDEX/MATCH for flexible searches\n\
            • SUMIFS/COUNTIFS for conditional calculations\n\
            • IF statements with AND/OR logic\n\
            • Error handling with IFERROR\n\
            • Date and text manipulation functions\n\
            • Created in: Advanced_Formulas worksheet",
    },
    Rule {
        template: TemplateId::Dashboard,
        keywords: &["dashboard", "chart"],
        acknowledgment: "📈 Executive Dashboard Built!\n\
            🎯 Dashboard Components:\n\
            • 4 Key Performance Indicators (KPIs)\n\
            • Revenue and profit tracking\n\
            • Performance trend visualization\n\
            • Color-coded status indicators\n\
            • Professional executive-level formatting\n\
            • Interactive charts and data tables\n\
            • Created in: Executive_Dashboard worksheet",
    },
];

fn rule(template: TemplateId) -> &'static Rule {
    match template {
        TemplateId::Budget => &RULES[0],
        TemplateId::Analysis => &RULES[1],
        TemplateId::FormulaReference => &RULES[2],
        TemplateId::Dashboard => &RULES[3],
    }
}

/// Keywords that select a template
pub fn keywords(template: TemplateId) -> &'static [&'static str] {
    rule(template).keywords
}

/// The canned response for a rendered template
pub fn acknowledgment(template: TemplateId) -> &'static str {
    rule(template).acknowledgment
}

/// Response for a command no keyword matched
pub fn fallback_acknowledgment(command: &str) -> String {
    format!(
        "I understand you want to: \"{command}\"\n\n\
         I can help you with:\n\
         • Creating comprehensive templates (budgets, financial models)\n\
         • Analyzing data with statistical insights\n\
         • Generating advanced Excel formulas\n\
         • Building interactive dashboards\n\n\
         Try using the quick action buttons or type a more specific command!"
    )
}

/// Resolve a command to a template and acknowledgment
pub fn resolve(command: &str) -> Resolution {
    let lowered = command.to_lowercase();
    match RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
    {
        Some(rule) => Resolution {
            template: Some(rule.template),
            acknowledgment: rule.acknowledgment.to_string(),
        },
        None => Resolution {
            template: None,
            acknowledgment: fallback_acknowledgment(command),
        },
    }
}
