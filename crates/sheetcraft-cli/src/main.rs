//! sheetcraft CLI - render worksheet templates and run chat commands

mod grid;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use sheetcraft::prelude::*;
use sheetcraft::resolve::keywords;
use sheetcraft::template::InputRequirement;
use sheetcraft::{JsonFileStore, Session, SettingsStore};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetcraft")]
#[command(
    author,
    version,
    about = "Preformatted worksheet templates for spreadsheet hosts"
)]
struct Cli {
    /// Settings file (default: <config dir>/sheetcraft/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the working grid comes from
#[derive(clap::Args)]
struct GridArgs {
    /// Load this CSV file into Sheet1 before running
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Range to select before running, e.g. "Sheet1!A1:B10"
    #[arg(short, long)]
    select: Option<String>,

    /// Output format for the created sheet
    #[arg(short, long, value_enum, default_value_t = Format::Grid)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Grid,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available templates
    Templates,

    /// Render a template into a new sheet and print it
    Render {
        /// Template id: budget, analysis, formulas or dashboard
        template: TemplateId,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Send a chat command to the assistant
    Chat {
        /// Command text, e.g. "build a dashboard"
        #[arg(required = true)]
        message: Vec<String>,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Show or change assistant settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings
    Show,
    /// Select the response provider
    Provider { id: String },
    /// Store an API key
    ApiKey { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let store = match &cli.config {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default(),
    };

    match cli.command {
        Commands::Templates => list_templates(out),
        Commands::Render { template, grid } => render(template, &grid, out),
        Commands::Chat { message, grid } => chat(&message.join(" "), &grid, &store, out),
        Commands::Settings { action } => {
            settings(action.unwrap_or(SettingsAction::Show), store, out)
        }
    }
}

fn list_templates<W: Write>(out: &mut W) -> Result<()> {
    for id in TemplateId::ALL {
        let definition = id.definition();
        let input = match definition.input {
            InputRequirement::None => "no input".to_string(),
            InputRequirement::Selection { min_rows, .. } => {
                format!("selection of {}+ rows", min_rows)
            }
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            id,
            definition.sheet_name,
            input,
            keywords(id).join(", ")
        )?;
    }
    Ok(())
}

/// Build the surface a command runs against
fn open_surface(args: &GridArgs) -> Result<MemorySurface> {
    let workbook = match &args.csv {
        Some(path) => grid::load_csv(path)?,
        None => Workbook::new(),
    };
    // Seeded data is selected unless a range is given
    let used = workbook.active_worksheet().and_then(|ws| ws.used_range());
    let mut surface = MemorySurface::with_workbook(workbook);

    let range = match &args.select {
        Some(text) => {
            Some(SheetRange::parse(text).with_context(|| format!("Invalid range '{}'", text))?)
        }
        None => used.map(SheetRange::local),
    };
    if let Some(range) = range {
        debug!("selecting {}", range);
        surface
            .select(range.clone())
            .with_context(|| format!("Cannot select '{}'", range))?;
    }
    Ok(surface)
}

fn render<W: Write>(template: TemplateId, args: &GridArgs, out: &mut W) -> Result<()> {
    let mut assistant = Assistant::new(open_surface(args)?);
    let sheet = assistant
        .quick_action(template)
        .with_context(|| format!("Failed to render the {} template", template))?;

    eprintln!("{}", assistant.status());
    print_sheet(assistant.surface(), &sheet, args.format, out)
}

fn chat<W: Write>(
    message: &str,
    args: &GridArgs,
    store: &JsonFileStore,
    out: &mut W,
) -> Result<()> {
    let session = load_settings(store)?;
    let mut assistant = Assistant::with_session(open_surface(args)?, session);

    let result = assistant.send_message(message);
    for message in assistant.transcript() {
        writeln!(out, "{}", message)?;
    }

    match result {
        Ok(Some(sheet)) => {
            writeln!(out)?;
            print_sheet(assistant.surface(), &sheet, args.format, out)
        }
        Ok(None) => Ok(()),
        Err(e) => bail!("{}: {}", assistant.status(), e),
    }
}

fn print_sheet<W: Write>(
    surface: &MemorySurface,
    sheet: &SheetHandle,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let worksheet = surface
        .workbook()
        .worksheet_by_name(sheet.name())
        .with_context(|| format!("Sheet '{}' not found", sheet.name()))?;
    debug!("printing '{}'", worksheet.name());

    match format {
        Format::Grid => {
            writeln!(out, "Sheet: {}", worksheet.name())?;
            grid::write_grid(worksheet, &mut *out)?;
            for chart in surface.charts_on(sheet.name()) {
                writeln!(
                    out,
                    "Chart: {} of {} at {}",
                    chart.chart_type, chart.source, chart.anchor
                )?;
            }
            Ok(())
        }
        Format::Csv => grid::write_csv(worksheet, out),
    }
}

fn settings<W: Write>(
    action: SettingsAction,
    mut store: JsonFileStore,
    out: &mut W,
) -> Result<()> {
    let mut session = load_settings(&store)?;

    match action {
        SettingsAction::Show => {
            writeln!(out, "settings: {}", store.path().display())?;
            writeln!(out, "provider: {}", session.provider)?;
            writeln!(
                out,
                "api key:  {}",
                session.masked_api_key().as_deref().unwrap_or("(not set)")
            )?;
            return Ok(());
        }
        SettingsAction::Provider { id } => session.set_provider(id),
        SettingsAction::ApiKey { key } => {
            if !session.set_api_key(&key) {
                bail!("API key is blank");
            }
        }
    }

    store
        .save(&session)
        .with_context(|| format!("Failed to write '{}'", store.path().display()))?;
    writeln!(out, "Saved settings to '{}'", store.path().display())?;
    Ok(())
}

fn load_settings(store: &JsonFileStore) -> Result<Session> {
    store
        .load()
        .with_context(|| format!("Failed to load settings from '{}'", store.path().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("sheetcraft").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_templates_lists_all() {
        let out = run_args(&["templates"]).unwrap();
        let ids: Vec<&str> = out.lines().map(|l| l.split('\t').next().unwrap()).collect();
        assert_eq!(ids, vec!["budget", "analysis", "formulas", "dashboard"]);
        assert!(out.contains("Data_Analysis\tselection of 2+ rows"));
    }

    #[test]
    fn test_render_budget_as_csv() {
        let out = run_args(&["render", "budget", "--format", "csv"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Monthly Budget Template,,");
        assert_eq!(lines[7], "Total Income,,=SUM(C4:C7)");
        assert_eq!(lines.len(), 21);
    }

    #[test]
    fn test_render_analysis_from_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "10,20\n30,40\n50,60\n").unwrap();

        let out = run_args(&[
            "render",
            "analysis",
            "--csv",
            path.to_str().unwrap(),
            "--select",
            "A1:B3",
        ])
        .unwrap();
        assert!(out.starts_with("Sheet: Data_Analysis\n"));
        assert!(out.contains("=SUM(Sheet1!A1:B3)"));
        assert!(out.contains("Chart: ColumnClustered of Sheet1!A1:B3 at D6:H20"));
    }

    #[test]
    fn test_csv_data_is_selected_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "Q1,Q2\n5,7\n9,11\n").unwrap();

        let out = run_args(&["render", "analysis", "--csv", path.to_str().unwrap()]).unwrap();
        assert!(out.contains("Sheet1!A1:B3"));
        assert!(out.contains("=STDEV(Sheet1!A1:B3)"));
    }

    #[test]
    fn test_render_analysis_needs_selection() {
        let err = run_args(&["render", "analysis"]).unwrap_err();
        assert!(format!("{:#}", err).contains("at least 2 rows"));
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        assert!(run_args(&["render", "invoice"]).is_err());
    }

    #[test]
    fn test_chat_prints_reply_and_sheet() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("settings.json");
        let out = run_args(&[
            "chat",
            "--config",
            config.to_str().unwrap(),
            "build",
            "a",
            "dashboard",
        ])
        .unwrap();
        assert!(out.contains("You: build a dashboard\n"));
        assert!(out.contains("Assistant: 📈 Executive Dashboard Built!"));
        assert!(out.contains("Sheet: Executive_Dashboard"));
        assert!(out.contains("Chart: ColumnClustered of Executive_Dashboard!E5:G11 at E13:K25"));
    }

    #[test]
    fn test_chat_without_match() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("settings.json");
        let out = run_args(&["chat", "--config", config.to_str().unwrap(), "hello"]).unwrap();
        assert!(out.contains("I understand you want to: \"hello\""));
        assert!(!out.contains("Sheet:"));
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("nested").join("settings.json");
        let config = config.to_str().unwrap();

        run_args(&["settings", "--config", config, "api-key", "sk-secret-1234"]).unwrap();
        run_args(&["settings", "--config", config, "provider", "openai"]).unwrap();
        let out = run_args(&["settings", "--config", config]).unwrap();

        assert!(out.contains("provider: openai"));
        assert!(out.contains("api key:  **********1234"));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("settings.json");
        let err = run_args(&["settings", "--config", config.to_str().unwrap(), "api-key", " "]);
        assert!(err.is_err());
        assert!(!config.exists());
    }
}
