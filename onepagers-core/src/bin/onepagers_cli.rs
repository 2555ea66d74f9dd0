//! One-Pagers CLI
//!
//! Commands: report, verbatim, maps, data
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on failure

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use onepagers_core::{
    dataset,
    maps::{HttpSource, MapRenderer, DATASET_PATH, DATASET_URL},
    records::Dataset,
    report::DEFAULT_REPORT_PATH,
    style::StyleConfig,
    verbatim::DEFAULT_VERBATIM_PATH,
    ReportRenderer, VerbatimRenderer,
};

#[derive(Parser)]
#[command(name = "onepagers-cli")]
#[command(about = "One-Pagers CLI - Patent & Design filing summaries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON style overrides (missing keys keep built-in values)
    #[arg(short, long, global = true)]
    style: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the formatted one-pager report
    Report {
        /// Output .docx path
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,

        /// JSON dataset (defaults to the built-in jurisdictions)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Dump the markdown source verbatim, one paragraph per line
    Verbatim {
        /// Output .docx path
        #[arg(short, long, default_value = DEFAULT_VERBATIM_PATH)]
        output: PathBuf,

        /// Text file to dump (defaults to the built-in markdown)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Render country highlight maps as SVG
    Maps {
        /// Directory for the figures
        #[arg(short, long, default_value = "maps")]
        out_dir: PathBuf,

        /// Boundary dataset cache file
        #[arg(long, default_value = DATASET_PATH)]
        geojson: PathBuf,
    },

    /// Print the built-in dataset as JSON
    Data,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let output = serde_json::json!({
                "success": false,
                "error": e,
            });
            println!("{}", output);
            ExitCode::FAILURE
        }
    }
}

fn load_style(path: Option<&Path>, default: StyleConfig) -> Result<StyleConfig, String> {
    match path {
        Some(p) => StyleConfig::load_from_file(p).map_err(|e| e.to_string()),
        None => Ok(default),
    }
}

fn pretty(value: serde_json::Value) -> Result<String, String> {
    serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
}

fn run(cli: Cli) -> Result<String, String> {
    match cli.command {
        Commands::Report { output, data } => {
            let style = load_style(cli.style.as_deref(), StyleConfig::default())?;
            let dataset = match data {
                Some(p) => Dataset::load_from_file(&p).map_err(|e| e.to_string())?,
                None => dataset::builtin(),
            };
            let manifest = ReportRenderer::new(style)
                .render_to_file(&dataset, &output)
                .map_err(|e| e.to_string())?;
            pretty(serde_json::json!({ "success": true, "manifest": manifest }))
        }

        Commands::Verbatim { output, input } => {
            let style = load_style(cli.style.as_deref(), StyleConfig::verbatim())?;
            let text = match input {
                Some(p) => std::fs::read_to_string(&p)
                    .map_err(|e| format!("Failed to read {}: {}", p.display(), e))?,
                None => dataset::VERBATIM_SOURCE.to_string(),
            };
            let manifest = VerbatimRenderer::new(style)
                .render_to_file(&text, &output)
                .map_err(|e| e.to_string())?;
            pretty(serde_json::json!({ "success": true, "manifest": manifest }))
        }

        Commands::Maps { out_dir, geojson } => {
            let renderer = MapRenderer::from_cache(&HttpSource, DATASET_URL, &geojson)
                .map_err(|e| e.to_string())?;
            let reports = renderer
                .render_all(&dataset::MAP_COUNTRIES, &out_dir)
                .map_err(|e| e.to_string())?;
            for notice in reports.iter().filter_map(|r| r.notice.as_deref()) {
                eprintln!("{}", notice);
            }
            pretty(serde_json::json!({ "success": true, "maps": reports }))
        }

        Commands::Data => serde_json::to_string_pretty(&dataset::builtin()).map_err(|e| e.to_string()),
    }
}
