//! Command-line interface.

use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::analyze::{analyze_stores, Analyzer};
use crate::exit_codes::ExitCode;
use crate::logging::LogFormat;
use crate::report::{emit, ReportOptions};
use crate::summarize::load_summarizer;
use rcg_common::Result;
use rcg_config::{resolve_settings, SettingsPaths};

/// Compile the configurations of Roddy runs and group identical ones.
///
/// If all parameter files of a run directory agree, only the run directory is
/// reported; if all runs of a roddyExecutionStore agree, only the store is.
/// Exits 0 when everything shares one configuration and 2 otherwise.
#[derive(Parser, Debug)]
#[command(name = "group-configs", version)]
pub struct Cli {
    /// Summarizer executable, or `builtin:raw` to keep raw versions and parameters
    pub summarizer: String,

    /// roddyExecutionStore directories to analyse
    #[arg(required = true, num_args = 1..)]
    pub stores: Vec<PathBuf>,

    /// Settings file (defaults to $RODDY_GROUP_CONFIG, then the per-user settings)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Indent the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// More diagnostics (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Fewer diagnostics (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Net verbosity: `-v` count minus `-q` count.
    pub fn verbosity(&self) -> i8 {
        self.verbose.min(i8::MAX as u8) as i8 - self.quiet.min(i8::MAX as u8) as i8
    }
}

/// Run an analysis and write the report to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<ExitCode> {
    let resolved = resolve_settings(&SettingsPaths::from_env(cli.config.clone()))?;
    match &resolved.source {
        Some(path) => debug!(settings = %path.display(), "loaded settings"),
        None => debug!("using default settings"),
    }

    let summarizer = load_summarizer(&cli.summarizer, &resolved.settings.summarizer)?;
    let analyzer = Analyzer::new(summarizer);
    let combined = analyze_stores(&analyzer, &cli.stores, &resolved.settings.layout)?;
    emit(out, &combined, ReportOptions { pretty: cli.pretty })
}
