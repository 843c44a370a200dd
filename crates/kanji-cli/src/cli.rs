//! CLI argument definitions for the dataset builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use kanji_model::SourceKind;

#[derive(Parser)]
#[command(
    name = "kanji-build",
    version,
    about = "Kanji dataset builder - merge sources, audit radicals, verify coverage",
    long_about = "Build the canonical kanji reference dataset from curated and\n\
                  scraped sources.\n\n\
                  Merges per-source lists by fixed priority, assigns stable\n\
                  u<hex> identifiers, audits radical assignments, and verifies\n\
                  coverage against the official Joyo list."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full build: ingest, merge, radical audit, coverage.
    Build(BuildArgs),

    /// Check official-list coverage of a previously built dataset.
    Coverage(DataArgs),

    /// Report radical assignment gaps in a previously built dataset.
    Radicals(DataArgs),

    /// Download stroke-order SVG assets for a previously built dataset.
    FetchSvg(FetchArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Directory containing the source JSON files.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for built artifacts (default: DATA_DIR).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run every stage and report without writing artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Audit radical assignments but skip the inference pass.
    #[arg(long = "skip-fix")]
    pub skip_fix: bool,

    /// Restrict the build to specific sources (repeatable; default: all).
    #[arg(long = "source", value_enum, value_name = "SOURCE")]
    pub sources: Vec<SourceArg>,
}

#[derive(Parser)]
pub struct DataArgs {
    /// Directory containing the built artifacts and the official list.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Directory containing the built canonical artifact.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory receiving the SVG files (default: DATA_DIR/svg).
    #[arg(long = "assets-dir", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Remote base URL for stroke-order SVGs.
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = "https://raw.githubusercontent.com/parsimonhi/animCJK/master/svgsJa"
    )]
    pub base_url: String,

    /// Minimum delay between requests, in milliseconds.
    #[arg(long = "delay-ms", value_name = "MS", default_value_t = 100)]
    pub delay_ms: u64,

    /// Retries per asset after the first attempt.
    #[arg(long = "retries", value_name = "N", default_value_t = 2)]
    pub retries: u32,

    /// Fetch at most this many assets.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

/// CLI source selection choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Curated,
    Exam,
    Mistake,
    Confused,
}

impl SourceArg {
    pub fn kind(self) -> SourceKind {
        match self {
            SourceArg::Curated => SourceKind::CuratedMaster,
            SourceArg::Exam => SourceKind::ExamList,
            SourceArg::Mistake => SourceKind::MistakeList,
            SourceArg::Confused => SourceKind::ConfusedList,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
