use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "esai",
    version,
    about = "Greenness scoring for analytical methods (ESAI)"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score an assessment and print the report
    Score(ScoreCommand),
    /// Draw the radar chart of an assessment as SVG
    Chart(ChartCommand),
    /// List the weight presets
    Presets,
    /// List the principles and their accepted inputs
    Principles,
}

#[derive(Args)]
pub struct WeightArgs {
    /// Use weight preset N (1-7)
    #[arg(long, conflicts_with = "weights")]
    pub preset: Option<u32>,

    /// Eight comma-separated weights, w1..w8
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub weights: Option<Vec<String>>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub weights: WeightArgs,
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ChartCommand {
    pub path: PathBuf,
    #[command(flatten)]
    pub weights: WeightArgs,
    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
