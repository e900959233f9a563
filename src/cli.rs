use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Choropleth map CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "chorograph", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a choropleth SVG from a dataset and a topology
    Render(RenderArgs),

    /// Summarize a dataset/topology pair without rendering
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Dataset URL or file path (delimited text with a header row)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub data: String,

    /// Topology URL or file path
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub topology: String,

    /// Column holding the FIPS regional code
    #[arg(long, default_value = "FIPS")]
    pub key_column: String,

    /// Column holding the numeric value to shade by
    #[arg(long, default_value = "value")]
    pub value_column: String,

    /// Join granularity: "states" or "counties"
    #[arg(long, default_value = "counties")]
    pub granularity: String,

    /// Scale transform: identity, log, power, sqrt, symlog, quantile
    #[arg(long, default_value = "identity")]
    pub transform: String,

    /// Color palette: blues, greens, oranges, purples, reds, viridis
    #[arg(long, default_value = "blues")]
    pub palette: String,

    /// Number of legend entries
    #[arg(long, default_value_t = 5)]
    pub legend_steps: usize,

    /// CSS stroke color for feature outlines
    #[arg(long, default_value = "#ffffff")]
    pub stroke_color: String,

    /// Map title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Output SVG file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset URL or file path
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub data: String,

    /// Topology URL or file path
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub topology: String,

    /// Column holding the FIPS regional code
    #[arg(long, default_value = "FIPS")]
    pub key_column: String,

    /// Column holding the numeric value to shade by
    #[arg(long, default_value = "value")]
    pub value_column: String,

    /// Join granularity: "states" or "counties"
    #[arg(long, default_value = "counties")]
    pub granularity: String,
}
