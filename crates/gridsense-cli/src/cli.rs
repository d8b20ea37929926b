use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;

#[derive(Parser, Debug)]
#[command(
    name = "gridsense",
    about = "Estimate a household's electricity bill and find ways to cut it",
    version
)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the climate category for a postal code
    Climate(ClimateArgs),
    /// Predict the bill for a household and print recommendations
    Analyze(AnalyzeArgs),
    /// Compute recommendations from a saved prediction (no network)
    Advise(AdviseArgs),
    /// Check that the prediction service is reachable
    Health,
}

#[derive(Args, Debug)]
pub(crate) struct ClimateArgs {
    /// Postal code to resolve
    pub(crate) postal_code: String,
    /// Print the full resolution, including coordinates and weather, as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Household answers as JSON
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Detect climate from this postal code, overriding the input's climate
    /// (defaults to the input's `location`)
    #[arg(long)]
    pub(crate) postal: Option<String>,
    /// Daily AC/heating hours, overriding the input's `ac_level`
    #[arg(long, value_name = "HOURS")]
    pub(crate) ac_hours: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct AdviseArgs {
    /// Household answers as JSON
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Prediction service response as JSON
    #[arg(long)]
    pub(crate) prediction: PathBuf,
}

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Climate(args) => commands::climate(config_path, args).await,
        Command::Analyze(args) => commands::analyze(config_path, args).await,
        Command::Advise(args) => commands::advise(args),
        Command::Health => commands::health(config_path).await,
    }
}
