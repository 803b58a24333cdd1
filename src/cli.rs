use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cvsscalc", version, about = "CVSS v3.1 base score calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a CVSS:3.1 vector string
    Score(ScoreArgs),
    /// List base metrics and their options
    Metrics(MetricsArgs),
    /// Pick metric values one at a time and watch the score update
    Interactive(ConfigArgs),
    /// Write a default cvsscalc.toml in the current directory
    Init(ConfigArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// e.g. CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
    pub vector: String,
    #[command(flatten)]
    pub config: ConfigArgs,
    #[arg(long)]
    pub json: bool,
    /// Also print impact and exploitability sub-scores
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Args, Clone)]
pub struct MetricsArgs {
    #[arg(long)]
    pub json: bool,
}
