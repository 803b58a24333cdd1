mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs, MetricsArgs, ScoreArgs};
use cvsscalc::core::assess_vector;
use cvsscalc::core::report::{self, JsonReport, MetricsJson};
use cvsscalc::core::score::Assessment;
use cvsscalc::core::selection::Selection;
use cvsscalc::{config, session};
use std::io;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args),
        Commands::Metrics(args) => run_metrics(args),
        Commands::Interactive(args) => run_interactive(args),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `cvsscalc init`; writing ./{}",
                    config::CONFIG_FILE_NAME
                );
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn load_config(args: &ConfigArgs) -> Result<config::Config> {
    let cwd = std::env::current_dir()?;
    config::load_config(args.config.as_deref(), &cwd)
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let cfg = load_config(&args.config)?;
    let rounding = cfg.general.rounding;
    let assessment = assess_vector(&args.vector, rounding)?;

    if args.json || cfg.general.json {
        let json = JsonReport::new(&assessment, &cfg.palette, rounding, args.explain);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        report::print_human(&assessment, &cfg.palette, args.explain);
    }

    match assessment {
        Assessment::Scored(_) => Ok(0),
        Assessment::Unscored { .. } => Ok(1),
    }
}

fn run_metrics(args: MetricsArgs) -> Result<i32> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&MetricsJson::default())?);
    } else {
        print!("{}", report::render_metrics(&Selection::new()));
    }
    Ok(0)
}

fn run_interactive(args: ConfigArgs) -> Result<i32> {
    let cfg = load_config(&args)?;
    info!(rounding = %cfg.general.rounding, "starting interactive session");

    let mut session = session::Session::new(&cfg);
    let stdin = io::stdin();
    session::run(&mut session, stdin.lock(), io::stdout().lock())?;
    Ok(0)
}
