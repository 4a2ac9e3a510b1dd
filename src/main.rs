mod cli;
mod config;
mod core;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use crate::core::report::{self, JsonBatchReport, JsonReport};
use crate::core::{ResponseSource, score_directory, score_source};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() {
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
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Score(args) => {
            let source = match args.file {
                Some(path) => ResponseSource::File(path),
                None => ResponseSource::Pairs(args.answer),
            };
            let cfg = load_config(&args.output)?;
            let assessment = score_source(&source, &cfg)?;

            if args.output.json || cfg.general.json {
                let json_report = JsonReport::from(&assessment);
                println!("{}", serde_json::to_string_pretty(&json_report)?);
            } else {
                report::print_human(&assessment);
            }

            Ok(exit_code(assessment.exit.ok))
        }
        Commands::Batch(args) => {
            let cfg = load_config(&args.output)?;
            let dir = std::env::current_dir()?.join(&args.dir);
            let batch = score_directory(&dir, &cfg)?;

            if args.output.json || cfg.general.json {
                let json_report = JsonBatchReport::from(&batch);
                println!("{}", serde_json::to_string_pretty(&json_report)?);
            } else {
                report::print_batch_human(&batch);
            }

            Ok(exit_code(batch.exit.ok))
        }
        Commands::Questions(args) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report::question_list())?);
            } else {
                report::print_questions();
            }
            Ok(0)
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn load_config(args: &OutputArgs) -> Result<config::Config> {
    let cwd = std::env::current_dir()?;
    let cfg = config::load_config(args.config.as_deref(), &cwd)?;
    debug!(fail_on = %cfg.general.fail_on, "config loaded");
    Ok(cfg)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn exit_code(ok: bool) -> i32 {
    if ok { 0 } else { 1 }
}
