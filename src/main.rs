use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};

mod config;
mod error;
mod git;
mod output;
mod pipeline;
mod stats;

use crate::config::Config;
use crate::git::GitObjectStore;
use crate::output::Reporter;
use crate::pipeline::PipelineOptions;

#[derive(Parser)]
#[command(
    name = "gitch",
    author,
    version,
    about = "g(b)itch analyses history of a git project",
    after_help = "Please run at the project's root directory"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyses contributors' work
    #[command(visible_alias = "au")]
    Authors(AuthorsArgs),
}

#[derive(Args)]
struct AuthorsArgs {
    /// Repository root to analyze
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Authors order (count, span)
    #[arg(short, long)]
    order: Option<String>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Authors(args) => authors(args).await,
    }
}

async fn authors(args: AuthorsArgs) -> Result<()> {
    let store = GitObjectStore::open(&args.repo)?;
    let config = Config::load(&args.repo)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    eprintln!("{}", "gitch - contributors' work".bright_cyan().bold());
    eprintln!(
        "Repository: {}",
        args.repo.display().to_string().bright_white()
    );

    let order = args.order.unwrap_or(config.output.order);
    let format = args.format.unwrap_or(config.output.format);
    let options = PipelineOptions {
        channel_capacity: config.pipeline.channel_capacity,
        show_progress: config.output.progress,
    };

    let mut stats = pipeline::run(store, &options).await?;

    info!("Rendering {} authors", stats.len());
    let reporter = Reporter::new(&format, &order);
    reporter.generate_report(&mut stats, &mut io::stdout().lock())?;

    Ok(())
}
