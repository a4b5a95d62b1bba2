// src/main.rs

//! catalog-crawler: university eCalendar requirement crawler CLI.

use std::fs;

use clap::{Parser, Subcommand};

use catalog_crawler::error::Result;
use catalog_crawler::models::{Config, ProgramSeed, Seed};
use catalog_crawler::pipeline::{run_extract, run_load, run_scrape};
use catalog_crawler::storage::SqliteStore;
use catalog_crawler::utils::log;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-crawler",
    version = "0.1.0",
    about = "University eCalendar requirement crawler"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(long, default_value = "data/programs.toml")]
    seeds: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, extract, and persist all seeded programs
    Scrape {
        /// Max programs to process
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Only process the program with this key
        #[arg(long)]
        program: Option<String>,
    },
    /// Fetch and extract only, writing the intermediate JSON to a file
    Extract {
        #[arg(short, long, default_value = "data/programs.json")]
        output: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        program: Option<String>,
    },
    /// Persist a previously exported intermediate JSON file
    Load {
        #[arg(short, long, default_value = "data/programs.json")]
        input: String,
    },
    /// Validate configuration and seed data
    Validate,
    /// Show stored row counts
    Stats,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    let seed = Seed::load_or_default(&cli.seeds);

    if cli.quiet {
        config.logging.level = "warn".to_string();
        config.logging.show_progress = false;
    }
    log::init(&config.logging.level);

    match cli.command {
        Command::Scrape { limit, program } => {
            config.validate()?;
            seed.validate()?;
            let seeds = select_seeds(&seed, limit, program.as_deref());
            let store = SqliteStore::open(&config.storage.db_path, config.storage.batch_size)?;
            let report = run_scrape(&config, &seeds, &store).await?;
            if !report.errors.is_empty() {
                for error in &report.errors {
                    log::warn(error);
                }
            }
        }
        Command::Extract {
            output,
            limit,
            program,
        } => {
            config.validate()?;
            seed.validate()?;
            let seeds = select_seeds(&seed, limit, program.as_deref());
            let (programs, report) = run_extract(&config, &seeds).await?;
            fs::write(&output, serde_json::to_string_pretty(&programs)?)?;
            log::success(&format!(
                "Wrote {} programs to {} ({} errors)",
                programs.len(),
                output,
                report.errors.len()
            ));
        }
        Command::Load { input } => {
            let store = SqliteStore::open(&config.storage.db_path, config.storage.batch_size)?;
            run_load(&input, &store)?;
        }
        Command::Validate => {
            config.validate()?;
            seed.validate()?;
            log::success(&format!(
                "Configuration and seed table valid ({} programs)",
                seed.programs.len()
            ));
        }
        Command::Stats => {
            let store = SqliteStore::open(&config.storage.db_path, config.storage.batch_size)?;
            let stats = store.get_stats()?;
            log::summary(
                "Stored rows",
                &[
                    ("Programs", stats.programs.to_string()),
                    ("Blocks", stats.blocks.to_string()),
                    ("Courses", stats.courses.to_string()),
                    ("Constraints", stats.constraints.to_string()),
                ],
            );
        }
    }

    Ok(())
}

/// Apply the optional `--program` filter and `--limit` to the seed table.
fn select_seeds(seed: &Seed, limit: Option<usize>, program: Option<&str>) -> Vec<ProgramSeed> {
    seed.programs
        .iter()
        .filter(|entry| program.map_or(true, |key| entry.key == key))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}
