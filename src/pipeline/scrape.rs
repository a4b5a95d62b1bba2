// src/pipeline/scrape.rs

//! Scrape pipeline: fetch program pages, extract requirement structures,
//! and persist them.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{Config, Program, ProgramSeed, RunReport};
use crate::services::{PageFetcher, assembler};
use crate::storage::SqliteStore;
use crate::utils::log;

/// Run the full pipeline: fetch, extract, persist, report.
pub async fn run_scrape(
    config: &Config,
    seeds: &[ProgramSeed],
    store: &SqliteStore,
) -> Result<RunReport> {
    log::header("Catalogue scrape starting");

    log::step(1, 3, "Fetch - Retrieving program pages");
    let fetched = fetch_pages(config, seeds).await?;

    log::step(2, 3, "Extract - Parsing requirement structures");
    let (programs, mut report) = process_fetched(config, fetched);

    log::step(3, 3, "Persist - Syncing programs");
    for program in &programs {
        match store.save_program(program) {
            Ok((blocks, courses)) => {
                report.programs += 1;
                report.blocks += blocks;
                report.courses += courses;
                if config.logging.show_progress {
                    log::sub_item(&format!(
                        "{}: {} blocks, {} courses",
                        program.program_key, blocks, courses
                    ));
                }
            }
            Err(error) => {
                let error = AppError::persist("save_program", error);
                log::warn(&error.to_string());
                report.record_error(&program.program_key, error);
            }
        }
    }

    report.finish();
    log::summary("Scrape complete", &report.summary_items());
    Ok(report)
}

/// Fetch and extract only, returning the program aggregates for export.
pub async fn run_extract(
    config: &Config,
    seeds: &[ProgramSeed],
) -> Result<(Vec<Program>, RunReport)> {
    let fetched = fetch_pages(config, seeds).await?;
    let (programs, mut report) = process_fetched(config, fetched);

    report.programs = programs.len();
    report.blocks = programs.iter().map(|p| p.blocks.len()).sum();
    report.courses = programs
        .iter()
        .flat_map(|p| &p.blocks)
        .map(|b| b.courses.len())
        .sum();

    report.finish();
    Ok((programs, report))
}

async fn fetch_pages(
    config: &Config,
    seeds: &[ProgramSeed],
) -> Result<Vec<(ProgramSeed, Result<String>)>> {
    let fetcher = PageFetcher::new(&config.crawler)?;
    Ok(fetcher.fetch_all(seeds).await)
}

/// Turn per-seed fetch results into program aggregates.
///
/// Failures at fetch or parse granularity are recorded per program and
/// never halt the batch; programs yielding zero blocks are listed as
/// empty-but-successful.
pub fn process_fetched(
    config: &Config,
    fetched: Vec<(ProgramSeed, Result<String>)>,
) -> (Vec<Program>, RunReport) {
    let mut report = RunReport::new();
    let mut programs = Vec::new();

    for (seed, result) in fetched {
        let body = match result {
            Ok(body) => body,
            Err(error) => {
                report.record_error(&seed.key, error);
                continue;
            }
        };

        let url = seed.url(&config.crawler.base_url);
        let document = Html::parse_document(&body);
        match assembler::assemble(&seed, &url, &document, config) {
            Ok(program) => {
                if program.blocks.is_empty() {
                    report.empty.push(program.program_key.clone());
                }
                programs.push(program);
            }
            Err(error) => {
                report.record_error(&seed.key, AppError::parse("assemble", error));
            }
        }
    }

    (programs, report)
}
