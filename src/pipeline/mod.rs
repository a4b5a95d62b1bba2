// src/pipeline/mod.rs

//! Pipeline orchestration entry points used by the CLI.

mod load;
mod scrape;

pub use load::run_load;
pub use scrape::{process_fetched, run_extract, run_scrape};
