// src/pipeline/load.rs

//! Load pipeline: persist a previously exported intermediate-JSON file.
//!
//! Feeding the same file twice yields the same stored block/course set;
//! this is the idempotence entry point.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Program, RunReport};
use crate::storage::SqliteStore;
use crate::utils::log;

/// Read an intermediate-JSON file and persist every program in it.
pub fn run_load(path: impl AsRef<Path>, store: &SqliteStore) -> Result<RunReport> {
    let content = fs::read_to_string(&path)?;
    let programs: Vec<Program> = serde_json::from_str(&content)?;

    log::info(&format!(
        "Loaded {} programs from {:?}",
        programs.len(),
        path.as_ref()
    ));

    let mut report = store.save_all(&programs);
    for program in &programs {
        if program.blocks.is_empty() {
            report.empty.push(program.program_key.clone());
        }
    }

    report.finish();
    log::summary("Load complete", &report.summary_items());
    Ok(report)
}
