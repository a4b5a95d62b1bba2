//! Run report structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a scrape or load run.
///
/// `empty` lists programs that yielded zero blocks but otherwise succeeded;
/// that is a valid result, distinct from the entries in `errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Programs persisted successfully
    pub programs: usize,

    /// Blocks written across all programs
    pub blocks: usize,

    /// Courses written across all programs
    pub courses: usize,

    /// One entry per failed program, each referencing its program_key
    pub errors: Vec<String>,

    /// Program keys that produced no requirement blocks
    pub empty: Vec<String>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            programs: 0,
            blocks: 0,
            courses: 0,
            errors: Vec::new(),
            empty: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    /// Record a per-program failure.
    pub fn record_error(&mut self, program_key: &str, error: impl std::fmt::Display) {
        self.errors.push(format!("{program_key}: {error}"));
    }

    /// Mark the run as finished now.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Key/value pairs for the console summary.
    pub fn summary_items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Programs", self.programs.to_string()),
            ("Blocks", self.blocks.to_string()),
            ("Courses", self.courses.to_string()),
            ("Empty", self.empty.len().to_string()),
            ("Errors", self.errors.len().to_string()),
        ]
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_references_program_key() {
        let mut report = RunReport::new();
        report.record_error("cs_major", "HTTP 500");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("cs_major"));
    }

    #[test]
    fn empty_programs_are_not_errors() {
        let mut report = RunReport::new();
        report.programs = 1;
        report.empty.push("soci_minor".to_string());
        assert!(report.errors.is_empty());
        assert_eq!(report.empty.len(), 1);
    }
}
