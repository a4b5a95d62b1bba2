//! Seed data: the static table of program pages to crawl.
//!
//! The seed table is an explicit value loaded from TOML (or defaults) and
//! passed into the pipeline, never module-level global state.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ProgramType;

/// Root seed data structure listing the program pages to crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Program catalogue entries
    pub programs: Vec<ProgramSeed>,
}

/// One entry in the program URL table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSeed {
    /// Globally unique program key (idempotency key for persistence)
    pub key: String,

    /// Display name
    pub name: String,

    /// Kind of offering
    pub program_type: ProgramType,

    /// Owning faculty
    #[serde(default)]
    pub faculty: String,

    /// eCalendar path, resolved against the configured base URL
    pub path: String,
}

impl ProgramSeed {
    /// Resolve this entry's page URL against a base URL.
    ///
    /// Absolute paths in the seed table are taken as-is.
    pub fn url(&self, base_url: &str) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            return self.path.clone();
        }
        crate::utils::resolve(base_url, &self.path).unwrap_or_else(|| self.path.clone())
    }
}

impl Seed {
    /// Load seed data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load seed data or return the default table if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Seed load failed from {:?}: {}. Using default table.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate that the seed table is usable.
    pub fn validate(&self) -> Result<()> {
        if self.programs.is_empty() {
            return Err(AppError::validation("No programs defined in seed data"));
        }
        let mut keys = HashSet::new();
        for entry in &self.programs {
            if entry.key.trim().is_empty() {
                return Err(AppError::validation("Program seed with empty key"));
            }
            if !keys.insert(entry.key.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate program key: {}",
                    entry.key
                )));
            }
            if entry.path.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Program {} has an empty path",
                    entry.key
                )));
            }
        }
        Ok(())
    }
}

impl Default for Seed {
    fn default() -> Self {
        let entry = |key: &str, name: &str, program_type: ProgramType, faculty: &str, path: &str| {
            ProgramSeed {
                key: key.to_string(),
                name: name.to_string(),
                program_type,
                faculty: faculty.to_string(),
                path: path.to_string(),
            }
        };

        Self {
            programs: vec![
                entry(
                    "cs_major",
                    "Computer Science (B.Sc. Major)",
                    ProgramType::Major,
                    "Science",
                    "/study/faculties/science/undergraduate/programs/bachelor-science-bsc-major-computer-science",
                ),
                entry(
                    "cs_minor",
                    "Computer Science (B.Sc. Minor)",
                    ProgramType::Minor,
                    "Science",
                    "/study/faculties/science/undergraduate/programs/bachelor-science-bsc-minor-computer-science",
                ),
                entry(
                    "cs_honours",
                    "Computer Science (B.Sc. Honours)",
                    ProgramType::Honours,
                    "Science",
                    "/study/faculties/science/undergraduate/programs/bachelor-science-bsc-honours-computer-science",
                ),
                entry(
                    "math_major",
                    "Mathematics (B.Sc. Major)",
                    ProgramType::Major,
                    "Science",
                    "/study/faculties/science/undergraduate/programs/bachelor-science-bsc-major-mathematics",
                ),
                entry(
                    "soci_minor",
                    "Sociology (B.A. Minor)",
                    ProgramType::Minor,
                    "Arts",
                    "/study/faculties/arts/undergraduate/programs/bachelor-arts-ba-minor-sociology",
                ),
                entry(
                    "psyc_major",
                    "Psychology (B.A. Major)",
                    ProgramType::Major,
                    "Arts",
                    "/study/faculties/arts/undergraduate/programs/bachelor-arts-ba-major-psychology",
                ),
            ],
        }
    }
}
