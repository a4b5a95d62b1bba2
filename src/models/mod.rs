// src/models/mod.rs

//! Domain models for the catalogue crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod program;
mod report;
mod seed;

// Re-export all public types
pub use config::{Config, CrawlerConfig, LoggingConfig, SegmenterConfig, StorageConfig};
pub use program::{
    Block, BlockType, Constraint, ConstraintType, Course, GroupRequirement, Program, ProgramType,
};
pub use report::RunReport;
pub use seed::{ProgramSeed, Seed};
