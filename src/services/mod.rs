// src/services/mod.rs

//! Extraction services: fetching, segmentation, classification, row
//! parsing, constraint extraction, and program assembly.

pub mod assembler;
pub mod classifier;
pub mod constraints;
pub mod fetcher;
pub mod rows;
pub mod segmenter;

pub use classifier::Classification;
pub use fetcher::PageFetcher;
pub use segmenter::RawBlock;
