// src/lib.rs

//! Catalogue requirement crawler library.
//!
//! Converts unstructured academic-catalogue pages into a structured,
//! queryable requirement model: programs composed of requirement blocks,
//! each block composed of courses, with cross-cutting constraints.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
