// src/services/assembler.rs

//! Program assembly.
//!
//! Combines segmentation, classification, row parsing, and constraint
//! extraction with page-level metadata into one [`Program`] aggregate.

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Block, BlockType, Config, Program, ProgramSeed};
use crate::services::{classifier, constraints, rows, segmenter};
use crate::utils::element_text;

/// Paragraphs containing these fragments are page chrome, not descriptions.
const BOILERPLATE_FRAGMENTS: [&str; 4] = ["cookie", "consent", "javascript", "browser"];

/// Assemble one program aggregate from its fetched page.
pub fn assemble(
    seed: &ProgramSeed,
    url: &str,
    document: &Html,
    config: &Config,
) -> Result<Program> {
    let raw_blocks = segmenter::segment(document, &config.segmenter)?;

    let mut blocks = Vec::new();
    for raw in raw_blocks {
        let classification = classifier::classify(&raw.heading);

        let mut courses: Vec<_> = raw
            .rows
            .iter()
            .filter_map(|cells| rows::parse_cells(cells))
            .collect();
        // A table that produced no course rows is layout markup, not a
        // requirement block.
        if courses.is_empty() {
            continue;
        }

        let is_required_block = classification.block_type == BlockType::Required;
        for (i, course) in courses.iter_mut().enumerate() {
            course.sort_order = i as u32;
            if is_required_block {
                // Required blocks force the flag regardless of any
                // per-row hint.
                course.is_required = true;
            }
        }

        let ordinal = blocks.len() + 1;
        let group_name = match classification.block_type {
            // Group blocks always carry a label; fall back to the heading
            // when the classifier could not isolate one.
            BlockType::Group => classification
                .group_name
                .or_else(|| Some(raw.heading.clone())),
            _ => None,
        };

        blocks.push(Block {
            block_key: format!("{}_{}", seed.key, ordinal),
            title: raw.heading,
            block_type: classification.block_type,
            group_name,
            credits_needed: classification.credits_needed,
            courses_needed: classification.courses_needed,
            notes: raw.notes,
            sort_order: (ordinal - 1) as u32,
            courses,
        });
    }

    let paragraphs = collect_texts(document, "p, li")?;
    let program_constraints = constraints::extract(paragraphs.iter().map(String::as_str));

    Ok(Program {
        program_key: seed.key.clone(),
        name: seed.name.clone(),
        program_type: seed.program_type,
        faculty: seed.faculty.clone(),
        total_credits: page_total_credits(document)?,
        description: page_description(&paragraphs, config.segmenter.min_description_len),
        ecalendar_url: url.to_string(),
        constraints: program_constraints,
        blocks,
    })
}

/// Parse `total_credits` from a `(N credits)` suffix on the main heading.
fn page_total_credits(document: &Html) -> Result<Option<u32>> {
    let heading_sel = parse_selector("h1")?;
    let Some(heading) = document.select(&heading_sel).next() else {
        return Ok(None);
    };
    let text = element_text(&heading);
    let Ok(re) = Regex::new(r"\((\d+)\s*credits?\)") else {
        return Ok(None);
    };
    Ok(re
        .captures_iter(&text)
        .last()
        .and_then(|caps| caps[1].parse().ok()))
}

/// The first paragraph over the minimum length that is not boilerplate.
fn page_description(paragraphs: &[String], min_len: usize) -> String {
    paragraphs
        .iter()
        .find(|text| {
            let lower = text.to_lowercase();
            text.len() >= min_len && !BOILERPLATE_FRAGMENTS.iter().any(|f| lower.contains(f))
        })
        .cloned()
        .unwrap_or_default()
}

fn collect_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
    let sel = parse_selector(selector)?;
    Ok(document
        .select(&sel)
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .collect())
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstraintType, ProgramType, Seed};

    fn seed() -> ProgramSeed {
        Seed::default().programs[0].clone()
    }

    fn assemble_page(body: &str) -> Program {
        let html = format!("<html><body><main>{body}</main></body></html>");
        let document = Html::parse_document(&html);
        assemble(
            &seed(),
            "https://example.edu/cs-major",
            &document,
            &Config::default(),
        )
        .unwrap()
    }

    #[test]
    fn choose_credits_scenario() {
        let program = assemble_page(
            "<h2>Choose 3 credits from the following</h2>\
             <table>\
               <tr><td>COMP 330</td><td>Theory of Computation</td><td>3</td></tr>\
               <tr><td>COMP 360</td><td>Algorithm Design</td><td>3</td></tr>\
             </table>",
        );
        assert_eq!(program.blocks.len(), 1);
        let block = &program.blocks[0];
        assert_eq!(block.block_type, BlockType::ChooseCredits);
        assert_eq!(block.credits_needed, Some(3));
        assert_eq!(block.courses_needed, None);
        assert_eq!(block.courses.len(), 2);
        assert!(block.courses.iter().all(|c| !c.is_required));
    }

    #[test]
    fn required_block_forces_is_required() {
        let program = assemble_page(
            "<h2>Required Courses</h2>\
             <table>\
               <tr><td>COMP 202</td><td>Foundations of Programming</td><td>3</td></tr>\
               <tr><td>COMP 250</td><td>Introduction to Computer Science</td><td>3</td></tr>\
               <tr><td>COMP 273</td><td>Computer Systems</td><td>3</td></tr>\
             </table>",
        );
        let block = &program.blocks[0];
        assert_eq!(block.block_type, BlockType::Required);
        assert_eq!(block.courses.len(), 3);
        assert!(block.courses.iter().all(|c| c.is_required));
    }

    #[test]
    fn block_keys_and_sort_order_follow_document_order() {
        let program = assemble_page(
            "<h2>Required Courses</h2>\
             <table><tr><td>COMP 202</td><td>A</td><td>3</td></tr></table>\
             <h2>Electives</h2>\
             <table><tr><td>COMP 303</td><td>B</td><td>3</td></tr></table>",
        );
        assert_eq!(program.blocks.len(), 2);
        assert_eq!(program.blocks[0].block_key, "cs_major_1");
        assert_eq!(program.blocks[1].block_key, "cs_major_2");
        assert_eq!(program.blocks[0].sort_order, 0);
        assert_eq!(program.blocks[1].sort_order, 1);
    }

    #[test]
    fn group_blocks_always_carry_a_name() {
        let program = assemble_page(
            "<h2>Group A</h2>\
             <table><tr><td>MATH 240</td><td>Discrete Structures</td><td>3</td></tr></table>",
        );
        let block = &program.blocks[0];
        assert_eq!(block.block_type, BlockType::Group);
        assert_eq!(block.group_name.as_deref(), Some("A"));
    }

    #[test]
    fn total_credits_from_heading_suffix() {
        let program = assemble_page(
            "<h1>Computer Science Major (B.Sc.) (54 credits)</h1>\
             <h2>Required Courses</h2>\
             <table><tr><td>COMP 202</td><td>A</td><td>3</td></tr></table>",
        );
        assert_eq!(program.total_credits, Some(54));
    }

    #[test]
    fn description_skips_boilerplate_and_short_paragraphs() {
        let program = assemble_page(
            "<p>This site uses cookie tracking to improve your experience while you browse through the catalogue site.</p>\
             <p>Short.</p>\
             <p>The Major in Computer Science provides a broad introduction to the principles \
             of computing, covering software design, algorithms, and systems.</p>\
             <h2>Required Courses</h2>\
             <table><tr><td>COMP 202</td><td>A</td><td>3</td></tr></table>",
        );
        assert!(program.description.starts_with("The Major in Computer Science"));
    }

    #[test]
    fn constraints_attached_at_program_level() {
        let program = assemble_page(
            "<h2>Complementary Courses</h2>\
             <p>9 credits from Group A and 12 credits from Group B.</p>\
             <table><tr><td>COMP 330</td><td>Theory</td><td>3</td></tr></table>",
        );
        assert_eq!(program.constraints.len(), 1);
        assert_eq!(
            program.constraints[0].constraint_type,
            ConstraintType::MultiGroup
        );
    }

    #[test]
    fn empty_page_is_a_valid_program() {
        let program = assemble_page("<p>No tabular requirements here at all for this offering.</p>");
        assert!(program.blocks.is_empty());
        assert_eq!(program.program_key, "cs_major");
        assert_eq!(program.program_type, ProgramType::Major);
    }

    #[test]
    fn header_rows_are_dropped() {
        let program = assemble_page(
            "<h2>Required Courses</h2>\
             <table>\
               <tr><th>Course</th><th>Title</th><th>Credits</th></tr>\
               <tr><td>COMP 202</td><td>Foundations</td><td>3</td></tr>\
             </table>",
        );
        assert_eq!(program.blocks[0].courses.len(), 1);
        assert_eq!(program.blocks[0].courses[0].subject, "COMP");
    }
}
