// src/services/segmenter.rs

//! Block segmentation.
//!
//! Locates every candidate requirement table in a parsed document and
//! attributes each to a preceding heading and notes context via a bounded
//! backward walk over sibling elements. Pages that enumerate courses as
//! prose lists instead of tables fall back to `<ul>/<ol>` segmentation.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::SegmenterConfig;
use crate::services::rows;
use crate::utils::element_text;

/// Longest paragraph text still treated as a stand-in heading.
const SHORT_TITLE_MAX: usize = 80;

/// One detected requirement block before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBlock {
    /// Nearest preceding heading text (may be empty)
    pub heading: String,

    /// Paragraph text found between the heading and the table
    pub notes: String,

    /// Row cell texts, one inner vec per table row / list item
    pub rows: Vec<Vec<String>>,
}

/// Segment a document into raw requirement blocks, in document order.
pub fn segment(document: &Html, config: &SegmenterConfig) -> Result<Vec<RawBlock>> {
    let root = content_root(document)?;

    let table_sel = parse_selector("table")?;
    let row_sel = parse_selector("tr")?;
    let cell_sel = parse_selector("td, th")?;

    let mut blocks = Vec::new();
    for table in root.select(&table_sel) {
        let (heading, notes) = heading_context(table, config.max_walk_hops);
        let rows: Vec<Vec<String>> = table
            .select(&row_sel)
            .map(|row| row.select(&cell_sel).map(|c| element_text(&c)).collect())
            .filter(|cells: &Vec<String>| !cells.is_empty())
            .collect();
        if !rows.is_empty() {
            blocks.push(RawBlock {
                heading,
                notes,
                rows,
            });
        }
    }

    // Some catalogue pages carry no tables at all and enumerate courses as
    // prose lists; segment those instead.
    if blocks.is_empty() {
        blocks = segment_lists(&root, config)?;
    }

    Ok(blocks)
}

/// Fallback: segment `<ul>/<ol>` lists whose items match the strict inline
/// course pattern `SUBJECT CODE - Title (N credits).`
fn segment_lists(root: &ElementRef, config: &SegmenterConfig) -> Result<Vec<RawBlock>> {
    let list_sel = parse_selector("ul, ol")?;
    let item_sel = parse_selector("li")?;

    let mut blocks = Vec::new();
    for list in root.select(&list_sel) {
        let rows: Vec<Vec<String>> = list
            .select(&item_sel)
            .map(|item| element_text(&item))
            .filter(|text| rows::parse_inline(text).is_some())
            .map(|text| vec![text])
            .collect();
        if rows.is_empty() {
            continue;
        }
        let (heading, notes) = heading_context(list, config.max_walk_hops);
        blocks.push(RawBlock {
            heading,
            notes,
            rows,
        });
    }
    Ok(blocks)
}

/// Walk backward through preceding sibling elements, up to `max_hops`,
/// collecting the nearest heading (or short non-terminated paragraph) as
/// the block title and intervening paragraph text as notes.
///
/// The bound keeps a table from being attributed to an unrelated, distant
/// heading; hitting another table or list also ends the walk, since that
/// content belongs to the previous block.
fn heading_context(start: ElementRef, max_hops: usize) -> (String, String) {
    let mut heading = String::new();
    let mut notes_parts: Vec<String> = Vec::new();
    let mut hops = 0;

    for sibling in start.prev_siblings() {
        let Some(el) = ElementRef::wrap(sibling) else {
            continue;
        };
        hops += 1;
        if hops > max_hops {
            break;
        }

        let name = el.value().name();
        let text = element_text(&el);
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if !text.is_empty() {
                    heading = text;
                    break;
                }
            }
            "p" => {
                if is_heading_like(&text) {
                    heading = text;
                    break;
                }
                if !text.is_empty() {
                    notes_parts.push(text);
                }
            }
            "table" | "ul" | "ol" => break,
            _ => {}
        }
    }

    notes_parts.reverse();
    (heading, notes_parts.join(" "))
}

/// A short paragraph without a terminal period reads as a heading
/// ("One of the following:"), not as notes.
fn is_heading_like(text: &str) -> bool {
    !text.is_empty() && text.len() <= SHORT_TITLE_MAX && !text.ends_with('.')
}

/// Find the main content region, falling back to the document root.
fn content_root(document: &Html) -> Result<ElementRef<'_>> {
    for candidate in ["main", "div#content", "div.main-content", "article"] {
        let sel = parse_selector(candidate)?;
        if let Some(el) = document.select(&sel).next() {
            return Ok(el);
        }
    }
    Ok(document.root_element())
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
