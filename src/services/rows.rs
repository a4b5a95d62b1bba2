// src/services/rows.rs

//! Course row parsing.
//!
//! Turns one table row or list item into a [`Course`], or rejects it when
//! the row is a header or carries no recognizable course code.

use regex::Regex;

use crate::models::Course;

/// Credit value assumed when the credits cell is absent or unparsable.
pub const DEFAULT_CREDITS: u32 = 3;

/// Literal first-cell values that mark a header row, not a course.
const HEADER_TOKENS: [&str; 5] = ["Course", "Title", "Code", "Courses", "Course Code"];

/// Parse a table row given its cell texts. Returns `None` for header rows
/// and rows without a subject+catalog code.
///
/// `is_required` is left as a hint (`false`); the owning block may override
/// it after classification.
pub fn parse_row(cells: &[String]) -> Option<Course> {
    let first = cells.first()?.trim();
    if first.is_empty() || HEADER_TOKENS.iter().any(|t| first.eq_ignore_ascii_case(t)) {
        return None;
    }

    let code_re = code_pattern()?;
    let caps = code_re.captures(first)?;
    let subject = caps[1].to_string();
    let catalog = caps[2].to_string();

    // Title comes from the second cell when the table has one, otherwise
    // from whatever follows the code in the first cell.
    let title = match cells.get(1) {
        Some(cell) if !cell.trim().is_empty() => cell.trim().to_string(),
        _ => first[caps.get(0)?.end()..]
            .trim_start_matches([' ', '-', '–', ':'])
            .trim()
            .to_string(),
    };

    let credits = cells
        .get(2)
        .and_then(|cell| parse_credits(cell))
        .unwrap_or(DEFAULT_CREDITS);

    Some(Course {
        subject,
        catalog,
        title: trim_trailing_period(&title),
        credits,
        is_required: false,
        sort_order: 0,
    })
}

/// Parse an inline list item of the strict form
/// `SUBJECT CODE - Title (N credits).`
pub fn parse_inline(text: &str) -> Option<Course> {
    let re = Regex::new(
        r"^([A-Z]{2,5})\s+(\d[A-Z0-9]{0,5})\s*[-–]\s*(.+?)\s*\((\d+)\s*credits?\)\.?$",
    )
    .ok()?;
    let caps = re.captures(text.trim())?;
    Some(Course {
        subject: caps[1].to_string(),
        catalog: caps[2].to_string(),
        title: trim_trailing_period(caps[3].trim()),
        credits: caps[4].parse().unwrap_or(DEFAULT_CREDITS),
        is_required: false,
        sort_order: 0,
    })
}

/// Parse a row's cells, preferring the inline form for single-cell rows
/// (the list-fallback path).
pub fn parse_cells(cells: &[String]) -> Option<Course> {
    if cells.len() == 1 {
        if let Some(course) = parse_inline(&cells[0]) {
            return Some(course);
        }
    }
    parse_row(cells)
}

fn code_pattern() -> Option<Regex> {
    // Subject: 2-5 uppercase letters. Catalog: digit-led, up to 5 further
    // alphanumerics, covering section-suffixed codes like 110D1 or 119J2.
    Regex::new(r"\b([A-Z]{2,5})\s+(\d[A-Z0-9]{0,5})\b").ok()
}

fn parse_credits(cell: &str) -> Option<u32> {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    // Cells like "3 credits" still carry a usable integer.
    let re = Regex::new(r"(\d+)").ok()?;
    re.captures(trimmed)?.get(1)?.as_str().parse().ok()
}

fn trim_trailing_period(title: &str) -> String {
    title.strip_suffix('.').unwrap_or(title).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_header_rows() {
        assert!(parse_row(&cells(&["Course", "Title", "Credits"])).is_none());
        assert!(parse_row(&cells(&["Title"])).is_none());
        assert!(parse_row(&cells(&["Course Code", "Name"])).is_none());
    }

    #[test]
    fn rejects_rows_without_course_code() {
        assert!(parse_row(&cells(&["See note below", "", ""])).is_none());
        assert!(parse_row(&cells(&[""])).is_none());
        assert!(parse_row(&[]).is_none());
    }

    #[test]
    fn accepts_basic_row() {
        let course = parse_row(&cells(&["COMP 202", "Foundations of Programming", "3"])).unwrap();
        assert_eq!(course.subject, "COMP");
        assert_eq!(course.catalog, "202");
        assert_eq!(course.title, "Foundations of Programming");
        assert_eq!(course.credits, 3);
        assert!(!course.is_required);
    }

    #[test]
    fn accepts_section_suffixed_codes() {
        let course = parse_row(&cells(&["MATH 110D1", "Calculus 1", "4"])).unwrap();
        assert_eq!(course.catalog, "110D1");

        let course = parse_row(&cells(&["FACC 119J2", "Seminar", "1"])).unwrap();
        assert_eq!(course.catalog, "119J2");
    }

    #[test]
    fn credits_default_when_missing_or_unparsable() {
        let course = parse_row(&cells(&["COMP 202", "Foundations"])).unwrap();
        assert_eq!(course.credits, DEFAULT_CREDITS);

        let course = parse_row(&cells(&["COMP 202", "Foundations", "n/a"])).unwrap();
        assert_eq!(course.credits, DEFAULT_CREDITS);
    }

    #[test]
    fn credits_parse_from_suffixed_cell() {
        let course = parse_row(&cells(&["COMP 202", "Foundations", "3 credits"])).unwrap();
        assert_eq!(course.credits, 3);
    }

    #[test]
    fn title_trimmed_of_single_trailing_period() {
        let course = parse_row(&cells(&["COMP 202", "Foundations of Programming.", "3"])).unwrap();
        assert_eq!(course.title, "Foundations of Programming");
    }

    #[test]
    fn title_recovered_from_single_cell() {
        let course = parse_row(&cells(&["COMP 202 - Foundations of Programming"])).unwrap();
        assert_eq!(course.title, "Foundations of Programming");
    }

    #[test]
    fn inline_pattern_parses() {
        let course =
            parse_inline("COMP 202 - Foundations of Programming (3 credits).").unwrap();
        assert_eq!(course.subject, "COMP");
        assert_eq!(course.catalog, "202");
        assert_eq!(course.title, "Foundations of Programming");
        assert_eq!(course.credits, 3);
    }

    #[test]
    fn inline_pattern_rejects_prose() {
        assert!(parse_inline("Students should consult an advisor.").is_none());
        assert!(parse_inline("COMP 202 without credits suffix").is_none());
    }

    #[test]
    fn parse_cells_prefers_inline_for_single_cell() {
        let course = parse_cells(&cells(&["MATH 323 - Probability (3 credits)."])).unwrap();
        assert_eq!(course.credits, 3);
        assert_eq!(course.title, "Probability");
    }
}
