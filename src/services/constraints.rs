// src/services/constraints.rs

//! Cross-cutting constraint extraction.
//!
//! Scans free text for rules that span multiple blocks: per-group credit
//! splits, pooled minimums, level caps, and Special Topics limits. Each
//! text node is evaluated once (deduplicated by exact string) against an
//! ordered cascade; the first applicable rule wins so a sentence is never
//! double-counted.
//!
//! Constraints are informational only. Nothing here validates a student's
//! course selections; the rules are captured for downstream consumers.

use std::collections::HashSet;

use regex::Regex;

use crate::models::{Constraint, GroupRequirement};

const NOTE_KEYWORDS: [&str; 5] = [
    "prerequisite",
    "restriction",
    "note:",
    "students must",
    "students should",
];

/// Extract constraints from a set of paragraph/list-item texts.
pub fn extract<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<Constraint> {
    let mut seen = HashSet::new();
    let mut constraints = Vec::new();

    for text in texts {
        let text = crate::utils::normalize_ws(text);
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        if let Some(constraint) = extract_one(&text) {
            constraints.push(constraint);
        }
    }

    constraints
}

/// Run the rule cascade against a single sentence.
fn extract_one(text: &str) -> Option<Constraint> {
    let lower = text.to_lowercase();

    // 1. Credit splits across groups: two or more "N credits from Group X"
    //    occurrences collapse into one multi_group constraint.
    if let Some(re) = regex(r"(?i)(\d+)\s+credits\s+from\s+Group\s+([A-Z][0-9]?|[0-9])\b") {
        let groups: Vec<GroupRequirement> = re
            .captures_iter(text)
            .filter_map(|caps| {
                Some(GroupRequirement {
                    credits: caps[1].parse().ok()?,
                    group: caps[2].to_uppercase(),
                })
            })
            .collect();
        if groups.len() >= 2 {
            return Some(Constraint::multi_group(groups, text));
        }
    }

    // 2. Pooled minimum across named groups
    if lower.contains("combined") {
        if let Some(min) = capture_number(&lower, r"at least\s+(\d+)\s+credits") {
            let names = group_names(text);
            return Some(Constraint::pool_group(min, names, text));
        }
    }

    // 3. Credit cap by level
    if let Some(re) =
        regex(r"(?i)no more than\s+(\d+)\s+credits\s+(?:at|from)\s+the\s+(\d)00[\s-]?level")
    {
        if let Some(caps) = re.captures(text) {
            let max: u32 = caps[1].parse().ok()?;
            let level: u32 = caps[2].parse::<u32>().ok()? * 100;
            return Some(Constraint::max_level_credits(max, level, text));
        }
    }

    // 4. Credit floor by level
    if let Some(re) =
        regex(r"(?i)at least\s+(\d+)\s+credits\s+must\s+be\s+at\s+the\s+(\d)00[\s-]?level")
    {
        if let Some(caps) = re.captures(text) {
            let min: u32 = caps[1].parse().ok()?;
            let level: u32 = caps[2].parse::<u32>().ok()? * 100;
            return Some(Constraint::min_level_credits(min, level, text));
        }
    }

    // 5. Special Topics limit
    if let Some(max) = capture_number(&lower, r"only\s+(\d+)\s+special\s+topics\s+courses?") {
        return Some(Constraint::max_special_topics(max, text));
    }

    // 6. Generic policy note
    if NOTE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Some(Constraint::note(text));
    }

    None
}

fn group_names(text: &str) -> Vec<String> {
    let Some(re) = regex(r"(?i)\bGroup\s+([A-Z][0-9]?|[0-9])\b") else {
        return Vec::new();
    };
    let mut names: Vec<String> = re
        .captures_iter(text)
        .map(|caps| caps[1].to_uppercase())
        .collect();
    names.dedup();
    names
}

fn capture_number(text: &str, pattern: &str) -> Option<u32> {
    regex(pattern)?.captures(text)?.get(1)?.as_str().parse().ok()
}

fn regex(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConstraintType;

    #[test]
    fn multi_group_from_two_occurrences() {
        let out = extract(["9 credits from Group A and 12 credits from Group B"]);
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.constraint_type, ConstraintType::MultiGroup);
        assert_eq!(c.groups.len(), 2);
        assert_eq!(c.groups[0].credits, 9);
        assert_eq!(c.groups[0].group, "A");
        assert_eq!(c.groups[1].credits, 12);
        assert_eq!(c.groups[1].group, "B");
    }

    #[test]
    fn single_group_mention_is_not_multi_group() {
        let out = extract(["9 credits from Group A are required."]);
        // Falls through the cascade; "required" is not a note keyword, but
        // nothing else matches either.
        assert!(out.iter().all(|c| c.constraint_type != ConstraintType::MultiGroup));
    }

    #[test]
    fn pool_group_minimum() {
        let out =
            extract(["At least 12 credits from Group B and Group C combined."]);
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.constraint_type, ConstraintType::PoolGroup);
        assert_eq!(c.min_credits, Some(12));
        assert_eq!(c.group_names, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn max_level_credits() {
        let out = extract(["No more than 6 credits at the 200-level may be counted."]);
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.constraint_type, ConstraintType::MaxLevelCredits);
        assert_eq!(c.max_credits, Some(6));
        assert_eq!(c.level, Some(200));
    }

    #[test]
    fn min_level_credits() {
        let out = extract(["At least 18 credits must be at the 400 level."]);
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.constraint_type, ConstraintType::MinLevelCredits);
        assert_eq!(c.min_credits, Some(18));
        assert_eq!(c.level, Some(400));
    }

    #[test]
    fn special_topics_limit() {
        let out = extract(["Only 2 Special Topics courses may count toward the program."]);
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.constraint_type, ConstraintType::MaxSpecialTopics);
        assert_eq!(c.max_courses, Some(2));
    }

    #[test]
    fn policy_note() {
        let out = extract(["Note: students should consult the department before registering."]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].constraint_type, ConstraintType::Note);
        assert!(out[0].source_text.contains("consult the department"));
    }

    #[test]
    fn exact_duplicates_scanned_once() {
        let sentence = "Note: prerequisite rules apply.";
        let out = extract([sentence, sentence, sentence]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn first_match_wins_per_sentence() {
        // Contains both a multi_group split and a note keyword; only the
        // earlier rule fires.
        let out = extract([
            "Note: 9 credits from Group A and 12 credits from Group B.",
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].constraint_type, ConstraintType::MultiGroup);
    }

    #[test]
    fn unmatched_prose_yields_nothing() {
        let out = extract(["This program is offered jointly with the Faculty of Arts."]);
        assert!(out.is_empty());
    }
}
