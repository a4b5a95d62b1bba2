// src/services/classifier.rs

//! Heading classification.
//!
//! Maps a requirement-block heading to a block type and optional
//! quantifiers. Implemented as an ordered cascade of predicates; the first
//! match wins and an unmatched heading falls through to the documented
//! default (`choose_credits` with no quantifiers) rather than erroring.

use regex::Regex;

use crate::models::BlockType;

/// Classification result for one heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub block_type: BlockType,
    pub credits_needed: Option<u32>,
    pub courses_needed: Option<u32>,
    pub group_name: Option<String>,
}

impl Classification {
    fn simple(block_type: BlockType) -> Self {
        Self {
            block_type,
            credits_needed: None,
            courses_needed: None,
            group_name: None,
        }
    }

    fn choose_credits(credits: Option<u32>) -> Self {
        Self {
            credits_needed: credits,
            ..Self::simple(BlockType::ChooseCredits)
        }
    }

    fn choose_courses(courses: u32) -> Self {
        Self {
            courses_needed: Some(courses),
            ..Self::simple(BlockType::ChooseCourses)
        }
    }
}

const SPELLED_NUMBERS: [(&str, u32); 7] = [
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
];

/// Classify a heading. Pure and total: never panics, never errors.
pub fn classify(heading: &str) -> Classification {
    let text = heading.to_lowercase();

    // 1. Mandatory blocks
    if text.contains("required") || text.contains("compulsory") || text.contains("must take") {
        return Classification::simple(BlockType::Required);
    }

    // 2. Named groups ("Group A", "Group B2", ...)
    if let Some(label) = group_label(heading) {
        return Classification {
            group_name: Some(label),
            ..Classification::simple(BlockType::Group)
        };
    }

    // 3. Explicit credit quantifier ("18 credits from the following",
    //    "at least 6 credits", bare "N credits")
    if let Some(n) = first_number(&text, r"(\d+)\s*credits?") {
        return Classification::choose_credits(Some(n));
    }

    // 4. Explicit course-count quantifier
    if let Some(n) = first_number(&text, r"(?:choose|select|pick)\s+(\d+)\s+(?:courses?\b|of\s+the\s+following)") {
        return Classification::choose_courses(n);
    }

    // 5. "one of the following"
    if text.contains("one of the following") {
        return Classification::choose_courses(1);
    }

    // 6. Spelled-out counts ("two of the following")
    for (word, n) in SPELLED_NUMBERS {
        if text.contains(&format!("{word} of the following")) {
            return Classification::choose_courses(n);
        }
    }

    // 7. Electives: the amount is implied by the program's overall credit
    //    budget, so no quantifier is attached here.
    if text.contains("elective")
        || text.contains("additional course")
        || text.contains("remaining credit")
    {
        return Classification::choose_credits(None);
    }

    // 8. Default: quantifier-less headings resolve here; a genuine source
    //    ambiguity surfaced as null quantifiers, not an error.
    Classification::choose_credits(None)
}

fn group_label(heading: &str) -> Option<String> {
    // Labels are short ("A", "B2"); a longer word after "group" is prose,
    // not a label ("group of courses").
    let re = Regex::new(r"(?i)\bgroup\s+([A-Z][0-9]?|[0-9])\b").ok()?;
    re.captures(heading)
        .map(|caps| caps[1].to_uppercase())
}

fn first_number(text: &str, pattern: &str) -> Option<u32> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_headings() {
        for heading in ["Required Courses", "Compulsory Courses", "Students must take:"] {
            let c = classify(heading);
            assert_eq!(c.block_type, BlockType::Required, "{heading}");
            assert_eq!(c.credits_needed, None);
            assert_eq!(c.courses_needed, None);
        }
    }

    #[test]
    fn group_headings_carry_label() {
        let c = classify("Group A");
        assert_eq!(c.block_type, BlockType::Group);
        assert_eq!(c.group_name.as_deref(), Some("A"));

        let c = classify("Complementary Courses - Group B2");
        assert_eq!(c.block_type, BlockType::Group);
        assert_eq!(c.group_name.as_deref(), Some("B2"));
    }

    #[test]
    fn credit_quantifiers() {
        let c = classify("Choose 3 credits from the following");
        assert_eq!(c.block_type, BlockType::ChooseCredits);
        assert_eq!(c.credits_needed, Some(3));
        assert_eq!(c.courses_needed, None);

        let c = classify("At least 18 credits selected from:");
        assert_eq!(c.credits_needed, Some(18));

        let c = classify("Complementary Courses (12 credits)");
        assert_eq!(c.credits_needed, Some(12));
    }

    #[test]
    fn course_count_quantifiers() {
        let c = classify("Select 2 of the following");
        assert_eq!(c.block_type, BlockType::ChooseCourses);
        assert_eq!(c.credits_needed, None);
        assert_eq!(c.courses_needed, Some(2));

        let c = classify("Choose 3 courses from the list below");
        assert_eq!(c.courses_needed, Some(3));
    }

    #[test]
    fn one_of_the_following() {
        let c = classify("One of the following:");
        assert_eq!(c.block_type, BlockType::ChooseCourses);
        assert_eq!(c.courses_needed, Some(1));
    }

    #[test]
    fn spelled_out_counts() {
        let c = classify("Two of the following");
        assert_eq!(c.courses_needed, Some(2));

        let c = classify("Take eight of the following courses");
        assert_eq!(c.courses_needed, Some(8));
    }

    #[test]
    fn electives_have_no_quantifier() {
        for heading in ["Electives", "Additional Courses", "Remaining Credits"] {
            let c = classify(heading);
            assert_eq!(c.block_type, BlockType::ChooseCredits, "{heading}");
            assert_eq!(c.credits_needed, None);
        }
    }

    #[test]
    fn quantifier_less_headings_fall_through() {
        let c = classify("Core Courses");
        assert_eq!(c.block_type, BlockType::ChooseCredits);
        assert_eq!(c.credits_needed, None);
        assert_eq!(c.courses_needed, None);
    }

    #[test]
    fn required_wins_over_credits() {
        // "required" appears before the credit pattern in the cascade
        let c = classify("Required Courses (27 credits)");
        assert_eq!(c.block_type, BlockType::Required);
        assert_eq!(c.credits_needed, None);
    }

    #[test]
    fn never_panics_on_odd_input() {
        classify("");
        classify("§§§ 𝄞 unexpected unicode 𝄞 §§§");
        classify("group");
    }
}
