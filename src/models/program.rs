//! Program requirement model structures.
//!
//! These types serialize to the intermediate JSON contract shared between
//! the extraction and persistence stages, so field names are part of the
//! public interface.

use serde::{Deserialize, Serialize};

/// Kind of degree offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    Major,
    Minor,
    Honours,
    Diploma,
    JointMajor,
    FacultyProgram,
    Other,
}

impl ProgramType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramType::Major => "major",
            ProgramType::Minor => "minor",
            ProgramType::Honours => "honours",
            ProgramType::Diploma => "diploma",
            ProgramType::JointMajor => "joint_major",
            ProgramType::FacultyProgram => "faculty_program",
            ProgramType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "major" => ProgramType::Major,
            "minor" => ProgramType::Minor,
            "honours" => ProgramType::Honours,
            "diploma" => ProgramType::Diploma,
            "joint_major" => ProgramType::JointMajor,
            "faculty_program" => ProgramType::FacultyProgram,
            _ => ProgramType::Other,
        }
    }
}

/// How a requirement block selects its courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Every course in the block is mandatory
    Required,
    /// A credit total must be reached from the listed courses
    ChooseCredits,
    /// A fixed number of courses must be taken
    ChooseCourses,
    /// A named group referenced by cross-cutting constraints
    Group,
    /// Credits split across several named groups
    MultiGroup,
    /// Pooled minimum across groups
    PoolGroup,
    /// Electives restricted by course level
    LevelElective,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Required => "required",
            BlockType::ChooseCredits => "choose_credits",
            BlockType::ChooseCourses => "choose_courses",
            BlockType::Group => "group",
            BlockType::MultiGroup => "multi_group",
            BlockType::PoolGroup => "pool_group",
            BlockType::LevelElective => "level_elective",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "required" => Some(BlockType::Required),
            "choose_credits" => Some(BlockType::ChooseCredits),
            "choose_courses" => Some(BlockType::ChooseCourses),
            "group" => Some(BlockType::Group),
            "multi_group" => Some(BlockType::MultiGroup),
            "pool_group" => Some(BlockType::PoolGroup),
            "level_elective" => Some(BlockType::LevelElective),
            _ => None,
        }
    }
}

/// A degree program with its full requirement structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Globally unique idempotency key (e.g. "cs_major")
    pub program_key: String,

    /// Display name
    pub name: String,

    /// Kind of offering
    pub program_type: ProgramType,

    /// Owning faculty
    #[serde(default)]
    pub faculty: String,

    /// Total credits parsed from the page heading, when present
    #[serde(default)]
    pub total_credits: Option<u32>,

    /// Free-text description from the page
    #[serde(default)]
    pub description: String,

    /// Source URL the page was fetched from
    pub ecalendar_url: String,

    /// Cross-cutting constraints attached at the program level
    #[serde(default)]
    pub constraints: Vec<Constraint>,

    /// Requirement blocks in document order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A named subsection of a program's requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Key unique within the program: `{program_key}_{ordinal}`
    pub block_key: String,

    /// Heading text the block was attributed to
    pub title: String,

    /// Classified block type
    pub block_type: BlockType,

    /// Group label, set for `group` blocks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Credits quantifier (`required`/`choose_credits` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_needed: Option<u32>,

    /// Course-count quantifier (`choose_courses` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses_needed: Option<u32>,

    /// Paragraph text found between the heading and the table
    #[serde(default)]
    pub notes: String,

    /// Document-order position among sibling blocks
    pub sort_order: u32,

    /// Courses listed in the block
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// One parsed course listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Subject code, 2-5 uppercase letters (e.g. "COMP")
    pub subject: String,

    /// Catalog code, digit-led with optional section suffix (e.g. "110D1")
    pub catalog: String,

    /// Course title
    pub title: String,

    /// Credit value; defaults to 3 when unrecoverable
    pub credits: u32,

    /// Whether the course is mandatory within its block
    pub is_required: bool,

    /// Document-order position within the block
    #[serde(default)]
    pub sort_order: u32,
}

/// Kind of cross-cutting constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    MultiGroup,
    PoolGroup,
    MaxLevelCredits,
    MinLevelCredits,
    MaxSpecialTopics,
    Note,
}

impl ConstraintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::MultiGroup => "multi_group",
            ConstraintType::PoolGroup => "pool_group",
            ConstraintType::MaxLevelCredits => "max_level_credits",
            ConstraintType::MinLevelCredits => "min_level_credits",
            ConstraintType::MaxSpecialTopics => "max_special_topics",
            ConstraintType::Note => "note",
        }
    }
}

/// A credit requirement tied to one named group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRequirement {
    pub credits: u32,
    pub group: String,
}

/// A cross-cutting rule spanning multiple blocks.
///
/// Constraints are informational: they are captured for downstream
/// consumers and never enforced by this pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub constraint_type: ConstraintType,

    /// Per-group credit splits (`multi_group`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupRequirement>,

    /// Groups named by a pooled minimum (`pool_group`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_names: Vec<String>,

    /// Minimum credits (`pool_group`, `min_level_credits`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,

    /// Maximum credits (`max_level_credits`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<u32>,

    /// Course level the rule applies to (e.g. 400)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Maximum course count (`max_special_topics`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_courses: Option<u32>,

    /// The sentence the rule was extracted from
    pub source_text: String,
}

impl Constraint {
    fn empty(constraint_type: ConstraintType, source_text: &str) -> Self {
        Self {
            constraint_type,
            groups: Vec::new(),
            group_names: Vec::new(),
            min_credits: None,
            max_credits: None,
            level: None,
            max_courses: None,
            source_text: source_text.to_string(),
        }
    }

    pub fn multi_group(groups: Vec<GroupRequirement>, source_text: &str) -> Self {
        Self {
            groups,
            ..Self::empty(ConstraintType::MultiGroup, source_text)
        }
    }

    pub fn pool_group(min_credits: u32, group_names: Vec<String>, source_text: &str) -> Self {
        Self {
            min_credits: Some(min_credits),
            group_names,
            ..Self::empty(ConstraintType::PoolGroup, source_text)
        }
    }

    pub fn max_level_credits(max_credits: u32, level: u32, source_text: &str) -> Self {
        Self {
            max_credits: Some(max_credits),
            level: Some(level),
            ..Self::empty(ConstraintType::MaxLevelCredits, source_text)
        }
    }

    pub fn min_level_credits(min_credits: u32, level: u32, source_text: &str) -> Self {
        Self {
            min_credits: Some(min_credits),
            level: Some(level),
            ..Self::empty(ConstraintType::MinLevelCredits, source_text)
        }
    }

    pub fn max_special_topics(max_courses: u32, source_text: &str) -> Self {
        Self {
            max_courses: Some(max_courses),
            ..Self::empty(ConstraintType::MaxSpecialTopics, source_text)
        }
    }

    pub fn note(source_text: &str) -> Self {
        Self::empty(ConstraintType::Note, source_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_type_round_trip() {
        for bt in [
            BlockType::Required,
            BlockType::ChooseCredits,
            BlockType::ChooseCourses,
            BlockType::Group,
            BlockType::MultiGroup,
            BlockType::PoolGroup,
            BlockType::LevelElective,
        ] {
            assert_eq!(BlockType::parse(bt.as_str()), Some(bt));
        }
        assert_eq!(BlockType::parse("unknown"), None);
    }

    #[test]
    fn program_json_uses_contract_field_names() {
        let program = Program {
            program_key: "cs_major".to_string(),
            name: "Computer Science (B.Sc. Major)".to_string(),
            program_type: ProgramType::Major,
            faculty: "Science".to_string(),
            total_credits: Some(54),
            description: "A program.".to_string(),
            ecalendar_url: "https://example.edu/cs-major".to_string(),
            constraints: vec![Constraint::note("Note: see advisor.")],
            blocks: vec![Block {
                block_key: "cs_major_1".to_string(),
                title: "Required Courses".to_string(),
                block_type: BlockType::Required,
                group_name: None,
                credits_needed: None,
                courses_needed: None,
                notes: String::new(),
                sort_order: 0,
                courses: vec![Course {
                    subject: "COMP".to_string(),
                    catalog: "202".to_string(),
                    title: "Foundations of Programming".to_string(),
                    credits: 3,
                    is_required: true,
                    sort_order: 0,
                }],
            }],
        };

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["program_key"], "cs_major");
        assert_eq!(json["program_type"], "major");
        assert_eq!(json["ecalendar_url"], "https://example.edu/cs-major");
        assert_eq!(json["blocks"][0]["block_type"], "required");
        assert_eq!(json["blocks"][0]["courses"][0]["subject"], "COMP");
        assert_eq!(json["constraints"][0]["constraint_type"], "note");

        let back: Program = serde_json::from_value(json).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn constraint_constructors_set_typed_fields() {
        let c = Constraint::multi_group(
            vec![
                GroupRequirement {
                    credits: 9,
                    group: "A".to_string(),
                },
                GroupRequirement {
                    credits: 12,
                    group: "B".to_string(),
                },
            ],
            "9 credits from Group A and 12 credits from Group B",
        );
        assert_eq!(c.constraint_type, ConstraintType::MultiGroup);
        assert_eq!(c.groups.len(), 2);

        let c = Constraint::max_level_credits(6, 200, "no more than 6 credits at the 200-level");
        assert_eq!(c.max_credits, Some(6));
        assert_eq!(c.level, Some(200));
    }
}
