//! Static skills table rendered by the skills section

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

/// Skills table errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillsError {
    #[error("duplicate category key: {0}")]
    DuplicateKey(String),

    #[error("category '{0}' has no skills")]
    EmptyCategory(String),

    #[error("category '{0}' has a skill with an empty name")]
    EmptySkillName(String),

    #[error("unknown skill status: {0}")]
    UnknownStatus(String),
}

/// Proficiency label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SkillStatus {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillStatus {
    pub const ALL: [SkillStatus; 4] = [
        SkillStatus::Beginner,
        SkillStatus::Intermediate,
        SkillStatus::Advanced,
        SkillStatus::Expert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillStatus::Beginner => "Beginner",
            SkillStatus::Intermediate => "Intermediate",
            SkillStatus::Advanced => "Advanced",
            SkillStatus::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillStatus {
    type Err = SkillsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| SkillsError::UnknownStatus(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub status: SkillStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub key: &'static str,
    pub title: &'static str,
    pub skills: &'static [Skill],
}

const fn skill(name: &'static str, status: SkillStatus) -> Skill {
    Skill { name, status }
}

use SkillStatus::{Advanced, Beginner, Expert, Intermediate};

static SKILLS: [SkillCategory; 3] = [
    SkillCategory {
        key: "languages",
        title: "Languages",
        skills: &[
            skill("JavaScript", Expert),
            skill("TypeScript", Expert),
            skill("Python", Intermediate),
            skill("Go", Intermediate),
            skill("Rust", Intermediate),
            skill("C", Intermediate),
            skill("Java", Intermediate),
            skill("HTML", Expert),
            skill("CSS", Expert),
        ],
    },
    SkillCategory {
        key: "frameworks",
        title: "Frameworks & Libraries",
        skills: &[
            skill("React", Expert),
            skill("Next.js", Advanced),
            skill("React Native", Advanced),
            skill("Three.js", Intermediate),
            skill("CSS Modules", Advanced),
            skill("Expo", Advanced),
            skill("Node.js", Expert),
            skill("Express", Expert),
            skill("Fastify", Advanced),
            skill("Flask", Intermediate),
            skill("FastAPI", Intermediate),
            skill("NestJS", Advanced),
            skill("Hono", Advanced),
            skill("Socket.io", Expert),
            skill("Deno", Advanced),
            skill("Bun", Advanced),
            skill("Tauri", Intermediate),
            skill("TensorFlow", Beginner),
        ],
    },
    SkillCategory {
        key: "tools",
        title: "Tools & Platforms",
        skills: &[
            skill("GitHub", Expert),
            skill("npm", Expert),
            skill("Vercel", Expert),
            skill("Cloudflare Workers", Advanced),
            skill("AWS", Advanced),
            skill("Google Cloud", Advanced),
            skill("MongoDB", Expert),
            skill("PostgreSQL", Advanced),
            skill("SQLite", Advanced),
            skill("Supabase", Advanced),
            skill("Firebase", Advanced),
        ],
    },
];

/// All categories in authoring order
pub fn skills_table() -> &'static [SkillCategory] {
    &SKILLS
}

/// Look up a category by key
pub fn category(key: &str) -> Option<&'static SkillCategory> {
    SKILLS.iter().find(|c| c.key == key)
}

/// Check that keys are unique and every category and skill name is non-empty
pub fn validate(table: &[SkillCategory]) -> Result<(), SkillsError> {
    let mut seen = FxHashSet::default();
    for category in table {
        if !seen.insert(category.key) {
            return Err(SkillsError::DuplicateKey(category.key.to_string()));
        }
        if category.skills.is_empty() {
            return Err(SkillsError::EmptyCategory(category.key.to_string()));
        }
        if category.skills.iter().any(|s| s.name.trim().is_empty()) {
            return Err(SkillsError::EmptySkillName(category.key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let keys: Vec<_> = skills_table().iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["languages", "frameworks", "tools"]);
        let counts: Vec<_> = skills_table().iter().map(|c| c.skills.len()).collect();
        assert_eq!(counts, vec![9, 18, 11]);
        assert!(validate(skills_table()).is_ok());
    }

    #[test]
    fn test_category_lookup() {
        let tools = category("tools").unwrap();
        assert_eq!(tools.title, "Tools & Platforms");
        assert_eq!(tools.skills[3].name, "Cloudflare Workers");
        assert!(category("hobbies").is_none());
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in SkillStatus::ALL {
            assert_eq!(status.to_string().parse::<SkillStatus>(), Ok(status));
        }
        assert_eq!(
            "Guru".parse::<SkillStatus>(),
            Err(SkillsError::UnknownStatus("Guru".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        static EMPTY: [SkillCategory; 1] = [SkillCategory {
            key: "misc",
            title: "Misc",
            skills: &[],
        }];
        assert_eq!(
            validate(&EMPTY),
            Err(SkillsError::EmptyCategory("misc".to_string()))
        );

        let dup = [SKILLS[0], SKILLS[0]];
        assert_eq!(
            validate(&dup),
            Err(SkillsError::DuplicateKey("languages".to_string()))
        );

        let blank = [SkillCategory {
            key: "blank",
            title: "Blank",
            skills: &[Skill {
                name: " ",
                status: SkillStatus::Beginner,
            }],
        }];
        assert_eq!(
            validate(&blank),
            Err(SkillsError::EmptySkillName("blank".to_string()))
        );
    }
}
