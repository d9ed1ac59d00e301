//! Scenario definition for headless page runs.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::sections::SectionKind;

/// Sequence of scroll, time and assertion steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

fn default_tolerance() -> f32 {
    1e-3
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    ScrollTo {
        y: f32,
    },
    ScrollBy {
        dy: f32,
    },
    Tick {
        frames: u32,
    },
    Wait {
        ms: u64,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Mount {
        section: SectionKind,
    },
    Unmount {
        section: SectionKind,
    },
    AssertProperty {
        class: String,
        #[serde(default)]
        index: usize,
        property: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertText {
        class: String,
        #[serde(default)]
        index: usize,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_steps() {
        let scenario = HeadlessScenario::from_json(
            r#"{"steps": [
                {"type": "mount", "section": "about"},
                {"type": "scroll_to", "y": 900},
                {"type": "assert_property", "class": "word", "property": "opacity", "value": 0.2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(scenario.steps.len(), 3);
        assert!(matches!(
            scenario.steps[0],
            ScenarioStep::Mount {
                section: SectionKind::About
            }
        ));
        match &scenario.steps[2] {
            ScenarioStep::AssertProperty {
                index, tolerance, ..
            } => {
                assert_eq!(*index, 0);
                assert_eq!(*tolerance, 1e-3);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        assert!(HeadlessScenario::from_json(r#"{"steps": [{"type": "jump"}]}"#).is_err());
        assert!(
            HeadlessScenario::from_json(r#"{"steps": [{"type": "mount", "section": "footer"}]}"#)
                .is_err()
        );
    }
}
