//! Page sections
//!
//! Each section builds its static markup once and, on every mount, registers
//! its timelines on a fresh [`AnimationContext`] scoped to its root element.
//! Styles applied during `build` play the role of the page stylesheet and
//! survive a context revert.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use folio_animation::AnimationContext;
use folio_core::{CoreError, ElementId, VisualTree};
use serde::{Deserialize, Serialize};

use crate::config::FolioConfig;

pub mod about;
pub mod hero;
pub mod skills;

pub use about::About;
pub use hero::Hero;
pub use skills::Skills;

/// The three page sections, in page order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Skills,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Hero, SectionKind::About, SectionKind::Skills];

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Skills => "skills",
        }
    }

    /// Section implementation for this kind
    pub fn section(&self) -> &'static dyn Section {
        match self {
            SectionKind::Hero => &Hero,
            SectionKind::About => &About,
            SectionKind::Skills => &Skills,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown section '{s}'"))
    }
}

/// Markup plus choreography for one section
pub trait Section {
    fn kind(&self) -> SectionKind;

    /// Build the section's elements under `parent` and return its root
    fn build(
        &self,
        tree: &mut VisualTree,
        parent: ElementId,
        config: &FolioConfig,
    ) -> Result<ElementId, CoreError>;

    /// Register the section's timelines on `ctx`
    fn choreograph(&self, ctx: &mut AnimationContext, tree: &mut VisualTree) -> Result<()>;
}

/// Rough rendered height of a text block at the given viewport width
pub(crate) fn text_block_height(text: &str, viewport_width: f32, line_height: f32) -> f32 {
    let column = (viewport_width * 0.6).min(720.0);
    let per_line = ((column / 11.0) as usize).max(20);
    let lines = text.chars().count().div_ceil(per_line).max(1);
    lines as f32 * line_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_names() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.name().parse::<SectionKind>().unwrap(), kind);
            assert_eq!(kind.section().kind(), kind);
        }
        assert!("footer".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_text_block_height_grows_with_text() {
        let short = text_block_height("Hello", 1280.0, 32.0);
        let long = text_block_height(&"word ".repeat(60), 1280.0, 32.0);
        assert_eq!(short, 32.0);
        assert!(long > short);
    }
}
