//! Folio Application
//!
//! The portfolio page built on the Folio runtime: the hero, about and skills
//! sections with their scroll choreography, the static skills table, a
//! headless page host and a deterministic scenario runner.
//!
//! # Example
//!
//! ```rust
//! use folio_app::{FolioConfig, Page, SectionKind};
//!
//! let mut page = Page::new(&FolioConfig::default()).unwrap();
//! page.mount_all().unwrap();
//! page.scroll_to(1200.0);
//! page.tick(16.0);
//!
//! assert!(page.is_mounted(SectionKind::About));
//! assert!(!page.query("word").is_empty());
//! ```

pub mod config;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_scenario;
pub mod page;
pub mod sections;
pub mod skills;

pub use config::{FolioConfig, RuntimeConfig};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{
    run_loaded_scenario_with_probe, run_scenario, run_scenario_with_probe, sample_property,
    ProbeContext, RunOutcome, MAX_SAMPLES,
};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use page::Page;
pub use sections::{Section, SectionKind};
pub use skills::{category, skills_table, validate, Skill, SkillCategory, SkillStatus, SkillsError};
