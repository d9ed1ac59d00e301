//! Folio CLI
//!
//! Drives the portfolio page headlessly:
//! - `folio run` executes a JSON scenario and prints a report
//! - `folio sample` sweeps the scroll position and prints one property
//! - `folio skills` prints the skills table

mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_app::{
    run_loaded_scenario_with_probe, sample_property, skills_table, validate, FolioConfig,
    HeadlessScenario, Page, ProbeContext,
};
use folio_core::Property;
use tracing::{debug, info};

/// Scroll-linked portfolio page, run headlessly
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Run and inspect the scroll choreography of the portfolio page")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario against the mounted page
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Configuration file or directory containing folio.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the JSON report to this relative path instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print a property of one element across a range of scroll offsets
    Sample {
        /// Element class
        #[arg(long)]
        class: String,

        /// Property name (opacity, x, y, scale_x, height, glow, clip_right, ...)
        #[arg(long)]
        property: String,

        /// Index among elements with the class
        #[arg(long, default_value_t = 0)]
        index: usize,

        #[arg(long, default_value_t = 0.0)]
        from: f32,

        #[arg(long)]
        to: f32,

        #[arg(long, default_value_t = 100.0)]
        step: f32,

        /// Frames to let smoothed scrubs settle at each offset
        #[arg(long, default_value_t = 90)]
        settle: u32,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the skills table
    Skills {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Run {
            scenario,
            config,
            report,
        } => cmd_run(&scenario, config.as_deref(), report.as_deref()),
        Command::Sample {
            class,
            property,
            index,
            from,
            to,
            step,
            settle,
            config,
        } => {
            let property: Property = property
                .parse()
                .with_context(|| format!("Invalid property '{property}'"))?;
            let config = load_config(config.as_deref())?;
            let mut page = Page::new(&config)?;
            page.mount_all()?;

            let samples = sample_property(
                &mut page,
                &class,
                index,
                property,
                from,
                to,
                step,
                settle,
                config.runtime.tick_ms,
            )?;
            let mut out = std::io::stdout().lock();
            writeln!(out, "scroll_y\t{property}")?;
            for (scroll_y, value) in samples {
                match value {
                    Some(value) => writeln!(out, "{scroll_y}\t{value}")?,
                    None => writeln!(out, "{scroll_y}\t-")?,
                }
            }
            Ok(())
        }
        Command::Skills { json } => cmd_skills(json),
    }
}

fn load_config(path: Option<&Path>) -> Result<FolioConfig> {
    match path {
        Some(path) => FolioConfig::load_from_path(path),
        None => {
            let local = Path::new("folio.toml");
            if local.exists() {
                FolioConfig::load_from_path(local)
            } else {
                Ok(FolioConfig::default())
            }
        }
    }
}

fn cmd_run(scenario_path: &Path, config: Option<&Path>, report_path: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let scenario = HeadlessScenario::from_path(scenario_path)
        .with_context(|| format!("Failed to load scenario {}", scenario_path.display()))?;
    info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let mut page = Page::new(&config)?;
    page.mount_all()?;
    let mut probe = |ctx: &ProbeContext, page: &Page| {
        debug!(
            step = ctx.step_index,
            frame = ctx.elapsed_frames,
            ms = ctx.elapsed_ms,
            scroll_y = page.scroll_y(),
            "probe"
        );
    };
    let outcome =
        run_loaded_scenario_with_probe(&mut page, &scenario, &config.runtime, &mut probe)?;

    match report_path {
        Some(path) => {
            outcome.report().write_to_path(path)?;
            info!(report = %path.display(), "report written");
        }
        None => outcome.report().write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_skills(json: bool) -> Result<()> {
    let table = skills_table();
    validate(table)?;

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, table)?;
        writeln!(out)?;
        return Ok(());
    }

    for category in table {
        writeln!(out, "{} ({})", category.title, category.key)?;
        for skill in category.skills {
            writeln!(out, "  {:<20} {}", skill.name, skill.status)?;
        }
    }
    Ok(())
}
