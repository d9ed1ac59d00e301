//! Scenario runner that drives a page through headless steps.

use anyhow::{bail, Result};
use folio_core::Property;
use tracing::info;

use crate::config::{FolioConfig, RuntimeConfig};
use crate::headless_assert::{evaluate_assert_property, evaluate_assert_text, AssertionResult};
use crate::headless_report::HeadlessReport;
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::page::Page;

/// Temporal context passed into probes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeContext {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub step_index: usize,
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Run scenario JSON against a freshly mounted page.
pub fn run_scenario(input: &str, config: &FolioConfig) -> Result<RunOutcome> {
    run_scenario_with_probe(input, config, |_: &ProbeContext, _: &Page| {})
}

/// Run scenario JSON against a freshly mounted page, sampling with `probe`.
pub fn run_scenario_with_probe<F>(input: &str, config: &FolioConfig, mut probe: F) -> Result<RunOutcome>
where
    F: FnMut(&ProbeContext, &Page),
{
    let scenario = HeadlessScenario::from_json(input)?;
    let mut page = Page::new(config)?;
    page.mount_all()?;
    run_loaded_scenario_with_probe(&mut page, &scenario, &config.runtime, &mut probe)
}

/// Run a pre-loaded scenario against an existing page.
pub fn run_loaded_scenario_with_probe<F>(
    page: &mut Page,
    scenario: &HeadlessScenario,
    runtime: &RuntimeConfig,
    probe: &mut F,
) -> Result<RunOutcome>
where
    F: FnMut(&ProbeContext, &Page),
{
    if runtime.tick_ms == 0 {
        bail!("runtime.tick_ms must be > 0");
    }
    let mut clock = Clock::default();
    let probe_every = runtime.probe_every_frames.max(1);

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let assertion = match step {
            ScenarioStep::ScrollTo { y } => {
                page.scroll_to(*y);
                None
            }
            ScenarioStep::ScrollBy { dy } => {
                page.scroll_by(*dy);
                None
            }
            ScenarioStep::Tick { frames } => {
                run_sampled_frames(
                    page,
                    *frames,
                    probe_every,
                    step_index,
                    &mut clock,
                    probe,
                    || runtime.tick_ms,
                );
                None
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, runtime.tick_ms);
                let mut remaining_ms = *ms;
                run_sampled_frames(
                    page,
                    frames,
                    probe_every,
                    step_index,
                    &mut clock,
                    probe,
                    || {
                        let step_ms = remaining_ms.min(runtime.tick_ms);
                        remaining_ms = remaining_ms.saturating_sub(step_ms);
                        step_ms
                    },
                );
                None
            }
            ScenarioStep::Resize { width, height } => {
                if *width <= 0.0 || *height <= 0.0 {
                    bail!("step {step_index}: resize dimensions must be positive");
                }
                page.resize(*width, *height);
                None
            }
            ScenarioStep::Mount { section } => {
                page.mount(*section)?;
                None
            }
            ScenarioStep::Unmount { section } => {
                page.unmount(*section);
                None
            }
            ScenarioStep::AssertProperty {
                class,
                index,
                property,
                value,
                tolerance,
            } => Some((
                "assert_property",
                evaluate_assert_property(page, class, *index, property, *value, *tolerance),
            )),
            ScenarioStep::AssertText {
                class,
                index,
                value,
            } => Some((
                "assert_text",
                evaluate_assert_text(page, class, *index, value),
            )),
        };

        if let Some((name, AssertionResult::Failed { message, .. })) = assertion {
            info!(step = step_index, assertion = name, %message, "scenario failed");
            let report = HeadlessReport::failed(
                name,
                step_index,
                message,
                clock.frames,
                clock.ms,
                page.scroll_y(),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    info!(
        steps = scenario.steps.len(),
        frames = clock.frames,
        "scenario passed"
    );
    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(clock.frames, clock.ms, page.scroll_y()),
    })
}

/// Upper bound on the number of scroll stops in one sweep
pub const MAX_SAMPLES: usize = 10_000;

/// Scroll across `from..=to` in `step` increments, letting each position
/// settle for `settle_frames` frames, and read one property at each stop.
#[allow(clippy::too_many_arguments)]
pub fn sample_property(
    page: &mut Page,
    class: &str,
    index: usize,
    property: Property,
    from: f32,
    to: f32,
    step: f32,
    settle_frames: u32,
    tick_ms: u64,
) -> Result<Vec<(f32, Option<f32>)>> {
    if !from.is_finite() || !to.is_finite() || !step.is_finite() {
        bail!("sample range and step must be finite");
    }
    if step <= 0.0 {
        bail!("sample step must be > 0");
    }
    if to < from {
        return Ok(Vec::new());
    }

    // Stops are counted in f64 so large offsets cannot stall the sweep.
    let span = (f64::from(to) - f64::from(from)) / f64::from(step);
    let stops = (span + 1e-6).floor() as usize + 1;
    if stops > MAX_SAMPLES {
        bail!("sample sweep has {stops} stops, at most {MAX_SAMPLES} allowed");
    }

    let mut samples = Vec::with_capacity(stops);
    for stop in 0..stops {
        let y = (f64::from(from) + stop as f64 * f64::from(step)) as f32;
        page.scroll_to(y);
        for _ in 0..settle_frames {
            page.tick(tick_ms as f32);
        }
        samples.push((page.scroll_y(), page.property_of(class, index, property)));
    }
    Ok(samples)
}

#[derive(Debug, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

impl Clock {
    fn probe_context(&self, step_index: usize) -> ProbeContext {
        ProbeContext {
            elapsed_frames: self.frames,
            elapsed_ms: self.ms,
            step_index,
        }
    }
}

/// Advance `frames` frames, probing every `probe_every` frames and on the last.
/// A zero-frame step probes once without advancing.
fn run_sampled_frames<F, A>(
    page: &mut Page,
    frames: u32,
    probe_every: u32,
    step_index: usize,
    clock: &mut Clock,
    probe: &mut F,
    mut advance_ms: A,
) where
    F: FnMut(&ProbeContext, &Page),
    A: FnMut() -> u64,
{
    if frames == 0 {
        probe(&clock.probe_context(step_index), page);
        return;
    }

    for frame in 1..=frames {
        let dt_ms = advance_ms();
        page.tick(dt_ms as f32);
        clock.frames = clock.frames.saturating_add(1);
        clock.ms = clock.ms.saturating_add(dt_ms);

        if frame % probe_every == 0 || frame == frames {
            probe(&clock.probe_context(step_index), page);
        }
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
        assert_eq!(wait_frames(100, 0), 100);
    }

    #[test]
    fn test_time_steps_accumulate_clock() {
        let config = FolioConfig::default();
        let outcome = run_scenario(
            r#"{"steps": [
                {"type": "tick", "frames": 3},
                {"type": "wait", "ms": 40}
            ]}"#,
            &config,
        )
        .unwrap();
        let report = outcome.report();
        assert!(report.is_passed());
        assert_eq!(report.elapsed_frames, 6);
        assert_eq!(report.elapsed_ms, 48 + 40);
    }

    #[test]
    fn test_probe_sampling_interval() {
        let config = FolioConfig::default();
        let mut probed = Vec::new();
        run_scenario_with_probe(
            r#"{"steps": [{"type": "tick", "frames": 10}]}"#,
            &config,
            |ctx, _| probed.push(ctx.elapsed_frames),
        )
        .unwrap();
        assert_eq!(probed, vec![4, 8, 10]);
    }

    #[test]
    fn test_sample_rejects_zero_step() {
        let mut page = Page::new(&FolioConfig::default()).unwrap();
        assert!(
            sample_property(&mut page, "hero-name", 0, Property::Y, 0.0, 100.0, 0.0, 0, 16)
                .is_err()
        );
    }

    #[test]
    fn test_sample_rejects_non_finite_and_oversized_sweeps() {
        let mut page = Page::new(&FolioConfig::default()).unwrap();
        let mut sweep = |from: f32, to: f32, step: f32| {
            sample_property(&mut page, "hero-name", 0, Property::Y, from, to, step, 0, 16)
        };
        assert!(sweep(f32::NAN, 100.0, 1.0).is_err());
        assert!(sweep(0.0, f32::INFINITY, 1.0).is_err());
        assert!(sweep(0.0, 100.0, f32::NAN).is_err());
        assert!(sweep(0.0, 1.0e9, 1.0).is_err());
        assert!(sweep(100.0, 0.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_sample_terminates_past_f32_integer_precision() {
        // 2^24: adding 1.0 to an f32 here no longer changes it.
        let mut page = Page::new(&FolioConfig::default()).unwrap();
        page.mount_all().unwrap();
        let samples = sample_property(
            &mut page,
            "hero-name",
            0,
            Property::Y,
            16_777_216.0,
            16_777_300.0,
            1.0,
            0,
            16,
        )
        .unwrap();
        assert_eq!(samples.len(), 85);
        assert!(samples.iter().all(|(y, _)| *y == page.max_scroll()));
    }

    #[test]
    fn test_sample_stops_are_evenly_spaced() {
        let mut page = Page::new(&FolioConfig::default()).unwrap();
        page.mount_all().unwrap();
        let samples =
            sample_property(&mut page, "hero-name", 0, Property::Y, 0.0, 1.0, 0.1, 0, 16).unwrap();
        assert_eq!(samples.len(), 11);
        assert!((samples[10].0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_tick_runtime_rejected() {
        let mut page = Page::new(&FolioConfig::default()).unwrap();
        let scenario = HeadlessScenario::from_json(r#"{"steps": []}"#).unwrap();
        let runtime = RuntimeConfig {
            tick_ms: 0,
            probe_every_frames: 1,
        };
        let result =
            run_loaded_scenario_with_probe(&mut page, &scenario, &runtime, &mut |_: &ProbeContext, _: &Page| {});
        assert!(result.is_err());
    }
}
