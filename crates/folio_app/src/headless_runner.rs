//! Scenario runner that drives a mounted page headlessly.

use crate::config::{SiteConfig, ViewportConfig};
use crate::headless_assert::{
    evaluate_assert_exists, evaluate_assert_glare_visible, evaluate_assert_opacity,
    evaluate_assert_scroll, evaluate_assert_tilt_neutral, resolve_element, AssertionResult,
};
use crate::headless_report::{HeadlessReport, RunProgress};
use crate::headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep, ScrollTarget};
use crate::runtime::PageRuntime;
use anyhow::{bail, Result};
use folio_core::events::event_types;
use folio_core::geometry::Point;
use folio_core::{Event, EventType};

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

/// Execute scenario JSON against the page built from `config`, at the
/// configured viewport.
pub fn run_scenario(config: &SiteConfig, input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let runtime_cfg = HeadlessRunConfig {
        width: config.viewport.width,
        height: config.viewport.height,
        ..HeadlessRunConfig::default()
    };
    run_loaded_scenario(config, &scenario, runtime_cfg)
}

/// Execute a pre-loaded scenario. The page is mounted for the duration of
/// the run and unmounted before returning.
pub fn run_loaded_scenario(
    config: &SiteConfig,
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    runtime_cfg.validate()?;
    let site = SiteConfig {
        viewport: ViewportConfig {
            width: runtime_cfg.width,
            height: runtime_cfg.height,
        },
        ..config.clone()
    };

    let mut runtime = PageRuntime::new(&site)?;
    let mut page = runtime.mount()?;
    let mut progress = RunProgress::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step = step_index, kind = step.name(), "scenario step");
        let result = execute_step(&mut page, step, runtime_cfg, &mut progress)?;
        progress.final_scroll = page.scroll_position();

        if let AssertionResult::Failed { code, message } = result {
            tracing::info!(step = step_index, kind = step.name(), %message, "scenario failed");
            let report = HeadlessReport::failed(step.name(), step_index, code, message, progress);
            return Ok(RunOutcome::Failed { report });
        }
        progress.steps_run += 1;
    }

    tracing::info!(
        steps = progress.steps_run,
        frames = progress.elapsed_frames,
        "scenario passed"
    );
    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(progress),
    })
}

fn execute_step(
    runtime: &mut PageRuntime,
    step: &ScenarioStep,
    runtime_cfg: HeadlessRunConfig,
    progress: &mut RunProgress,
) -> Result<AssertionResult> {
    let result = match step {
        ScenarioStep::Wait { ms } => {
            HeadlessRuntime::run_ms(runtime_cfg, *ms, |ctx| advance(runtime, progress, ctx))?;
            check_budget(runtime_cfg, progress)?;
            AssertionResult::Passed
        }
        ScenarioStep::Tick { frames } => {
            HeadlessRuntime::run(runtime_cfg, *frames, |ctx| advance(runtime, progress, ctx))?;
            check_budget(runtime_cfg, progress)?;
            AssertionResult::Passed
        }
        ScenarioStep::Wheel { delta_y, touch } => {
            let event = if *touch {
                Event::touch_scroll(0.0, *delta_y)
            } else {
                Event::wheel(0.0, *delta_y)
            };
            runtime.handle_event(event);
            AssertionResult::Passed
        }
        ScenarioStep::ScrollTo { target, immediate } => match target {
            ScrollTarget::Offset(offset) => {
                runtime.scroll_to(*offset, *immediate);
                AssertionResult::Passed
            }
            ScrollTarget::Anchor(anchor) => {
                if runtime.scroll_to_anchor(anchor, *immediate) {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed {
                        code: "missing_anchor".to_string(),
                        message: format!("{anchor}: anchor not found"),
                    }
                }
            }
        },
        ScenarioStep::Resize { width, height } => {
            runtime.handle_event(Event::resize(*width, *height));
            AssertionResult::Passed
        }
        ScenarioStep::PointerEnter { selector } => {
            pointer(runtime, selector, event_types::POINTER_ENTER, None)
        }
        ScenarioStep::PointerMove { selector, x, y } => pointer(
            runtime,
            selector,
            event_types::POINTER_MOVE,
            Some(Point::new(*x, *y)),
        ),
        ScenarioStep::PointerLeave { selector } => {
            pointer(runtime, selector, event_types::POINTER_LEAVE, None)
        }
        ScenarioStep::AssertExists { selector } => evaluate_assert_exists(selector, runtime),
        ScenarioStep::AssertOpacity {
            selector,
            value,
            tolerance,
        } => evaluate_assert_opacity(selector, *value, *tolerance, runtime),
        ScenarioStep::AssertGlareVisible { selector, visible } => {
            evaluate_assert_glare_visible(selector, *visible, runtime)
        }
        ScenarioStep::AssertTiltNeutral { selector } => {
            evaluate_assert_tilt_neutral(selector, runtime)
        }
        ScenarioStep::AssertScroll { value, tolerance } => {
            evaluate_assert_scroll(*value, *tolerance, runtime)
        }
    };
    Ok(result)
}

fn advance(runtime: &mut PageRuntime, progress: &mut RunProgress, ctx: &HeadlessContext) {
    runtime.frame(ctx.delta_ms as f32);
    progress.elapsed_frames = progress.elapsed_frames.saturating_add(1);
    progress.elapsed_ms = progress.elapsed_ms.saturating_add(ctx.delta_ms);
}

fn check_budget(runtime_cfg: HeadlessRunConfig, progress: &RunProgress) -> Result<()> {
    if progress.elapsed_frames > runtime_cfg.max_frames {
        bail!(
            "scenario exceeded the frame budget ({} > {})",
            progress.elapsed_frames,
            runtime_cfg.max_frames
        );
    }
    Ok(())
}

/// Dispatch a pointer event at an element. `local` is relative to the
/// element's box; enter/leave use its center.
fn pointer(
    runtime: &PageRuntime,
    selector: &str,
    event_type: EventType,
    local: Option<Point>,
) -> AssertionResult {
    let id = match resolve_element(selector, runtime) {
        Ok(id) => id,
        Err(failure) => return failure,
    };
    let rect = runtime.page().tree().rect(id).unwrap_or_default();
    let local = local.unwrap_or_else(|| Point::new(rect.width() / 2.0, rect.height() / 2.0));
    let x = rect.left() + local.x;
    let y = rect.top() - runtime.scroll_position() + local.y;

    let delivered = runtime.handle_event(Event::pointer(event_type, id.to_target(), x, y));
    if delivered == 0 {
        return AssertionResult::Failed {
            code: "no_listener".to_string(),
            message: format!("{selector}: element does not handle pointer input"),
        };
    }
    AssertionResult::Passed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> RunOutcome {
        run_scenario(&SiteConfig::default(), input).unwrap()
    }

    #[test]
    fn test_empty_scenario_passes() {
        let outcome = run(r#"{"steps": []}"#);
        assert!(!outcome.is_failed());
        assert_eq!(outcome.report().elapsed_frames, 0);
    }

    #[test]
    fn test_wait_counts_frames_and_time() {
        let outcome = run(r#"{"steps": [{"type": "wait", "ms": 100}, {"type": "tick", "frames": 2}]}"#);
        let report = outcome.report();
        assert_eq!(report.elapsed_frames, 7 + 2);
        assert_eq!(report.elapsed_ms, 100 + 32);
        assert_eq!(report.steps_run, 2);
    }

    #[test]
    fn test_failed_assertion_reports_step() {
        let outcome = run(
            r##"{"steps": [
                {"type": "tick", "frames": 1},
                {"type": "assert_exists", "selector": "#nowhere"}
            ]}"##,
        );
        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_exists"));
        assert_eq!(report.code.as_deref(), Some("missing_element"));
        assert_eq!(report.steps_run, 1);
    }

    #[test]
    fn test_pointer_on_non_card_fails() {
        let outcome = run(r#"{"steps": [{"type": "pointer_enter", "selector": ".hero-name"}]}"#);
        assert_eq!(outcome.report().code.as_deref(), Some("no_listener"));
    }

    #[test]
    fn test_frame_budget() {
        let scenario = HeadlessScenario::from_json(r#"{"steps": [{"type": "tick", "frames": 5}]}"#).unwrap();
        let cfg = HeadlessRunConfig {
            max_frames: 3,
            ..HeadlessRunConfig::default()
        };
        assert!(run_loaded_scenario(&SiteConfig::default(), &scenario, cfg).is_err());
    }
}
