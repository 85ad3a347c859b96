//! Scenario definition for headless page runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sequence of headless steps.
#[derive(Debug, Clone, Deserialize, Serialize)]
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
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

/// Where a `scroll_to` step goes: an in-page anchor or a document offset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScrollTarget {
    Offset(f32),
    Anchor(String),
}

fn default_tolerance() -> f32 {
    0.01
}

/// One scenario step. Pointer coordinates are local to the matched element.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },
    Wheel {
        delta_y: f32,
        #[serde(default)]
        touch: bool,
    },
    ScrollTo {
        target: ScrollTarget,
        #[serde(default)]
        immediate: bool,
    },
    Resize {
        width: u32,
        height: u32,
    },
    PointerEnter {
        selector: String,
    },
    PointerMove {
        selector: String,
        x: f32,
        y: f32,
    },
    PointerLeave {
        selector: String,
    },
    AssertExists {
        selector: String,
    },
    AssertOpacity {
        selector: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertGlareVisible {
        selector: String,
        visible: bool,
    },
    AssertTiltNeutral {
        selector: String,
    },
    AssertScroll {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::ScrollTo { .. } => "scroll_to",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::PointerEnter { .. } => "pointer_enter",
            ScenarioStep::PointerMove { .. } => "pointer_move",
            ScenarioStep::PointerLeave { .. } => "pointer_leave",
            ScenarioStep::AssertExists { .. } => "assert_exists",
            ScenarioStep::AssertOpacity { .. } => "assert_opacity",
            ScenarioStep::AssertGlareVisible { .. } => "assert_glare_visible",
            ScenarioStep::AssertTiltNeutral { .. } => "assert_tilt_neutral",
            ScenarioStep::AssertScroll { .. } => "assert_scroll",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = HeadlessScenario::from_json(
            r##"{"steps": [
                {"type": "wheel", "delta_y": 400},
                {"type": "scroll_to", "target": "#contact", "immediate": true},
                {"type": "scroll_to", "target": 120.5},
                {"type": "pointer_move", "selector": "#about", "x": 10, "y": 20},
                {"type": "assert_opacity", "selector": ".hero-name", "value": 1}
            ]}"##,
        )
        .unwrap();

        assert_eq!(
            scenario.steps[0],
            ScenarioStep::Wheel {
                delta_y: 400.0,
                touch: false
            }
        );
        assert_eq!(
            scenario.steps[1],
            ScenarioStep::ScrollTo {
                target: ScrollTarget::Anchor("#contact".into()),
                immediate: true
            }
        );
        assert_eq!(
            scenario.steps[2],
            ScenarioStep::ScrollTo {
                target: ScrollTarget::Offset(120.5),
                immediate: false
            }
        );
        assert_eq!(scenario.steps[3].name(), "pointer_move");
        assert_eq!(
            scenario.steps[4],
            ScenarioStep::AssertOpacity {
                selector: ".hero-name".into(),
                value: 1.0,
                tolerance: 0.01
            }
        );
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(HeadlessScenario::from_json(r#"{"steps": [{"type": "jump"}]}"#).is_err());
    }
}
