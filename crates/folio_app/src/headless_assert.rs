//! Assertion helpers for headless page runs.

use folio_layout::ElementId;

use crate::runtime::PageRuntime;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, AssertionResult::Passed)
    }
}

/// First element matching `selector`, or the failure to report.
pub fn resolve_element(selector: &str, runtime: &PageRuntime) -> Result<ElementId, AssertionResult> {
    match runtime.find(selector) {
        Ok(matches) => matches.first().copied().ok_or_else(|| {
            AssertionResult::failed("missing_element", format!("{selector}: element not found"))
        }),
        Err(err) => Err(AssertionResult::failed(
            "invalid_selector",
            format!("{selector}: {err}"),
        )),
    }
}

pub fn evaluate_assert_exists(selector: &str, runtime: &PageRuntime) -> AssertionResult {
    match resolve_element(selector, runtime) {
        Ok(_) => AssertionResult::Passed,
        Err(failure) => failure,
    }
}

pub fn evaluate_assert_opacity(
    selector: &str,
    expected: f32,
    tolerance: f32,
    runtime: &PageRuntime,
) -> AssertionResult {
    let id = match resolve_element(selector, runtime) {
        Ok(id) => id,
        Err(failure) => return failure,
    };
    let actual = runtime.computed_style(id).opacity();
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "opacity_mismatch",
            format!("{selector}: expected opacity {expected} (±{tolerance}), got {actual}"),
        )
    }
}

pub fn evaluate_assert_glare_visible(
    selector: &str,
    expected: bool,
    runtime: &PageRuntime,
) -> AssertionResult {
    let id = match resolve_element(selector, runtime) {
        Ok(id) => id,
        Err(failure) => return failure,
    };
    if runtime.tilt_sample(id).is_none() {
        return AssertionResult::failed("not_a_card", format!("{selector}: not a tilt card"));
    }
    let actual = runtime.glare_visible(id);
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "glare_mismatch",
            format!("{selector}: expected glare visible = {expected}, got {actual}"),
        )
    }
}

pub fn evaluate_assert_tilt_neutral(selector: &str, runtime: &PageRuntime) -> AssertionResult {
    let id = match resolve_element(selector, runtime) {
        Ok(id) => id,
        Err(failure) => return failure,
    };
    match runtime.tilt_sample(id) {
        None => AssertionResult::failed("not_a_card", format!("{selector}: not a tilt card")),
        Some(sample) if sample.is_neutral() && !runtime.is_card_active(id) => AssertionResult::Passed,
        Some(sample) => AssertionResult::failed(
            "tilt_not_neutral",
            format!(
                "{selector}: rotate_x = {}, rotate_y = {}, active = {}",
                sample.rotate_x,
                sample.rotate_y,
                runtime.is_card_active(id)
            ),
        ),
    }
}

pub fn evaluate_assert_scroll(expected: f32, tolerance: f32, runtime: &PageRuntime) -> AssertionResult {
    let actual = runtime.scroll_position();
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "scroll_mismatch",
            format!("expected scroll {expected} (±{tolerance}), got {actual}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_exists_and_missing() {
        let runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
        assert!(evaluate_assert_exists("#about", &runtime).is_passed());
        match evaluate_assert_exists("#nowhere", &runtime) {
            AssertionResult::Failed { code, .. } => assert_eq!(code, "missing_element"),
            AssertionResult::Passed => panic!("expected failure"),
        }
        match evaluate_assert_exists("", &runtime) {
            AssertionResult::Failed { code, .. } => assert_eq!(code, "invalid_selector"),
            AssertionResult::Passed => panic!("expected failure"),
        }
    }

    #[test]
    fn test_tilt_assertions_need_a_mounted_card() {
        let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
        assert!(!evaluate_assert_tilt_neutral("#about", &runtime).is_passed());
        let guard = runtime.mount().unwrap();
        assert!(evaluate_assert_tilt_neutral("#about", &guard).is_passed());
        assert!(evaluate_assert_glare_visible("#about", false, &guard).is_passed());
        assert!(!evaluate_assert_tilt_neutral(".hero-name", &guard).is_passed());
    }
}
