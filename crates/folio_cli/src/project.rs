//! Site scaffolding

use anyhow::{bail, Result};
use folio_app::{SiteConfig, CONFIG_FILE};
use std::fs;
use std::path::Path;

const SAMPLE_SCENARIO: &str = "scenarios/smoke.json";

/// Write a default `folio.toml` and a sample scenario into `path`
pub fn init_site(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    let scenario_path = path.join(SAMPLE_SCENARIO);
    if !force {
        for existing in [&config_path, &scenario_path] {
            if existing.exists() {
                bail!("{} already exists (use --force to overwrite)", existing.display());
            }
        }
    }

    fs::create_dir_all(path.join("scenarios"))?;
    fs::write(&config_path, SiteConfig::default().to_toml()?)?;
    fs::write(&scenario_path, template_scenario())?;

    tracing::info!(path = %path.display(), "site initialized");
    Ok(())
}

fn template_scenario() -> &'static str {
    r##"{
  "steps": [
    { "type": "assert_exists", "selector": ".hero-name" },
    { "type": "wait", "ms": 1600 },
    { "type": "assert_opacity", "selector": ".hero-name", "value": 1 },
    { "type": "scroll_to", "target": "#about" },
    { "type": "wait", "ms": 1500 },
    { "type": "assert_opacity", "selector": "#about", "value": 1 },
    { "type": "pointer_move", "selector": "#about", "x": 40, "y": 40 },
    { "type": "assert_glare_visible", "selector": "#about", "visible": true },
    { "type": "pointer_leave", "selector": "#about" },
    { "type": "assert_tilt_neutral", "selector": "#about" }
  ]
}
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_app::{run_scenario, HeadlessScenario};

    #[test]
    fn test_sample_scenario_parses_and_passes() {
        let scenario = HeadlessScenario::from_json(template_scenario()).unwrap();
        assert_eq!(scenario.steps.len(), 10);

        let outcome = run_scenario(&SiteConfig::default(), template_scenario()).unwrap();
        assert!(!outcome.is_failed(), "{:?}", outcome.report());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("folio-init-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        init_site(&dir, false).unwrap();
        let written = fs::read_to_string(dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(SiteConfig::from_toml(&written).unwrap(), SiteConfig::default());

        assert!(init_site(&dir, false).is_err());
        assert!(init_site(&dir, true).is_ok());
        let _ = fs::remove_dir_all(&dir);
    }
}
