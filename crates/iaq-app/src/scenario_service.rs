//! Scenario file loading and lookup.

use std::path::Path;

use iaq_solver::{RawParams, ResolverDefaults};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A set of scenarios sharing one block of defaults.
///
/// ```yaml
/// defaults:
///   ef: 0.6
/// scenarios:
///   - name: small office
///     occupancy: Office space
///     area_ft2: 209
///     num_people: 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub defaults: ResolverDefaults,
    pub scenarios: Vec<RawParams>,
}

impl ScenarioFile {
    /// Scenario whose name matches `name` (trimmed, case-insensitive).
    pub fn scenario(&self, name: &str) -> AppResult<&RawParams> {
        let key = name.trim();
        self.scenarios
            .iter()
            .find(|s| {
                s.name
                    .as_deref()
                    .is_some_and(|n| n.trim().eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| AppError::ScenarioNotFound(name.to_string()))
    }

    /// Display label for the scenario at `index`.
    pub fn label(&self, index: usize) -> String {
        self.scenarios
            .get(index)
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| format!("scenario #{}", index + 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> AppResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a scenario file; the format follows the file extension.
pub fn load_scenarios(path: &Path) -> AppResult<ScenarioFile> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed = match format {
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    let file: ScenarioFile = parsed.map_err(|message| AppError::ScenarioParse {
        path: path.to_path_buf(),
        message,
    })?;

    tracing::debug!(
        path = %path.display(),
        scenarios = file.scenarios.len(),
        "loaded scenario file"
    );
    Ok(file)
}

/// Parse scenarios from YAML text.
pub fn parse_scenarios_yaml(content: &str) -> AppResult<ScenarioFile> {
    serde_yaml::from_str(content).map_err(|e| AppError::ScenarioParse {
        path: "<inline>".into(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_and_defaults_parse() {
        let file = parse_scenarios_yaml(
            r#"
defaults:
  Ef: 0.7
  loc: B
scenarios:
  - name: Small office
    occupancy: Office space
    area_ft2: 209
    num_people: 2
    recirc_cfm: 50
  - occupancy: Lecture classroom
    R: 0.4
    safe_factor: 0.9
"#,
        )
        .unwrap();
        assert_eq!(file.defaults.ef, 0.7);
        assert_eq!(file.defaults.filter_position, "B");
        // untouched defaults keep their built-in values
        assert_eq!(file.defaults.area_m2, Some(90.0));
        assert_eq!(file.scenarios.len(), 2);
        assert_eq!(file.scenarios[1].recirculation_ratio, Some(0.4));
        assert_eq!(file.scenarios[1].safety_factor, Some(0.9));
        assert_eq!(file.label(1), "scenario #2");
    }

    #[test]
    fn scenario_lookup_ignores_case() {
        let file = parse_scenarios_yaml("scenarios:\n  - name: Lab A\n").unwrap();
        assert!(file.scenario(" lab a ").is_ok());
        assert!(matches!(
            file.scenario("Lab B"),
            Err(AppError::ScenarioNotFound(_))
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_scenarios(Path::new("scenarios.toml")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_scenarios_yaml("scenarios: {not: [a list").unwrap_err();
        assert!(matches!(err, AppError::ScenarioParse { .. }));
    }
}
