//! File-based configuration loading

use super::{ConfigError, DriverConfig};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = ".lintgate.toml";

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// A missing file yields the default config unless `required` is set.
pub fn load_from_file(path: &Path, required: bool) -> Result<DriverConfig, ConfigError> {
    if !path.exists() && !required {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DriverConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let config: DriverConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".lintgate.toml");
        fs::write(
            &config_path,
            r#"
report_types = ["html", "xml"]
output = "out/report.txt"
max_priority_1 = 0
max_priority_2 = 5
allow_duplicated_violations = true
disable_rules = ["todo comment"]

[rule_configurations]
LONG_LINE = 120
"#,
        )
        .unwrap();

        let config = load_from_file(&config_path, true).unwrap();
        assert_eq!(config.report_types, vec!["html", "xml"]);
        assert_eq!(config.output.as_deref(), Some(Path::new("out/report.txt")));
        assert_eq!(config.max_priority_1, Some(0));
        assert_eq!(config.max_priority_2, Some(5));
        assert_eq!(config.max_priority_3, None);
        assert!(config.allow_duplicated_violations);
        assert_eq!(config.disable_rules, vec!["todo comment"]);
        assert_eq!(config.rule_configurations.get("LONG_LINE"), Some(&120));
        // Unspecified fields keep their defaults
        assert!(!config.extensions.is_empty());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("lintgate.yaml");
        fs::write(
            &config_path,
            "report_types:\n  - json\nmax_priority_3: 20\n",
        )
        .unwrap();

        let config = load_from_file(&config_path, true).unwrap();
        assert_eq!(config.report_types, vec!["json"]);
        assert_eq!(config.max_priority_3, Some(20));
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("lintgate.json");
        fs::write(&config_path, r#"{"enable_rules": ["long line"]}"#).unwrap();

        let config = load_from_file(&config_path, true).unwrap();
        assert_eq!(config.enable_rules, vec!["long line"]);
        assert_eq!(config.report_types, vec!["text"]);
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join(DEFAULT_CONFIG_FILE), false).unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_from_file(&temp_dir.path().join("absent.toml"), true);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "report_types = [").unwrap();

        let result = load_from_file(&config_path, true);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
