use std::fs;
use std::io;
use std::path::Path;

use derive_more::{Display, Error, From};
use fault_formation::{Config, ConfigError};

#[derive(Debug, Display, Error, From)]
pub enum SettingsError {
    #[display("could not read settings: {source}")]
    Read { source: io::Error },
    #[display("could not parse settings: {source}")]
    Parse { source: serde_json::Error },
    #[display("invalid settings: {source}")]
    Invalid { source: ConfigError },
}

/// Loads terrain settings from a JSON file. Missing fields take their
/// default values.
pub fn load_settings(path: &Path) -> Result<Config, SettingsError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use fault_formation::FaultKind;
    use tempfile::NamedTempFile;

    use super::*;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_partial_settings() {
        let file = settings_file(r#"{ "width": 64, "fault_kind": "circle", "seed": 3 }"#);
        let config = load_settings(file.path()).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.length, 200);
        assert_eq!(config.fault_kind, FaultKind::Circle);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = settings_file("{ width: ");
        let result = load_settings(file.path());
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let file = settings_file(r#"{ "width": 1 }"#);
        let err = load_settings(file.path()).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                source: ConfigError::GridTooSmall { .. }
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid settings: terrain grid must be at least 2x2 cells, got 1x200"
        );
    }
}
