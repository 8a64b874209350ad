//! Typed test-data loading.
//!
//! Suites keep their fixtures (credentials, form inputs, expected labels)
//! in YAML or JSON files. These loaders are schema-agnostic: the caller
//! defines the `Deserialize` type, the loader only does I/O and parsing.

use crate::result::HojearResult;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a YAML fixture file into a typed value.
///
/// # Errors
///
/// `Io` on read failure, `Yaml` on parse failure.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> HojearResult<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml_ng::from_str(&contents)?)
}

/// Parse a YAML string into a typed value.
///
/// # Errors
///
/// `Yaml` on parse failure.
pub fn load_yaml_str<T: DeserializeOwned>(contents: &str) -> HojearResult<T> {
    Ok(serde_yaml_ng::from_str(contents)?)
}

/// Load a JSON fixture file into a typed value.
///
/// # Errors
///
/// `Io` on read failure, `Json` on parse failure.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> HojearResult<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::result::HojearError;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct AppFixture {
        name: String,
        environment: String,
        replicas: u32,
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp("name: demo-app\nenvironment: staging\nreplicas: 3\n");
        let fixture: AppFixture = load_yaml(file.path()).unwrap();
        assert_eq!(
            fixture,
            AppFixture {
                name: "demo-app".into(),
                environment: "staging".into(),
                replicas: 3,
            }
        );
    }

    #[test]
    fn test_load_yaml_str() {
        let fixture: AppFixture =
            load_yaml_str("name: x\nenvironment: prod\nreplicas: 1\n").unwrap();
        assert_eq!(fixture.environment, "prod");
    }

    #[test]
    fn test_load_json_file() {
        let file = write_temp(r#"{"name": "demo", "environment": "dev", "replicas": 2}"#);
        let fixture: AppFixture = load_json(file.path()).unwrap();
        assert_eq!(fixture.replicas, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_yaml::<AppFixture>("/nonexistent/fixture.yaml").unwrap_err();
        assert!(matches!(err, HojearError::Io(_)));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let err = load_yaml_str::<AppFixture>("name: [unclosed").unwrap_err();
        assert!(matches!(err, HojearError::Yaml(_)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let file = write_temp("{not json");
        let err = load_json::<AppFixture>(file.path()).unwrap_err();
        assert!(matches!(err, HojearError::Json(_)));
    }
}
