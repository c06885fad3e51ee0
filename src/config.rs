//! Session configuration.
//!
//! A [`Config`] is a flat, ordered mapping of keys to scalar values. It starts
//! from built-in defaults and may be overlaid by a configuration file. Known
//! keys are type-checked on the way in so the typed accessors never have to
//! guess.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML; anything else is
//! parsed as JSON. A file must hold a single mapping.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::observability::CONFIG_LOAD_FAILURES;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Key holding the display name of the system.
pub const SYSTEM_NAME: &str = "system_name";
/// Key holding the version string.
pub const VERSION: &str = "version";
/// Key holding the history bound.
pub const MAX_HISTORY: &str = "max_history";
/// Key holding the name of the default model.
pub const DEFAULT_MODEL: &str = "default_model";

const DEFAULT_SYSTEM_NAME: &str = "Mi Sistema GPT";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_MAX_HISTORY: usize = 10;
const DEFAULT_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Merged configuration for a chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: Map<String, Value>,
}

/// The outcome of [`Config::load`].
///
/// Loading never fails outright. When the file exists but cannot be used,
/// `config` holds the defaults and `warning` says why.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    /// The configuration to run with.
    pub config: Config,

    /// Set when a configuration file was found but ignored.
    pub warning: Option<Error>,
}

impl Config {
    /// Creates a configuration holding only the defaults.
    ///
    /// Defaults:
    /// - system_name: Mi Sistema GPT
    /// - version: 1.0.0
    /// - max_history: 10
    /// - default_model: gpt-3.5-turbo
    pub fn new() -> Self {
        let mut values = Map::new();
        values.insert(SYSTEM_NAME.to_string(), Value::from(DEFAULT_SYSTEM_NAME));
        values.insert(VERSION.to_string(), Value::from(DEFAULT_VERSION));
        values.insert(MAX_HISTORY.to_string(), Value::from(DEFAULT_MAX_HISTORY));
        values.insert(DEFAULT_MODEL.to_string(), Value::from(DEFAULT_DEFAULT_MODEL));
        Self { values }
    }

    /// Loads the file at `path` over the defaults, falling back to the
    /// defaults when the file is missing or unusable.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigLoad {
        let path = path.as_ref();
        if !path.exists() {
            return ConfigLoad {
                config: Config::new(),
                warning: None,
            };
        }
        match Config::from_file(path) {
            Ok(config) => ConfigLoad {
                config,
                warning: None,
            },
            Err(err) => {
                CONFIG_LOAD_FAILURES.click();
                ConfigLoad {
                    config: Config::new(),
                    warning: Some(err),
                }
            }
        }
    }

    /// Reads the file at `path` and merges it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not valid JSON or YAML
    /// - The document is not a mapping
    /// - Any value fails validation (see [`Config::merge`])
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let document = read_document(path).map_err(|err| {
            Error::config_load(
                format!("could not load {}", path.display()),
                Some(Box::new(err)),
            )
        })?;
        let Value::Object(overrides) = document else {
            return Err(Error::config_load(
                format!("{} must contain a key/value mapping", path.display()),
                None,
            ));
        };
        let mut config = Config::new();
        config.merge(overrides).map_err(|err| {
            Error::config_load(
                format!("rejected {}", path.display()),
                Some(Box::new(err)),
            )
        })?;
        Ok(config)
    }

    /// Overlays `overrides` onto this configuration.
    ///
    /// Existing keys keep their position; new keys are appended in the order
    /// given. Nothing is applied unless every value validates.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a value is not a scalar, if
    /// `system_name`, `version` or `default_model` is not text, or if
    /// `max_history` is not a positive integer.
    pub fn merge(&mut self, overrides: Map<String, Value>) -> Result<()> {
        for (key, value) in &overrides {
            validate(key, value)?;
        }
        for (key, value) in overrides {
            self.values.insert(key, value);
        }
        Ok(())
    }

    /// Sets the history bound.
    pub fn with_max_history(mut self, max_history: NonZeroUsize) -> Self {
        self.values
            .insert(MAX_HISTORY.to_string(), Value::from(max_history.get()));
        self
    }

    /// Returns the display name of the system.
    pub fn system_name(&self) -> &str {
        self.text(SYSTEM_NAME).unwrap_or(DEFAULT_SYSTEM_NAME)
    }

    /// Returns the version string.
    pub fn version(&self) -> &str {
        self.text(VERSION).unwrap_or(DEFAULT_VERSION)
    }

    /// Returns the name of the default model.
    pub fn default_model(&self) -> &str {
        self.text(DEFAULT_MODEL).unwrap_or(DEFAULT_DEFAULT_MODEL)
    }

    /// Returns the maximum number of history entries to retain.
    pub fn max_history(&self) -> NonZeroUsize {
        self.values
            .get(MAX_HISTORY)
            .and_then(positive_usize)
            .or(NonZeroUsize::new(DEFAULT_MAX_HISTORY))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterates over `(key, display value)` pairs in insertion order.
    ///
    /// Text values are shown without quotes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value)))
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the configuration file named by `path`, or the default file.
pub fn config_path(path: Option<&str>) -> PathBuf {
    PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE))
}

fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn positive_usize(value: &Value) -> Option<NonZeroUsize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .and_then(NonZeroUsize::new)
}

fn validate(key: &str, value: &Value) -> Result<()> {
    match key {
        SYSTEM_NAME | VERSION | DEFAULT_MODEL if !value.is_string() => Err(Error::validation(
            "expects text",
            Some(key.to_string()),
        )),
        MAX_HISTORY if positive_usize(value).is_none() => Err(Error::validation(
            "expects a positive integer",
            Some(key.to_string()),
        )),
        _ if value.is_array() || value.is_object() || value.is_null() => Err(Error::validation(
            "expects a scalar value",
            Some(key.to_string()),
        )),
        _ => Ok(()),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::process;

    use serde_json::json;

    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sistema-{}-{name}", process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn default_config() {
        let config = Config::new();
        assert_eq!(config.system_name(), "Mi Sistema GPT");
        assert_eq!(config.version(), "1.0.0");
        assert_eq!(config.max_history().get(), 10);
        assert_eq!(config.default_model(), "gpt-3.5-turbo");
        let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["system_name", "version", "max_history", "default_model"]
        );
    }

    #[test]
    fn merge_keeps_positions_and_appends_new_keys() {
        let mut config = Config::new();
        config
            .merge(object(json!({
                "temperature": 0.7,
                "max_history": 4,
                "system_name": "Otro Sistema",
            })))
            .unwrap();
        let pairs: Vec<(&str, String)> = config.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("system_name", "Otro Sistema".to_string()),
                ("version", "1.0.0".to_string()),
                ("max_history", "4".to_string()),
                ("default_model", "gpt-3.5-turbo".to_string()),
                ("temperature", "0.7".to_string()),
            ]
        );
        assert_eq!(config.max_history().get(), 4);
    }

    #[test]
    fn merge_is_all_or_nothing() {
        let mut config = Config::new();
        let err = config
            .merge(object(json!({"system_name": "X", "max_history": 0})))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(config, Config::new());
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::new();
        for bad in [
            json!({"max_history": -3}),
            json!({"max_history": "10"}),
            json!({"version": 2}),
            json!({"extra": [1, 2]}),
            json!({"extra": null}),
        ] {
            assert!(config.merge(object(bad.clone())).is_err(), "accepted {bad}");
        }
        config.merge(object(json!({"extra": true}))).unwrap();
        assert_eq!(config.get("extra"), Some(&Value::Bool(true)));
    }

    #[test]
    fn missing_file_is_silent() {
        let load = Config::load(std::env::temp_dir().join("sistema-does-not-exist.json"));
        assert!(load.warning.is_none());
        assert_eq!(load.config, Config::new());
    }

    #[test]
    fn loads_json_file() {
        let path = scratch_file(
            "loads.json",
            r#"{"max_history": 3, "default_model": "local"}"#,
        );
        let load = Config::load(&path);
        fs::remove_file(&path).ok();
        assert!(load.warning.is_none());
        assert_eq!(load.config.max_history().get(), 3);
        assert_eq!(load.config.default_model(), "local");
    }

    #[test]
    fn loads_yaml_file() {
        let path = scratch_file("loads.yaml", "system_name: Sistema YAML\nmax_history: 6\n");
        let load = Config::load(&path);
        fs::remove_file(&path).ok();
        assert!(load.warning.is_none());
        assert_eq!(load.config.system_name(), "Sistema YAML");
        assert_eq!(load.config.max_history().get(), 6);
    }

    #[test]
    fn malformed_file_warns_and_keeps_defaults() {
        let path = scratch_file("malformed.json", "{ not json");
        let load = Config::load(&path);
        fs::remove_file(&path).ok();
        let warning = load.warning.expect("malformed config should warn");
        assert!(warning.is_config_load());
        let source = std::error::Error::source(&warning).expect("parse error kept as source");
        assert!(source.to_string().starts_with("Serialization error: JSON error"));
        assert_eq!(load.config, Config::new());
    }

    #[test]
    fn unreadable_file_reports_io_source() {
        let err = Config::from_file(std::env::temp_dir()).unwrap_err();
        assert!(err.is_config_load());
        let source = std::error::Error::source(&err).expect("read error kept as source");
        assert!(source.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn malformed_yaml_reports_yaml_source() {
        let path = scratch_file("malformed.yaml", "key: [unclosed");
        let err = Config::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();
        let source = std::error::Error::source(&err).expect("parse error kept as source");
        assert!(source.to_string().starts_with("Serialization error: YAML error"));
    }

    #[test]
    fn non_mapping_file_warns() {
        let path = scratch_file("array.json", "[1, 2, 3]");
        let load = Config::load(&path);
        fs::remove_file(&path).ok();
        assert!(load.warning.is_some());
        assert_eq!(load.config, Config::new());
    }

    #[test]
    fn invalid_max_history_in_file_warns() {
        let path = scratch_file("zero.json", r#"{"max_history": 0}"#);
        let load = Config::load(&path);
        fs::remove_file(&path).ok();
        assert!(load.warning.is_some());
        assert_eq!(load.config.max_history().get(), 10);
    }

    #[test]
    fn config_path_defaults() {
        assert_eq!(config_path(None), PathBuf::from("config.json"));
        assert_eq!(config_path(Some("alt.yaml")), PathBuf::from("alt.yaml"));
    }
}
