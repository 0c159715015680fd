//! Mock driver configuration, loadable from a `connmock.toml` file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reserved URL prefix routed to the mock driver.
pub const DEFAULT_URL_PREFIX: &str = "jdbc:mock:";
/// Prefix that replaces the reserved one before the real driver is chosen.
pub const DEFAULT_TARGET_PREFIX: &str = "jdbc:";
/// Connection properties printed as `[HIDDEN]` unless credentials are revealed.
pub const DEFAULT_SECRET_KEYS: &[&str] = &["password"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

/// Settings of a [`MockDriver`](crate::MockDriver). Every field is optional;
/// the `effective_*` accessors apply the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MockConfig {
    /// URL prefix handled by the mock driver. Default: "jdbc:mock:".
    pub url_prefix: Option<String>,
    /// Replacement for the reserved prefix. Default: "jdbc:".
    pub target_prefix: Option<String>,
    /// Print credentials in trace logs. Default: false.
    pub reveal_credentials: Option<bool>,
    /// Property keys treated as credentials. Default: ["password"].
    pub secret_keys: Option<Vec<String>>,
    /// TOML document with a top-level `version` string. Default: the
    /// metadata packaged with this crate.
    pub metadata_file: Option<PathBuf>,
}

impl MockConfig {
    /// Parses and validates a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<inline>")
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url_prefix = self.effective_url_prefix();
        if url_prefix.is_empty() || !url_prefix.ends_with(':') {
            return Err(ConfigError::ValidationFailed {
                field: "url_prefix".into(),
                message: format!("{url_prefix:?} must be non-empty and end with ':'"),
            });
        }
        if url_prefix == self.effective_target_prefix() {
            return Err(ConfigError::ValidationFailed {
                field: "target_prefix".into(),
                message: "must differ from url_prefix".into(),
            });
        }
        Ok(())
    }

    pub fn effective_url_prefix(&self) -> &str {
        self.url_prefix.as_deref().unwrap_or(DEFAULT_URL_PREFIX)
    }

    pub fn effective_target_prefix(&self) -> &str {
        self.target_prefix.as_deref().unwrap_or(DEFAULT_TARGET_PREFIX)
    }

    pub fn effective_reveal_credentials(&self) -> bool {
        self.reveal_credentials.unwrap_or(false)
    }

    pub fn effective_secret_keys(&self) -> Vec<&str> {
        match &self.secret_keys {
            Some(keys) => keys.iter().map(String::as_str).collect(),
            None => DEFAULT_SECRET_KEYS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config = MockConfig::from_toml("").unwrap();
        assert_eq!(config.effective_url_prefix(), "jdbc:mock:");
        assert_eq!(config.effective_target_prefix(), "jdbc:");
        assert!(!config.effective_reveal_credentials());
        assert_eq!(config.effective_secret_keys(), vec!["password"]);
    }

    #[test]
    fn fields_override_defaults() {
        let config = MockConfig::from_toml(
            r#"
url_prefix = "db:fake:"
target_prefix = "db:"
reveal_credentials = true
secret_keys = ["password", "token"]
"#,
        )
        .unwrap();
        assert_eq!(config.effective_url_prefix(), "db:fake:");
        assert_eq!(config.effective_target_prefix(), "db:");
        assert!(config.effective_reveal_credentials());
        assert_eq!(config.effective_secret_keys(), vec!["password", "token"]);
    }

    #[test]
    fn prefix_without_colon_is_rejected() {
        let err = MockConfig::from_toml("url_prefix = \"jdbc:mock\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn identical_prefixes_are_rejected() {
        let err = MockConfig::from_toml("url_prefix = \"jdbc:\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn wrong_types_fail_to_parse() {
        let err = MockConfig::from_toml("reveal_credentials = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = MockConfig::load(Path::new("/nonexistent/connmock.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
