//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HEALTHSCOPE_MODEL_PATH` | `models` |
//! | `HEALTHSCOPE_LOG_MODE` | `auto` |
//! | `HEALTHSCOPE_LOG_FILE` | `healthscope.log` |
//! | `HEALTHSCOPE_REQUIRE_SIGNED_MODELS` | `false` |
//! | `HEALTHSCOPE_MODEL_PUBKEY_B64` | unset |
//! | `HEALTHSCOPE_MODEL_PUBKEY_B64_FILE` | unset |

use std::fs;
use std::path::PathBuf;

use crate::adapters::artifact::{verifying_key_from_b64, IntegrityPolicy};
use crate::HealthScopeError;

pub const MODEL_PATH_ENV: &str = "HEALTHSCOPE_MODEL_PATH";
pub const LOG_MODE_ENV: &str = "HEALTHSCOPE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "HEALTHSCOPE_LOG_FILE";
pub const REQUIRE_SIGNED_ENV: &str = "HEALTHSCOPE_REQUIRE_SIGNED_MODELS";
pub const PUBKEY_ENV: &str = "HEALTHSCOPE_MODEL_PUBKEY_B64";
pub const PUBKEY_FILE_ENV: &str = "HEALTHSCOPE_MODEL_PUBKEY_B64_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "healthscope.log";

/// Where log output goes.
///
/// Writing logs to the terminal corrupts the TUI (alternate screen), so
/// `Auto` picks a file when stdout is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub require_signed: bool,
    pub pubkey_b64: Option<String>,
    pub pubkey_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            require_signed: false,
            pubkey_b64: None,
            pubkey_file: None,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            model_path: non_empty(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            log_mode: non_empty(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            require_signed: lookup(REQUIRE_SIGNED_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            pubkey_b64: non_empty(PUBKEY_ENV),
            pubkey_file: non_empty(PUBKEY_FILE_ENV).map(PathBuf::from),
        }
    }

    /// Integrity policy for the model directory.
    ///
    /// The inline key wins over the key file.
    ///
    /// # Errors
    /// Returns `HealthScopeError::Config` if a configured key cannot be read
    /// or decoded, or if signed models are required without any key.
    pub fn integrity_policy(&self) -> Result<IntegrityPolicy, HealthScopeError> {
        let b64 = match (&self.pubkey_b64, &self.pubkey_file) {
            (Some(b64), _) => Some(b64.clone()),
            (None, Some(path)) => Some(fs::read_to_string(path).map_err(|e| {
                HealthScopeError::Config(format!("Failed reading pubkey file {path:?}: {e}"))
            })?),
            (None, None) => None,
        };

        let verifying_key = b64
            .map(|b64| verifying_key_from_b64(&b64))
            .transpose()
            .map_err(|e| HealthScopeError::Config(e.to_string()))?;

        if self.require_signed && verifying_key.is_none() {
            return Err(HealthScopeError::Config(format!(
                "{REQUIRE_SIGNED_ENV} is set but neither {PUBKEY_ENV} nor {PUBKEY_FILE_ENV} is configured"
            )));
        }

        Ok(IntegrityPolicy {
            require_signed: self.require_signed,
            verifying_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use ed25519_dalek::SigningKey;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn pubkey_b64() -> String {
        let key = SigningKey::from_bytes(&[7u8; 32]).verifying_key();
        base64::engine::general_purpose::STANDARD.encode(key.to_bytes())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path, PathBuf::from("models"));

        let policy = config.integrity_policy().expect("policy");
        assert!(!policy.require_signed);
        assert!(policy.verifying_key.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (MODEL_PATH_ENV, "/opt/models"),
            (LOG_MODE_ENV, "STDOUT"),
            (LOG_FILE_ENV, "/tmp/hs.log"),
            (REQUIRE_SIGNED_ENV, "Yes"),
        ]));
        assert_eq!(config.model_path, PathBuf::from("/opt/models"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/hs.log"));
        assert!(config.require_signed);
    }

    #[test]
    fn test_bool_parsing() {
        for v in ["1", "true", "TRUE", "yes", "YES"] {
            assert!(parse_bool(v), "{v}");
        }
        for v in ["0", "false", "no", ""] {
            assert!(!parse_bool(v), "{v}");
        }
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("bogus"), LogMode::Auto);
    }

    #[test]
    fn test_signed_requires_key() {
        let config = AppConfig::from_lookup(lookup(&[(REQUIRE_SIGNED_ENV, "true")]));
        assert!(matches!(
            config.integrity_policy(),
            Err(HealthScopeError::Config(_))
        ));

        let b64 = pubkey_b64();
        let config = AppConfig::from_lookup(lookup(&[
            (REQUIRE_SIGNED_ENV, "true"),
            (PUBKEY_ENV, b64.as_str()),
        ]));
        let policy = config.integrity_policy().expect("policy");
        assert!(policy.require_signed);
        assert!(policy.verifying_key.is_some());
    }

    #[test]
    fn test_pubkey_from_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("pub.b64");
        std::fs::write(&path, format!("{}\n", pubkey_b64())).expect("write");

        let path_str = path.to_string_lossy().to_string();
        let config = AppConfig::from_lookup(lookup(&[(PUBKEY_FILE_ENV, path_str.as_str())]));
        let policy = config.integrity_policy().expect("policy");
        assert!(policy.verifying_key.is_some());
    }

    #[test]
    fn test_bad_pubkey_is_config_error() {
        let config = AppConfig::from_lookup(lookup(&[(PUBKEY_ENV, "not-base64!")]));
        assert!(matches!(
            config.integrity_policy(),
            Err(HealthScopeError::Config(_))
        ));
    }
}
