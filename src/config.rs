//! Run configuration
//!
//! The configuration follows a priority chain:
//! 1. Built-in defaults (Config::default())
//! 2. Config file named by `IMPBOX_CONFIG` (YAML, camelCase keys)
//! 3. Environment variables (`DRY_RUN`, `IMPBOX_RSYNC`)
//! 4. CLI flags (highest priority, applied by the binary)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming an optional config file
pub const CONFIG_FILE_ENV: &str = "IMPBOX_CONFIG";

/// Environment toggle that turns every entry into a dry run
pub const DRY_RUN_ENV: &str = "DRY_RUN";

/// Environment override for the transfer tool executable
pub const RSYNC_COMMAND_ENV: &str = "IMPBOX_RSYNC";

/// Options that apply to every entry of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Report intended changes without transferring anything
	pub dry_run: bool,

	/// Transfer tool executable, looked up on PATH unless absolute
	pub rsync_command: String,
}

impl Default for Config {
	fn default() -> Self {
		Config { dry_run: false, rsync_command: "rsync".to_string() }
	}
}

impl Config {
	/// Config file (if `IMPBOX_CONFIG` names one) overlaid with the environment
	pub fn load() -> Result<Self, ConfigError> {
		let file = env::var_os(CONFIG_FILE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
		let config = match file {
			Some(path) => Self::from_file(&path)?,
			None => Self::default(),
		};
		Ok(config.with_overrides(
			env::var(DRY_RUN_ENV).ok().as_deref(),
			env::var(RSYNC_COMMAND_ENV).ok().as_deref(),
		))
	}

	/// Read a YAML config file; keys it leaves out keep their defaults
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path)
			.map_err(|e| ConfigError::Unreadable { path: path.to_path_buf(), source: e })?;
		serde_yaml::from_str(&text)
			.map_err(|e| ConfigError::Syntax { path: path.to_path_buf(), source: e })
	}

	/// Single-line rendering of the effective configuration for logs
	pub fn describe(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|e| format!("<unprintable: {}>", e))
	}

	/// Apply raw environment values on top of this configuration
	pub fn with_overrides(mut self, dry_run: Option<&str>, rsync_command: Option<&str>) -> Self {
		if let Some(value) = dry_run {
			self.dry_run = is_truthy(value);
		}
		if let Some(command) = rsync_command.map(str::trim).filter(|c| !c.is_empty()) {
			self.rsync_command = command.to_string();
		}
		self
	}
}

/// Interpret a boolean-like environment value
///
/// Anything set is true except the usual spellings of "off".
pub fn is_truthy(value: &str) -> bool {
	!matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_default() {
		let config = Config::default();
		assert!(!config.dry_run);
		assert_eq!(config.rsync_command, "rsync");
	}

	#[test]
	fn test_is_truthy() {
		for value in &["1", "true", "yes", "on", "TRUE", "anything"] {
			assert!(is_truthy(value), "{} should enable", value);
		}
		for value in &["", "0", "false", "No", "OFF", " off "] {
			assert!(!is_truthy(value), "{:?} should disable", value);
		}
	}

	#[test]
	fn test_overrides_unset_keep_defaults() {
		assert_eq!(Config::default().with_overrides(None, None), Config::default());
	}

	#[test]
	fn test_overrides_apply() {
		let config = Config::default().with_overrides(Some("1"), Some("/opt/bin/rsync"));
		assert!(config.dry_run);
		assert_eq!(config.rsync_command, "/opt/bin/rsync");
	}

	#[test]
	fn test_blank_command_override_ignored() {
		let config = Config::default().with_overrides(None, Some("  "));
		assert_eq!(config.rsync_command, "rsync");
	}

	#[test]
	fn test_from_file_overlays_defaults() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("impbox.yml");
		fs::write(&path, "rsyncCommand: /opt/bin/rsync\n").unwrap();

		let config = Config::from_file(&path).unwrap();
		assert!(!config.dry_run);
		assert_eq!(config.rsync_command, "/opt/bin/rsync");
	}

	#[test]
	fn test_from_file_errors() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("impbox.yml");

		let err = Config::from_file(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Unreadable { .. }));

		fs::write(&path, "dryRun: [not, a, bool]\n").unwrap();
		let err = Config::from_file(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Syntax { .. }));
		assert!(err.to_string().starts_with("cannot parse config"));
	}

	#[test]
	fn test_describe_is_single_line() {
		let config = Config { dry_run: true, rsync_command: "rsync".to_string() };
		assert_eq!(config.describe(), r#"{"dryRun":true,"rsyncCommand":"rsync"}"#);
	}

	#[test]
	fn test_config_serialization() {
		let config = Config { dry_run: true, rsync_command: "rsync3".to_string() };
		let json = serde_json::to_string(&config).expect("Failed to serialize");
		assert!(json.contains("\"dryRun\":true"));
		assert!(json.contains("\"rsyncCommand\":\"rsync3\""));
		let deserialized: Config = serde_json::from_str(&json).expect("Failed to deserialize");
		assert_eq!(config, deserialized);
	}

	#[test]
	fn test_config_partial_deserialization() {
		let config: Config = serde_json::from_str(r#"{"dryRun": true}"#).unwrap();
		assert!(config.dry_run);
		assert_eq!(config.rsync_command, "rsync");
	}
}

// vim: ts=4
