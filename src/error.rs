//! Error types for impbox runs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use crate::validation::ValidationError;

/// Main error type for a run
///
/// Every variant is fatal. A transfer that runs and exits non-zero is not
/// an error; it is reported through the run's exit code instead.
#[derive(Debug, Error)]
pub enum RunError {
	/// Bad command line
	#[error(transparent)]
	Usage(#[from] UsageError),

	/// Manifest failed to compile
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Transfer tool could not be run at all
	#[error(transparent)]
	Launch(#[from] LaunchError),
}

/// Command line errors, raised before any work begins
#[derive(Debug, Error)]
pub enum UsageError {
	#[error("Extraneous arguments given")]
	ExtraneousArguments,

	#[error("File path to base destination directory must be given")]
	MissingDestinationBase,

	#[error("File path to manifest must be given")]
	MissingManifest,

	#[error("Directory '{}' does not exist", .path.display())]
	BaseNotDirectory { path: PathBuf },

	#[error("File '{}' does not exist", .path.display())]
	ManifestNotFile { path: PathBuf },

	/// Argument could not be expanded to an absolute path
	#[error("Invalid path argument: {0}")]
	Path(String),
}

/// Config file errors, raised before any work begins
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("cannot read config {}: {source}", .path.display())]
	Unreadable { path: PathBuf, source: io::Error },

	#[error("cannot parse config {}: {source}", .path.display())]
	Syntax { path: PathBuf, source: serde_yaml::Error },
}

/// Failures to start or supervise the transfer tool
#[derive(Debug, Error)]
pub enum LaunchError {
	/// Subprocess spawn failed
	#[error("Failed to spawn '{program}': {source}")]
	SpawnFailed { program: String, source: io::Error },

	/// Stdio pipe was not available after spawn
	#[error("Stdio unavailable: {what}")]
	StdioUnavailable { what: String },

	/// Reading output or waiting for exit failed
	#[error("I/O error while supervising transfer: {0}")]
	Io(#[from] io::Error),
}

// vim: ts=4
