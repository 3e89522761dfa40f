//! Manifest validation
//!
//! This module provides the error type raised while compiling a manifest
//! and the path helpers used to normalize manifest paths:
//! - Manifest structure and field validation errors
//! - Path expansion (home directory, working directory, `.`/`..` folding)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod path;

pub use path::*;

/// Error raised while compiling a manifest document
///
/// Any of these aborts the run before a transfer process is started.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// The document root is not a mapping of source paths
	#[error("root must be a mapping")]
	RootNotMapping,

	/// A manifest key is not a string
	#[error("source path must be a string, got {found}")]
	SourceNotString { found: String },

	/// A manifest value is not a property mapping
	#[error("entry for '{source_path}' must be a mapping")]
	EntryNotMapping { source_path: String },

	/// The normalized source path is absent from the filesystem
	#[error("{} does not exist", .path.display())]
	SourceMissing { path: PathBuf },

	/// The required `destination` field is absent
	#[error("missing destination for '{source_path}'")]
	MissingDestination { source_path: String },

	/// The `destination` field is not a string
	#[error("destination for '{source_path}' must be a string")]
	DestinationNotString { source_path: String },

	/// The required `mode` field is absent
	#[error("missing mode for '{source_path}'")]
	MissingMode { source_path: String },

	/// The `mode` field is not a string
	#[error("mode for '{source_path}' must be a string")]
	ModeNotString { source_path: String },

	/// The `mode` field names no known mode
	#[error("unknown mode '{mode}' (modes: {})", crate::strategies::SyncMode::names())]
	UnknownMode { mode: String },

	/// The `modify-window` field is present but not a non-negative integer
	#[error("modify-window must be an integer (entry '{source_path}')")]
	InvalidModifyWindow { source_path: String },

	/// The document is not valid YAML
	#[error("cannot parse manifest {}: {source}", .path.display())]
	Syntax { path: PathBuf, source: serde_yaml::Error },

	/// The manifest file could not be read
	#[error("cannot read manifest {}: {source}", .path.display())]
	Unreadable { path: PathBuf, source: io::Error },

	/// A path could not be expanded
	#[error("invalid path: {0}")]
	Path(String),
}
