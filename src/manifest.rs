//! Manifest compilation
//!
//! A manifest document maps source paths to property bags:
//!
//! ```yaml
//! ~/Music/:
//!   destination: music
//!   mode: synchronize
//! ~/Downloads/incoming:
//!   destination: inbox/
//!   mode: move
//!   modify-window: 1
//! ```
//!
//! Compilation validates every entry up front and fails on the first bad
//! one, so nothing is transferred from a manifest that does not compile.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::logging::*;
use crate::strategies::SyncMode;
use crate::validation::{join_destination, PathContext, ValidationError};

const DESTINATION_KEY: &str = "destination";
const MODE_KEY: &str = "mode";
const MODIFY_WINDOW_KEY: &str = "modify-window";

/// One validated source-to-destination directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
	/// Absolute source path; a trailing separator means "directory contents"
	pub source: PathBuf,

	/// Absolute destination path under the destination base
	pub destination: PathBuf,

	pub mode: SyncMode,

	/// Timestamp tolerance in seconds (None = rsync default)
	pub modify_window: Option<u64>,
}

/// Compiled manifest, in document order
///
/// Each entry is paired with the source key exactly as written in the
/// document, which is what gets logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
	entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[(String, ManifestEntry)] {
		&self.entries
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
		self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
	}
}

/// Compile a parsed document, resolving relative sources against `paths`
///
/// # Arguments
/// * `document` - Untyped manifest tree
/// * `destination_base` - Absolute directory every destination is joined onto
/// * `paths` - Working and home directory for source expansion
pub fn compile_with(
	document: &Value,
	destination_base: &Path,
	paths: &PathContext,
) -> Result<Manifest, ValidationError> {
	let root = match document {
		Value::Mapping(map) => map,
		_ => return Err(ValidationError::RootNotMapping),
	};

	let mut entries = Vec::with_capacity(root.len());
	for (key, params) in root {
		let key = match key {
			Value::String(s) => s.as_str(),
			other => return Err(ValidationError::SourceNotString { found: describe(other) }),
		};
		let entry = compile_entry(key, params, destination_base, paths)?;
		debug!("Compiled {} -> {} ({})", key, entry.destination.display(), entry.mode);
		entries.push((key.to_string(), entry));
	}

	Ok(Manifest { entries })
}

/// Compile a parsed document against the process working directory
pub fn compile(document: &Value, destination_base: &Path) -> Result<Manifest, ValidationError> {
	compile_with(document, destination_base, &PathContext::from_env()?)
}

/// Parse YAML text into a manifest
///
/// `origin` is only used for error reporting.
pub fn parse(
	text: &str,
	origin: &Path,
	destination_base: &Path,
) -> Result<Manifest, ValidationError> {
	let document: Value = serde_yaml::from_str(text)
		.map_err(|e| ValidationError::Syntax { path: origin.to_path_buf(), source: e })?;
	compile(&document, destination_base)
}

/// Read and compile a manifest file
pub fn load(manifest_path: &Path, destination_base: &Path) -> Result<Manifest, ValidationError> {
	let text = fs::read_to_string(manifest_path).map_err(|e| ValidationError::Unreadable {
		path: manifest_path.to_path_buf(),
		source: e,
	})?;
	parse(&text, manifest_path, destination_base)
}

fn compile_entry(
	key: &str,
	params: &Value,
	destination_base: &Path,
	paths: &PathContext,
) -> Result<ManifestEntry, ValidationError> {
	let source = paths.expand_source(key)?;
	if !source.exists() {
		return Err(ValidationError::SourceMissing { path: source });
	}

	let params = match params {
		Value::Mapping(map) => map,
		_ => return Err(ValidationError::EntryNotMapping { source_path: key.to_string() }),
	};

	let destination = match field(params, DESTINATION_KEY) {
		Some(Value::String(s)) => join_destination(destination_base, s),
		Some(_) => {
			return Err(ValidationError::DestinationNotString { source_path: key.to_string() })
		}
		None => return Err(ValidationError::MissingDestination { source_path: key.to_string() }),
	};

	let mode = match field(params, MODE_KEY) {
		Some(Value::String(s)) => s
			.parse::<SyncMode>()
			.map_err(|_| ValidationError::UnknownMode { mode: s.clone() })?,
		Some(_) => return Err(ValidationError::ModeNotString { source_path: key.to_string() }),
		None => return Err(ValidationError::MissingMode { source_path: key.to_string() }),
	};

	let modify_window = match field(params, MODIFY_WINDOW_KEY) {
		None => None,
		Some(Value::Number(n)) if n.as_u64().is_some() => n.as_u64(),
		Some(_) => {
			return Err(ValidationError::InvalidModifyWindow { source_path: key.to_string() })
		}
	};

	Ok(ManifestEntry { source, destination, mode, modify_window })
}

// Explicit nulls count as absent.
fn field<'a>(params: &'a Mapping, name: &str) -> Option<&'a Value> {
	match params.get(name) {
		None | Some(Value::Null) => None,
		Some(value) => Some(value),
	}
}

fn describe(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => format!("'{}'", s),
		Value::Sequence(_) => "a sequence".to_string(),
		Value::Mapping(_) => "a mapping".to_string(),
		Value::Tagged(_) => "a tagged value".to_string(),
	}
}


// vim: ts=4
