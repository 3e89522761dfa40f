//! Command line argument validation
//!
//! The binary takes exactly two positional arguments: the destination base
//! directory and the manifest file. Both are checked here, base first,
//! before the manifest is read.

use std::path::PathBuf;

use crate::error::UsageError;
use crate::validation::PathContext;

/// Validated, absolute run paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
	pub destination_base: PathBuf,
	pub manifest: PathBuf,
}

/// Validate positional arguments against the process environment
pub fn resolve_arguments<S: AsRef<str>>(args: &[S]) -> Result<RunPaths, UsageError> {
	let paths = PathContext::from_env().map_err(|e| UsageError::Path(e.to_string()))?;
	resolve_arguments_with(args, &paths)
}

/// Validate positional arguments, expanding relative paths with `paths`
pub fn resolve_arguments_with<S: AsRef<str>>(
	args: &[S],
	paths: &PathContext,
) -> Result<RunPaths, UsageError> {
	if args.len() > 2 {
		return Err(UsageError::ExtraneousArguments);
	}

	let base = args.get(0).ok_or(UsageError::MissingDestinationBase)?;
	let destination_base =
		paths.expand(base.as_ref()).map_err(|e| UsageError::Path(e.to_string()))?;
	if !destination_base.is_dir() {
		return Err(UsageError::BaseNotDirectory { path: destination_base });
	}

	let manifest = args.get(1).ok_or(UsageError::MissingManifest)?;
	let manifest = paths.expand(manifest.as_ref()).map_err(|e| UsageError::Path(e.to_string()))?;
	if !manifest.is_file() {
		return Err(UsageError::ManifestNotFile { path: manifest });
	}

	Ok(RunPaths { destination_base, manifest })
}


// vim: ts=4
