//! Path expansion and normalization for manifest paths

use std::env;
use std::ffi::OsString;
use std::path::{is_separator, Component, Path, PathBuf, MAIN_SEPARATOR};

use super::ValidationError;

/// Check whether a raw path string ends with a path separator
///
/// rsync treats `src/` (the directory contents) differently from `src`
/// (the directory itself), so this bit has to survive normalization.
pub fn has_trailing_separator(raw: &str) -> bool {
	raw.chars().last().map_or(false, is_separator)
}

fn ends_with_separator(path: &Path) -> bool {
	path.to_string_lossy().chars().last().map_or(false, is_separator)
}

/// Fold `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root. The result never carries a
/// trailing separator unless it is the root itself.
pub fn normalize_lexically(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();
	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
			Component::CurDir => {}
			Component::ParentDir => {
				out.pop();
			}
			Component::Normal(part) => out.push(part),
		}
	}
	out
}

/// Expand a path against an explicit working directory and home directory
///
/// # Arguments
/// * `raw` - Path as written by the user
/// * `cwd` - Directory relative paths are resolved against
/// * `home` - Replacement for a leading `~`
///
/// # Returns
/// Absolute, lexically normalized path without a trailing separator
pub fn expand_path_in(
	raw: &str,
	cwd: &Path,
	home: Option<&Path>,
) -> Result<PathBuf, ValidationError> {
	let joined = if raw == "~" || raw.starts_with("~/") {
		let home = home.ok_or_else(|| {
			ValidationError::Path(format!("cannot expand '{}': HOME is not set", raw))
		})?;
		cwd.join(home).join(raw[1..].trim_start_matches('/'))
	} else {
		cwd.join(raw)
	};
	Ok(normalize_lexically(&joined))
}

/// Expand a manifest source key, keeping a trailing separator if it had one
pub fn expand_source_in(
	raw: &str,
	cwd: &Path,
	home: Option<&Path>,
) -> Result<PathBuf, ValidationError> {
	let path = expand_path_in(raw, cwd, home)?;
	if !has_trailing_separator(raw) || ends_with_separator(&path) {
		return Ok(path);
	}
	let mut os: OsString = path.into_os_string();
	os.push(MAIN_SEPARATOR.to_string());
	Ok(PathBuf::from(os))
}

/// Working and home directory used to expand relative manifest paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
	pub cwd: PathBuf,
	pub home: Option<PathBuf>,
}

impl PathContext {
	/// Capture the process working directory and `$HOME`
	pub fn from_env() -> Result<Self, ValidationError> {
		let cwd = env::current_dir().map_err(|e| {
			ValidationError::Path(format!("cannot resolve working directory: {}", e))
		})?;
		Ok(Self { cwd, home: env::var_os("HOME").map(PathBuf::from) })
	}

	/// See [`expand_path_in`]
	pub fn expand(&self, raw: &str) -> Result<PathBuf, ValidationError> {
		expand_path_in(raw, &self.cwd, self.home.as_deref())
	}

	/// See [`expand_source_in`]
	pub fn expand_source(&self, raw: &str) -> Result<PathBuf, ValidationError> {
		expand_source_in(raw, &self.cwd, self.home.as_deref())
	}
}

/// Join a per-entry destination onto the destination base
///
/// Leading separators on `destination` are ignored. `..` components are
/// not folded, so `../x` still resolves outside `base`. A trailing separator
/// is kept as written.
pub fn join_destination(base: &Path, destination: &str) -> PathBuf {
	base.join(destination.trim_start_matches(is_separator))
}
