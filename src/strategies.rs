//! Sync modes and the rsync behavior each one maps to
//!
//! The mode set is closed: every manifest entry carries exactly one of
//! `synchronize`, `clone` or `move`, and `flags_for` covers all three.

use std::str::FromStr;

// ============================================================================
// SYNC MODE
// ============================================================================

/// How a single manifest entry is transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMode {
	/// Mirror the destination to match the source, deleting extraneous files
	Synchronize,

	/// Recursive copy that never deletes at the destination
	Clone,

	/// Recursive copy that removes source files once transferred
	Move,
}

impl SyncMode {
	/// All modes, in the order they are listed to users
	pub const ALL: [SyncMode; 3] = [SyncMode::Synchronize, SyncMode::Clone, SyncMode::Move];

	/// Canonical manifest spelling of the mode
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Synchronize => "synchronize",
			Self::Clone => "clone",
			Self::Move => "move",
		}
	}

	/// Comma separated list of valid mode names, for error messages
	pub fn names() -> String {
		Self::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ")
	}
}

impl FromStr for SyncMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"synchronize" => Ok(Self::Synchronize),
			"clone" => Ok(Self::Clone),
			"move" => Ok(Self::Move),
			_ => Err(format!("Unknown sync mode: {}. Valid options: {}", s, Self::names())),
		}
	}
}

impl std::fmt::Display for SyncMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

// ============================================================================
// MODE POLICY
// ============================================================================

pub const ARCHIVE: &str = "--archive";
pub const DELETE: &str = "--delete";
pub const REMOVE_SOURCE_FILES: &str = "--remove-source-files";
pub const MODIFY_WINDOW: &str = "--modify-window";
pub const DRY_RUN: &str = "--dry-run";

/// Flags requested for every entry regardless of mode: resumable partial
/// transfers, per-file reporting, human readable sizes, itemized changes.
pub const REPORTING_FLAGS: [&str; 4] =
	["--partial", "--verbose", "--human-readable", "--itemize-changes"];

/// rsync behavior flags for a mode, in invocation order
pub fn flags_for(mode: SyncMode) -> &'static [&'static str] {
	match mode {
		SyncMode::Synchronize => &[ARCHIVE, DELETE],
		SyncMode::Clone => &[ARCHIVE],
		SyncMode::Move => &[ARCHIVE, REMOVE_SOURCE_FILES],
	}
}


// vim: ts=4
