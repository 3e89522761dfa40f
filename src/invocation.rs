//! Translation of manifest entries into rsync command lines

use std::ffi::OsString;

use crate::config::Config;
use crate::manifest::ManifestEntry;
use crate::strategies::{flags_for, DRY_RUN, MODIFY_WINDOW, REPORTING_FLAGS};

/// A fully assembled external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
	pub program: String,
	pub args: Vec<OsString>,
}

impl Invocation {
	pub fn new<I, S>(program: &str, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		Invocation { program: program.to_string(), args: args.into_iter().map(Into::into).collect() }
	}

	/// Arguments as UTF-8 strings (lossy), for logging and assertions
	pub fn args_lossy(&self) -> Vec<String> {
		self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
	}

	/// Space separated rendering of the whole command
	pub fn command_line(&self) -> String {
		let mut line = self.program.clone();
		for arg in self.args_lossy() {
			line.push(' ');
			line.push_str(&arg);
		}
		line
	}
}

/// Build the rsync invocation for one entry
///
/// Argument order is fixed: mode flags, `--modify-window N` when the entry
/// sets a tolerance, `--dry-run` when the run asks for it, the reporting
/// flags, then source and destination.
pub fn build(entry: &ManifestEntry, config: &Config) -> Invocation {
	let mut args: Vec<OsString> = flags_for(entry.mode).iter().map(OsString::from).collect();

	if let Some(window) = entry.modify_window {
		args.push(MODIFY_WINDOW.into());
		args.push(window.to_string().into());
	}

	if config.dry_run {
		args.push(DRY_RUN.into());
	}

	args.extend(REPORTING_FLAGS.iter().map(OsString::from));
	args.push(entry.source.clone().into_os_string());
	args.push(entry.destination.clone().into_os_string());

	Invocation { program: config.rsync_command.clone(), args }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::strategies::SyncMode;
	use std::path::PathBuf;

	fn entry(mode: SyncMode, modify_window: Option<u64>) -> ManifestEntry {
		ManifestEntry {
			source: PathBuf::from("/data/photos/"),
			destination: PathBuf::from("/mnt/backup/photos"),
			mode,
			modify_window,
		}
	}

	#[test]
	fn test_build_synchronize_full_order() {
		let invocation = build(&entry(SyncMode::Synchronize, None), &Config::default());
		assert_eq!(invocation.program, "rsync");
		assert_eq!(
			invocation.args_lossy(),
			vec![
				"--archive",
				"--delete",
				"--partial",
				"--verbose",
				"--human-readable",
				"--itemize-changes",
				"/data/photos/",
				"/mnt/backup/photos",
			]
		);
	}

	#[test]
	fn test_build_with_window_and_dry_run() {
		let config = Config { dry_run: true, ..Config::default() };
		let invocation = build(&entry(SyncMode::Move, Some(2)), &config);
		assert_eq!(
			invocation.args_lossy(),
			vec![
				"--archive",
				"--remove-source-files",
				"--modify-window",
				"2",
				"--dry-run",
				"--partial",
				"--verbose",
				"--human-readable",
				"--itemize-changes",
				"/data/photos/",
				"/mnt/backup/photos",
			]
		);
	}

	#[test]
	fn test_build_uses_configured_command() {
		let config = Config { rsync_command: "/usr/local/bin/rsync".to_string(), ..Config::default() };
		let invocation = build(&entry(SyncMode::Clone, None), &config);
		assert_eq!(invocation.program, "/usr/local/bin/rsync");
	}

	#[test]
	fn test_build_is_deterministic() {
		let e = entry(SyncMode::Clone, Some(7));
		let config = Config::default();
		assert_eq!(build(&e, &config), build(&e, &config));
	}

	#[test]
	fn test_command_line() {
		let invocation = Invocation::new("rsync", vec!["--archive", "/a/", "/b"]);
		assert_eq!(invocation.command_line(), "rsync --archive /a/ /b");
	}
}

// vim: ts=4
