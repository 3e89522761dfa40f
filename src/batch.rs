//! Sequential execution of a compiled manifest
//!
//! Entries run strictly in document order, one process at a time. A
//! failing entry does not stop the batch; the first failure's exit code
//! becomes the exit code of the whole run.

use std::convert::TryFrom;

use crate::callbacks::TransferCallbacks;
use crate::cli;
use crate::config::Config;
use crate::error::{LaunchError, RunError};
use crate::invocation;
use crate::logging::*;
use crate::manifest::{self, Manifest};
use crate::supervisor::{Outcome, TransferRunner};

/// Tracks the first non-zero exit code seen during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
	first_failure: Option<i32>,
}

impl RunOutcome {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a failed entry; returns false if an earlier failure already won
	pub fn record(&mut self, exit_code: i32) -> bool {
		if self.first_failure.is_some() {
			return false;
		}
		self.first_failure = Some(exit_code);
		true
	}

	pub fn first_failure(&self) -> Option<i32> {
		self.first_failure
	}

	/// Final exit code: the first failure's code, or 0
	pub fn exit_code(&self) -> i32 {
		self.first_failure.unwrap_or(0)
	}
}

/// Drives a manifest through a `TransferRunner`
pub struct BatchExecutor<'a> {
	runner: &'a dyn TransferRunner,
	callbacks: &'a dyn TransferCallbacks,
	config: &'a Config,
}

impl<'a> BatchExecutor<'a> {
	pub fn new(
		runner: &'a dyn TransferRunner,
		callbacks: &'a dyn TransferCallbacks,
		config: &'a Config,
	) -> Self {
		BatchExecutor { runner, callbacks, config }
	}

	/// Run every entry and return the run's exit code
	///
	/// A launch error aborts the batch immediately; entries after it are
	/// not attempted.
	pub async fn run_all(&self, manifest: &Manifest) -> Result<i32, LaunchError> {
		let mut outcome = RunOutcome::new();

		for (source, entry) in manifest.iter() {
			let invocation = invocation::build(entry, self.config);
			match self.runner.run(source, entry.mode, &invocation, self.callbacks).await? {
				Outcome::Success => {}
				Outcome::Failure { exit_code } => {
					if !outcome.record(exit_code) {
						debug!(
							"{} failed with {}, keeping earlier exit code {}",
							source,
							exit_code,
							outcome.exit_code()
						);
					}
				}
			}
		}

		Ok(outcome.exit_code())
	}
}

/// Validate arguments, compile the manifest and run it
///
/// Nothing is spawned unless the arguments and the whole manifest are valid.
pub async fn run<S: AsRef<str>>(
	args: &[S],
	config: &Config,
	runner: &dyn TransferRunner,
	callbacks: &dyn TransferCallbacks,
) -> Result<i32, RunError> {
	let paths = cli::resolve_arguments(args)?;

	info!("Destination base: {}", paths.destination_base.display());
	info!("Manifest: {}", paths.manifest.display());
	if config.dry_run {
		info!("Dry run: no files will be transferred");
	}
	debug!("Configuration: {}", config.describe());

	let manifest = manifest::load(&paths.manifest, &paths.destination_base)?;
	debug!("Manifest has {} entries", manifest.len());

	let code = BatchExecutor::new(runner, callbacks, config).run_all(&manifest).await?;
	Ok(code)
}

/// Map a run exit code onto a process exit status byte
///
/// 0 stays 0; anything that does not fit in 1..=255 becomes 1 so a
/// failed run never reports success.
pub fn exit_status_byte(code: i32) -> u8 {
	if code == 0 {
		return 0;
	}
	u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}


// vim: ts=4
