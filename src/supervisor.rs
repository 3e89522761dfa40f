//! Supervision of transfer subprocesses
//!
//! One transfer runs at a time. Its stdout and stderr are joined on a single
//! pipe, drained while it runs and relayed line by line to the callbacks,
//! so a chatty rsync never blocks on a full pipe and progress shows up live.

use std::io::{self, BufRead};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::callbacks::TransferCallbacks;
use crate::error::LaunchError;
use crate::invocation::Invocation;
use crate::logging::*;
use crate::strategies::SyncMode;

/// Result of one transfer that was started successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Success,
	Failure { exit_code: i32 },
}

impl Outcome {
	pub fn from_status(status: ExitStatus) -> Self {
		if status.success() {
			Outcome::Success
		} else {
			Outcome::Failure { exit_code: exit_code(status) }
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Outcome::Success)
	}

	/// Exit code of the transfer, 0 on success
	pub fn exit_code(&self) -> i32 {
		match self {
			Outcome::Success => 0,
			Outcome::Failure { exit_code } => *exit_code,
		}
	}
}

/// Non-zero code for a failed status; signals map to 128 + signal
fn exit_code(status: ExitStatus) -> i32 {
	if let Some(code) = status.code() {
		return code;
	}
	#[cfg(unix)]
	{
		use std::os::unix::process::ExitStatusExt;
		if let Some(signal) = status.signal() {
			return 128 + signal;
		}
	}
	1
}

/// Runs one transfer to completion
#[async_trait]
pub trait TransferRunner: Send + Sync {
	/// Run `invocation` for the entry keyed `source`
	///
	/// Returns `Err` only when the tool could not be run at all; a tool
	/// that ran and failed is an `Ok(Outcome::Failure)`.
	async fn run(
		&self,
		source: &str,
		mode: SyncMode,
		invocation: &Invocation,
		callbacks: &dyn TransferCallbacks,
	) -> Result<Outcome, LaunchError>;
}

/// Runs transfers as real subprocesses
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl TransferRunner for ProcessRunner {
	async fn run(
		&self,
		source: &str,
		mode: SyncMode,
		invocation: &Invocation,
		callbacks: &dyn TransferCallbacks,
	) -> Result<Outcome, LaunchError> {
		debug!("Spawning: {}", invocation.command_line());

		// stdout and stderr share one pipe so lines arrive in the order the
		// tool wrote them.
		let (reader, writer) = io::pipe().map_err(|e| LaunchError::StdioUnavailable {
			what: format!("output pipe: {}", e),
		})?;
		let writer_err = writer.try_clone().map_err(|e| LaunchError::StdioUnavailable {
			what: format!("output pipe: {}", e),
		})?;

		let mut command = Command::new(&invocation.program);
		command
			.args(&invocation.args)
			.stdin(Stdio::null())
			.stdout(writer)
			.stderr(writer_err)
			.kill_on_drop(true);
		let spawned = command.spawn();
		// The command holds the parent's copies of the write end; the reader
		// only sees EOF once they are gone.
		drop(command);

		let mut child = spawned.map_err(|e| LaunchError::SpawnFailed {
			program: invocation.program.clone(),
			source: e,
		})?;

		callbacks.on_launch(source, mode, child.id());

		let (tx, mut rx) = mpsc::unbounded_channel();
		let pump = tokio::task::spawn_blocking(move || read_lines(reader, tx));
		while let Some(line) = rx.recv().await {
			callbacks.on_output(source, &line);
		}
		pump.await.map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

		let status = child.wait().await?;
		let outcome = Outcome::from_status(status);
		if let Outcome::Failure { exit_code } = outcome {
			callbacks.on_failure(source, exit_code);
		}
		Ok(outcome)
	}
}

/// Split merged output into trimmed lines until every writer has closed
fn read_lines(reader: io::PipeReader, tx: mpsc::UnboundedSender<String>) -> io::Result<()> {
	let mut reader = io::BufReader::new(reader);
	let mut buf = Vec::new();
	loop {
		buf.clear();
		let read = reader.read_until(b'\n', &mut buf)?;
		if read == 0 {
			return Ok(());
		}
		let line = String::from_utf8_lossy(&buf);
		if tx.send(line.trim_end().to_string()).is_err() {
			// Receiver gone, nobody is listening any more
			return Ok(());
		}
	}
}


// vim: ts=4
