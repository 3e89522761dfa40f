//! Callback traits for transfer events
//!
//! The process supervisor and batch executor report everything they see
//! through a `TransferCallbacks` sink instead of logging directly, so a
//! caller can capture transfer output without a global subscriber.

use crate::logging::*;
use crate::strategies::SyncMode;

/// Sink for per-entry transfer events
pub trait TransferCallbacks: Send + Sync {
	/// Called once the transfer process for an entry has been started
	fn on_launch(&self, _source: &str, _mode: SyncMode, _pid: Option<u32>) {}

	/// Called for every output line, trailing whitespace already stripped
	fn on_output(&self, _source: &str, _line: &str) {}

	/// Called when the transfer process exits with a non-zero status
	fn on_failure(&self, _source: &str, _exit_code: i32) {}
}

/// Callback implementation that discards every event
pub struct NoCallbacks;

impl TransferCallbacks for NoCallbacks {}

/// Callback implementation that forwards events to `tracing`
pub struct LoggingCallbacks;

impl TransferCallbacks for LoggingCallbacks {
	fn on_launch(&self, source: &str, mode: SyncMode, pid: Option<u32>) {
		match pid {
			Some(pid) => info!("rsync {} (mode: {}, PID: {})", source, mode, pid),
			None => info!("rsync {} (mode: {})", source, mode),
		}
	}

	fn on_output(&self, _source: &str, line: &str) {
		info!("{}", line);
	}

	fn on_failure(&self, source: &str, exit_code: i32) {
		error!("rsync {} failed (exit code {})", source, exit_code);
	}
}
