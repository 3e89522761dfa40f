//! End-to-end run through the real process runner
//!
//! A small shell script stands in for rsync: it echoes its arguments and
//! fails for sources whose name contains "fail-".
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

use impbox::batch;
use impbox::callbacks::TransferCallbacks;
use impbox::config::Config;
use impbox::strategies::SyncMode;
use impbox::supervisor::ProcessRunner;

const FAKE_RSYNC: &str = r#"#!/bin/sh
echo "args: $*"
case "$*" in
	*fail-a*) echo "rsync: failed to open" 1>&2; exit 5 ;;
	*fail-b*) exit 6 ;;
esac
exit 0
"#;

#[derive(Default)]
struct Transcript {
	launched: Mutex<Vec<String>>,
	lines: Mutex<Vec<String>>,
	failures: Mutex<Vec<(String, i32)>>,
}

impl TransferCallbacks for Transcript {
	fn on_launch(&self, source: &str, _mode: SyncMode, _pid: Option<u32>) {
		self.launched.lock().unwrap().push(source.to_string());
	}

	fn on_output(&self, _source: &str, line: &str) {
		self.lines.lock().unwrap().push(line.to_string());
	}

	fn on_failure(&self, source: &str, exit_code: i32) {
		self.failures.lock().unwrap().push((source.to_string(), exit_code));
	}
}

fn write_fake_rsync(dir: &Path) -> String {
	let path = dir.join("fake-rsync");
	fs::write(&path, FAKE_RSYNC).unwrap();
	fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
	path.display().to_string()
}

fn write_manifest(dir: &Path, names: &[&str]) -> String {
	let mut text = String::new();
	for name in names {
		let source = dir.join(name);
		fs::create_dir(&source).unwrap();
		text.push_str(&format!(
			"\"{}/\":\n  destination: {}\n  mode: synchronize\n  modify-window: 2\n",
			source.display(),
			name
		));
	}
	let path = dir.join("manifest.yml");
	fs::write(&path, text).unwrap();
	path.display().to_string()
}

// Both runs share one script so the executable is written exactly once.
#[tokio::test]
async fn test_manifest_run_through_fake_rsync() {
	let dir = TempDir::new().unwrap();
	let base = dir.path().join("base");
	fs::create_dir(&base).unwrap();
	let rsync = write_fake_rsync(dir.path());
	let manifest = write_manifest(dir.path(), &["ok-0", "fail-a", "fail-b", "ok-1"]);
	let args = [base.display().to_string(), manifest];

	// Regular run: every entry attempted, first failure's code wins
	let transcript = Transcript::default();
	let config = Config { dry_run: false, rsync_command: rsync.clone() };
	let code = batch::run(&args, &config, &ProcessRunner, &transcript).await.unwrap();

	assert_eq!(code, 5);
	let launched = transcript.launched.lock().unwrap().clone();
	assert_eq!(launched.len(), 4);
	assert!(launched[0].ends_with("ok-0/"));
	assert!(launched[3].ends_with("ok-1/"));

	let failures = transcript.failures.lock().unwrap().clone();
	assert_eq!(failures.len(), 2);
	assert_eq!(failures[0].1, 5);
	assert_eq!(failures[1].1, 6);

	let lines = transcript.lines.lock().unwrap().clone();
	assert!(lines.contains(&"rsync: failed to open".to_string()));
	let first = format!(
		"args: --archive --delete --modify-window 2 --partial --verbose --human-readable --itemize-changes {}/ {}",
		dir.path().join("ok-0").display(),
		base.join("ok-0").display()
	);
	assert_eq!(lines[0], first);

	// Dry run: the flag reaches the tool for every entry
	let transcript = Transcript::default();
	let config = Config { dry_run: true, rsync_command: rsync };
	batch::run(&args, &config, &ProcessRunner, &transcript).await.unwrap();

	let arg_lines: Vec<String> = transcript
		.lines
		.lock()
		.unwrap()
		.iter()
		.filter(|l| l.starts_with("args: "))
		.cloned()
		.collect();
	assert_eq!(arg_lines.len(), 4);
	assert!(arg_lines.iter().all(|l| l.contains(" --dry-run ")));
}
