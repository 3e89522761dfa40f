use clap::{Arg, ArgAction, Command};
use std::process::ExitCode;

use impbox::batch;
use impbox::callbacks::LoggingCallbacks;
use impbox::config::Config;
use impbox::logging::{self, error};
use impbox::supervisor::ProcessRunner;

#[tokio::main]
async fn main() -> ExitCode {
	let matches = Command::new("impbox")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Run rsync for every entry of a YAML manifest")
		.arg(
			Arg::new("dry-run")
				.long("dry-run")
				.action(ArgAction::SetTrue)
				.help("Report changes without transferring (also: DRY_RUN=1)"),
		)
		.arg(
			Arg::new("paths")
				.value_name("PATH")
				.action(ArgAction::Append)
				.num_args(0..)
				.help("Destination base directory, then manifest file"),
		)
		.get_matches();

	logging::init_tracing();

	let mut config = match Config::load() {
		Ok(config) => config,
		Err(e) => {
			error!("{}", e);
			return ExitCode::FAILURE;
		}
	};
	if matches.get_flag("dry-run") {
		config.dry_run = true;
	}

	let args: Vec<String> =
		matches.get_many::<String>("paths").map(|v| v.cloned().collect()).unwrap_or_default();

	match batch::run(&args, &config, &ProcessRunner, &LoggingCallbacks).await {
		Ok(code) => ExitCode::from(batch::exit_status_byte(code)),
		Err(e) => {
			error!("{}", e);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
