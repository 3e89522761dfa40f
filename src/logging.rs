//! Tracing prelude and subscriber setup
//!
//! Relayed rsync output is logged at info, so the default filter keeps
//! impbox at info and everything else at warn. `RUST_LOG` replaces it:
//!
//! ```bash
//! RUST_LOG=impbox=debug impbox /mnt/backup manifest.yml
//! ```

pub use tracing::{debug, error, info, warn};

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset, empty or unparsable
pub const DEFAULT_FILTER: &str = "warn,impbox=info";

fn filter_from(directives: Option<&str>) -> EnvFilter {
	directives
		.map(str::trim)
		.filter(|d| !d.is_empty())
		.and_then(|d| EnvFilter::try_new(d).ok())
		.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber
///
/// Targets are left out of each line; rsync output reads as plain text.
pub fn init_tracing() {
	let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
	tracing_subscriber::fmt()
		.with_env_filter(filter_from(directives.as_deref()))
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}


// vim: ts=4
