//! # impbox - Manifest-driven rsync batch runner
//!
//! impbox reads a YAML manifest mapping source paths to destinations and
//! sync modes, validates all of it, then runs rsync once per entry in
//! order. Every entry is attempted; the process exit code is that of the
//! first entry that failed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use impbox::batch;
//! use impbox::callbacks::LoggingCallbacks;
//! use impbox::config::Config;
//! use impbox::supervisor::ProcessRunner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let args = ["/mnt/backup", "manifest.yml"];
//!     let code = batch::run(&args, &Config::load()?, &ProcessRunner, &LoggingCallbacks).await?;
//!     std::process::exit(code);
//! }
//! ```
//!
//! ## Compiling and running separately
//!
//! ```rust,ignore
//! use impbox::batch::BatchExecutor;
//!
//! let manifest = impbox::manifest::load(manifest_path, destination_base)?;
//! let config = Config { dry_run: true, ..Config::default() };
//! let code = BatchExecutor::new(&ProcessRunner, &LoggingCallbacks, &config)
//!     .run_all(&manifest)
//!     .await?;
//! ```

pub mod batch;
pub mod callbacks;
pub mod cli;
pub mod config;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod manifest;
pub mod strategies;
pub mod supervisor;
pub mod validation;

// Re-export commonly used types and functions
pub use batch::{BatchExecutor, RunOutcome};
pub use config::Config;
pub use error::{LaunchError, RunError, UsageError, ValidationError};
pub use manifest::{Manifest, ManifestEntry};
pub use strategies::SyncMode;
pub use supervisor::{Outcome, ProcessRunner, TransferRunner};

// vim: ts=4
