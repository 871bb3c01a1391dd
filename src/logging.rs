//! Log setup for the terminal front end.
//!
//! The drawer logs through the `log` facade. Because the UI owns the terminal,
//! records go to a file in the cache directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter, in `env_logger` syntax.
pub const LOG_ENV: &str = "ROUTEDECK_LOG";
const DEFAULT_FILTER: &str = "info";

/// Route log records to `path`, appending to any previous session's log.
pub fn initialize(path: &Path) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
		.target(Target::Pipe(Box::new(file)))
		.format_timestamp_millis()
		.try_init()
		.context("logger was already initialized")
}
