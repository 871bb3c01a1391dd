//! Where `routedeck` keeps its configuration, hand-off and log files.
//!
//! Each location can be redirected through an environment variable; otherwise
//! the platform defaults from the `directories` crate apply.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "routedeck";
const APPLICATION: &str = "routedeck";

const CONFIG_DIR_ENV: &str = "ROUTEDECK_CONFIG_DIR";
const DATA_DIR_ENV: &str = "ROUTEDECK_DATA_DIR";
const CACHE_DIR_ENV: &str = "ROUTEDECK_CACHE_DIR";

/// File name of the session log inside the cache directory.
pub const LOG_FILE_NAME: &str = "routedeck.log";

#[derive(Clone, Copy)]
enum DirKind {
	Config,
	Data,
	Cache,
}

impl DirKind {
	fn env_var(self) -> &'static str {
		match self {
			Self::Config => CONFIG_DIR_ENV,
			Self::Data => DATA_DIR_ENV,
			Self::Cache => CACHE_DIR_ENV,
		}
	}

	fn platform_dir(self, dirs: &ProjectDirs) -> PathBuf {
		match self {
			Self::Config => dirs.config_local_dir(),
			Self::Data => dirs.data_local_dir(),
			Self::Cache => dirs.cache_dir(),
		}
		.to_path_buf()
	}
}

fn resolve(kind: DirKind) -> Result<PathBuf> {
	if let Some(dir) = non_empty(env::var_os(kind.env_var())) {
		return Ok(dir);
	}
	let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine a home directory for routedeck"))?;
	Ok(kind.platform_dir(&dirs))
}

/// An unset or empty override means "use the default".
fn non_empty(value: Option<std::ffi::OsString>) -> Option<PathBuf> {
	value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// Directory searched for `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	resolve(DirKind::Config)
}

/// Directory the selected route is handed off through.
pub fn get_data_dir() -> Result<PathBuf> {
	resolve(DirKind::Data)
}

pub fn get_cache_dir() -> Result<PathBuf> {
	resolve(DirKind::Cache)
}

/// Full path of the session log.
pub fn log_file() -> Result<PathBuf> {
	Ok(get_cache_dir()?.join(LOG_FILE_NAME))
}
