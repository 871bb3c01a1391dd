use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use routedeck::app_dirs;
use routedeck::geocode::{DEFAULT_DEBOUNCE, DEFAULT_LIMIT, DEFAULT_TIMEOUT};
use routedeck::{DepartOption, FilterKey, FilterSet, Theme, TransportMode, theme};

use crate::cli::CliArgs;

pub const DEFAULT_GEOCODE_URL: &str = "http://localhost:8000/api/maps";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	geocode: GeocodeSection,
	ui: UiSection,
	handoff: HandoffSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GeocodeSection {
	base_url: Option<String>,
	limit: Option<usize>,
	timeout_ms: Option<u64>,
	debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	initial_query: Option<String>,
	start_tab: Option<String>,
	filters: Option<Vec<String>>,
	depart: Option<String>,
	theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HandoffSection {
	dir: Option<PathBuf>,
}

pub struct ResolvedConfig {
	pub geocode_url: String,
	pub geocode_limit: usize,
	pub geocode_timeout: Duration,
	pub debounce: Duration,
	pub initial_query: String,
	pub tab: TransportMode,
	pub filters: FilterSet,
	pub depart: DepartOption,
	pub theme_name: String,
	pub theme: Theme,
	pub handoff_dir: PathBuf,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Geocoder: {}", self.geocode_url);
		println!("  Suggestion limit: {}", self.geocode_limit);
		println!("  Request timeout: {} ms", self.geocode_timeout.as_millis());
		println!("  Debounce: {} ms", self.debounce.as_millis());
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
		println!("  Start tab: {}", self.tab.tab_label());
		let filters: Vec<&str> = self.filters.iter().map(FilterKey::chip_label).collect();
		if filters.is_empty() {
			println!("  Filters: (none)");
		} else {
			println!("  Filters: {}", filters.join(", "));
		}
		println!("  Depart: {}", self.depart);
		println!("  UI theme: {}", self.theme_name);
		println!("  Hand-off directory: {}", self.handoff_dir.display());
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("routedeck")
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("ui.filters"),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join("routedeck.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(url) = cli.geocode_url.clone() {
			self.geocode.base_url = Some(url);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.ui.initial_query = Some(query);
		}
		if let Some(tab) = cli.tab {
			self.ui.start_tab = Some(tab.as_str().to_string());
		}
		if let Some(filters) = &cli.filters {
			self.ui.filters = Some(filters.clone());
		}
		if let Some(depart) = cli.depart.clone() {
			self.ui.depart = Some(depart);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if let Some(dir) = cli.handoff_dir.clone() {
			self.handoff.dir = Some(dir);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let geocode_url = self
			.geocode
			.base_url
			.map(|url| url.trim().to_string())
			.filter(|url| !url.is_empty())
			.unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string());
		let geocode_limit = match self.geocode.limit {
			Some(0) => bail!("geocode.limit must be at least 1"),
			Some(limit) => limit,
			None => DEFAULT_LIMIT,
		};
		let geocode_timeout = self
			.geocode
			.timeout_ms
			.map_or(DEFAULT_TIMEOUT, Duration::from_millis);
		let debounce = self
			.geocode
			.debounce_ms
			.map_or(DEFAULT_DEBOUNCE, Duration::from_millis);

		let tab = match self.ui.start_tab {
			Some(tab) => tab
				.parse()
				.with_context(|| format!("invalid start tab '{tab}'"))?,
			None => TransportMode::default(),
		};
		let filters = match self.ui.filters {
			Some(values) => parse_filters(&values)?,
			None => [FilterKey::Accessible].into_iter().collect(),
		};
		let depart = match self.ui.depart {
			Some(label) => label
				.parse()
				.with_context(|| format!("invalid depart option '{label}'"))?,
			None => DepartOption::default(),
		};

		let theme_name = self.ui.theme.unwrap_or_else(|| "transit".to_string());
		let Some(theme) = theme::by_name(&theme_name) else {
			bail!(
				"unknown theme '{theme_name}' (available: {})",
				theme::names().join(", ")
			);
		};

		let handoff_dir = match self.handoff.dir {
			Some(dir) => dir,
			None => app_dirs::get_data_dir()?,
		};

		Ok(ResolvedConfig {
			geocode_url,
			geocode_limit,
			geocode_timeout,
			debounce,
			initial_query: self.ui.initial_query.unwrap_or_default(),
			tab,
			filters,
			depart,
			theme_name,
			theme,
			handoff_dir,
		})
	}
}

/// Blank entries are ignored; unknown names are an error.
fn parse_filters(values: &[String]) -> Result<FilterSet> {
	let mut filters = FilterSet::new();
	for value in values.iter().map(|value| value.trim()) {
		if value.is_empty() {
			continue;
		}
		let key: FilterKey = value
			.parse()
			.with_context(|| format!("invalid filter '{value}'"))?;
		filters.insert(key);
	}
	Ok(filters)
}
