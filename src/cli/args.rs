use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use routedeck::app_dirs;

/// Produce the full version banner including the directories in use.
fn long_version() -> &'static str {
	let mut details = format!("routedeck {}", env!("CARGO_PKG_VERSION"));
	let dirs = [
		("config", app_dirs::get_config_dir()),
		("data", app_dirs::get_data_dir()),
		("cache", app_dirs::get_cache_dir()),
	];
	for (label, dir) in dirs {
		let shown = match dir {
			Ok(path) => path.display().to_string(),
			Err(err) => format!("unavailable ({err})"),
		};
		let _ = write!(details, "\n{label} directory: {shown}");
	}

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = cli_command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

fn cli_command() -> Command {
	CliArgs::command()
}

#[derive(Parser, Debug)]
#[command(
	name = "routedeck",
	version,
	long_version = long_version(),
	about = "Search transit routes from the terminal",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "ROUTEDECK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'q',
		long = "query",
		value_name = "QUERY",
		help = "Start with this destination text (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short = 't',
		long = "tab",
		value_enum,
		help = "Transport tab shown first (default: bus)"
	)]
	pub(crate) tab: Option<TabArg>,
	#[arg(
		short = 'f',
		long = "filter",
		value_name = "FILTER",
		value_delimiter = ',',
		help = "Filters active at start, e.g. accessible,co2 (default: accessible)"
	)]
	pub(crate) filters: Option<Vec<String>>,
	#[arg(
		short = 'd',
		long = "depart",
		value_name = "WHEN",
		help = "Departure option label, e.g. \"Leave at 8:30 PM\" (default: Depart Now)"
	)]
	pub(crate) depart: Option<String>,
	#[arg(
		long = "geocode-url",
		value_name = "URL",
		env = "ROUTEDECK_GEOCODE_URL",
		help = "Base URL of the geocoding service (default: http://localhost:8000/api/maps)"
	)]
	pub(crate) geocode_url: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: transit)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "handoff-dir",
		value_name = "DIR",
		help = "Where the selected route is stored (default: data directory)"
	)]
	pub(crate) handoff_dir: Option<PathBuf>,
	#[arg(
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

/// Transport tabs accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum TabArg {
	Bus,
	Train,
	Mrt,
}

impl TabArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			TabArg::Bus => "bus",
			TabArg::Train => "train",
			TabArg::Mrt => "mrt",
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> CliArgs {
		let mut matches = cli_command().get_matches_from(args);
		CliArgs::from_arg_matches_mut(&mut matches).expect("parses")
	}

	#[test]
	fn command_supports_custom_styles() {
		assert!(cli_command().get_about().is_some());
	}

	#[test]
	fn parse_cli_accepts_default_arguments() {
		let parsed = parse(&["routedeck"]);
		assert_eq!(parsed.output, OutputFormat::Plain);
		assert_eq!(parsed.tab, None);
		assert!(parsed.filters.is_none());
	}

	#[test]
	fn filters_split_on_commas() {
		let parsed = parse(&["routedeck", "--tab", "mrt", "-f", "accessible,co2", "-q", "KL"]);
		assert_eq!(parsed.tab.map(TabArg::as_str), Some("mrt"));
		assert_eq!(
			parsed.filters,
			Some(vec!["accessible".to_string(), "co2".to_string()])
		);
		assert_eq!(parsed.initial_query.as_deref(), Some("KL"));
	}
}
