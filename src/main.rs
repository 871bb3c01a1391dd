mod cli;
mod settings;

use std::time::Instant;

use anyhow::{Context, Result};
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use log::info;
use routedeck::dropdown::MenuGeometry;
use routedeck::geocode::{GeocodeClient, GeocodeRuntime, HttpGeocoder};
use routedeck::{
	App, FileSelectionStore, RecordingNavigator, ScreenConfig, SearchScreen, app_dirs, catalog,
	logging, theme,
};
use settings::ResolvedConfig;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	logging::initialize(&app_dirs::log_file()?)?;
	run_search(cli.output, resolved)
}

/// Open the drawer and print the outcome in the chosen format.
fn run_search(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let geocoder = HttpGeocoder::new(&settings.geocode_url, settings.geocode_timeout)
		.context("failed to build geocoding client")?;
	info!("geocoding through {}", geocoder.endpoint());
	let geocode = GeocodeRuntime::spawn(
		GeocodeClient::with_limit(geocoder, settings.geocode_limit),
		settings.debounce,
	);

	let store = FileSelectionStore::new(&settings.handoff_dir);
	let config = ScreenConfig {
		initial_query: settings.initial_query,
		tab: settings.tab,
		filters: settings.filters,
		depart: settings.depart,
		menu_geometry: MenuGeometry::CELLS,
		templates: catalog::default_templates(),
	};
	let screen = SearchScreen::new(
		config,
		geocode,
		store,
		RecordingNavigator::default(),
		Instant::now(),
	);
	let outcome = routedeck::run(App::new(screen, settings.theme))?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
