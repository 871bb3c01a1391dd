use std::thread;
use std::time::Duration;

use super::*;
use crate::geocode::{GeocodeClient, GeocodeError, PlaceSearch};
use crate::handoff::{JOURNEY_DETAILS_RISK, MemorySelectionStore, RecordingNavigator};
use crate::sheet::{SHEET_MAX, SHEET_MID, SHEET_MIN};
use crate::types::{Coordinate, StationKind};

#[derive(Clone, Default)]
struct FixedPlaces;

impl PlaceSearch for FixedPlaces {
	fn lookup(&self, query: &str, _limit: usize) -> Result<Vec<Place>, GeocodeError> {
		Ok(vec![Place {
			name: format!("{query} Sentral"),
			coordinate: Coordinate::new(3.1343, 101.6865),
			rank: 1,
		}])
	}
}

type TestScreen = SearchScreen<MemorySelectionStore, RecordingNavigator>;

fn screen_with(config: ScreenConfig) -> TestScreen {
	let geocode = GeocodeRuntime::spawn(GeocodeClient::new(FixedPlaces), Duration::ZERO);
	SearchScreen::new(
		config,
		geocode,
		MemorySelectionStore::default(),
		RecordingNavigator::default(),
		Instant::now(),
	)
}

fn screen() -> TestScreen {
	screen_with(ScreenConfig::default())
}

fn stations(list: &RouteList) -> Vec<&str> {
	list.routes().iter().map(Route::station).collect()
}

#[test]
fn blank_query_lists_generic_bus_stations() {
	let mut screen = screen();
	let with_filter = screen.visible_routes();
	assert_eq!(stations(&with_filter), vec!["Bus Station", "Bus Station"]);

	screen.toggle_filter(FilterKey::Accessible);
	assert!(!screen.state().filters().contains(FilterKey::Accessible));
	assert_eq!(screen.visible_routes(), with_filter);
}

#[test]
fn metro_tab_distinguishes_mrt_and_lrt() {
	let mut screen = screen();
	screen.set_query("Central", Instant::now());
	screen.select_tab(TransportMode::Mrt);
	assert_eq!(
		stations(&screen.visible_routes()),
		vec!["Central MRT Station", "Central LRT Station"]
	);
}

#[test]
fn depart_menu_selection_survives_outside_click() {
	let mut screen = screen();
	let trigger = Bounds::new(16.0, 200.0, 140.0, 36.0);
	screen.toggle_depart_menu(trigger);
	let menu = screen.view().menu.expect("menu open");
	assert_eq!(menu.anchor.top, 240.0);
	assert_eq!(menu.anchor.left, 16.0);

	let second_row = Point::new(menu.bounds.left + 5.0, menu.bounds.top + 50.0);
	assert_eq!(screen.pointer_down(second_row), Propagation::Stop);
	assert!(screen.view().menu.is_none());

	assert_eq!(
		screen.pointer_down(Point::new(600.0, 10.0)),
		Propagation::Continue
	);
	let view = screen.view();
	assert_eq!(view.depart, DepartOption::LeaveAt2000);
	assert!(view.menu.is_none());
}

#[test]
fn selecting_a_risky_route_opens_the_risk_journey() {
	let mut screen = screen();
	let target = screen.select_route(2);
	assert_eq!(target.path, JOURNEY_DETAILS_RISK);
	assert_eq!(screen.navigator().last(), Some(&target));
	let stored = screen.store().load().expect("load").expect("stored");
	assert_eq!(stored.id(), 2);
	assert!(stored.is_risk());
}

#[test]
fn unmapped_route_opens_generic_transit_screen() {
	let mut templates = catalog::default_templates();
	let mut extra = templates[2].clone();
	extra.id = 9;
	extra.station_kind = StationKind::Train;
	templates.push(extra);
	let mut screen = screen_with(ScreenConfig {
		templates,
		..ScreenConfig::default()
	});

	let target = screen.select_route(9);
	assert_eq!(target.path, TRANSIT);
	assert_eq!(screen.store().load().expect("load").map(|route| route.id()), Some(9));
}

#[test]
fn missing_route_falls_back_without_persisting() {
	let mut screen = screen();
	let target = screen.select_route(77);
	assert_eq!(target.path, JOURNEY_DETAILS);
	assert_eq!(target.state, None);
	assert!(screen.store().blob().is_none());
}

#[test]
fn recommendation_follows_visible_routes() {
	let templates: Vec<RouteTemplate> = catalog::default_templates()
		.into_iter()
		.filter(|template| template.mode != TransportMode::Train)
		.collect();
	let mut screen = screen_with(ScreenConfig {
		templates,
		..ScreenConfig::default()
	});

	screen.select_tab(TransportMode::Mrt);
	assert_eq!(screen.recommendation().map(Route::id), Some(1));
	assert_eq!(screen.view().empty_message, None);

	screen.select_tab(TransportMode::Train);
	let view = screen.view();
	assert!(view.routes.is_empty());
	assert_eq!(view.empty_message, Some(NO_ROUTES_MESSAGE));
	assert_eq!(view.recommendation, None);
	assert_eq!(screen.select_recommendation(), None);
}

#[test]
fn recommendation_selection_persists_and_navigates() {
	let mut screen = screen();
	let target = screen.select_recommendation().expect("recommended route");
	assert_eq!(target.path, JOURNEY_DETAILS);
	assert_eq!(screen.store().load().expect("load").map(|route| route.id()), Some(1));
}

#[test]
fn drag_ends_on_a_detent_and_releases_listeners() {
	let mut screen = screen();
	screen.press_handle(PointerSample::new(0.0, 100.0), 200.0);
	assert!(screen.listeners().is_active());
	screen.drag_handle(PointerSample::new(0.0, 150.0));
	assert_eq!(screen.state().sheet_height(), 40.0);
	assert!(screen.view().dragging);
	screen.drag_handle(PointerSample::new(0.0, 190.0));
	assert_eq!(screen.state().sheet_height(), SHEET_MIN);
	screen.release_handle();
	assert_eq!(screen.state().sheet_height(), SHEET_MIN);
	assert!(!screen.listeners().is_active());

	screen.press_handle(PointerSample::new(0.0, 150.0), 200.0);
	screen.drag_handle(PointerSample::new(0.0, 100.0));
	screen.cancel_drag();
	assert_eq!(screen.state().sheet_height(), SHEET_MID);
	assert!(!screen.listeners().is_active());
}

#[test]
fn dropping_the_screen_detaches_drag_listeners() {
	let mut screen = screen();
	let listeners = screen.listeners().clone();
	screen.press_handle(PointerSample::new(0.0, 10.0), 100.0);
	assert!(listeners.is_active());
	drop(screen);
	assert!(!listeners.is_active());
}

#[test]
fn lookup_results_become_suggestions_and_markers() {
	let mut screen = screen();
	assert_eq!(screen.view().suggestions, Suggestions::NotSearched);
	assert_eq!(screen.view().sheet_height, SHEET_MAX);

	let now = Instant::now();
	screen.set_query("KL", now);
	let deadline = now + Duration::from_secs(2);
	while !screen.tick(Instant::now()) && Instant::now() < deadline {
		thread::sleep(Duration::from_millis(5));
	}
	let view = screen.view();
	assert_eq!(view.suggestions.places()[0].name, "KL Sentral");
	assert!(view.map.markers.iter().any(|marker| marker.popup == "KL Sentral"));

	let chosen = screen.choose_suggestion(0, Instant::now()).expect("suggestion");
	assert_eq!(screen.state().query(), "KL Sentral");
	assert_eq!(screen.view().map.center, chosen.coordinate);
	assert_eq!(
		stations(&screen.visible_routes())[0],
		"KL Sentral Bus Station"
	);
}

#[test]
fn next_deadline_follows_the_debounced_query() {
	let geocode = GeocodeRuntime::spawn(GeocodeClient::new(FixedPlaces), Duration::from_millis(300));
	let start = Instant::now();
	let mut screen = SearchScreen::new(
		ScreenConfig::default(),
		geocode,
		MemorySelectionStore::default(),
		RecordingNavigator::default(),
		start,
	);
	assert_eq!(screen.next_deadline(), None);

	screen.set_query("KL", start);
	assert_eq!(screen.next_deadline(), Some(start + Duration::from_millis(300)));

	screen.tick(start + Duration::from_millis(300));
	assert_eq!(screen.next_deadline(), None);
}
