//! The route-search screen: owns the drawer state and ties the components
//! together.
//!
//! Input handlers are plain methods. Each one runs to completion and leaves
//! the screen consistent, so a single-threaded event loop can call them in
//! whatever order events arrive. Dropping the screen cancels the pending
//! lookup and detaches any drag listeners.

mod state;
mod view;

use std::time::Instant;

use log::{info, warn};

pub use state::{DrawerAction, DrawerState};
pub use view::{DrawerView, FilterChip, MenuView, NO_ROUTES_MESSAGE, Suggestions};

use crate::catalog;
use crate::dropdown::{Bounds, DepartPicker, MenuGeometry, Point, Propagation};
use crate::filter::{self, RouteList};
use crate::geocode::GeocodeRuntime;
use crate::handoff::{
	JOURNEY_DETAILS, NavigationTarget, Navigator, SelectionStore, TRANSIT, destination_for,
};
use crate::map::MapView;
use crate::sheet::{PointerListeners, PointerSample, SheetController};
use crate::types::{DepartOption, FilterKey, FilterSet, Place, Route, RouteTemplate, TransportMode};

/// Initial settings for a [`SearchScreen`].
#[derive(Clone, Debug)]
pub struct ScreenConfig {
	pub initial_query: String,
	pub tab: TransportMode,
	pub filters: FilterSet,
	pub depart: DepartOption,
	pub menu_geometry: MenuGeometry,
	pub templates: Vec<RouteTemplate>,
}

impl Default for ScreenConfig {
	fn default() -> Self {
		Self {
			initial_query: String::new(),
			tab: TransportMode::default(),
			filters: [FilterKey::Accessible].into_iter().collect(),
			depart: DepartOption::default(),
			menu_geometry: MenuGeometry::default(),
			templates: catalog::default_templates(),
		}
	}
}

pub struct SearchScreen<S, N> {
	state: DrawerState,
	templates: Vec<RouteTemplate>,
	catalog: Vec<Route>,
	suggestions: Suggestions,
	map: MapView,
	geocode: GeocodeRuntime,
	sheet: SheetController,
	store: S,
	navigator: N,
}

impl<S: SelectionStore, N: Navigator> SearchScreen<S, N> {
	pub fn new(
		config: ScreenConfig,
		geocode: GeocodeRuntime,
		store: S,
		navigator: N,
		now: Instant,
	) -> Self {
		let ScreenConfig {
			initial_query,
			tab,
			filters,
			depart,
			menu_geometry,
			templates,
		} = config;
		let catalog = catalog::build(&initial_query, &templates);
		let mut geocode = geocode;
		if !initial_query.is_empty() {
			geocode.set_query(&initial_query, now);
		}
		Self {
			state: DrawerState::new(
				initial_query,
				tab,
				filters,
				DepartPicker::new(depart, menu_geometry),
			),
			templates,
			catalog,
			suggestions: Suggestions::default(),
			map: MapView::default(),
			geocode,
			sheet: SheetController::new(PointerListeners::new()),
			store,
			navigator,
		}
	}

	#[must_use]
	pub fn state(&self) -> &DrawerState {
		&self.state
	}

	#[must_use]
	pub fn catalog(&self) -> &[Route] {
		&self.catalog
	}

	#[must_use]
	pub fn store(&self) -> &S {
		&self.store
	}

	#[must_use]
	pub fn navigator(&self) -> &N {
		&self.navigator
	}

	/// Global move/release listeners; active only while the sheet is dragged.
	#[must_use]
	pub fn listeners(&self) -> &PointerListeners {
		self.sheet.listeners()
	}

	fn dispatch(&mut self, action: DrawerAction) {
		self.state = std::mem::take(&mut self.state).apply(action);
	}

	/// Replace the search text, rebuilding routes and scheduling a lookup.
	pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
		let query = query.into();
		if query == self.state.query() {
			return;
		}
		self.catalog = catalog::build(&query, &self.templates);
		self.geocode.set_query(&query, now);
		self.dispatch(DrawerAction::SetQuery(query));
	}

	pub fn select_tab(&mut self, tab: TransportMode) {
		self.dispatch(DrawerAction::SelectTab(tab));
	}

	pub fn toggle_filter(&mut self, key: FilterKey) {
		self.dispatch(DrawerAction::ToggleFilter(key));
	}

	/// Press on the depart chip occupying `trigger`.
	pub fn toggle_depart_menu(&mut self, trigger: Bounds) {
		self.dispatch(DrawerAction::ToggleDepartMenu(trigger));
	}

	pub fn select_depart(&mut self, option: DepartOption) {
		self.dispatch(DrawerAction::SelectDepart(option));
	}

	pub fn close_depart_menu(&mut self) {
		self.dispatch(DrawerAction::CloseDepartMenu);
	}

	/// Route a pointer press through the open menu first.
	///
	/// Returns [`Propagation::Stop`] when the press landed inside the menu and
	/// must not reach any other handler.
	pub fn pointer_down(&mut self, point: Point) -> Propagation {
		let inside_menu = self
			.state
			.depart()
			.menu_bounds()
			.is_some_and(|bounds| bounds.contains(point));
		self.dispatch(DrawerAction::PointerDown(point));
		if inside_menu {
			Propagation::Stop
		} else {
			Propagation::Continue
		}
	}

	/// Begin dragging the sheet handle.
	pub fn press_handle(&mut self, sample: PointerSample, viewport_height: f64) {
		self.sheet
			.press(sample, self.state.sheet_height(), viewport_height);
	}

	pub fn drag_handle(&mut self, sample: PointerSample) {
		if let Some(height) = self.sheet.drag(sample) {
			self.dispatch(DrawerAction::SetSheetHeight(height));
		}
	}

	pub fn release_handle(&mut self) {
		if let Some(detent) = self.sheet.release() {
			self.dispatch(DrawerAction::SetSheetHeight(detent));
		}
	}

	pub fn cancel_drag(&mut self) {
		if let Some(detent) = self.sheet.cancel() {
			self.dispatch(DrawerAction::SetSheetHeight(detent));
		}
	}

	/// Advance timers and apply any fresh lookup results. Returns whether the
	/// suggestions changed.
	pub fn tick(&mut self, now: Instant) -> bool {
		self.geocode.tick(now);
		let Some(reply) = self.geocode.pump() else {
			return false;
		};
		self.map = std::mem::take(&mut self.map).with_places(&reply.places);
		self.suggestions = Suggestions::Results(reply.places);
		true
	}

	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.geocode.is_searching()
	}

	/// When [`SearchScreen::tick`] next has work to do, if anything is pending.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.geocode.next_deadline()
	}

	#[must_use]
	pub fn visible_routes(&self) -> RouteList {
		RouteList::from_routes(filter::visible(
			&self.catalog,
			self.state.tab(),
			self.state.filters(),
		))
	}

	/// The route promoted on the floating card.
	///
	/// The card appears whenever the active tab lists something and always
	/// promotes the catalog's first recommended route.
	#[must_use]
	pub fn recommendation(&self) -> Option<&Route> {
		if self.visible_routes().is_empty() {
			return None;
		}
		self.catalog
			.iter()
			.find(|route| route.is_recommended())
			.or_else(|| self.catalog.first())
	}

	/// Persist route `id` and navigate to its journey screen.
	pub fn select_route(&mut self, id: u32) -> NavigationTarget {
		let Some(route) = self.catalog.iter().find(|route| route.id() == id).cloned() else {
			warn!("route {id} is not part of the current results");
			return self.navigate(JOURNEY_DETAILS, None);
		};
		self.persist(&route);
		let path = destination_for(id).unwrap_or_else(|err| {
			warn!("{err}, opening {TRANSIT}");
			TRANSIT
		});
		let state = serde_json::to_value(&route).ok();
		self.navigate(path, state)
	}

	/// Persist the promoted route and open its journey screen.
	pub fn select_recommendation(&mut self) -> Option<NavigationTarget> {
		let route = self.recommendation()?.clone();
		self.persist(&route);
		let state = serde_json::to_value(&route).ok();
		Some(self.navigate(JOURNEY_DETAILS, state))
	}

	/// Adopt a geocoder suggestion as the query and center the map on it.
	pub fn choose_suggestion(&mut self, index: usize, now: Instant) -> Option<Place> {
		let place = self.suggestions.places().get(index)?.clone();
		self.set_query(place.name.clone(), now);
		self.map = std::mem::take(&mut self.map).focused_on(&place);
		Some(place)
	}

	fn persist(&mut self, route: &Route) {
		match self.store.save(route) {
			Ok(()) => info!("selected route {} ({})", route.id(), route.station()),
			Err(err) => warn!("could not store selected route {}: {err}", route.id()),
		}
	}

	fn navigate(&mut self, path: &str, state: Option<serde_json::Value>) -> NavigationTarget {
		self.navigator.navigate(path, state.clone());
		NavigationTarget {
			path: path.to_string(),
			state,
		}
	}

	#[must_use]
	pub fn view(&self) -> DrawerView {
		let routes = self.visible_routes();
		let empty_message = routes.is_empty().then_some(NO_ROUTES_MESSAGE);
		let depart = self.state.depart();
		let menu = depart.anchor().zip(depart.menu_bounds()).map(|(anchor, bounds)| MenuView {
			anchor,
			bounds,
			options: DepartOption::ALL
				.into_iter()
				.map(|option| (option, option == depart.selected()))
				.collect(),
		});
		DrawerView {
			query: self.state.query().to_string(),
			searching: self.is_searching(),
			tab: self.state.tab(),
			chips: FilterKey::CHIPS
				.into_iter()
				.map(|key| FilterChip {
					key,
					active: self.state.filters().contains(key),
				})
				.collect(),
			recommendation: self.recommendation().cloned(),
			routes,
			empty_message,
			sheet_height: self.state.sheet_height(),
			dragging: self.sheet.is_dragging(),
			depart: depart.selected(),
			menu,
			suggestions: self.suggestions.clone(),
			map: self.map.clone(),
		}
	}
}

#[cfg(test)]
mod tests;
