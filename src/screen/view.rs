use crate::dropdown::{Bounds, MenuAnchor};
use crate::filter::RouteList;
use crate::map::MapView;
use crate::types::{DepartOption, FilterKey, Place, Route, TransportMode};

/// Text shown when the active tab has nothing to offer.
pub const NO_ROUTES_MESSAGE: &str = "No routes found for this transport type.";

/// Geocoder suggestions for the search bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Suggestions {
	/// No lookup has answered since the screen opened.
	#[default]
	NotSearched,
	Results(Vec<Place>),
}

impl Suggestions {
	#[must_use]
	pub fn places(&self) -> &[Place] {
		match self {
			Self::NotSearched => &[],
			Self::Results(places) => places,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterChip {
	pub key: FilterKey,
	pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuView {
	pub anchor: MenuAnchor,
	pub bounds: Bounds,
	pub options: Vec<(DepartOption, bool)>,
}

/// Snapshot of everything the drawer renders.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerView {
	pub query: String,
	pub searching: bool,
	pub tab: TransportMode,
	pub chips: Vec<FilterChip>,
	pub routes: RouteList,
	pub empty_message: Option<&'static str>,
	pub recommendation: Option<Route>,
	pub sheet_height: f64,
	pub dragging: bool,
	pub depart: DepartOption,
	pub menu: Option<MenuView>,
	pub suggestions: Suggestions,
	pub map: MapView,
}
