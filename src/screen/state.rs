use crate::dropdown::{Bounds, DepartPicker, Point};
use crate::sheet::{SHEET_MAX, clamp_height};
use crate::types::{DepartOption, FilterKey, FilterSet, TransportMode};

/// Everything the drawer shows that is driven by user input.
///
/// The state is an immutable value: every change goes through
/// [`DrawerState::apply`], which consumes the old state and returns the new
/// one.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerState {
	query: String,
	tab: TransportMode,
	filters: FilterSet,
	sheet_height: f64,
	depart: DepartPicker,
}

/// A single user-driven change to [`DrawerState`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawerAction {
	SetQuery(String),
	SelectTab(TransportMode),
	ToggleFilter(FilterKey),
	SetSheetHeight(f64),
	/// Press on the depart chip whose screen area is given.
	ToggleDepartMenu(Bounds),
	/// Pointer pressed somewhere on screen.
	PointerDown(Point),
	SelectDepart(DepartOption),
	CloseDepartMenu,
}

impl Default for DrawerState {
	fn default() -> Self {
		Self::new(
			String::new(),
			TransportMode::default(),
			[FilterKey::Accessible].into_iter().collect(),
			DepartPicker::default(),
		)
	}
}

impl DrawerState {
	#[must_use]
	pub fn new(
		query: String,
		tab: TransportMode,
		filters: FilterSet,
		depart: DepartPicker,
	) -> Self {
		Self {
			query,
			tab,
			filters,
			sheet_height: SHEET_MAX,
			depart,
		}
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn tab(&self) -> TransportMode {
		self.tab
	}

	#[must_use]
	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	#[must_use]
	pub fn sheet_height(&self) -> f64 {
		self.sheet_height
	}

	#[must_use]
	pub fn depart(&self) -> &DepartPicker {
		&self.depart
	}

	#[must_use]
	pub fn apply(mut self, action: DrawerAction) -> Self {
		match action {
			DrawerAction::SetQuery(query) => self.query = query,
			DrawerAction::SelectTab(tab) => self.tab = tab,
			DrawerAction::ToggleFilter(key) => self.filters.toggle(key),
			DrawerAction::SetSheetHeight(height) => self.sheet_height = clamp_height(height),
			DrawerAction::ToggleDepartMenu(trigger) => self.depart.toggle(trigger),
			DrawerAction::PointerDown(point) => {
				self.depart.pointer_down(point);
			}
			DrawerAction::SelectDepart(option) => self.depart.select(option),
			DrawerAction::CloseDepartMenu => self.depart.close(),
		}
		self
	}
}
