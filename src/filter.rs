//! Tab and filter-chip selection over a route catalog.

use crate::types::{FilterKey, FilterSet, Route, TransportMode};

/// Routes the drawer lists for the current tab and filters.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteList {
	/// The active tab has no route after filtering.
	Empty,
	Routes(Vec<Route>),
}

impl RouteList {
	#[must_use]
	pub fn from_routes(routes: Vec<Route>) -> Self {
		if routes.is_empty() {
			Self::Empty
		} else {
			Self::Routes(routes)
		}
	}

	#[must_use]
	pub fn routes(&self) -> &[Route] {
		match self {
			Self::Empty => &[],
			Self::Routes(routes) => routes,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}
}

/// Select the routes of `tab` that satisfy `filters`, keeping catalog order.
///
/// Only [`FilterKey::Accessible`] prunes today. The remaining keys are
/// carried as toggle state without a predicate.
#[must_use]
pub fn visible(routes: &[Route], tab: TransportMode, filters: &FilterSet) -> Vec<Route> {
	routes
		.iter()
		.filter(|route| route.mode() == tab)
		.filter(|route| filters.iter().all(|key| admits(key, route)))
		.cloned()
		.collect()
}

fn admits(key: FilterKey, route: &Route) -> bool {
	match key {
		FilterKey::Accessible => route.is_accessible(),
		FilterKey::Co2 | FilterKey::SafeAirQuality | FilterKey::Cheapest | FilterKey::Fastest => {
			true
		}
	}
}
