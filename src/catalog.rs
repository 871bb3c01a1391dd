//! Builds the concrete route list the drawer shows for a query.
//!
//! Routes are derived from static templates: the query only contributes the
//! station names. The output is a pure function of its inputs so the screen
//! can rebuild it on every keystroke.

use log::{debug, warn};
use thiserror::Error;

use crate::types::{
	ACCESSIBLE_TAG, Badge, BadgeKind, Route, RouteTemplate, StationKind, TransportMode,
};

const RISKY_AREA: &str = "Risky Area (Bad Pollution)";
const CO2_LABEL: &str = "Save CO₂";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
	/// The template's station kind belongs to a different tab than its mode.
	#[error("template {id} names a {kind:?} station but is listed under {mode}")]
	StationKindMismatch {
		id: u32,
		kind: StationKind,
		mode: TransportMode,
	},
}

/// Produce the routes for `query`.
///
/// A blank query yields generic station names ("Bus Station"); otherwise
/// each station is named after the trimmed query ("Central MRT Station").
/// If any template is inconsistent the templates are returned unmodified.
#[must_use]
pub fn build(query: &str, templates: &[RouteTemplate]) -> Vec<Route> {
	match try_build(query, templates) {
		Ok(routes) => routes,
		Err(err) => {
			warn!("falling back to raw route templates: {err}");
			templates
				.iter()
				.map(|template| Route::from_template(template, template.station.clone()))
				.collect()
		}
	}
}

fn try_build(query: &str, templates: &[RouteTemplate]) -> Result<Vec<Route>, CatalogError> {
	let query = query.trim();
	if !query.is_empty() {
		debug!("building routes for query '{query}'");
	}
	templates
		.iter()
		.map(|template| {
			let kind = template.station_kind;
			if kind.mode() != template.mode {
				return Err(CatalogError::StationKindMismatch {
					id: template.id,
					kind,
					mode: template.mode,
				});
			}
			Ok(Route::from_template(template, station_name(query, kind)))
		})
		.collect()
}

fn station_name(query: &str, kind: StationKind) -> String {
	if query.is_empty() {
		format!("{} Station", kind.label())
	} else {
		format!("{query} {} Station", kind.label())
	}
}

/// Templates bundled with the application.
#[must_use]
pub fn default_templates() -> Vec<RouteTemplate> {
	vec![
		template(
			1,
			StationKind::Bus,
			true,
			["6.5 km", "25 mins", "8:50 pm", "$1.80", "320g"],
			Badge::new(BadgeKind::Good, "Good"),
			None,
		),
		template(
			2,
			StationKind::Bus,
			false,
			["5.0 km", "40 mins", "8:30 pm", "$1.50", "200g"],
			Badge::new(BadgeKind::Moderate, "Moderate"),
			Some(RISKY_AREA),
		),
		template(
			3,
			StationKind::Train,
			true,
			["3.2 km", "15 mins", "8:45 pm", "$2.50", "150g"],
			Badge::new(BadgeKind::Good, "Fast"),
			None,
		),
		template(
			4,
			StationKind::Mrt,
			true,
			["2.2 km", "10 mins", "8:35 pm", "$3.50", "200g"],
			Badge::new(BadgeKind::Good, "Fast"),
			None,
		),
		template(
			5,
			StationKind::Lrt,
			false,
			["2.2 km", "10 mins", "8:35 pm", "$3.50", "200g"],
			Badge::new(BadgeKind::Bad, "Bad"),
			Some(RISKY_AREA),
		),
	]
}

fn template(
	id: u32,
	kind: StationKind,
	recommended: bool,
	[distance, duration, arrival_time, cost, co2]: [&str; 5],
	badge: Badge,
	risk: Option<&str>,
) -> RouteTemplate {
	RouteTemplate {
		id,
		mode: kind.mode(),
		station_kind: kind,
		recommended,
		station: format!("{} Station", kind.label()),
		distance: distance.to_string(),
		duration: duration.to_string(),
		arrival_time: arrival_time.to_string(),
		cost: cost.to_string(),
		co2: co2.to_string(),
		co2_label: CO2_LABEL.to_string(),
		badge,
		tags: vec![ACCESSIBLE_TAG.to_string()],
		risk: risk.map(str::to_string),
		coordinates: None,
	}
}
