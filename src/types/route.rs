use serde::{Deserialize, Serialize};

use super::{Coordinate, StationKind, TransportMode};

/// Tag that marks a route as usable with mobility aids.
pub const ACCESSIBLE_TAG: &str = "Accessible";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
	Good,
	Moderate,
	Bad,
}

/// Short quality badge shown on a route card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
	#[serde(rename = "type")]
	pub kind: BadgeKind,
	pub text: String,
}

impl Badge {
	pub fn new(kind: BadgeKind, text: impl Into<String>) -> Self {
		Self {
			kind,
			text: text.into(),
		}
	}
}

/// Static description a concrete [`Route`] is derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteTemplate {
	pub id: u32,
	pub mode: TransportMode,
	pub station_kind: StationKind,
	pub recommended: bool,
	/// Station text used verbatim when the catalog falls back to raw templates.
	pub station: String,
	pub distance: String,
	pub duration: String,
	pub arrival_time: String,
	pub cost: String,
	pub co2: String,
	pub co2_label: String,
	pub badge: Badge,
	pub tags: Vec<String>,
	pub risk: Option<String>,
	pub coordinates: Option<Coordinate>,
}

/// A candidate transit option shown in the drawer.
///
/// Routes are built by the catalog and never modified afterwards, so all
/// fields are read through accessors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
	id: u32,
	#[serde(rename = "type")]
	mode: TransportMode,
	recommended: bool,
	station: String,
	distance: String,
	duration: String,
	arrival_time: String,
	cost: String,
	co2: String,
	co2_label: String,
	badge: Badge,
	tags: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	risk_text: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	coordinates: Option<Coordinate>,
}

impl Route {
	/// Instantiate `template` with the given station name.
	#[must_use]
	pub fn from_template(template: &RouteTemplate, station: impl Into<String>) -> Self {
		Self {
			id: template.id,
			mode: template.mode,
			recommended: template.recommended,
			station: station.into(),
			distance: template.distance.clone(),
			duration: template.duration.clone(),
			arrival_time: template.arrival_time.clone(),
			cost: template.cost.clone(),
			co2: template.co2.clone(),
			co2_label: template.co2_label.clone(),
			badge: template.badge.clone(),
			tags: template.tags.clone(),
			risk_text: template.risk.clone(),
			coordinates: template.coordinates,
		}
	}

	#[must_use]
	pub fn id(&self) -> u32 {
		self.id
	}

	#[must_use]
	pub fn mode(&self) -> TransportMode {
		self.mode
	}

	#[must_use]
	pub fn is_recommended(&self) -> bool {
		self.recommended
	}

	#[must_use]
	pub fn station(&self) -> &str {
		&self.station
	}

	#[must_use]
	pub fn distance(&self) -> &str {
		&self.distance
	}

	#[must_use]
	pub fn duration(&self) -> &str {
		&self.duration
	}

	#[must_use]
	pub fn arrival_time(&self) -> &str {
		&self.arrival_time
	}

	#[must_use]
	pub fn cost(&self) -> &str {
		&self.cost
	}

	#[must_use]
	pub fn co2(&self) -> &str {
		&self.co2
	}

	#[must_use]
	pub fn co2_label(&self) -> &str {
		&self.co2_label
	}

	#[must_use]
	pub fn badge(&self) -> &Badge {
		&self.badge
	}

	#[must_use]
	pub fn tags(&self) -> &[String] {
		&self.tags
	}

	#[must_use]
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.iter().any(|existing| existing == tag)
	}

	#[must_use]
	pub fn is_accessible(&self) -> bool {
		self.has_tag(ACCESSIBLE_TAG)
	}

	#[must_use]
	pub fn is_risk(&self) -> bool {
		self.risk_text.is_some()
	}

	#[must_use]
	pub fn risk_text(&self) -> Option<&str> {
		self.risk_text.as_deref()
	}

	#[must_use]
	pub fn coordinates(&self) -> Option<Coordinate> {
		self.coordinates
	}
}
