use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One toggleable filter chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
	#[serde(rename = "co2")]
	Co2,
	#[serde(rename = "accessible")]
	Accessible,
	#[serde(rename = "Safe Air Quality")]
	SafeAirQuality,
	#[serde(rename = "cheapest")]
	Cheapest,
	#[serde(rename = "fastest")]
	Fastest,
}

impl FilterKey {
	/// Chips in the order they are laid out in the drawer.
	pub const CHIPS: [FilterKey; 5] = [
		Self::Co2,
		Self::Accessible,
		Self::SafeAirQuality,
		Self::Cheapest,
		Self::Fastest,
	];

	/// Stable key used in configuration and hand-off payloads.
	#[must_use]
	pub fn key(self) -> &'static str {
		match self {
			Self::Co2 => "co2",
			Self::Accessible => "accessible",
			Self::SafeAirQuality => "Safe Air Quality",
			Self::Cheapest => "cheapest",
			Self::Fastest => "fastest",
		}
	}

	#[must_use]
	pub fn chip_label(self) -> &'static str {
		match self {
			Self::Co2 => "Lowest CO₂",
			Self::Accessible => "Accessible",
			Self::SafeAirQuality => "Safe Air Quality",
			Self::Cheapest => "Cheapest",
			Self::Fastest => "Fastest",
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter '{0}'")]
pub struct ParseFilterError(pub String);

impl FromStr for FilterKey {
	type Err = ParseFilterError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
		match normalized.as_str() {
			"co2" | "lowest co2" => Ok(Self::Co2),
			"accessible" => Ok(Self::Accessible),
			"safe air quality" | "air quality" => Ok(Self::SafeAirQuality),
			"cheapest" => Ok(Self::Cheapest),
			"fastest" => Ok(Self::Fastest),
			_ => Err(ParseFilterError(value.to_string())),
		}
	}
}

/// Set of active filter keys.
///
/// Membership is all that matters for filtering and equality. Insertion order
/// is kept so callers that care about activation order can still observe it.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
	keys: Vec<FilterKey>,
}

impl PartialEq for FilterSet {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().all(|key| other.contains(key))
	}
}

impl Eq for FilterSet {}

impl FilterSet {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn contains(&self, key: FilterKey) -> bool {
		self.keys.contains(&key)
	}

	/// Add `key` if it is absent. Returns whether the set changed.
	pub fn insert(&mut self, key: FilterKey) -> bool {
		if self.contains(key) {
			return false;
		}
		self.keys.push(key);
		true
	}

	/// Flip membership of `key`. Toggling twice restores the original set.
	pub fn toggle(&mut self, key: FilterKey) {
		if let Some(position) = self.keys.iter().position(|existing| *existing == key) {
			self.keys.remove(position);
		} else {
			self.keys.push(key);
		}
	}

	#[must_use]
	pub fn with_toggled(mut self, key: FilterKey) -> Self {
		self.toggle(key);
		self
	}

	pub fn iter(&self) -> impl Iterator<Item = FilterKey> + '_ {
		self.keys.iter().copied()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

impl FromIterator<FilterKey> for FilterSet {
	fn from_iter<I: IntoIterator<Item = FilterKey>>(iter: I) -> Self {
		let mut set = Self::new();
		for key in iter {
			set.insert(key);
		}
		set
	}
}
