use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport mode used to partition routes into drawer tabs.
///
/// Exactly one mode is active at any time; the drawer opens on [`TransportMode::Bus`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
	#[default]
	Bus,
	Train,
	/// Metro and light rail share one tab.
	Mrt,
}

impl TransportMode {
	/// Tabs in display order.
	pub const ALL: [TransportMode; 3] = [Self::Bus, Self::Train, Self::Mrt];

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bus => "bus",
			Self::Train => "train",
			Self::Mrt => "mrt",
		}
	}

	/// Label shown on the tab header.
	#[must_use]
	pub fn tab_label(self) -> &'static str {
		match self {
			Self::Bus => "Bus",
			Self::Train => "Train",
			Self::Mrt => "MRT/LRT",
		}
	}

	#[must_use]
	pub fn next(self) -> Self {
		match self {
			Self::Bus => Self::Train,
			Self::Train => Self::Mrt,
			Self::Mrt => Self::Bus,
		}
	}

	#[must_use]
	pub fn previous(self) -> Self {
		match self {
			Self::Bus => Self::Mrt,
			Self::Train => Self::Bus,
			Self::Mrt => Self::Train,
		}
	}
}

impl fmt::Display for TransportMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transport mode '{0}' (expected bus, train or mrt)")]
pub struct ParseModeError(pub String);

impl FromStr for TransportMode {
	type Err = ParseModeError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"bus" => Ok(Self::Bus),
			"train" => Ok(Self::Train),
			"mrt" | "lrt" | "mrt/lrt" => Ok(Self::Mrt),
			_ => Err(ParseModeError(value.to_string())),
		}
	}
}

/// Station flavour carried by a route template.
///
/// Two templates can share [`TransportMode::Mrt`] while still naming different
/// kinds of station, so the kind is part of the template's identity rather than
/// something recovered from the station text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
	Bus,
	Train,
	Mrt,
	Lrt,
}

impl StationKind {
	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Self::Bus => "Bus",
			Self::Train => "Train",
			Self::Mrt => "MRT",
			Self::Lrt => "LRT",
		}
	}

	/// The tab a station of this kind belongs to.
	#[must_use]
	pub fn mode(self) -> TransportMode {
		match self {
			Self::Bus => TransportMode::Bus,
			Self::Train => TransportMode::Train,
			Self::Mrt | Self::Lrt => TransportMode::Mrt,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tabs_cycle_through_every_mode() {
		let mut mode = TransportMode::default();
		let mut seen = Vec::new();
		for _ in 0..3 {
			seen.push(mode);
			mode = mode.next();
		}
		assert_eq!(seen, TransportMode::ALL);
		assert_eq!(mode, TransportMode::Bus);
		assert_eq!(TransportMode::Bus.previous(), TransportMode::Mrt);
	}

	#[test]
	fn parses_mode_names_case_insensitively() {
		assert_eq!("Train".parse(), Ok(TransportMode::Train));
		assert_eq!(" LRT ".parse(), Ok(TransportMode::Mrt));
		assert!("ferry".parse::<TransportMode>().is_err());
	}

	#[test]
	fn light_rail_shares_the_metro_tab() {
		assert_eq!(StationKind::Lrt.mode(), TransportMode::Mrt);
		assert_eq!(StationKind::Mrt.mode(), TransportMode::Mrt);
		assert_ne!(StationKind::Lrt.label(), StationKind::Mrt.label());
	}
}
