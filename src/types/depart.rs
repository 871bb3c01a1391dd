use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Departure or arrival constraint picked from the depart menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepartOption {
	#[default]
	DepartNow,
	LeaveAt2000,
	LeaveAt2030,
	LeaveAt2100,
	ArriveBy2000,
	ArriveBy2030,
	ArriveBy2100,
}

impl DepartOption {
	/// Menu entries in display order.
	pub const ALL: [DepartOption; 7] = [
		Self::DepartNow,
		Self::LeaveAt2000,
		Self::LeaveAt2030,
		Self::LeaveAt2100,
		Self::ArriveBy2000,
		Self::ArriveBy2030,
		Self::ArriveBy2100,
	];

	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Self::DepartNow => "Depart Now",
			Self::LeaveAt2000 => "Leave at 8:00 PM",
			Self::LeaveAt2030 => "Leave at 8:30 PM",
			Self::LeaveAt2100 => "Leave at 9:00 PM",
			Self::ArriveBy2000 => "Arrive by 8:00 PM",
			Self::ArriveBy2030 => "Arrive by 8:30 PM",
			Self::ArriveBy2100 => "Arrive by 9:00 PM",
		}
	}

	/// Index of this option within [`DepartOption::ALL`].
	#[must_use]
	pub fn position(self) -> usize {
		Self::ALL
			.iter()
			.position(|option| *option == self)
			.unwrap_or_default()
	}
}

impl fmt::Display for DepartOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown depart option '{0}'")]
pub struct ParseDepartError(pub String);

impl FromStr for DepartOption {
	type Err = ParseDepartError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let wanted = value.trim();
		Self::ALL
			.into_iter()
			.find(|option| option.label().eq_ignore_ascii_case(wanted))
			.ok_or_else(|| ParseDepartError(value.to_string()))
	}
}
