use serde::{Deserialize, Serialize};

/// WGS84 coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
	pub lat: f64,
	pub lon: f64,
}

impl Coordinate {
	#[must_use]
	pub const fn new(lat: f64, lon: f64) -> Self {
		Self { lat, lon }
	}

	/// Accept only finite coordinates inside the valid latitude/longitude ranges.
	#[must_use]
	pub fn normalized(lat: f64, lon: f64) -> Option<Self> {
		let valid = lat.is_finite()
			&& lon.is_finite()
			&& (-90.0..=90.0).contains(&lat)
			&& (-180.0..=180.0).contains(&lon);
		valid.then_some(Self { lat, lon })
	}

	/// `[lon, lat]` position as used by GeoJSON.
	#[must_use]
	pub fn position(self) -> Vec<f64> {
		vec![self.lon, self.lat]
	}
}

/// A place candidate returned by the geocoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
	pub name: String,
	pub coordinate: Coordinate,
	/// 1-based relevance rank; lower is better.
	pub rank: usize,
}
