//! Description of what the map layer should draw.
//!
//! The screen only describes the map. A [`MapView`] goes to whatever widget
//! sits behind the sheet; the terminal front end paints it on a canvas.

use geojson::{Geometry, Value};
use serde::Serialize;

use crate::types::{Coordinate, Place};

/// Kuala Lumpur city centre.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(3.1390, 101.6869);
pub const DEFAULT_ZOOM: u8 = 13;
const PLACE_ZOOM: u8 = 15;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
	pub lat: f64,
	pub lon: f64,
	pub popup: String,
}

impl Marker {
	pub fn new(position: Coordinate, popup: impl Into<String>) -> Self {
		Self {
			lat: position.lat,
			lon: position.lon,
			popup: popup.into(),
		}
	}

	#[must_use]
	pub fn position(&self) -> Coordinate {
		Coordinate::new(self.lat, self.lon)
	}
}

/// A polyline with its travel summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapRoute {
	pub geometry: Geometry,
	pub distance_m: f64,
	pub duration_s: f64,
}

impl MapRoute {
	/// Build a route from an ordered list of coordinates.
	pub fn through(points: &[Coordinate], distance_m: f64, duration_s: f64) -> Self {
		let line = points.iter().map(|point| point.position()).collect();
		Self {
			geometry: Geometry::new(Value::LineString(line)),
			distance_m,
			duration_s,
		}
	}

	/// The polyline's vertices.
	#[must_use]
	pub fn points(&self) -> Vec<Coordinate> {
		match &self.geometry.value {
			Value::LineString(line) => line
				.iter()
				.filter_map(|position| match position.as_slice() {
					[lon, lat, ..] => Some(Coordinate::new(*lat, *lon)),
					_ => None,
				})
				.collect(),
			_ => Vec::new(),
		}
	}
}

/// Everything the map widget needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapView {
	#[serde(serialize_with = "serialize_center")]
	pub center: Coordinate,
	pub zoom: u8,
	pub markers: Vec<Marker>,
	pub routes: Vec<MapRoute>,
}

fn serialize_center<S: serde::Serializer>(
	center: &Coordinate,
	serializer: S,
) -> Result<S::Ok, S::Error> {
	[center.lat, center.lon].serialize(serializer)
}

impl Default for MapView {
	fn default() -> Self {
		let station = Coordinate::new(3.1570, 101.7120);
		Self {
			center: DEFAULT_CENTER,
			zoom: DEFAULT_ZOOM,
			markers: base_markers(),
			routes: vec![MapRoute::through(
				&[
					DEFAULT_CENTER,
					Coordinate::new(3.1450, 101.6950),
					Coordinate::new(3.1520, 101.7000),
					station,
				],
				6500.0,
				1800.0,
			)],
		}
	}
}

fn base_markers() -> Vec<Marker> {
	vec![
		Marker::new(DEFAULT_CENTER, "Your Location - Kuala Lumpur"),
		Marker::new(Coordinate::new(3.1570, 101.7120), "Meskel Square Station"),
	]
}

impl MapView {
	/// Replace search markers with one marker per place, keeping the fixed ones.
	#[must_use]
	pub fn with_places(mut self, places: &[Place]) -> Self {
		self.markers = base_markers();
		self.markers.extend(
			places
				.iter()
				.map(|place| Marker::new(place.coordinate, place.name.clone())),
		);
		self
	}

	/// Center on `place` and zoom in.
	#[must_use]
	pub fn focused_on(mut self, place: &Place) -> Self {
		self.center = place.coordinate;
		self.zoom = PLACE_ZOOM;
		self
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn serializes_to_map_widget_shape() {
		let view = MapView::default();
		let value = serde_json::to_value(&view).expect("serialize");
		assert_eq!(value["center"], json!([3.1390, 101.6869]));
		assert_eq!(value["zoom"], 13);
		assert_eq!(value["markers"][0]["popup"], "Your Location - Kuala Lumpur");
		assert_eq!(value["routes"][0]["geometry"]["type"], "LineString");
		assert_eq!(
			value["routes"][0]["geometry"]["coordinates"][0],
			json!([101.6869, 3.1390])
		);
		assert_eq!(value["routes"][0]["distance_m"], 6500.0);
	}

	#[test]
	fn place_markers_replace_previous_results() {
		let place = |name: &str, lat| Place {
			name: name.to_string(),
			coordinate: Coordinate::new(lat, 101.7),
			rank: 1,
		};
		let view = MapView::default()
			.with_places(&[place("A", 3.1), place("B", 3.2)])
			.with_places(&[place("C", 3.3)]);
		assert_eq!(view.markers.len(), 3);
		assert_eq!(view.markers[2].popup, "C");
	}

	#[test]
	fn route_points_come_back_as_lat_lon() {
		let view = MapView::default();
		let points = view.routes[0].points();
		assert_eq!(points.first(), Some(&DEFAULT_CENTER));
		assert_eq!(points.len(), 4);
	}
}
