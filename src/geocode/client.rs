use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use super::GeocodeError;
use crate::types::{Coordinate, Place};

/// Queries with fewer characters than this are never sent.
pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Transport that turns a text query into ranked places.
pub trait PlaceSearch: Send + 'static {
	fn lookup(&self, query: &str, limit: usize) -> Result<Vec<Place>, GeocodeError>;
}

/// `GET <base>/geocode?q=<query>&limit=<n>` over blocking HTTP.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
	client: reqwest::blocking::Client,
	endpoint: String,
}

impl HttpGeocoder {
	/// Build a geocoder for `base_url`; every request is bounded by `timeout`.
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeocodeError> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()?;
		Ok(Self {
			client,
			endpoint: format!("{}/geocode", base_url.trim_end_matches('/')),
		})
	}

	#[must_use]
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

impl PlaceSearch for HttpGeocoder {
	fn lookup(&self, query: &str, limit: usize) -> Result<Vec<Place>, GeocodeError> {
		let limit = limit.to_string();
		let response = self
			.client
			.get(&self.endpoint)
			.query(&[("q", query), ("limit", limit.as_str())])
			.send()?;
		let status = response.status();
		if !status.is_success() {
			return Err(GeocodeError::Status(status.as_u16()));
		}
		let body = response.text()?;
		decode_results(&body)
	}
}

#[derive(Deserialize)]
struct GeocodeResponse {
	results: Vec<RawPlace>,
}

#[derive(Deserialize)]
struct RawPlace {
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	display_name: Option<String>,
	lat: RawDegrees,
	lon: RawDegrees,
}

/// Backends disagree on whether degrees are numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDegrees {
	Number(f64),
	Text(String),
}

impl RawDegrees {
	fn value(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			Self::Text(text) => text.trim().parse().ok(),
		}
	}
}

/// Decode a `{ "results": [...] }` body into ranked places.
///
/// Entries without a name or with out-of-range coordinates are skipped; rank
/// keeps the endpoint's ordering.
pub fn decode_results(body: &str) -> Result<Vec<Place>, GeocodeError> {
	let response: GeocodeResponse =
		serde_json::from_str(body).map_err(|err| GeocodeError::Malformed(err.to_string()))?;
	let places = response
		.results
		.into_iter()
		.enumerate()
		.filter_map(|(index, raw)| {
			let name = raw.name.or(raw.display_name)?;
			let coordinate = Coordinate::normalized(raw.lat.value()?, raw.lon.value()?)?;
			Some(Place {
				name,
				coordinate,
				rank: index + 1,
			})
		})
		.collect();
	Ok(places)
}

/// Graceful front for a [`PlaceSearch`] transport.
#[derive(Debug, Clone)]
pub struct GeocodeClient<S> {
	source: S,
	limit: usize,
}

impl<S: PlaceSearch> GeocodeClient<S> {
	pub fn new(source: S) -> Self {
		Self::with_limit(source, DEFAULT_LIMIT)
	}

	pub fn with_limit(source: S, limit: usize) -> Self {
		Self { source, limit }
	}

	/// Look up `query`, returning an empty list on any failure.
	pub fn search(&self, query: &str) -> Vec<Place> {
		match self.try_search(query) {
			Ok(places) => places,
			Err(GeocodeError::EmptyInput { .. }) => Vec::new(),
			Err(err) => {
				warn!("place search for '{query}' failed: {err}");
				Vec::new()
			}
		}
	}

	/// Look up `query`, reporting why nothing was found.
	pub fn try_search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
		let query = query.trim();
		if query.chars().count() < MIN_QUERY_CHARS {
			return Err(GeocodeError::EmptyInput {
				min: MIN_QUERY_CHARS,
			});
		}
		debug!("searching places for '{query}'");
		self.source.lookup(query, self.limit)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;

	#[derive(Clone, Default)]
	struct Recording {
		calls: Arc<Mutex<Vec<String>>>,
		fail: bool,
	}

	impl PlaceSearch for Recording {
		fn lookup(&self, query: &str, _limit: usize) -> Result<Vec<Place>, GeocodeError> {
			self.calls.lock().unwrap().push(query.to_string());
			if self.fail {
				return Err(GeocodeError::Status(503));
			}
			decode_results(r#"{"results":[{"name":"KL Sentral","lat":3.134,"lon":101.686}]}"#)
		}
	}

	#[test]
	fn short_queries_never_reach_the_transport() {
		let source = Recording::default();
		let client = GeocodeClient::new(source.clone());
		for query in ["", "a", " b ", "é"] {
			assert!(client.search(query).is_empty());
		}
		assert!(source.calls.lock().unwrap().is_empty());
	}

	#[test]
	fn failures_degrade_to_empty_results() {
		let source = Recording {
			fail: true,
			..Recording::default()
		};
		let client = GeocodeClient::new(source.clone());
		assert!(client.search("Central").is_empty());
		assert_eq!(*source.calls.lock().unwrap(), vec!["Central".to_string()]);
	}

	#[test]
	fn decodes_numbers_and_numeric_strings() {
		let body = r#"{"results":[
			{"name":"Pasar Seni","lat":3.1425,"lon":101.6953},
			{"display_name":"Bukit Bintang","lat":"3.1466","lon":"101.7113","type":"station"}
		]}"#;
		let places = decode_results(body).expect("valid body");
		assert_eq!(places.len(), 2);
		assert_eq!(places[0].name, "Pasar Seni");
		assert_eq!(places[1].name, "Bukit Bintang");
		assert_eq!(places[1].coordinate, Coordinate::new(3.1466, 101.7113));
		assert_eq!(places[1].rank, 2);
	}

	#[test]
	fn skips_unusable_entries_but_keeps_rank() {
		let body = r#"{"results":[
			{"lat":1.0,"lon":1.0},
			{"name":"Nowhere","lat":123.0,"lon":1.0},
			{"name":"Ampang","lat":3.15,"lon":101.76}
		]}"#;
		let places = decode_results(body).expect("valid body");
		assert_eq!(places.len(), 1);
		assert_eq!(places[0].rank, 3);
	}

	#[test]
	fn rejects_bodies_without_results() {
		assert!(matches!(
			decode_results(r#"{"error":"rate limited"}"#),
			Err(GeocodeError::Malformed(_))
		));
		assert!(matches!(
			decode_results("<html>"),
			Err(GeocodeError::Malformed(_))
		));
	}

	#[test]
	fn http_endpoint_joins_base_url() {
		let geocoder = HttpGeocoder::new("http://localhost:8000/api/maps/", DEFAULT_TIMEOUT)
			.expect("client builds");
		assert_eq!(geocoder.endpoint(), "http://localhost:8000/api/maps/geocode");
	}
}
