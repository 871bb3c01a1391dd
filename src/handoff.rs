//! Passing the chosen route on to the next screen.
//!
//! The drawer persists the selected route as an opaque JSON blob under
//! [`SELECTED_ROUTE_KEY`] and then asks a [`Navigator`] to move on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::Route;

/// Key the selected route is stored under.
pub const SELECTED_ROUTE_KEY: &str = "selectedRoute";

pub const JOURNEY_DETAILS: &str = "/journey-details";
/// Journey screen variant that highlights pollution risk along the way.
pub const JOURNEY_DETAILS_RISK: &str = "/journey-details-2";
pub const TRANSIT: &str = "/transit";

#[derive(Debug, Error)]
pub enum HandoffError {
	#[error("failed to access selection store at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to encode selected route: {0}")]
	Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
	#[error("route {0} has no journey screen")]
	UnknownRoute(u32),
}

/// Journey screen for a route id.
pub fn destination_for(id: u32) -> Result<&'static str, SelectionError> {
	match id {
		1 | 3 | 4 => Ok(JOURNEY_DETAILS),
		2 | 5 => Ok(JOURNEY_DETAILS_RISK),
		other => Err(SelectionError::UnknownRoute(other)),
	}
}

/// Persisted storage for the selected route.
pub trait SelectionStore {
	fn save(&mut self, route: &Route) -> Result<(), HandoffError>;
	fn load(&self) -> Result<Option<Route>, HandoffError>;
}

/// Stores the selection as `<dir>/selectedRoute.json`.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
	path: PathBuf,
}

impl FileSelectionStore {
	pub fn new(dir: impl AsRef<Path>) -> Self {
		Self {
			path: dir.as_ref().join(format!("{SELECTED_ROUTE_KEY}.json")),
		}
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_error(&self, source: io::Error) -> HandoffError {
		HandoffError::Io {
			path: self.path.clone(),
			source,
		}
	}
}

impl SelectionStore for FileSelectionStore {
	fn save(&mut self, route: &Route) -> Result<(), HandoffError> {
		let encoded = serde_json::to_string_pretty(route)?;
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
		}
		fs::write(&self.path, encoded).map_err(|err| self.io_error(err))
	}

	fn load(&self) -> Result<Option<Route>, HandoffError> {
		match fs::read_to_string(&self.path) {
			Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(self.io_error(err)),
		}
	}
}

/// Keeps the encoded selection in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySelectionStore {
	blob: Option<String>,
}

impl MemorySelectionStore {
	#[must_use]
	pub fn blob(&self) -> Option<&str> {
		self.blob.as_deref()
	}
}

impl SelectionStore for MemorySelectionStore {
	fn save(&mut self, route: &Route) -> Result<(), HandoffError> {
		self.blob = Some(serde_json::to_string(route)?);
		Ok(())
	}

	fn load(&self) -> Result<Option<Route>, HandoffError> {
		self.blob
			.as_deref()
			.map(serde_json::from_str::<Route>)
			.transpose()
			.map_err(HandoffError::from)
	}
}

/// A requested screen change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationTarget {
	pub path: String,
	pub state: Option<Value>,
}

/// Screen navigation capability.
pub trait Navigator {
	fn navigate(&mut self, path: &str, state: Option<Value>);
}

/// Remembers every navigation request, newest last.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
	history: Vec<NavigationTarget>,
}

impl RecordingNavigator {
	#[must_use]
	pub fn last(&self) -> Option<&NavigationTarget> {
		self.history.last()
	}
}

impl Navigator for RecordingNavigator {
	fn navigate(&mut self, path: &str, state: Option<Value>) {
		self.history.push(NavigationTarget {
			path: path.to_string(),
			state,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{build, default_templates};

	#[test]
	fn maps_known_ids_and_rejects_others() {
		assert_eq!(destination_for(1), Ok(JOURNEY_DETAILS));
		assert_eq!(destination_for(2), Ok(JOURNEY_DETAILS_RISK));
		assert_eq!(destination_for(5), Ok(JOURNEY_DETAILS_RISK));
		assert_eq!(destination_for(42), Err(SelectionError::UnknownRoute(42)));
	}

	#[test]
	fn file_store_round_trips_the_selected_route() {
		let dir = tempfile::tempdir().expect("tempdir");
		let mut store = FileSelectionStore::new(dir.path().join("handoff"));
		assert!(store.load().expect("empty store").is_none());

		let route = build("Central", &default_templates()).remove(1);
		store.save(&route).expect("save");
		assert!(store.path().ends_with("selectedRoute.json"));
		assert_eq!(store.load().expect("load"), Some(route));
	}

	#[test]
	fn stored_blob_uses_hand_off_field_names() {
		let mut store = MemorySelectionStore::default();
		let route = build("", &default_templates()).remove(1);
		store.save(&route).expect("save");
		let value: Value = serde_json::from_str(store.blob().expect("blob")).expect("json");
		assert_eq!(value["id"], 2);
		assert_eq!(value["type"], "bus");
		assert_eq!(value["arrivalTime"], "8:30 pm");
		assert_eq!(value["riskText"], "Risky Area (Bad Pollution)");
		assert_eq!(value["badge"]["type"], "moderate");
	}
}
