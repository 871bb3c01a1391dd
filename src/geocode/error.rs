use thiserror::Error;

/// Why a place lookup produced no results.
#[derive(Debug, Error)]
pub enum GeocodeError {
	/// The query was too short to send.
	#[error("query is shorter than {min} characters")]
	EmptyInput { min: usize },

	#[error("geocode request failed: {0}")]
	Network(#[from] reqwest::Error),

	#[error("geocode endpoint answered with status {0}")]
	Status(u16),

	#[error("geocode response was malformed: {0}")]
	Malformed(String),
}
