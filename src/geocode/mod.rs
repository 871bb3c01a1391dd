//! Place lookup for the drawer's search bar.
//!
//! [`GeocodeClient`] wraps a [`PlaceSearch`] transport and never fails: bad
//! input, network errors and malformed bodies all collapse into an empty
//! result. [`GeocodeRuntime`] adds the 300ms debounce and runs lookups on a
//! worker thread, tagging each request with a token so that only the newest
//! reply is ever surfaced.

mod client;
mod debounce;
mod error;
mod runtime;
mod worker;

pub use client::{
	DEFAULT_LIMIT, DEFAULT_TIMEOUT, GeocodeClient, HttpGeocoder, MIN_QUERY_CHARS, PlaceSearch,
	decode_results,
};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::GeocodeError;
pub use runtime::GeocodeRuntime;
pub use worker::{GeocodeCommand, GeocodeReply};
