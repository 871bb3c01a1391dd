use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use log::debug;

use super::worker::{self, GeocodeCommand, GeocodeReply};
use super::{Debouncer, GeocodeClient, PlaceSearch};

/// Screen-side handle to the debounced lookup worker.
///
/// Every dispatched lookup gets a fresh token. Replies carrying an older
/// token are dropped in [`GeocodeRuntime::pump`], so a slow answer can never
/// overwrite the suggestions of a newer query.
pub struct GeocodeRuntime {
	tx: Sender<GeocodeCommand>,
	rx: Receiver<GeocodeReply>,
	latest: Arc<AtomicU64>,
	next_id: u64,
	current_id: Option<u64>,
	in_flight: bool,
	debouncer: Debouncer,
}

impl GeocodeRuntime {
	/// Start a worker thread for `client`, debouncing queries by `delay`.
	pub fn spawn<S: PlaceSearch>(client: GeocodeClient<S>, delay: Duration) -> Self {
		let (tx, rx, latest) = worker::spawn(client);
		Self {
			tx,
			rx,
			latest,
			next_id: 0,
			current_id: None,
			in_flight: false,
			debouncer: Debouncer::new(delay),
		}
	}

	/// Record a query edit. The lookup is sent once edits pause.
	pub fn set_query(&mut self, query: &str, now: Instant) {
		self.debouncer.schedule(query, now);
	}

	/// Dispatch the pending query if its quiet period is over. Returns the
	/// token of the dispatched lookup.
	pub fn tick(&mut self, now: Instant) -> Option<u64> {
		let query = self.debouncer.poll(now)?;
		Some(self.dispatch(query))
	}

	fn dispatch(&mut self, query: String) -> u64 {
		self.next_id = self.next_id.wrapping_add(1);
		let id = self.next_id;
		self.current_id = Some(id);
		self.in_flight = true;
		self.latest.store(id, Ordering::Release);
		debug!("dispatching lookup {id} for '{query}'");
		if self.tx.send(GeocodeCommand::Lookup { id, query }).is_err() {
			self.in_flight = false;
		}
		id
	}

	/// Drain replies and return the newest one that matches the latest token.
	pub fn pump(&mut self) -> Option<GeocodeReply> {
		let mut accepted = None;
		loop {
			match self.rx.try_recv() {
				Ok(reply) if Some(reply.id) == self.current_id => {
					self.in_flight = false;
					accepted = Some(reply);
				}
				Ok(reply) => {
					debug!("discarding stale lookup {} for '{}'", reply.id, reply.query);
				}
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		accepted
	}

	/// Whether a dispatched lookup has not answered yet.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.in_flight
	}

	/// When the pending query will be dispatched, if any.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.debouncer.deadline()
	}

	/// Drop the pending query and invalidate any lookup still in flight.
	pub fn cancel(&mut self) {
		self.debouncer.cancel();
		self.next_id = self.next_id.wrapping_add(1);
		self.latest.store(self.next_id, Ordering::Release);
		self.current_id = None;
		self.in_flight = false;
	}
}

impl Drop for GeocodeRuntime {
	fn drop(&mut self) {
		self.cancel();
		let _ = self.tx.send(GeocodeCommand::Shutdown);
	}
}
