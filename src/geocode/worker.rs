use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::debug;

use super::{GeocodeClient, PlaceSearch};
use crate::types::Place;

/// Instructions for the lookup thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeCommand {
	Lookup { id: u64, query: String },
	Shutdown,
}

/// Answer for one [`GeocodeCommand::Lookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeReply {
	pub id: u64,
	pub query: String,
	pub places: Vec<Place>,
}

/// Launch the lookup thread and return its channels plus the shared token of
/// the newest request.
pub(crate) fn spawn<S: PlaceSearch>(
	client: GeocodeClient<S>,
) -> (Sender<GeocodeCommand>, Receiver<GeocodeReply>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (reply_tx, reply_rx) = mpsc::channel();
	let latest = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest);

	thread::spawn(move || worker_loop(&client, command_rx, reply_tx, thread_latest));

	(command_tx, reply_rx, latest)
}

fn worker_loop<S: PlaceSearch>(
	client: &GeocodeClient<S>,
	command_rx: Receiver<GeocodeCommand>,
	reply_tx: Sender<GeocodeReply>,
	latest: Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(client, &reply_tx, &latest, command) {
			break;
		}
	}
}

fn handle_command<S: PlaceSearch>(
	client: &GeocodeClient<S>,
	reply_tx: &Sender<GeocodeReply>,
	latest: &AtomicU64,
	command: GeocodeCommand,
) -> bool {
	match command {
		GeocodeCommand::Lookup { id, query } => {
			if id < latest.load(Ordering::Acquire) {
				debug!("skipping superseded lookup {id} for '{query}'");
				return true;
			}
			let places = client.search(&query);
			reply_tx.send(GeocodeReply { id, query, places }).is_ok()
		}
		GeocodeCommand::Shutdown => false,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;
	use std::time::Duration;

	use super::*;
	use crate::geocode::GeocodeError;
	use crate::types::Coordinate;

	#[derive(Clone, Default)]
	struct Echo {
		calls: Arc<Mutex<Vec<String>>>,
	}

	impl PlaceSearch for Echo {
		fn lookup(&self, query: &str, _limit: usize) -> Result<Vec<Place>, GeocodeError> {
			self.calls.lock().unwrap().push(query.to_string());
			Ok(vec![Place {
				name: query.to_string(),
				coordinate: Coordinate::new(3.0, 101.0),
				rank: 1,
			}])
		}
	}

	#[test]
	fn shutdown_command_stops_worker() {
		let (tx, rx, latest) = spawn(GeocodeClient::new(Echo::default()));
		assert_eq!(latest.load(Ordering::Relaxed), 0);
		tx.send(GeocodeCommand::Shutdown).unwrap();
		assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
	}

	#[test]
	fn lookups_are_forwarded() {
		let (tx, rx, latest) = spawn(GeocodeClient::new(Echo::default()));
		latest.store(1, Ordering::Release);
		tx.send(GeocodeCommand::Lookup {
			id: 1,
			query: "Sentul".to_string(),
		})
		.expect("send lookup");

		let reply = rx
			.recv_timeout(Duration::from_secs(1))
			.expect("receive reply");
		assert_eq!(reply.id, 1);
		assert_eq!(reply.query, "Sentul");
		assert_eq!(reply.places[0].name, "Sentul");

		tx.send(GeocodeCommand::Shutdown).expect("send shutdown");
	}

	#[test]
	fn superseded_lookups_are_skipped() {
		let echo = Echo::default();
		let (tx, rx, latest) = spawn(GeocodeClient::new(echo.clone()));
		latest.store(2, Ordering::Release);
		tx.send(GeocodeCommand::Lookup {
			id: 1,
			query: "Old".to_string(),
		})
		.unwrap();
		tx.send(GeocodeCommand::Lookup {
			id: 2,
			query: "New".to_string(),
		})
		.unwrap();

		let reply = rx.recv_timeout(Duration::from_secs(1)).expect("reply");
		assert_eq!(reply.id, 2);
		assert_eq!(*echo.calls.lock().unwrap(), vec!["New".to_string()]);
		tx.send(GeocodeCommand::Shutdown).unwrap();
	}
}
