use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces rapid query edits into a single trailing request.
///
/// The clock is passed in by the caller, which keeps the debouncer a plain
/// value that the event loop can poll.
#[derive(Debug, Clone)]
pub struct Debouncer {
	delay: Duration,
	pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
	query: String,
	due: Instant,
}

impl Default for Debouncer {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE)
	}
}

impl Debouncer {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
		}
	}

	/// Replace any pending query and restart the quiet period at `now`.
	pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
		self.pending = Some(Pending {
			query: query.into(),
			due: now + self.delay,
		});
	}

	/// Take the pending query once its quiet period has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<String> {
		if self.pending.as_ref().is_some_and(|pending| now >= pending.due) {
			self.pending.take().map(|pending| pending.query)
		} else {
			None
		}
	}

	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|pending| pending.due)
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	pub fn cancel(&mut self) {
		self.pending = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ms(value: u64) -> Duration {
		Duration::from_millis(value)
	}

	#[test]
	fn burst_yields_only_the_last_query() {
		let start = Instant::now();
		let mut debouncer = Debouncer::default();
		let mut fired = Vec::new();
		for (offset, query) in [(0, "C"), (120, "Ce"), (240, "Cen"), (360, "Central")] {
			let now = start + ms(offset);
			fired.extend(debouncer.poll(now));
			debouncer.schedule(query, now);
		}
		fired.extend(debouncer.poll(start + ms(500)));
		assert!(fired.is_empty());
		fired.extend(debouncer.poll(start + ms(660)));
		fired.extend(debouncer.poll(start + ms(900)));
		assert_eq!(fired, vec!["Central".to_string()]);
	}

	#[test]
	fn separate_pauses_fire_separately() {
		let start = Instant::now();
		let mut debouncer = Debouncer::default();
		debouncer.schedule("Ampang", start);
		assert_eq!(debouncer.poll(start + ms(300)).as_deref(), Some("Ampang"));
		debouncer.schedule("Ampang Park", start + ms(400));
		assert_eq!(debouncer.deadline(), Some(start + ms(700)));
		assert_eq!(
			debouncer.poll(start + ms(701)).as_deref(),
			Some("Ampang Park")
		);
		assert!(!debouncer.is_pending());
	}

	#[test]
	fn cancel_drops_the_pending_query() {
		let start = Instant::now();
		let mut debouncer = Debouncer::default();
		debouncer.schedule("Chow Kit", start);
		debouncer.cancel();
		assert_eq!(debouncer.poll(start + ms(1000)), None);
	}
}
