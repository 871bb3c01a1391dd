use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use log::info;
use ratatui::crossterm::event::{
	self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
	KeyEventKind,
};
use ratatui::crossterm::execute;

use super::{App, DrawerOutcome};
use crate::handoff::SelectionStore;

const FRAME: Duration = Duration::from_millis(16);

/// How long the loop may sleep before the next frame, waking early for a
/// pending lookup deadline.
fn idle_for(deadline: Option<Instant>, now: Instant) -> Duration {
	deadline.map_or(FRAME, |deadline| deadline.saturating_duration_since(now).min(FRAME))
}

/// Run the drawer until the user picks a route or leaves.
pub fn run<S: SelectionStore>(mut app: App<S>) -> Result<DrawerOutcome> {
	app.run()
}

impl<S: SelectionStore> App<S> {
	/// Pump the terminal event loop until the user exits with a result.
	pub fn run(&mut self) -> Result<DrawerOutcome> {
		let mut terminal = ratatui::init();
		execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
		terminal.clear()?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<DrawerOutcome> = 'event_loop: loop {
			self.screen.tick(Instant::now());
			if self.screen.is_searching() {
				self.throbber_state.calc_next();
			}

			loop {
				match event_rx.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			terminal.draw(|frame| self.draw(frame))?;

			let mut maybe_outcome = None;
			while let Some(event) = pending_events.pop_front() {
				let handled = match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
					Event::Mouse(mouse) => self.handle_mouse(mouse)?,
					Event::FocusLost => {
						self.focus_lost();
						None
					}
					_ => None,
				};
				if let Some(outcome) = handled {
					maybe_outcome = Some(outcome);
					break;
				}
			}

			if let Some(outcome) = maybe_outcome {
				break Ok(outcome);
			}

			thread::sleep(idle_for(self.screen.next_deadline(), Instant::now()));
		};

		// A drag in flight when the loop ends must not leave listeners behind.
		self.focus_lost();
		let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
		ratatui::restore();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		if let Ok(outcome) = &result {
			info!(
				"drawer closed (accepted: {}, target: {:?})",
				outcome.accepted,
				outcome.target.as_ref().map(|target| target.path.as_str())
			);
		}
		result
	}
}
