//! Drag handling for the bottom sheet that hosts the drawer.
//!
//! The sheet height is a percentage of the viewport. While a drag is active
//! the height follows the pointer, clamped to [`SHEET_MIN`]..=[`SHEET_MAX`];
//! on release it snaps to one of three detents.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use ratatui::crossterm::event::MouseEvent;

pub const SHEET_MIN: f64 = 20.0;
pub const SHEET_MID: f64 = 40.0;
pub const SHEET_MAX: f64 = 65.0;

/// Releases below this height collapse the sheet.
const SNAP_LOW: f64 = 30.0;
/// Releases above this height expand the sheet.
const SNAP_HIGH: f64 = 50.0;

/// Clamp a height fraction into the sheet's range.
#[must_use]
pub fn clamp_height(fraction: f64) -> f64 {
	if fraction.is_nan() {
		return SHEET_MIN;
	}
	fraction.clamp(SHEET_MIN, SHEET_MAX)
}

/// Pick the detent a released sheet rests at.
#[must_use]
pub fn snap(fraction: f64) -> f64 {
	if fraction < SNAP_LOW {
		SHEET_MIN
	} else if fraction > SNAP_HIGH {
		SHEET_MAX
	} else {
		SHEET_MID
	}
}

/// Input-source independent pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
	pub x: f64,
	pub y: f64,
}

impl PointerSample {
	#[must_use]
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Sample a terminal mouse event, one unit per cell.
	#[must_use]
	pub fn from_mouse(event: &MouseEvent) -> Self {
		Self::new(f64::from(event.column), f64::from(event.row))
	}

	/// Sample the first active touch point, if any.
	#[must_use]
	pub fn from_touch(event: &TouchEvent) -> Option<Self> {
		event
			.touches
			.first()
			.map(|point| Self::new(point.x, point.y))
	}
}

/// One contact in a touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
	pub x: f64,
	pub y: f64,
}

/// Touch input forwarded by an embedder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchEvent {
	pub touches: Vec<TouchPoint>,
}

#[derive(Debug, Default)]
struct ListenerTable {
	next_id: Cell<u64>,
	attached: RefCell<Vec<u64>>,
}

/// Registry of global move/release listeners.
///
/// The event loop only routes pointer motion to the sheet while a listener is
/// attached. Listeners are handed out as [`ListenerGuard`]s and detach when
/// the guard is dropped.
#[derive(Clone, Debug, Default)]
pub struct PointerListeners {
	table: Rc<ListenerTable>,
}

impl PointerListeners {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach a listener that stays registered until the guard is dropped.
	#[must_use]
	pub fn acquire(&self) -> ListenerGuard {
		let id = self.table.next_id.get().wrapping_add(1);
		self.table.next_id.set(id);
		self.table.attached.borrow_mut().push(id);
		ListenerGuard {
			id,
			table: Rc::clone(&self.table),
		}
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		!self.table.attached.borrow().is_empty()
	}

	#[must_use]
	pub fn attached(&self) -> usize {
		self.table.attached.borrow().len()
	}
}

#[derive(Debug)]
pub struct ListenerGuard {
	id: u64,
	table: Rc<ListenerTable>,
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		self.table.attached.borrow_mut().retain(|id| *id != self.id);
	}
}

#[derive(Debug)]
struct DragSession {
	origin_y: f64,
	origin_height: f64,
	viewport_height: f64,
	height: f64,
	_listeners: ListenerGuard,
}

#[derive(Debug, Default)]
enum DragPhase {
	#[default]
	Idle,
	Dragging(DragSession),
}

/// Gesture state machine for the sheet handle.
#[derive(Debug, Default)]
pub struct SheetController {
	phase: DragPhase,
	listeners: PointerListeners,
}

impl SheetController {
	#[must_use]
	pub fn new(listeners: PointerListeners) -> Self {
		Self {
			phase: DragPhase::Idle,
			listeners,
		}
	}

	#[must_use]
	pub fn listeners(&self) -> &PointerListeners {
		&self.listeners
	}

	#[must_use]
	pub fn is_dragging(&self) -> bool {
		matches!(self.phase, DragPhase::Dragging(_))
	}

	/// Start a drag from the handle. A press while already dragging restarts
	/// the gesture from the new sample.
	pub fn press(&mut self, sample: PointerSample, height: f64, viewport_height: f64) {
		let height = clamp_height(height);
		// Drop any previous session first so its listener detaches before the
		// new one attaches.
		self.phase = DragPhase::Idle;
		self.phase = DragPhase::Dragging(DragSession {
			origin_y: sample.y,
			origin_height: height,
			viewport_height,
			height,
			_listeners: self.listeners.acquire(),
		});
		debug!("sheet drag started at y={} height={height}", sample.y);
	}

	/// Follow the pointer. Returns the live height, or `None` when idle.
	pub fn drag(&mut self, sample: PointerSample) -> Option<f64> {
		let DragPhase::Dragging(session) = &mut self.phase else {
			return None;
		};
		if session.viewport_height > 0.0 {
			let delta = session.origin_y - sample.y;
			session.height =
				clamp_height(session.origin_height + delta / session.viewport_height * 100.0);
		}
		Some(session.height)
	}

	/// Finish the drag and return the detent the sheet rests at.
	pub fn release(&mut self) -> Option<f64> {
		match std::mem::take(&mut self.phase) {
			DragPhase::Idle => None,
			DragPhase::Dragging(session) => {
				let detent = snap(session.height);
				debug!("sheet released at {} -> {detent}", session.height);
				Some(detent)
			}
		}
	}

	/// Abort the drag (focus lost, screen hidden); the sheet still snaps.
	pub fn cancel(&mut self) -> Option<f64> {
		self.release()
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};

	use super::*;

	const VIEWPORT: f64 = 1000.0;

	fn sample(y: f64) -> PointerSample {
		PointerSample::new(10.0, y)
	}

	#[test]
	fn snaps_to_the_three_detents() {
		assert_eq!(snap(25.0), SHEET_MIN);
		assert_eq!(snap(45.0), SHEET_MID);
		assert_eq!(snap(55.0), SHEET_MAX);
		assert_eq!(snap(30.0), SHEET_MID);
		assert_eq!(snap(50.0), SHEET_MID);
	}

	#[test]
	fn drag_tracks_pointer_and_clamps() {
		let mut sheet = SheetController::default();
		sheet.press(sample(500.0), 40.0, VIEWPORT);
		assert_eq!(sheet.drag(sample(400.0)), Some(50.0));
		assert_eq!(sheet.drag(sample(550.0)), Some(35.0));
		assert_eq!(sheet.drag(sample(0.0)), Some(SHEET_MAX));
		assert_eq!(sheet.drag(sample(VIEWPORT)), Some(SHEET_MIN));
	}

	#[test]
	fn every_release_ends_on_a_detent() {
		for end in (0..=20).map(|step| f64::from(step) * 50.0) {
			let mut sheet = SheetController::default();
			sheet.press(sample(500.0), 40.0, VIEWPORT);
			sheet.drag(sample(end));
			let detent = sheet.release().expect("dragging");
			assert!([SHEET_MIN, SHEET_MID, SHEET_MAX].contains(&detent));
			assert!(!sheet.is_dragging());
		}
	}

	#[test]
	fn release_uses_pre_release_height() {
		let cases = [(650.0, SHEET_MIN), (450.0, SHEET_MID), (350.0, SHEET_MAX)];
		for (end, expected) in cases {
			let mut sheet = SheetController::default();
			sheet.press(sample(500.0), 40.0, VIEWPORT);
			sheet.drag(sample(end));
			assert_eq!(sheet.release(), Some(expected), "released at y={end}");
		}
	}

	#[test]
	fn motion_without_press_is_ignored() {
		let mut sheet = SheetController::default();
		assert_eq!(sheet.drag(sample(100.0)), None);
		assert_eq!(sheet.release(), None);
	}

	#[test]
	fn listeners_attach_only_while_dragging() {
		let listeners = PointerListeners::new();
		let mut sheet = SheetController::new(listeners.clone());
		assert!(!listeners.is_active());
		sheet.press(sample(10.0), 65.0, VIEWPORT);
		assert_eq!(listeners.attached(), 1);
		sheet.press(sample(12.0), 65.0, VIEWPORT);
		assert_eq!(listeners.attached(), 1);
		sheet.release();
		assert!(!listeners.is_active());

		sheet.press(sample(10.0), 65.0, VIEWPORT);
		sheet.cancel();
		assert!(!listeners.is_active());
	}

	#[test]
	fn dropping_the_controller_detaches_listeners() {
		let listeners = PointerListeners::new();
		{
			let mut sheet = SheetController::new(listeners.clone());
			sheet.press(sample(10.0), 65.0, VIEWPORT);
			assert!(listeners.is_active());
		}
		assert!(!listeners.is_active());
	}

	#[test]
	fn mouse_and_touch_samples_agree() {
		let mouse = MouseEvent {
			kind: MouseEventKind::Drag(MouseButton::Left),
			column: 7,
			row: 3,
			modifiers: KeyModifiers::NONE,
		};
		let touch = TouchEvent {
			touches: vec![TouchPoint { x: 7.0, y: 3.0 }, TouchPoint { x: 1.0, y: 1.0 }],
		};
		assert_eq!(Some(PointerSample::from_mouse(&mouse)), PointerSample::from_touch(&touch));
		assert_eq!(PointerSample::from_touch(&TouchEvent::default()), None);
	}
}
