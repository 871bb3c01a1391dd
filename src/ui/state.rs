//! Terminal-side state wrapped around a [`SearchScreen`].

use ratatui::layout::Rect;
use serde::Serialize;
use throbber_widgets_tui::ThrobberState;

use super::input::QueryInput;
use super::theme::Theme;
use crate::dropdown::{Bounds, Point};
use crate::handoff::{NavigationTarget, RecordingNavigator, SelectionStore};
use crate::screen::SearchScreen;
use crate::types::{FilterKey, TransportMode};

/// How the drawer was left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawerOutcome {
	pub accepted: bool,
	pub query: String,
	pub target: Option<NavigationTarget>,
}

/// Screen regions recorded during the last draw, used for mouse hit testing.
#[derive(Debug, Default, Clone)]
pub(crate) struct HitMap {
	pub handle: Option<Rect>,
	pub depart_chip: Option<Rect>,
	pub chips: Vec<(FilterKey, Rect)>,
	pub tabs: Vec<(TransportMode, Rect)>,
	pub routes: Vec<(u32, Rect)>,
	pub recommendation: Option<Rect>,
	pub suggestions: Vec<(usize, Rect)>,
}

pub(crate) fn contains(rect: Rect, point: Point) -> bool {
	to_bounds(rect).contains(point)
}

pub(crate) fn to_bounds(rect: Rect) -> Bounds {
	Bounds::new(
		f64::from(rect.x),
		f64::from(rect.y),
		f64::from(rect.width),
		f64::from(rect.height),
	)
}

pub struct App<S: SelectionStore> {
	pub(crate) screen: SearchScreen<S, RecordingNavigator>,
	pub(crate) input: QueryInput,
	pub theme: Theme,
	pub(crate) throbber_state: ThrobberState,
	/// Index into the visible route list.
	pub(crate) highlighted: usize,
	/// Row under the keyboard cursor while the depart menu is open.
	pub(crate) menu_cursor: usize,
	pub(crate) hits: HitMap,
	pub(crate) viewport_height: u16,
}

impl<S: SelectionStore> App<S> {
	pub fn new(screen: SearchScreen<S, RecordingNavigator>, theme: Theme) -> Self {
		let input = QueryInput::new(screen.state().query());
		let menu_cursor = screen.state().depart().selected().position();
		Self {
			screen,
			input,
			theme,
			throbber_state: ThrobberState::default(),
			highlighted: 0,
			menu_cursor,
			hits: HitMap::default(),
			viewport_height: 0,
		}
	}

	#[must_use]
	pub fn screen(&self) -> &SearchScreen<S, RecordingNavigator> {
		&self.screen
	}

	pub(crate) fn outcome(&self, target: Option<NavigationTarget>) -> DrawerOutcome {
		DrawerOutcome {
			accepted: target.is_some(),
			query: self.input.text().to_string(),
			target,
		}
	}

	/// Keep the route highlight inside the visible list.
	pub(crate) fn clamp_highlight(&mut self) {
		let len = self.screen.visible_routes().routes().len();
		self.highlighted = self.highlighted.min(len.saturating_sub(1));
	}
}
