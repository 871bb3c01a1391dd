use std::time::Instant;

use anyhow::Result;
use log::debug;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::{contains, to_bounds};
use super::{App, DrawerOutcome};
use crate::dropdown::{Bounds, Point, Propagation};
use crate::handoff::SelectionStore;
use crate::sheet::PointerSample;
use crate::types::{DepartOption, FilterKey, TransportMode};

impl<S: SelectionStore> App<S> {
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<DrawerOutcome>> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let menu_open = self.screen.state().depart().is_open();
		match key.code {
			KeyCode::Esc if menu_open => self.screen.close_depart_menu(),
			KeyCode::Esc => return Ok(Some(self.outcome(None))),
			KeyCode::Enter if menu_open => {
				if let Some(option) = DepartOption::ALL.get(self.menu_cursor) {
					self.screen.select_depart(*option);
				}
			}
			KeyCode::Enter => {
				let id = self
					.screen
					.visible_routes()
					.routes()
					.get(self.highlighted)
					.map(|route| route.id());
				if let Some(id) = id {
					let target = self.screen.select_route(id);
					return Ok(Some(self.outcome(Some(target))));
				}
			}
			KeyCode::Char('r') if ctrl => {
				if let Some(target) = self.screen.select_recommendation() {
					return Ok(Some(self.outcome(Some(target))));
				}
			}
			KeyCode::Char('d') if ctrl => self.toggle_depart_menu(),
			KeyCode::Char('g') if ctrl => self.choose_suggestion(0),
			KeyCode::Tab => self.select_tab(self.screen.state().tab().next()),
			KeyCode::BackTab => self.select_tab(self.screen.state().tab().previous()),
			KeyCode::F(n @ 1..=5) => {
				if let Some(key) = FilterKey::CHIPS.get(usize::from(n) - 1) {
					self.screen.toggle_filter(*key);
					self.clamp_highlight();
				}
			}
			KeyCode::Up if menu_open => self.menu_cursor = self.menu_cursor.saturating_sub(1),
			KeyCode::Down if menu_open => {
				self.menu_cursor = (self.menu_cursor + 1).min(DepartOption::ALL.len() - 1);
			}
			KeyCode::Up => self.highlighted = self.highlighted.saturating_sub(1),
			KeyCode::Down => {
				self.highlighted += 1;
				self.clamp_highlight();
			}
			_ => {
				if self.input.input(key) {
					self.screen.set_query(self.input.text(), Instant::now());
					self.highlighted = 0;
				}
			}
		}
		Ok(None)
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<DrawerOutcome>> {
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => return Ok(self.press(mouse)),
			MouseEventKind::Drag(MouseButton::Left) if self.screen.listeners().is_active() => {
				self.screen.drag_handle(PointerSample::from_mouse(&mouse));
			}
			MouseEventKind::Up(MouseButton::Left) if self.screen.listeners().is_active() => {
				self.screen.release_handle();
			}
			MouseEventKind::ScrollUp => self.highlighted = self.highlighted.saturating_sub(1),
			MouseEventKind::ScrollDown => {
				self.highlighted += 1;
				self.clamp_highlight();
			}
			_ => {}
		}
		Ok(None)
	}

	/// Terminal focus left; abandon any drag in progress.
	pub(crate) fn focus_lost(&mut self) {
		if self.screen.listeners().is_active() {
			debug!("focus lost during sheet drag");
			self.screen.cancel_drag();
		}
	}

	fn press(&mut self, mouse: MouseEvent) -> Option<DrawerOutcome> {
		let point = Point::new(f64::from(mouse.column), f64::from(mouse.row));
		if self.screen.pointer_down(point) == Propagation::Stop {
			self.menu_cursor = self.screen.state().depart().selected().position();
			return None;
		}

		let hits = &self.hits;
		if hits.handle.is_some_and(|rect| contains(rect, point)) {
			let viewport = f64::from(self.viewport_height);
			self.screen
				.press_handle(PointerSample::from_mouse(&mouse), viewport);
		} else if hits.depart_chip.is_some_and(|rect| contains(rect, point)) {
			self.toggle_depart_menu();
		} else if let Some((key, _)) = hits.chips.iter().find(|(_, rect)| contains(*rect, point)) {
			let key = *key;
			self.screen.toggle_filter(key);
			self.clamp_highlight();
		} else if let Some((tab, _)) = hits.tabs.iter().find(|(_, rect)| contains(*rect, point)) {
			let tab = *tab;
			self.select_tab(tab);
		} else if let Some((id, _)) = hits.routes.iter().find(|(_, rect)| contains(*rect, point)) {
			let target = self.screen.select_route(*id);
			return Some(self.outcome(Some(target)));
		} else if hits.recommendation.is_some_and(|rect| contains(rect, point)) {
			let target = self.screen.select_recommendation()?;
			return Some(self.outcome(Some(target)));
		} else if let Some((index, _)) = hits
			.suggestions
			.iter()
			.find(|(_, rect)| contains(*rect, point))
		{
			let index = *index;
			self.choose_suggestion(index);
		}
		None
	}

	fn toggle_depart_menu(&mut self) {
		let trigger = self
			.hits
			.depart_chip
			.map(to_bounds)
			.unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 1.0));
		self.screen.toggle_depart_menu(trigger);
		self.menu_cursor = self.screen.state().depart().selected().position();
	}

	fn select_tab(&mut self, tab: TransportMode) {
		self.screen.select_tab(tab);
		self.highlighted = 0;
	}

	fn choose_suggestion(&mut self, index: usize) {
		if let Some(place) = self.screen.choose_suggestion(index, Instant::now()) {
			self.input.set_text(place.name);
			self.highlighted = 0;
		}
	}
}
