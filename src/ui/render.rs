use ratatui::{
	Frame,
	layout::{Alignment, Constraint, Layout, Rect},
	style::{Modifier, Style},
	symbols,
	text::{Line, Span},
	widgets::{
		Block, Clear, Paragraph,
		canvas::{Canvas, Line as Segment, Map, MapResolution, Points},
	},
};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use super::App;
use super::state::HitMap;
use super::theme::Theme;
use crate::handoff::SelectionStore;
use crate::map::MapView;
use crate::screen::{DrawerView, MenuView};
use crate::types::{BadgeKind, Route, TransportMode};

const HANDLE: &str = "━━━━━━";
const PLACEHOLDER: &str = "Where to?";
const CARD_HEIGHT: u16 = 3;

impl<S: SelectionStore> App<S> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		self.viewport_height = area.height;
		let view = self.screen.view();
		let mut hits = HitMap::default();

		let [header, body] =
			Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
		render_header(frame, header, &view, &self.theme);
		render_map(frame, body, &view.map, &self.theme);

		let drawer = drawer_area(body, area.height, view.sheet_height);
		if let Some(route) = &view.recommendation
			&& drawer.y >= body.y + CARD_HEIGHT
		{
			let card = Rect::new(
				body.x + 1,
				drawer.y - CARD_HEIGHT,
				body.width.saturating_sub(2).min(64),
				CARD_HEIGHT,
			);
			render_card(frame, card, route, &self.theme);
			hits.recommendation = Some(card);
		}
		self.render_drawer(frame, drawer, &view, &mut hits);

		if let Some(menu) = &view.menu {
			render_menu(frame, area, menu, self.menu_cursor, &self.theme);
		}
		self.hits = hits;
	}

	fn render_drawer(&self, frame: &mut Frame, area: Rect, view: &DrawerView, hits: &mut HitMap) {
		let theme = &self.theme;
		frame.render_widget(Clear, area);
		frame.render_widget(Block::new().style(theme.sheet), area);
		let mut rows = RowCursor::new(area);

		let Some(handle) = rows.take(1) else {
			return;
		};
		let handle_style = if view.dragging {
			theme.prompt
		} else {
			theme.handle
		};
		frame.render_widget(
			Paragraph::new(HANDLE)
				.alignment(Alignment::Center)
				.style(handle_style),
			handle,
		);
		hits.handle = Some(handle);

		let Some(input_row) = rows.take(1) else {
			return;
		};
		self.render_input(frame, input_row, view.searching);

		for (index, place) in view.suggestions.places().iter().enumerate() {
			let Some(row) = rows.take(1) else {
				break;
			};
			let line = Line::from(vec![
				Span::styled("  ⌖ ", theme.muted),
				Span::raw(place.name.clone()),
			]);
			frame.render_widget(Paragraph::new(line), row);
			hits.suggestions.push((index, row));
		}

		if let Some(row) = rows.take(1) {
			render_chips(frame, row, view, theme, hits);
		}
		if let Some(row) = rows.take(1) {
			render_tabs(frame, row, view.tab, theme, hits);
		}

		if let Some(message) = view.empty_message {
			if let Some(row) = rows.take(1) {
				frame.render_widget(
					Paragraph::new(message)
						.alignment(Alignment::Center)
						.style(theme.empty),
					row,
				);
			}
			return;
		}

		for (index, route) in view.routes.routes().iter().enumerate() {
			let Some(card) = rows.take(2) else {
				break;
			};
			let highlighted = index == self.highlighted;
			render_route(frame, card, route, highlighted, theme);
			hits.routes.push((route.id(), card));
		}
	}

	fn render_input(&self, frame: &mut Frame, area: Rect, searching: bool) {
		let theme = &self.theme;
		let prompt = "› ";
		let mut line = Line::from(Span::styled(prompt, theme.prompt));
		if self.input.text().is_empty() {
			line.spans.push(Span::styled(PLACEHOLDER, theme.muted));
		} else {
			line.spans.push(Span::raw(self.input.text().to_string()));
		}
		frame.render_widget(Paragraph::new(line), area);

		if searching {
			let spinner = Throbber::default()
				.style(theme.muted)
				.throbber_style(theme.muted)
				.to_symbol_span(&self.throbber_state);
			let status = Line::from(vec![spinner, Span::styled("searching ", theme.muted)]);
			frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), area);
		}

		let column = (area.x + prompt.width() as u16).saturating_add(self.input.cursor_column());
		if column < area.right() {
			frame.set_cursor_position((column, area.y));
		}
	}
}

/// Rows of the drawer, handed out top to bottom.
struct RowCursor {
	area: Rect,
	next: u16,
}

impl RowCursor {
	fn new(area: Rect) -> Self {
		Self { area, next: area.y }
	}

	fn take(&mut self, height: u16) -> Option<Rect> {
		if self.next + height > self.area.bottom() {
			return None;
		}
		let rect = Rect::new(self.area.x, self.next, self.area.width, height);
		self.next += height;
		Some(rect)
	}
}

/// The sheet occupies `sheet_height` percent of the terminal, bottom aligned.
fn drawer_area(body: Rect, viewport_height: u16, sheet_height: f64) -> Rect {
	let rows = (f64::from(viewport_height) * sheet_height / 100.0).round() as u16;
	let rows = rows.clamp(1, body.height.max(1)).min(body.height);
	Rect::new(body.x, body.bottom() - rows, body.width, rows)
}

fn render_header(frame: &mut Frame, area: Rect, view: &DrawerView, theme: &Theme) {
	let line = Line::from(vec![
		Span::styled(" ← Search routes", theme.header.add_modifier(Modifier::BOLD)),
		Span::styled(format!("  ·  {}", view.depart), theme.header),
	]);
	frame.render_widget(Paragraph::new(line).style(theme.header), area);
}

fn render_map(frame: &mut Frame, area: Rect, map: &MapView, theme: &Theme) {
	if area.is_empty() {
		return;
	}
	let span = 360.0 / 2f64.powi(i32::from(map.zoom));
	let center = map.center;
	let markers: Vec<(f64, f64, String)> = map
		.markers
		.iter()
		.map(|marker| (marker.lon, marker.lat, marker.popup.clone()))
		.collect();
	let lines: Vec<Vec<(f64, f64)>> = map
		.routes
		.iter()
		.map(|route| {
			route
				.points()
				.into_iter()
				.map(|point| (point.lon, point.lat))
				.collect()
		})
		.collect();
	let land = theme.map_land;
	let marker_color = theme.map_marker;
	let route_color = theme.map_route;

	let canvas = Canvas::default()
		.marker(symbols::Marker::Braille)
		.x_bounds([center.lon - span / 2.0, center.lon + span / 2.0])
		.y_bounds([center.lat - span / 4.0, center.lat + span / 4.0])
		.paint(move |ctx| {
			ctx.draw(&Map {
				resolution: MapResolution::High,
				color: land,
			});
			ctx.layer();
			for line in &lines {
				for pair in line.windows(2) {
					let [(x1, y1), (x2, y2)] = [pair[0], pair[1]];
					ctx.draw(&Segment::new(x1, y1, x2, y2, route_color));
				}
			}
			let coords: Vec<(f64, f64)> = markers.iter().map(|(x, y, _)| (*x, *y)).collect();
			ctx.draw(&Points {
				coords: &coords,
				color: marker_color,
			});
			for (x, y, label) in &markers {
				ctx.print(*x, *y, Span::styled(format!(" {label}"), Style::new().fg(marker_color)));
			}
		});
	frame.render_widget(canvas, area);
}

fn render_card(frame: &mut Frame, area: Rect, route: &Route, theme: &Theme) {
	let details = format!(
		"{} · {} · {} · arrive {}",
		route.station(),
		route.duration(),
		route.cost(),
		route.arrival_time()
	);
	let block = Block::bordered()
		.title(" Recommended ")
		.style(theme.card);
	frame.render_widget(Clear, area);
	frame.render_widget(Paragraph::new(details).block(block), area);
}

fn render_chips(frame: &mut Frame, area: Rect, view: &DrawerView, theme: &Theme, hits: &mut HitMap) {
	let mut x = area.x;
	let mut spans = Vec::new();

	let depart = format!(" {} ▾ ", view.depart);
	let width = depart.width() as u16;
	if x + width <= area.right() {
		hits.depart_chip = Some(Rect::new(x, area.y, width, 1));
		spans.push(Span::styled(depart, theme.chip_inactive.add_modifier(Modifier::BOLD)));
		x += width;
	}

	for chip in &view.chips {
		let label = format!(" {} ", chip.key.chip_label());
		let width = label.width() as u16;
		if x + 1 + width > area.right() {
			break;
		}
		spans.push(Span::raw(" "));
		x += 1;
		let style = if chip.active {
			theme.chip_active
		} else {
			theme.chip_inactive
		};
		hits.chips.push((chip.key, Rect::new(x, area.y, width, 1)));
		spans.push(Span::styled(label, style));
		x += width;
	}
	frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: TransportMode, theme: &Theme, hits: &mut HitMap) {
	let mut x = area.x;
	let mut spans = Vec::new();
	for tab in TransportMode::ALL {
		let label = format!(" {} ", tab.tab_label());
		let width = label.width() as u16;
		if x + width > area.right() {
			break;
		}
		let style = if tab == active {
			theme.tab_active
		} else {
			theme.tab_inactive
		};
		hits.tabs.push((tab, Rect::new(x, area.y, width, 1)));
		spans.push(Span::styled(label, style));
		x += width;
	}
	frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_route(frame: &mut Frame, area: Rect, route: &Route, highlighted: bool, theme: &Theme) {
	let badge_style = match route.badge().kind {
		BadgeKind::Good => theme.chip_inactive,
		BadgeKind::Moderate => theme.muted,
		BadgeKind::Bad => theme.risk,
	};
	let title = Line::from(vec![
		Span::styled(format!(" {}", route.station()), Style::new().add_modifier(Modifier::BOLD)),
		Span::raw("  "),
		Span::styled(format!("[{}]", route.badge().text), badge_style),
		Span::raw("  "),
		Span::raw(route.cost().to_string()),
	]);
	let details = match route.risk_text() {
		Some(risk) => Line::from(Span::styled(format!("   ⚠ {risk}"), theme.risk)),
		None => Line::from(Span::styled(
			format!(
				"   {} · {} · arrive {} · {} {}",
				route.distance(),
				route.duration(),
				route.arrival_time(),
				route.co2(),
				route.co2_label()
			),
			theme.muted,
		)),
	};
	let mut paragraph = Paragraph::new(vec![title, details]);
	if highlighted {
		paragraph = paragraph.style(theme.row_highlight);
	}
	frame.render_widget(paragraph, area);
}

fn render_menu(frame: &mut Frame, screen: Rect, menu: &MenuView, cursor: usize, theme: &Theme) {
	let bounds = menu.bounds;
	let area = Rect::new(
		bounds.left as u16,
		bounds.top as u16,
		bounds.width as u16,
		bounds.height as u16,
	)
	.intersection(screen);
	if area.is_empty() {
		return;
	}
	let lines: Vec<Line> = menu
		.options
		.iter()
		.enumerate()
		.map(|(index, (option, selected))| {
			let mark = if *selected { "✓ " } else { "  " };
			let style = if index == cursor {
				theme.menu_selected
			} else {
				theme.menu
			};
			Line::styled(format!("{mark}{option}"), style)
		})
		.collect();
	frame.render_widget(Clear, area);
	frame.render_widget(Paragraph::new(lines).style(theme.menu), area);
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use ratatui::buffer::Buffer;
	use ratatui::crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

	use super::*;
	use crate::dropdown::MenuGeometry;
	use crate::geocode::{GeocodeClient, GeocodeError, GeocodeRuntime, PlaceSearch};
	use crate::handoff::{JOURNEY_DETAILS, MemorySelectionStore, RecordingNavigator};
	use crate::screen::{ScreenConfig, SearchScreen};
	use crate::sheet::SHEET_MID;
	use crate::types::{DepartOption, Place};

	struct NoPlaces;

	impl PlaceSearch for NoPlaces {
		fn lookup(&self, _query: &str, _limit: usize) -> Result<Vec<Place>, GeocodeError> {
			Ok(Vec::new())
		}
	}

	fn app() -> App<MemorySelectionStore> {
		let config = ScreenConfig {
			menu_geometry: MenuGeometry::CELLS,
			..ScreenConfig::default()
		};
		let geocode = GeocodeRuntime::spawn(GeocodeClient::new(NoPlaces), Duration::ZERO);
		let screen = SearchScreen::new(
			config,
			geocode,
			MemorySelectionStore::default(),
			RecordingNavigator::default(),
			Instant::now(),
		);
		App::new(screen, Theme::default())
	}

	fn draw(app: &mut App<MemorySelectionStore>) -> Buffer {
		let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
		terminal.draw(|frame| app.draw(frame)).expect("draw");
		terminal.backend().buffer().clone()
	}

	fn text(buffer: &Buffer) -> String {
		let area = buffer.area;
		let mut out = String::new();
		for y in area.top()..area.bottom() {
			for x in area.left()..area.right() {
				out.push_str(buffer[(x, y)].symbol());
			}
			out.push('\n');
		}
		out
	}

	fn click(column: u16, row: u16) -> MouseEvent {
		mouse(MouseEventKind::Down(MouseButton::Left), column, row)
	}

	fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
		MouseEvent {
			kind,
			column,
			row,
			modifiers: KeyModifiers::NONE,
		}
	}

	#[test]
	fn drawer_shows_tabs_chips_and_routes() {
		let mut app = app();
		let screen = text(&draw(&mut app));
		assert!(screen.contains("MRT/LRT"));
		assert!(screen.contains("Accessible"));
		assert!(screen.contains("Depart Now"));
		assert!(screen.contains("Bus Station"));
		assert!(screen.contains("Recommended"));
		assert_eq!(app.hits.routes.len(), 2);
	}

	#[test]
	fn clicking_a_tab_switches_the_list() {
		let mut app = app();
		draw(&mut app);
		let (_, rect) = app.hits.tabs[1];
		app.handle_mouse(click(rect.x, rect.y)).expect("mouse");
		assert_eq!(app.screen.state().tab(), TransportMode::Train);

		let screen = text(&draw(&mut app));
		assert!(screen.contains("Train Station"));
		let ids: Vec<u32> = app.hits.routes.iter().map(|(id, _)| *id).collect();
		assert_eq!(ids, vec![3]);
	}

	#[test]
	fn empty_tab_shows_message_without_card() {
		let config = ScreenConfig {
			templates: crate::catalog::default_templates()
				.into_iter()
				.filter(|template| template.mode == TransportMode::Bus)
				.collect(),
			..ScreenConfig::default()
		};
		let geocode = GeocodeRuntime::spawn(GeocodeClient::new(NoPlaces), Duration::ZERO);
		let screen = SearchScreen::new(
			config,
			geocode,
			MemorySelectionStore::default(),
			RecordingNavigator::default(),
			Instant::now(),
		);
		let mut app = App::new(screen, Theme::default());
		app.screen.select_tab(TransportMode::Train);

		let screen = text(&draw(&mut app));
		assert!(screen.contains(crate::screen::NO_ROUTES_MESSAGE));
		assert!(app.hits.routes.is_empty());
		assert!(app.hits.recommendation.is_none());
	}

	#[test]
	fn clicking_a_route_hands_off() {
		let mut app = app();
		draw(&mut app);
		let (id, rect) = app.hits.routes[0];
		let outcome = app
			.handle_mouse(click(rect.x + 1, rect.y))
			.expect("mouse")
			.expect("outcome");
		assert!(outcome.accepted);
		assert_eq!(outcome.target.map(|target| target.path).as_deref(), Some(JOURNEY_DETAILS));
		assert_eq!(app.screen.store().load().expect("load").map(|route| route.id()), Some(id));
	}

	#[test]
	fn dragging_the_handle_snaps_to_a_detent() {
		let mut app = app();
		draw(&mut app);
		let handle = app.hits.handle.expect("handle");
		app.handle_mouse(click(handle.x + 2, handle.y)).expect("press");
		assert!(app.screen.listeners().is_active());

		// 30 rows: moving down 7 rows drops the sheet from 65% to about 42%.
		let target = handle.y + 7;
		app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), handle.x + 2, target))
			.expect("drag");
		app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), handle.x + 2, target))
			.expect("release");
		assert!(!app.screen.listeners().is_active());
		assert_eq!(app.screen.state().sheet_height(), SHEET_MID);
	}

	#[test]
	fn depart_menu_selects_on_click_and_closes() {
		let mut app = app();
		draw(&mut app);
		let chip = app.hits.depart_chip.expect("chip");
		app.handle_mouse(click(chip.x, chip.y)).expect("open");
		assert!(app.screen.state().depart().is_open());

		draw(&mut app);
		let bounds = app.screen.state().depart().menu_bounds().expect("bounds");
		let row = bounds.top as u16 + DepartOption::LeaveAt2030.position() as u16;
		app.handle_mouse(click(bounds.left as u16 + 1, row)).expect("pick");
		assert!(!app.screen.state().depart().is_open());
		assert_eq!(app.screen.state().depart().selected(), DepartOption::LeaveAt2030);
	}
}
