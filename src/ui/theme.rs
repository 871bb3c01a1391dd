//! Colour schemes for the terminal drawer.

use ratatui::style::{Color, Modifier, Style};

const GREEN: Color = Color::Rgb(0x00, 0xC8, 0x53);
const TAB_YELLOW: Color = Color::Rgb(0xFF, 0xFF, 0x00);
const GREY: Color = Color::Rgb(0x6C, 0x75, 0x7D);
const RISK: Color = Color::Rgb(0xE0, 0x3E, 0x3E);

/// Styles for every drawer element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
	pub header: Style,
	pub sheet: Style,
	pub handle: Style,
	pub prompt: Style,
	pub chip_active: Style,
	pub chip_inactive: Style,
	pub tab_active: Style,
	pub tab_inactive: Style,
	pub row_highlight: Style,
	pub muted: Style,
	pub risk: Style,
	pub empty: Style,
	pub card: Style,
	pub menu: Style,
	pub menu_selected: Style,
	/// Land outlines on the background map.
	pub map_land: Color,
	pub map_marker: Color,
	pub map_route: Color,
}

impl Default for Theme {
	fn default() -> Self {
		transit()
	}
}

fn transit() -> Theme {
	Theme {
		header: Style::new().fg(Color::Black).bg(Color::Rgb(0xEA, 0xEA, 0xEA)),
		sheet: Style::new().fg(Color::White).bg(Color::Rgb(0x1F, 0x2A, 0x36)),
		handle: Style::new().fg(GREY),
		prompt: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
		chip_active: Style::new().fg(Color::White).bg(GREEN),
		chip_inactive: Style::new().fg(GREEN),
		tab_active: Style::new()
			.fg(TAB_YELLOW)
			.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
		tab_inactive: Style::new().fg(Color::White),
		row_highlight: Style::new().bg(Color::Rgb(0x2E, 0x3D, 0x4D)),
		muted: Style::new().fg(GREY),
		risk: Style::new().fg(RISK).add_modifier(Modifier::BOLD),
		empty: Style::new().fg(GREY).add_modifier(Modifier::ITALIC),
		card: Style::new().fg(Color::Black).bg(Color::White),
		menu: Style::new().fg(Color::Black).bg(Color::White),
		menu_selected: Style::new().fg(Color::White).bg(GREEN),
		map_land: Color::Rgb(0x4A, 0x5A, 0x6A),
		map_marker: RISK,
		map_route: GREEN,
	}
}

fn light() -> Theme {
	Theme {
		sheet: Style::new().fg(Color::Black).bg(Color::White),
		prompt: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
		tab_active: Style::new()
			.fg(GREEN)
			.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
		tab_inactive: Style::new().fg(Color::Rgb(0x34, 0x3A, 0x40)),
		row_highlight: Style::new().bg(Color::Rgb(0xE9, 0xEC, 0xEF)),
		card: Style::new().fg(Color::White).bg(Color::Rgb(0x34, 0x3A, 0x40)),
		map_land: Color::Rgb(0xAD, 0xB5, 0xBD),
		..transit()
	}
}

const BUILTINS: [(&str, fn() -> Theme); 2] = [("transit", transit), ("light", light)];

/// Names accepted by [`by_name`].
#[must_use]
pub fn names() -> Vec<&'static str> {
	BUILTINS.iter().map(|(name, _)| *name).collect()
}

/// Look up a built-in theme, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	BUILTINS
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
		.map(|(_, build)| build())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_listed_theme_resolves() {
		for name in names() {
			assert!(by_name(name).is_some(), "{name} should resolve");
		}
		assert_eq!(by_name(" LIGHT "), Some(light()));
		assert_eq!(by_name("neon"), None);
	}
}
