use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthStr;

/// The drawer's search bar: a [`TextArea`] held to a single line.
#[derive(Debug, Clone)]
pub struct QueryInput {
	textarea: TextArea<'static>,
}

impl Default for QueryInput {
	fn default() -> Self {
		Self::new(String::new())
	}
}

impl QueryInput {
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea.lines().first().map_or("", String::as_str)
	}

	/// Replace the contents and move the cursor to the end.
	pub fn set_text(&mut self, text: impl Into<String>) {
		*self = Self::new(text);
	}

	/// Display column of the cursor, accounting for wide characters.
	#[must_use]
	pub fn cursor_column(&self) -> u16 {
		let (_, column) = self.textarea.cursor();
		let prefix: String = self.text().chars().take(column).collect();
		u16::try_from(prefix.width()).unwrap_or(u16::MAX)
	}

	/// Apply an editing key. Returns whether the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let control = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('u') if control => {
				let changed = !self.text().is_empty();
				self.set_text(String::new());
				changed
			}
			// Newlines never enter the query.
			KeyCode::Enter => false,
			KeyCode::Char('j' | 'm') if control => false,
			_ => self.textarea.input(key),
		}
	}
}
