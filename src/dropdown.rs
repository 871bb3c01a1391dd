//! Anchored depart/arrive menu with outside-click dismissal.

use log::debug;

use crate::types::DepartOption;

/// A point in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[must_use]
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	#[must_use]
	pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}

	#[must_use]
	pub fn right(&self) -> f64 {
		self.left + self.width
	}

	#[must_use]
	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	/// Half-open containment: the right and bottom edges are outside.
	#[must_use]
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
	}
}

/// Where an open menu's top-left corner sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuAnchor {
	pub top: f64,
	pub left: f64,
}

/// Size of the menu in the caller's units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuGeometry {
	/// Gap between the trigger's bottom edge and the menu.
	pub gap: f64,
	pub min_width: f64,
	pub row_height: f64,
	pub max_height: f64,
}

impl MenuGeometry {
	/// CSS pixel metrics.
	pub const PIXELS: MenuGeometry = MenuGeometry {
		gap: 4.0,
		min_width: 180.0,
		row_height: 45.0,
		max_height: 250.0,
	};

	/// Terminal cell metrics.
	pub const CELLS: MenuGeometry = MenuGeometry {
		gap: 0.0,
		min_width: 22.0,
		row_height: 1.0,
		max_height: 9.0,
	};
}

impl Default for MenuGeometry {
	fn default() -> Self {
		Self::PIXELS
	}
}

/// Whether a pointer-down should keep travelling to other handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
	Continue,
	Stop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct OpenMenu {
	trigger: Bounds,
	anchor: MenuAnchor,
}

/// The depart-time dropdown. At most one menu is open per picker.
#[derive(Clone, Debug, PartialEq)]
pub struct DepartPicker {
	selected: DepartOption,
	open: Option<OpenMenu>,
	geometry: MenuGeometry,
}

impl Default for DepartPicker {
	fn default() -> Self {
		Self::new(DepartOption::default(), MenuGeometry::default())
	}
}

impl DepartPicker {
	#[must_use]
	pub fn new(selected: DepartOption, geometry: MenuGeometry) -> Self {
		Self {
			selected,
			open: None,
			geometry,
		}
	}

	#[must_use]
	pub fn selected(&self) -> DepartOption {
		self.selected
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.open.is_some()
	}

	#[must_use]
	pub fn anchor(&self) -> Option<MenuAnchor> {
		self.open.map(|menu| menu.anchor)
	}

	/// Open the menu below `trigger`.
	pub fn open(&mut self, trigger: Bounds) -> MenuAnchor {
		let anchor = MenuAnchor {
			top: trigger.bottom() + self.geometry.gap,
			left: trigger.left,
		};
		self.open = Some(OpenMenu { trigger, anchor });
		anchor
	}

	/// Open below `trigger`, or close if a menu is already showing.
	pub fn toggle(&mut self, trigger: Bounds) {
		if self.open.take().is_none() {
			self.open(trigger);
		}
	}

	pub fn close(&mut self) {
		self.open = None;
	}

	/// Area covered by the open menu.
	#[must_use]
	pub fn menu_bounds(&self) -> Option<Bounds> {
		let menu = self.open?;
		let rows = DepartOption::ALL.len() as f64;
		Some(Bounds::new(
			menu.anchor.left,
			menu.anchor.top,
			menu.trigger.width.max(self.geometry.min_width),
			(rows * self.geometry.row_height).min(self.geometry.max_height),
		))
	}

	/// Handle a pointer-down anywhere on screen.
	///
	/// Presses inside the menu are consumed here and never reach outside-click
	/// handling. Presses outside both the menu and its trigger close the menu.
	pub fn pointer_down(&mut self, point: Point) -> Propagation {
		let Some(menu) = self.open else {
			return Propagation::Continue;
		};
		if self.menu_bounds().is_some_and(|bounds| bounds.contains(point)) {
			if let Some(option) = self.option_at(point) {
				self.select(option);
			}
			return Propagation::Stop;
		}
		if !menu.trigger.contains(point) {
			debug!("closing depart menu after outside press");
			self.open = None;
		}
		Propagation::Continue
	}

	/// Menu entry under `point`, if the menu is open and the point is on a row.
	#[must_use]
	pub fn option_at(&self, point: Point) -> Option<DepartOption> {
		let bounds = self.menu_bounds()?;
		if !bounds.contains(point) || self.geometry.row_height <= 0.0 {
			return None;
		}
		let row = ((point.y - bounds.top) / self.geometry.row_height).floor() as usize;
		DepartOption::ALL.get(row).copied()
	}

	/// Pick `option` and close the menu in the same step.
	pub fn select(&mut self, option: DepartOption) {
		self.selected = option;
		self.open = None;
	}
}
