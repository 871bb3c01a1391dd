//! Transit route search drawer.
//!
//! The library is a headless controller: [`screen::SearchScreen`] owns the
//! drawer state and wires the geocoder, route catalog, filters, drag sheet and
//! depart-time dropdown together. The [`ui`] module puts a terminal front end
//! on top of it.

pub mod app_dirs;
pub mod catalog;
pub mod dropdown;
pub mod filter;
pub mod geocode;
pub mod handoff;
pub mod logging;
pub mod map;
pub mod screen;
pub mod sheet;
pub mod types;
pub mod ui;

pub use handoff::{FileSelectionStore, NavigationTarget, RecordingNavigator, SelectionStore};
pub use screen::{DrawerView, ScreenConfig, SearchScreen};
pub use types::{
	DepartOption, FilterKey, FilterSet, Place, Route, RouteTemplate, TransportMode,
};
pub use ui::{App, DrawerOutcome, Theme, run, theme};
