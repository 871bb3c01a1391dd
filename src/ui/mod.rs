//! Terminal front end for the route-search drawer.

mod actions;
mod input;
mod render;
mod runtime;
mod state;
pub mod theme;

pub use input::QueryInput;
pub use runtime::run;
pub use state::{App, DrawerOutcome};
pub use theme::Theme;
