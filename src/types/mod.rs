//! Domain values shared by the drawer components.
//!
//! Everything here is plain data: routes and the templates they are derived
//! from, geocoded places, and the small closed sets (transport modes, filter
//! keys, depart options) that the drawer toggles between.

mod depart;
mod filters;
mod mode;
mod place;
mod route;

pub use depart::{DepartOption, ParseDepartError};
pub use filters::{FilterKey, FilterSet, ParseFilterError};
pub use mode::{ParseModeError, StationKind, TransportMode};
pub use place::{Coordinate, Place};
pub use route::{ACCESSIBLE_TAG, Badge, BadgeKind, Route, RouteTemplate};
