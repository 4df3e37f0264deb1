//! cwsbounds - county water-system boundaries and AP style county names
//!
//! This library resolves per-county TopoJSON files into GeoJSON feature
//! collections and formats county labels for display.

pub mod bounds;
pub mod config;
pub mod models;
pub mod naming;
pub mod topology;

pub use bounds::{BoundaryResolver, Unavailable};
pub use models::{Feature, FeatureCollection, RegionId};
pub use naming::{ap_state, county_label};
