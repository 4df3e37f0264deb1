//! Core data models for county boundary resolution.

pub mod feature;
pub mod region;

pub use feature::{Feature, FeatureCollection, Geometry, Position};
pub use region::RegionId;
