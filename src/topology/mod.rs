//! TopoJSON parsing and decoding.
//!
//! Converts shared-arc topologies into standalone GeoJSON features.

mod decode;
mod model;

pub use decode::{feature, DecodeError, Decoded, Decoder};
pub use model::{GeometryError, TopoGeometry, TopoKind, Topology, Transform};
