//! County boundary lookup.
//!
//! Fetches a county's topology file, picks out its object and decodes it
//! into a GeoJSON feature collection. Every failure collapses into
//! "no boundaries available" for callers that only need presence.

mod resolver;
mod source;

pub use resolver::{collection_from_topology, BoundaryResolver, DocumentError, Unavailable};
pub use source::{BoundarySource, SourceError, StaticSource};
