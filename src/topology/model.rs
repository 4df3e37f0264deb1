//! TopoJSON document types.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::Position;

/// Quantization transform applied to arc and point positions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// A TopoJSON topology.
///
/// Objects are kept as raw JSON and parsed on lookup, so a malformed object
/// elsewhere in the document does not prevent decoding the one requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,

    #[serde(default)]
    pub transform: Option<Transform>,

    #[serde(default)]
    pub objects: Option<Map<String, Value>>,

    #[serde(default)]
    pub arcs: Vec<Vec<Position>>,
}

impl Topology {
    /// Parse a topology from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Names of all objects in the document
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().flat_map(|o| o.keys().map(String::as_str))
    }

    /// Look up and parse a named object. `Ok(None)` if there is no such object.
    pub fn object(&self, name: &str) -> Result<Option<TopoGeometry>, serde_json::Error> {
        match self.objects.as_ref().and_then(|o| o.get(name)) {
            Some(value) => TopoGeometry::deserialize(value).map(Some),
            None => Ok(None),
        }
    }
}

/// A TopoJSON geometry object with its optional identity and properties.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct TopoGeometry {
    pub kind: TopoKind,
    pub id: Option<Value>,
    pub properties: Option<Map<String, Value>>,
    pub bbox: Option<Vec<f64>>,
}

/// Geometry payload. Line and polygon types reference the shared arc table;
/// a negative index `!i` means arc `i` reversed.
#[derive(Debug, Clone, PartialEq)]
pub enum TopoKind {
    /// `"type": null`, or a type outside the GeoJSON set
    Null,
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<i64>),
    MultiLineString(Vec<Vec<i64>>),
    Polygon(Vec<Vec<i64>>),
    MultiPolygon(Vec<Vec<Vec<i64>>>),
    GeometryCollection(Vec<TopoGeometry>),
}

/// Errors for geometry objects whose members don't match their type
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{kind} is missing `{member}`")]
    MissingMember {
        kind: &'static str,
        member: &'static str,
    },

    #[error("{kind} has malformed `{member}`: {source}")]
    MalformedMember {
        kind: &'static str,
        member: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    bbox: Option<Vec<f64>>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    coordinates: Option<Value>,
    #[serde(default)]
    geometries: Option<Vec<TopoGeometry>>,
}

fn member<T: DeserializeOwned>(
    kind: &'static str,
    member: &'static str,
    value: Option<Value>,
) -> Result<T, GeometryError> {
    let value = value.ok_or(GeometryError::MissingMember { kind, member })?;
    serde_json::from_value(value)
        .map_err(|source| GeometryError::MalformedMember { kind, member, source })
}

impl TryFrom<RawGeometry> for TopoGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_deref() {
            Some("Point") => TopoKind::Point(member("Point", "coordinates", raw.coordinates)?),
            Some("MultiPoint") => {
                TopoKind::MultiPoint(member("MultiPoint", "coordinates", raw.coordinates)?)
            }
            Some("LineString") => TopoKind::LineString(member("LineString", "arcs", raw.arcs)?),
            Some("MultiLineString") => {
                TopoKind::MultiLineString(member("MultiLineString", "arcs", raw.arcs)?)
            }
            Some("Polygon") => TopoKind::Polygon(member("Polygon", "arcs", raw.arcs)?),
            Some("MultiPolygon") => {
                TopoKind::MultiPolygon(member("MultiPolygon", "arcs", raw.arcs)?)
            }
            Some("GeometryCollection") => TopoKind::GeometryCollection(raw.geometries.ok_or(
                GeometryError::MissingMember {
                    kind: "GeometryCollection",
                    member: "geometries",
                },
            )?),
            _ => TopoKind::Null,
        };

        Ok(Self {
            kind,
            id: raw.id,
            properties: raw.properties,
            bbox: raw.bbox,
        })
    }
}
