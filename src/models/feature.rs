//! GeoJSON output types handed to the rendering layer.

use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position: `[x, y]` plus any extra dimensions carried by the source.
pub type Position = Vec<f64>;

/// GeoJSON geometry object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Convert to a `geo` geometry. Returns `None` if any position has fewer
    /// than two dimensions.
    pub fn to_geo(&self) -> Option<geo_types::Geometry<f64>> {
        let geometry: geo_types::Geometry<f64> = match self {
            Geometry::Point { coordinates } => Point::from(coord(coordinates)?).into(),
            Geometry::MultiPoint { coordinates } => MultiPoint::new(
                coordinates
                    .iter()
                    .map(|p| coord(p).map(Point::from))
                    .collect::<Option<Vec<_>>>()?,
            )
            .into(),
            Geometry::LineString { coordinates } => line_string(coordinates)?.into(),
            Geometry::MultiLineString { coordinates } => MultiLineString::new(
                coordinates
                    .iter()
                    .map(|l| line_string(l))
                    .collect::<Option<Vec<_>>>()?,
            )
            .into(),
            Geometry::Polygon { coordinates } => polygon(coordinates)?.into(),
            Geometry::MultiPolygon { coordinates } => MultiPolygon::new(
                coordinates
                    .iter()
                    .map(|p| polygon(p))
                    .collect::<Option<Vec<_>>>()?,
            )
            .into(),
            Geometry::GeometryCollection { geometries } => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection::new_from(
                    geometries
                        .iter()
                        .map(Geometry::to_geo)
                        .collect::<Option<Vec<_>>>()?,
                ))
            }
        };
        Some(geometry)
    }
}

fn coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn line_string(positions: &[Position]) -> Option<LineString<f64>> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let mut rings = rings
        .iter()
        .map(|r| line_string(r))
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Some(Polygon::new(exterior, rings.collect()))
}

/// A standalone GeoJSON feature, independent of any shared arc table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    #[serde(default)]
    pub properties: Map<String, Value>,

    /// `None` serializes as `"geometry": null`
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Bounding box of the geometry as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .as_ref()?
            .to_geo()?
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Ordered collection of features for one county.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Union of all feature bounding boxes
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.features
            .iter()
            .filter_map(Feature::bounds)
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    }
}
