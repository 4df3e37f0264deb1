//! Conversion of TopoJSON geometry into standalone GeoJSON features.
//!
//! Arcs are decoded per reference: quantized positions are delta-encoded with
//! the running sum reset at the start of each arc, reversed references walk
//! the arc backwards, and consecutive arcs share their junction position.

use serde_json::Map;
use thiserror::Error;

use super::model::{TopoGeometry, TopoKind, Topology, Transform};
use crate::models::{Feature, FeatureCollection, Geometry, Position};

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("arc index {index} out of range ({available} arcs)")]
    ArcOutOfRange { index: i64, available: usize },

    #[error("position has fewer than two coordinates")]
    ShortPosition,
}

type Result<T> = std::result::Result<T, DecodeError>;

/// Output of [`feature`]: collections decode to many features, everything
/// else to one.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Feature(Feature),
    Collection(FeatureCollection),
}

impl Decoded {
    pub fn into_features(self) -> Vec<Feature> {
        match self {
            Decoded::Feature(f) => vec![f],
            Decoded::Collection(fc) => fc.features,
        }
    }
}

/// Decode a top-level object of `topology`.
pub fn feature(topology: &Topology, object: &TopoGeometry) -> Result<Decoded> {
    Decoder::new(topology).decode(object)
}

/// Decodes geometries against one topology's arc table and transform.
pub struct Decoder<'a> {
    arcs: &'a [Vec<Position>],
    transform: Option<Transform>,
}

impl<'a> Decoder<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        Self {
            arcs: &topology.arcs,
            transform: topology.transform,
        }
    }

    pub fn decode(&self, object: &TopoGeometry) -> Result<Decoded> {
        match &object.kind {
            TopoKind::GeometryCollection(members) => members
                .iter()
                .map(|m| self.feature(m))
                .collect::<Result<Vec<_>>>()
                .map(|features| Decoded::Collection(FeatureCollection::new(features))),
            _ => self.feature(object).map(Decoded::Feature),
        }
    }

    /// Decode one geometry into a feature carrying its id, bbox and properties.
    pub fn feature(&self, object: &TopoGeometry) -> Result<Feature> {
        Ok(Feature {
            id: object.id.clone(),
            bbox: object.bbox.clone(),
            properties: object.properties.clone().unwrap_or_else(Map::new),
            geometry: self.geometry(object)?,
        })
    }

    pub fn geometry(&self, object: &TopoGeometry) -> Result<Option<Geometry>> {
        let geometry = match &object.kind {
            TopoKind::Null => return Ok(None),
            TopoKind::Point(p) => Geometry::Point {
                coordinates: self.point(p)?,
            },
            TopoKind::MultiPoint(points) => Geometry::MultiPoint {
                coordinates: points
                    .iter()
                    .map(|p| self.point(p))
                    .collect::<Result<_>>()?,
            },
            TopoKind::LineString(arcs) => Geometry::LineString {
                coordinates: self.line(arcs)?,
            },
            TopoKind::MultiLineString(lines) => Geometry::MultiLineString {
                coordinates: lines.iter().map(|l| self.line(l)).collect::<Result<_>>()?,
            },
            TopoKind::Polygon(rings) => Geometry::Polygon {
                coordinates: self.polygon(rings)?,
            },
            TopoKind::MultiPolygon(polygons) => Geometry::MultiPolygon {
                coordinates: polygons
                    .iter()
                    .map(|p| self.polygon(p))
                    .collect::<Result<_>>()?,
            },
            TopoKind::GeometryCollection(members) => Geometry::GeometryCollection {
                geometries: members
                    .iter()
                    .filter_map(|m| self.geometry(m).transpose())
                    .collect::<Result<_>>()?,
            },
        };
        Ok(Some(geometry))
    }

    /// Points are quantized but never delta-encoded.
    fn point(&self, position: &[f64]) -> Result<Position> {
        let mut origin = (0.0, 0.0);
        self.position(position, &mut origin)
    }

    fn position(&self, input: &[f64], origin: &mut (f64, f64)) -> Result<Position> {
        let [x, y, rest @ ..] = input else {
            return Err(DecodeError::ShortPosition);
        };
        let Some(t) = self.transform else {
            return Ok(input.to_vec());
        };

        origin.0 += x;
        origin.1 += y;
        let mut output = Vec::with_capacity(input.len());
        output.push(origin.0 * t.scale[0] + t.translate[0]);
        output.push(origin.1 * t.scale[1] + t.translate[1]);
        output.extend_from_slice(rest);
        Ok(output)
    }

    /// Append arc `index` to `points`, replacing the shared junction position.
    fn arc(&self, index: i64, points: &mut Vec<Position>) -> Result<()> {
        let resolved = if index < 0 { !index } else { index };
        let arc = usize::try_from(resolved)
            .ok()
            .and_then(|i| self.arcs.get(i))
            .ok_or(DecodeError::ArcOutOfRange {
                index,
                available: self.arcs.len(),
            })?;

        points.pop();
        let mut origin = (0.0, 0.0);
        for p in arc {
            points.push(self.position(p, &mut origin)?);
        }

        if index < 0 {
            let start = points.len() - arc.len();
            points[start..].reverse();
        }
        Ok(())
    }

    fn line(&self, arcs: &[i64]) -> Result<Vec<Position>> {
        let mut points = Vec::new();
        for &index in arcs {
            self.arc(index, &mut points)?;
        }
        if points.len() == 1 {
            points.push(points[0].clone());
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> Result<Vec<Position>> {
        let mut points = self.line(arcs)?;
        if let Some(first) = points.first().cloned() {
            while points.len() < 4 {
                points.push(first.clone());
            }
        }
        Ok(points)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<Position>>> {
        rings.iter().map(|r| self.ring(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn topology(value: Value) -> Topology {
        serde_json::from_value(value).unwrap()
    }

    fn object(value: Value) -> TopoGeometry {
        serde_json::from_value(value).unwrap()
    }

    fn coords(geometry: Option<Geometry>) -> Vec<Vec<Position>> {
        match geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates,
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    /// Unit square split into two arcs: bottom/right and top/left.
    fn square() -> Topology {
        topology(json!({
            "type": "Topology",
            "objects": {},
            "arcs": [
                [[0, 0], [1, 0], [1, 1]],
                [[1, 1], [0, 1], [0, 0]]
            ]
        }))
    }

    #[test]
    fn test_stitches_arcs_at_junction() {
        let topo = square();
        let decoder = Decoder::new(&topo);
        let g = decoder
            .geometry(&object(json!({ "type": "Polygon", "arcs": [[0, 1]] })))
            .unwrap();
        assert_eq!(
            coords(g),
            vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 1.0],
                vec![0.0, 0.0]
            ]]
        );
    }

    #[test]
    fn test_reversed_arc() {
        let topo = square();
        let decoder = Decoder::new(&topo);
        // ~1 = -2 and ~0 = -1: the same ring walked clockwise
        let g = decoder
            .geometry(&object(json!({ "type": "Polygon", "arcs": [[-2, -1]] })))
            .unwrap();
        assert_eq!(
            coords(g),
            vec![vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
                vec![1.0, 0.0],
                vec![0.0, 0.0]
            ]]
        );
    }

    #[test]
    fn test_delta_decoding_with_transform() {
        let topo = topology(json!({
            "type": "Topology",
            "transform": { "scale": [0.5, 2.0], "translate": [10.0, 20.0] },
            "objects": {},
            "arcs": [
                [[0, 0], [2, 0], [0, 1]],
                [[2, 1], [-2, 0], [0, -1]]
            ]
        }));
        let decoder = Decoder::new(&topo);
        let g = decoder
            .geometry(&object(json!({ "type": "Polygon", "arcs": [[0, 1]] })))
            .unwrap();
        assert_eq!(
            coords(g),
            vec![vec![
                vec![10.0, 20.0],
                vec![11.0, 20.0],
                vec![11.0, 22.0],
                vec![10.0, 22.0],
                vec![10.0, 20.0]
            ]]
        );
    }

    #[test]
    fn test_point_is_not_delta_encoded() {
        let topo = topology(json!({
            "transform": { "scale": [1.0, 1.0], "translate": [100.0, 0.0] },
            "arcs": []
        }));
        let decoder = Decoder::new(&topo);
        let g = decoder
            .geometry(&object(json!({ "type": "MultiPoint", "coordinates": [[1, 1], [1, 1, 7]] })))
            .unwrap();
        assert_eq!(
            g,
            Some(Geometry::MultiPoint {
                coordinates: vec![vec![101.0, 1.0], vec![101.0, 1.0, 7.0]]
            })
        );
    }

    #[test]
    fn test_ring_is_padded_to_four_positions() {
        let topo = topology(json!({ "arcs": [[[0, 0], [1, 1]]] }));
        let decoder = Decoder::new(&topo);
        let g = decoder
            .geometry(&object(json!({ "type": "Polygon", "arcs": [[0]] })))
            .unwrap();
        assert_eq!(
            coords(g),
            vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
                vec![0.0, 0.0]
            ]]
        );
    }

    #[test]
    fn test_line_with_single_position_is_doubled() {
        let topo = topology(json!({ "arcs": [[[3, 4]]] }));
        let decoder = Decoder::new(&topo);
        let g = decoder
            .geometry(&object(json!({ "type": "LineString", "arcs": [0] })))
            .unwrap();
        assert_eq!(
            g,
            Some(Geometry::LineString {
                coordinates: vec![vec![3.0, 4.0], vec![3.0, 4.0]]
            })
        );
    }

    #[test]
    fn test_arc_out_of_range() {
        let topo = square();
        let err = feature(&topo, &object(json!({ "type": "Polygon", "arcs": [[0, 5]] })))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::ArcOutOfRange {
                index: 5,
                available: 2
            }
        );

        let err = feature(&topo, &object(json!({ "type": "Polygon", "arcs": [[-3]] })))
            .unwrap_err();
        assert!(matches!(err, DecodeError::ArcOutOfRange { index: -3, .. }));
    }

    #[test]
    fn test_short_position() {
        let topo = topology(json!({ "arcs": [[[0, 0], [1]]] }));
        let err = feature(&topo, &object(json!({ "type": "LineString", "arcs": [0] })))
            .unwrap_err();
        assert_eq!(err, DecodeError::ShortPosition);
    }

    #[test]
    fn test_feature_keeps_id_bbox_and_properties() {
        let topo = square();
        let decoded = feature(
            &topo,
            &object(json!({
                "type": "Polygon",
                "arcs": [[0, 1]],
                "id": 7,
                "bbox": [0, 0, 1, 1],
                "properties": { "name": "System A" }
            })),
        )
        .unwrap();

        let Decoded::Feature(f) = decoded else {
            panic!("expected a single feature");
        };
        assert_eq!(f.id, Some(json!(7)));
        assert_eq!(f.bbox, Some(vec![0.0, 0.0, 1.0, 1.0]));
        assert_eq!(f.properties["name"], json!("System A"));
    }

    #[test]
    fn test_null_geometry_feature() {
        let topo = square();
        let decoded = feature(&topo, &object(json!({ "type": null }))).unwrap();
        let features = decoded.into_features();
        assert_eq!(features.len(), 1);
        assert!(features[0].geometry.is_none());
        assert!(features[0].properties.is_empty());
    }

    #[test]
    fn test_collection_yields_feature_per_member() {
        let topo = square();
        let decoded = feature(
            &topo,
            &object(json!({
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "arcs": [[0, 1]], "properties": { "n": 1 } },
                    { "type": "LineString", "arcs": [1] },
                    {
                        "type": "GeometryCollection",
                        "geometries": [{ "type": "Point", "coordinates": [0, 0] }, { "type": null }]
                    }
                ]
            })),
        )
        .unwrap();

        let Decoded::Collection(fc) = decoded else {
            panic!("expected a collection");
        };
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.features[0].properties["n"], json!(1));
        assert!(fc.features[1].properties.is_empty());
        assert_eq!(
            fc.features[2].geometry,
            Some(Geometry::GeometryCollection {
                geometries: vec![Geometry::Point {
                    coordinates: vec![0.0, 0.0]
                }]
            })
        );
    }
}
