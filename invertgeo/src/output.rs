use std::collections::BTreeMap;
use std::io::Write;

use geo::Coord;
use geo::Geometry;
use geo::LineString;
use geo::Polygon;
use geometry_inverter::FeatureId;
use geometry_inverter::MemoryLayer;
use serde::Serialize;

use crate::CliError;

type Position = (f64, f64);

/// GeoJSON geometry object.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub(crate) enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub(crate) enum Entity {
    Feature {
        id: u64,
        properties: BTreeMap<String, String>,
        /// `null` for a feature without geometry.
        geometry: Option<GeoJsonGeometry>,
    },
    FeatureCollection {
        features: Vec<Entity>,
    },
}

#[inline]
fn position(c: &Coord<f64>) -> Position {
    (c.x, c.y)
}

fn line(ls: &LineString<f64>) -> Vec<Position> {
    ls.0.iter().map(position).collect()
}

/// Exterior ring first, then the holes.
fn rings(p: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(p.exterior())
        .chain(p.interiors())
        .map(line)
        .collect()
}

impl From<&Geometry<f64>> for GeoJsonGeometry {
    fn from(g: &Geometry<f64>) -> Self {
        match g {
            Geometry::Point(p) => Self::Point {
                coordinates: position(&p.0),
            },
            Geometry::Line(l) => Self::LineString {
                coordinates: vec![position(&l.start), position(&l.end)],
            },
            Geometry::LineString(ls) => Self::LineString {
                coordinates: line(ls),
            },
            Geometry::Polygon(p) => Self::Polygon {
                coordinates: rings(p),
            },
            Geometry::MultiPoint(mp) => Self::MultiPoint {
                coordinates: mp.0.iter().map(|p| position(&p.0)).collect(),
            },
            Geometry::MultiLineString(mls) => Self::MultiLineString {
                coordinates: mls.0.iter().map(line).collect(),
            },
            Geometry::MultiPolygon(mp) => Self::MultiPolygon {
                coordinates: mp.0.iter().map(rings).collect(),
            },
            Geometry::GeometryCollection(gc) => Self::GeometryCollection {
                geometries: gc.0.iter().map(Self::from).collect(),
            },
            Geometry::Rect(r) => Self::Polygon {
                coordinates: rings(&r.to_polygon()),
            },
            Geometry::Triangle(t) => Self::Polygon {
                coordinates: rings(&t.to_polygon()),
            },
        }
    }
}

fn feature(id: FeatureId, g: Option<&Geometry<f64>>) -> Entity {
    Entity::Feature {
        id: id.0,
        properties: BTreeMap::new(),
        geometry: g.map(GeoJsonGeometry::from),
    }
}

/// Write every committed feature of the layer as one FeatureCollection.
pub(crate) fn write_collection<W>(w: &mut W, layer: &MemoryLayer<f64>) -> Result<(), CliError>
where
    W: Write,
{
    let collection = Entity::FeatureCollection {
        features: layer.iter().map(|(id, g)| feature(id, g)).collect(),
    };
    serde_json::to_writer(&mut *w, &collection)?;
    writeln!(w)?;
    Ok(())
}

/// Write one feature per line.
pub(crate) fn write_features<W>(w: &mut W, layer: &MemoryLayer<f64>) -> Result<(), CliError>
where
    W: Write,
{
    for (id, g) in layer.iter() {
        serde_json::to_writer(&mut *w, &feature(id, g))?;
        writeln!(w)?;
    }
    Ok(())
}
