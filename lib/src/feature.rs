use geo::Geometry;
use geo::GeometryCollection;
use geo::LineString;
use geo::MultiLineString;
use geo::MultiPoint;
use geo::MultiPolygon;
use geo::Point;
use geo::Polygon;
use geo_types::Coord;
use topojson::Arc;
use topojson::ArcIndexes;
use topojson::Topology;
use topojson::Value;

use crate::error::Error;
use crate::error::Result;
use crate::kind::GeometryKind;
use crate::layer::MemoryLayer;
use crate::reverse::reverse;
use crate::transform::Transform;
use crate::translate;

/// Names of the objects held by a topology, in document order.
pub fn object_names(topology: &Topology) -> impl Iterator<Item = &str> {
    topology.objects.iter().map(|ng| ng.name.as_str())
}

/// Build an editable layer from a named topology object.
///
/// A `GeometryCollection` object yields one feature per member, numbered
/// from 0 in member order. Any other object yields a single feature 0.
/// The layer kind is the kind shared by all features.
///
/// Errors: -
///   * The object subsection does not contain the name.
///   * Members of different kinds.
///   * Malformed arcs or positions.
pub fn layer_from_topology(topology: &Topology, name: &str) -> Result<MemoryLayer<f64>> {
    let ng = topology
        .objects
        .iter()
        .find(|x| x.name == name)
        .ok_or_else(|| Error::ObjectNotFound(name.to_string()))?;

    let mut builder = Builder::new(topology);
    let geometries = match &ng.geometry.value {
        Value::GeometryCollection(members) => members
            .iter()
            .map(|m| builder.geometry(&m.value))
            .collect::<Result<Vec<_>>>()?,
        value => vec![builder.geometry(value)?],
    };

    let kind = common_kind(name, &geometries)?;
    let mut layer = MemoryLayer::new(name, kind);
    for g in geometries {
        layer.push(Some(g))?;
    }
    Ok(layer)
}

fn common_kind(object: &str, geometries: &[Geometry<f64>]) -> Result<GeometryKind> {
    let mut kinds = geometries.iter().map(GeometryKind::of);
    let Some(first) = kinds.next() else {
        return Ok(GeometryKind::Unsupported);
    };
    match kinds.find(|k| *k != first) {
        Some(second) => Err(Error::MixedKinds {
            object: object.to_string(),
            first,
            second,
        }),
        None => Ok(first),
    }
}

/// State holds data extracted from a Topological object.
#[derive(Debug)]
struct Builder<'a> {
    arcs: &'a [Arc],
    transform: Transform,
}

impl<'a> Builder<'a> {
    fn new(topology: &'a Topology) -> Self {
        Self {
            arcs: &topology.arcs,
            transform: Transform::new(topology.transform.as_ref()),
        }
    }

    /// Append the points of arc `i`, dropping the point shared with the
    /// previous arc.
    fn arc(&mut self, i: i32, points: &mut Vec<Coord<f64>>) -> Result<()> {
        points.pop();

        let a = self.arcs.get(translate(i)).ok_or(Error::ArcOutOfRange(i))?;
        for (k, v) in a.iter().enumerate() {
            points.push(self.transform.apply(v, k)?);
        }

        if i < 0 {
            reverse(points, a.len());
        }
        Ok(())
    }

    #[inline]
    fn point(&mut self, p: &[f64]) -> Result<Point<f64>> {
        Ok(Point(self.transform.apply(p, 0)?))
    }

    /// Convert arc indexes into a line of at least two points.
    fn line(&mut self, arcs: &[i32]) -> Result<Vec<Coord<f64>>> {
        let mut points = Vec::with_capacity(arcs.len() + 1);
        for a in arcs {
            self.arc(*a, &mut points)?;
        }

        if points.len() == 1 {
            points.push(points[0]);
        }
        Ok(points)
    }

    fn ring(&mut self, arcs: &[i32]) -> Result<LineString<f64>> {
        let mut points = self.line(arcs)?;
        // This may happen if an arc has only two points.
        if let Some(&first) = points.first() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(LineString(points))
    }

    fn polygon(&mut self, rings: &[ArcIndexes]) -> Result<Polygon<f64>> {
        let mut rings = rings
            .iter()
            .map(|r| self.ring(r))
            .collect::<Result<Vec<_>>>()?
            .into_iter();
        let exterior = rings.next().unwrap_or_else(|| LineString(vec![]));
        Ok(Polygon::new(exterior, rings.collect()))
    }

    /// For collections recursively build objects.
    fn geometry(&mut self, o: &Value) -> Result<Geometry<f64>> {
        let g = match o {
            Value::GeometryCollection(topo_geometries) => {
                let geo_geometries = topo_geometries
                    .iter()
                    .map(|x| self.geometry(&x.value))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::GeometryCollection(GeometryCollection(geo_geometries))
            }
            Value::Point(topo_point) => Geometry::Point(self.point(topo_point)?),
            Value::MultiPoint(topo_multipoint) => {
                let points = topo_multipoint
                    .iter()
                    .map(|p| self.point(p))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::MultiPoint(MultiPoint(points))
            }
            Value::LineString(topo_ls) => Geometry::LineString(LineString(self.line(topo_ls)?)),
            Value::MultiLineString(topo_mls) => {
                let lines = topo_mls
                    .iter()
                    .map(|x| self.line(x).map(LineString))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::MultiLineString(MultiLineString(lines))
            }
            Value::Polygon(topo_polygon) => Geometry::Polygon(self.polygon(topo_polygon)?),
            Value::MultiPolygon(topo_mp) => {
                let polygons = topo_mp
                    .iter()
                    .map(|x| self.polygon(x))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::MultiPolygon(MultiPolygon(polygons))
            }
        };
        Ok(g)
    }
}
