use geo::CoordNum;
use geo::Geometry;
use geo::LineString;
use geo::MultiLineString;
use geo::MultiPolygon;
use geo::Polygon;

use crate::kind::GeometryKind;
use crate::reverse::reverse;

/// Reverse the vertex order of a geometry.
///
/// Rings, lines and polygons keep their position within the parent; only
/// the points inside each sequence change order. A polygon's exterior stays
/// the exterior and each hole stays a hole.
pub trait Invert {
    /// Reverse in place.
    fn invert(&mut self);

    /// Return a reversed copy, leaving `self` untouched.
    fn inverted(&self) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.invert();
        out
    }
}

impl<T> Invert for LineString<T>
where
    T: CoordNum,
{
    #[inline]
    fn invert(&mut self) {
        let n = self.0.len();
        reverse(&mut self.0, n);
    }
}

impl<T> Invert for Polygon<T>
where
    T: CoordNum,
{
    fn invert(&mut self) {
        self.exterior_mut(|exterior| exterior.invert());
        self.interiors_mut(|interiors| interiors.iter_mut().for_each(Invert::invert));
    }
}

impl<T> Invert for MultiLineString<T>
where
    T: CoordNum,
{
    fn invert(&mut self) {
        self.0.iter_mut().for_each(Invert::invert);
    }
}

impl<T> Invert for MultiPolygon<T>
where
    T: CoordNum,
{
    fn invert(&mut self) {
        self.0.iter_mut().for_each(Invert::invert);
    }
}

/// Produce the vertex-reversed equivalent of `geometry`.
///
/// `kind` is the structural kind the caller reports for the geometry,
/// typically the layer's geometry type.
///
/// None: -
///   * `kind` is [`GeometryKind::Unsupported`].
///   * `geometry` is not structurally a `kind`.
///
/// An empty or single-point sequence is a valid (trivial) reversal and is
/// returned as is.
#[inline]
pub fn invert<T>(geometry: &Geometry<T>, kind: GeometryKind) -> Option<Geometry<T>>
where
    T: CoordNum,
{
    match kind {
        GeometryKind::LineString | GeometryKind::Polygon => invert_single(geometry, kind),
        GeometryKind::MultiLineString | GeometryKind::MultiPolygon => {
            invert_multi(geometry, kind)
        }
        GeometryKind::Unsupported => None,
    }
}

/// Reverse a single-part geometry: a line string or a polygon.
///
/// Multi-part and unsupported kinds give `None`.
pub fn invert_single<T>(geometry: &Geometry<T>, kind: GeometryKind) -> Option<Geometry<T>>
where
    T: CoordNum,
{
    match kind {
        GeometryKind::LineString => match geometry {
            Geometry::LineString(ls) => Some(Geometry::LineString(ls.inverted())),
            _ => None,
        },
        GeometryKind::Polygon => match geometry {
            Geometry::Polygon(polygon) => Some(Geometry::Polygon(polygon.inverted())),
            _ => None,
        },
        GeometryKind::MultiLineString | GeometryKind::MultiPolygon | GeometryKind::Unsupported => {
            None
        }
    }
}

/// Reverse a multi-part geometry, part by part.
///
/// Single-part and unsupported kinds give `None`.
pub fn invert_multi<T>(geometry: &Geometry<T>, kind: GeometryKind) -> Option<Geometry<T>>
where
    T: CoordNum,
{
    match kind {
        GeometryKind::MultiLineString => match geometry {
            Geometry::MultiLineString(mls) => Some(Geometry::MultiLineString(mls.inverted())),
            _ => None,
        },
        GeometryKind::MultiPolygon => match geometry {
            Geometry::MultiPolygon(mp) => Some(Geometry::MultiPolygon(mp.inverted())),
            _ => None,
        },
        GeometryKind::LineString | GeometryKind::Polygon | GeometryKind::Unsupported => None,
    }
}
