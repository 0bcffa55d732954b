use std::fmt;

use geo::CoordNum;
use geo::Geometry;

/// Structural kind of a geometry, as far as vertex inversion is concerned.
///
/// Everything without an ordered point sequence to reverse (points, segments,
/// rectangles, collections ...) is [`GeometryKind::Unsupported`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// A single line.
    LineString,
    /// A single polygon, exterior ring first.
    Polygon,
    /// Several lines.
    MultiLineString,
    /// Several polygons.
    MultiPolygon,
    /// Nothing to invert.
    Unsupported,
}

/// High bits used by extended WKB to flag Z, M and an embedded SRID.
const EWKB_FLAGS: u32 = 0x8000_0000 | 0x4000_0000 | 0x2000_0000;

impl GeometryKind {
    /// The kind of a geometry value.
    #[inline]
    pub fn of<T>(geometry: &Geometry<T>) -> Self
    where
        T: CoordNum,
    {
        match geometry {
            Geometry::LineString(_) => Self::LineString,
            Geometry::Polygon(_) => Self::Polygon,
            Geometry::MultiLineString(_) => Self::MultiLineString,
            Geometry::MultiPolygon(_) => Self::MultiPolygon,
            Geometry::Point(_)
            | Geometry::Line(_)
            | Geometry::MultiPoint(_)
            | Geometry::GeometryCollection(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => Self::Unsupported,
        }
    }

    /// Map a WKB geometry type code, as reported by a host layer.
    ///
    /// Both extended WKB flags and ISO Z/M/ZM offsets are accepted:
    /// `2`, `1002`, `3002` and `0x8000_0002` are all line strings.
    pub fn from_wkb_type(code: u32) -> Self {
        match (code & !EWKB_FLAGS) % 1000 {
            2 => Self::LineString,
            3 => Self::Polygon,
            5 => Self::MultiLineString,
            6 => Self::MultiPolygon,
            _ => Self::Unsupported,
        }
    }

    /// LineString or Polygon.
    #[inline]
    pub fn is_single(self) -> bool {
        matches!(self, Self::LineString | Self::Polygon)
    }

    /// MultiLineString or MultiPolygon.
    #[inline]
    pub fn is_multi(self) -> bool {
        matches!(self, Self::MultiLineString | Self::MultiPolygon)
    }

    /// Anything but [`GeometryKind::Unsupported`].
    #[inline]
    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::Unsupported => "Unsupported",
        };
        f.write_str(name)
    }
}
