// #![warn(missing_docs)]
#![warn(missing_debug_implementations)]
//! Reverse the vertex order of line and polygon geometries.
//!
//! The core is [`invert()`]: given a [`geo::Geometry`] and its
//! [`GeometryKind`], return the same geometry with the points of every
//! line, ring and part in reverse order. Ring order, part order and the
//! exterior/hole roles of polygon rings never change.
//!
//! Around it sits what an editor needs to apply the transform to a layer:
//! a narrow [`VectorLayer`] interface with an in-memory implementation,
//! [`invert_layer()`] to run the transform over a layer inside one edit
//! unit, and a TopoJSON reader to load layers.

extern crate geo;
extern crate geo_types;
#[cfg(test)]
extern crate pretty_assertions;

extern crate topojson;

/// function invert_layer() and the notices it reports.
pub mod editor;
mod error;
/// function layer_from_topology().
pub mod feature;
/// The Invert trait, function invert() and the single/multi dispatch.
pub mod invert;
mod kind;
/// VectorLayer trait and MemoryLayer.
pub mod layer;
/// function reverse() and unit tests.
mod reverse;
/// TopoJSON position decoding.
mod transform;

#[cfg(not(tarpaulin_include))]
#[cfg(test)]
mod tests;

pub use editor::invert_layer;
pub use editor::InvertReport;
pub use editor::Notice;
pub use error::Error;
pub use error::Result;
pub use invert::invert;
pub use invert::Invert;
pub use kind::GeometryKind;
pub use layer::FeatureId;
pub use layer::MemoryLayer;
pub use layer::Scope;
pub use layer::VectorLayer;

/// Translate ARC indexes.
///
/// "A negative arc index indicates that the arc at the ones’ complement of the index must be reversed
/// to reconstruct the geometry: -1 refers to the reversed first arc, -2 refers to the reversed second arc,
/// and so on."
///
/// [source: 2.1.4. Arc Indexes](https://github.com/topojson/topojson-specification#214-arc-indexes)
#[inline]
fn translate(arc: i32) -> usize {
    if arc < 0 {
        !arc as usize
    } else {
        arc as usize
    }
}
