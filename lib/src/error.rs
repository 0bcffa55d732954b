use thiserror::Error;

use crate::kind::GeometryKind;
use crate::layer::FeatureId;

/// Errors raised by the layer, the edit driver and the TopoJSON reader.
///
/// The inverter itself never fails; "nothing to invert" is a `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found in topology")]
    ObjectNotFound(String),

    #[error("object {object} mixes {first} and {second} geometries")]
    MixedKinds {
        object: String,
        first: GeometryKind,
        second: GeometryKind,
    },

    #[error("arc index {0} is out of range")]
    ArcOutOfRange(i32),

    #[error("position has {0} ordinates, at least 2 are required")]
    MalformedPosition(usize),

    #[error("feature {0} not found")]
    FeatureNotFound(FeatureId),

    #[error("no edit session is open")]
    NoEditSession,

    #[error("an edit session is already open")]
    EditSessionActive,

    #[error("feature {id}: expected a {expected} geometry, got {found}")]
    KindMismatch {
        id: FeatureId,
        expected: GeometryKind,
        found: GeometryKind,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
