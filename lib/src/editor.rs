use geo::CoordNum;
use tracing::debug;
use tracing::info;

use crate::error::Result;
use crate::invert::invert;
use crate::kind::GeometryKind;
use crate::layer::FeatureId;
use crate::layer::Scope;
use crate::layer::VectorLayer;

/// Informational outcome for a feature that was left as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The feature carries no geometry at all.
    MissingGeometry { id: FeatureId },
    /// The layer kind has no point order to reverse.
    NoGeometryProduced { id: FeatureId, kind: GeometryKind },
}

/// What [`invert_layer`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvertReport {
    /// Features whose geometry was replaced, in id order.
    pub changed: Vec<FeatureId>,
    pub notices: Vec<Notice>,
}

/// Name, kind and feature count of a layer for a given scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSummary {
    pub name: String,
    pub kind: GeometryKind,
    pub feature_count: usize,
}

#[inline]
pub fn summarize<T, L>(layer: &L, scope: Scope) -> LayerSummary
where
    T: CoordNum,
    L: VectorLayer<T> + ?Sized,
{
    LayerSummary {
        name: layer.name().to_string(),
        kind: layer.kind(),
        feature_count: layer.feature_count(scope),
    }
}

/// Reverse the vertex order of every feature in `scope`, in one edit unit.
///
/// Features that cannot be inverted are skipped and reported as notices.
/// If anything fails once the edit unit is open, it is rolled back and the
/// error returned; the layer is then as it was before the call.
pub fn invert_layer<T, L>(layer: &mut L, scope: Scope) -> Result<InvertReport>
where
    T: CoordNum,
    L: VectorLayer<T> + ?Sized,
{
    let ids = layer.feature_ids(scope);
    let kind = layer.kind();

    layer.begin_edit()?;
    match invert_features(layer, &ids, kind) {
        Ok(report) => match layer.commit() {
            Ok(_) => Ok(report),
            Err(e) => {
                layer.rollback();
                Err(e)
            }
        },
        Err(e) => {
            layer.rollback();
            Err(e)
        }
    }
}

fn invert_features<T, L>(
    layer: &mut L,
    ids: &[FeatureId],
    kind: GeometryKind,
) -> Result<InvertReport>
where
    T: CoordNum,
    L: VectorLayer<T> + ?Sized,
{
    let mut report = InvertReport::default();
    for &id in ids {
        let Some(geometry) = layer.geometry(id)? else {
            info!(feature = %id, "feature has no geometry");
            report.notices.push(Notice::MissingGeometry { id });
            continue;
        };

        match invert(&geometry, kind) {
            Some(inverted) => {
                debug!(feature = %id, geometry = ?inverted, "new geometry");
                layer.change_geometry(id, inverted)?;
                report.changed.push(id);
            }
            None => {
                info!(feature = %id, %kind, "no new geometry was created");
                report.notices.push(Notice::NoGeometryProduced { id, kind });
            }
        }
    }
    Ok(report)
}
