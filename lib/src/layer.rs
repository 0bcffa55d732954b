use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use geo::CoordNum;
use geo::Geometry;
use tracing::debug;

use crate::error::Error;
use crate::error::Result;
use crate::kind::GeometryKind;

/// Identifies a feature within its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which features of a layer an operation walks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Selected,
}

/// The narrow slice of a host vector layer needed to edit geometries.
///
/// Geometries cross this boundary as detached values: reads return copies
/// and writes hand over ownership. Writes are staged inside an edit unit
/// opened with [`VectorLayer::begin_edit`] and become visible to other
/// readers of the layer only once [`VectorLayer::commit`] succeeds.
pub trait VectorLayer<T>
where
    T: CoordNum,
{
    /// Layer name as shown to the user.
    fn name(&self) -> &str;

    /// Geometry kind shared by every feature of the layer.
    fn kind(&self) -> GeometryKind;

    /// Feature ids in ascending order.
    fn feature_ids(&self, scope: Scope) -> Vec<FeatureId>;

    fn feature_count(&self, scope: Scope) -> usize {
        self.feature_ids(scope).len()
    }

    /// Current geometry of a feature, `None` when the feature has none.
    ///
    /// Inside an edit unit staged geometries are returned.
    fn geometry(&self, id: FeatureId) -> Result<Option<Geometry<T>>>;

    /// Open an edit unit. Fails if one is already open.
    fn begin_edit(&mut self) -> Result<()>;

    /// Stage a replacement geometry for `id` in the open edit unit.
    fn change_geometry(&mut self, id: FeatureId, geometry: Geometry<T>) -> Result<()>;

    /// Apply every staged change at once, returning how many features changed.
    fn commit(&mut self) -> Result<usize>;

    /// Drop staged changes. Does nothing outside an edit unit.
    fn rollback(&mut self);
}

/// A vector layer held entirely in memory.
#[derive(Clone, Debug)]
pub struct MemoryLayer<T>
where
    T: CoordNum,
{
    name: String,
    kind: GeometryKind,
    features: BTreeMap<FeatureId, Option<Geometry<T>>>,
    selection: BTreeSet<FeatureId>,
    staged: Option<BTreeMap<FeatureId, Geometry<T>>>,
    next_id: u64,
}

impl<T> MemoryLayer<T>
where
    T: CoordNum,
{
    pub fn new(name: impl Into<String>, kind: GeometryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            features: BTreeMap::new(),
            selection: BTreeSet::new(),
            staged: None,
            next_id: 0,
        }
    }

    /// Append a feature and return its id.
    ///
    /// For a supported layer kind the geometry must be of that kind. Features
    /// cannot be added while an edit unit is open.
    pub fn push(&mut self, geometry: Option<Geometry<T>>) -> Result<FeatureId> {
        if self.staged.is_some() {
            return Err(Error::EditSessionActive);
        }
        let id = FeatureId(self.next_id);
        if let Some(g) = &geometry {
            self.check_kind(id, g)?;
        }
        self.features.insert(id, geometry);
        self.next_id += 1;
        Ok(id)
    }

    /// Add features to the selection.
    ///
    /// Either every id is added or, when one is unknown, none is.
    pub fn select<I>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = FeatureId>,
    {
        let ids: Vec<FeatureId> = ids.into_iter().collect();
        if let Some(&missing) = ids.iter().find(|&id| !self.features.contains_key(id)) {
            return Err(Error::FeatureNotFound(missing));
        }
        self.selection.extend(ids);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.staged.is_some()
    }

    /// Committed features in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, Option<&Geometry<T>>)> {
        self.features.iter().map(|(id, g)| (*id, g.as_ref()))
    }

    fn check_kind(&self, id: FeatureId, geometry: &Geometry<T>) -> Result<()> {
        let found = GeometryKind::of(geometry);
        if self.kind.is_supported() && found != self.kind {
            return Err(Error::KindMismatch {
                id,
                expected: self.kind,
                found,
            });
        }
        Ok(())
    }
}

impl<T> VectorLayer<T> for MemoryLayer<T>
where
    T: CoordNum,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn kind(&self) -> GeometryKind {
        self.kind
    }

    fn feature_ids(&self, scope: Scope) -> Vec<FeatureId> {
        match scope {
            Scope::All => self.features.keys().copied().collect(),
            Scope::Selected => self.selection.iter().copied().collect(),
        }
    }

    fn geometry(&self, id: FeatureId) -> Result<Option<Geometry<T>>> {
        if let Some(g) = self.staged.as_ref().and_then(|staged| staged.get(&id)) {
            return Ok(Some(g.clone()));
        }
        self.features
            .get(&id)
            .cloned()
            .ok_or(Error::FeatureNotFound(id))
    }

    fn begin_edit(&mut self) -> Result<()> {
        if self.staged.is_some() {
            return Err(Error::EditSessionActive);
        }
        debug!(layer = %self.name, "edit session started");
        self.staged = Some(BTreeMap::new());
        Ok(())
    }

    fn change_geometry(&mut self, id: FeatureId, geometry: Geometry<T>) -> Result<()> {
        if self.staged.is_none() {
            return Err(Error::NoEditSession);
        }
        if !self.features.contains_key(&id) {
            return Err(Error::FeatureNotFound(id));
        }
        self.check_kind(id, &geometry)?;
        if let Some(staged) = self.staged.as_mut() {
            staged.insert(id, geometry);
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<usize> {
        let staged = self.staged.take().ok_or(Error::NoEditSession)?;
        let n = staged.len();
        for (id, g) in staged {
            self.features.insert(id, Some(g));
        }
        debug!(layer = %self.name, changed = n, "edit session committed");
        Ok(n)
    }

    fn rollback(&mut self) {
        if let Some(staged) = self.staged.take() {
            debug!(layer = %self.name, discarded = staged.len(), "edit session rolled back");
        }
    }
}
