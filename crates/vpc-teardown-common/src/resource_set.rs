//! Active resource-type set (`include − exclude`)

use crate::resource_kind::ResourceKind;
use std::collections::BTreeSet;
use std::fmt;

/// Set of resource types a run is allowed to touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSet(BTreeSet<ResourceKind>);

impl ResourceSet {
    /// Every recognized resource type
    pub fn all() -> Self {
        Self(ResourceKind::ALL.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Resolve the active set from operator input.
    ///
    /// An empty `include` means "everything".
    pub fn resolve(include: &[ResourceKind], exclude: &[ResourceKind]) -> Self {
        let include = if include.is_empty() {
            Self::all()
        } else {
            include.iter().copied().collect()
        };
        include.subtract(&exclude.iter().copied().collect())
    }

    /// Set difference: members of `self` not in `other`
    pub fn subtract(&self, other: &ResourceSet) -> Self {
        Self(self.0.difference(&other.0).copied().collect())
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.0.iter().copied()
    }

    /// Members in sweep order (priority, then name)
    pub fn sweep_order(&self) -> Vec<ResourceKind> {
        let mut kinds: Vec<_> = self.iter().collect();
        kinds.sort_by_key(|k| (k.sweep_priority(), k.as_str()));
        kinds
    }
}

impl FromIterator<ResourceKind> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = ResourceKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|k| k.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
