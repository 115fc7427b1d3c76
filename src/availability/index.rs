//! Stable integer indices for satellite names.

use std::collections::HashMap;
use std::fmt;

/// Column index of a satellite in the availability matrix.
///
/// Indices follow ascending name order, so comparing two ids compares their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceId(pub(crate) u32);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable name ↔ index table, built once per matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIndex {
    names: Vec<String>,
    by_name: HashMap<String, ResourceId>,
}

impl ResourceIndex {
    /// Builds the table from satellite names; duplicates collapse and indices
    /// are assigned in ascending name order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();

        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), ResourceId(i as u32)))
            .collect();

        Self { names, by_name }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<ResourceId> {
        self.by_name.get(name).copied()
    }

    /// Name of a satellite.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this index.
    pub fn name(&self, id: ResourceId) -> &str {
        &self.names[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        (0..self.names.len() as u32).map(ResourceId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ResourceId(i as u32), name.as_str()))
    }
}
