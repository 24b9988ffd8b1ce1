//! Entry resources seeding the dependency graph.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Non-empty, ordered list of entry resource paths.
///
/// The first entry is a separate argument to every constructor, so an empty
/// set cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathBuf>", into = "Vec<PathBuf>")]
pub struct EntrySet {
    first: PathBuf,
    rest: Vec<PathBuf>,
}

impl EntrySet {
    pub fn new(first: impl Into<PathBuf>) -> Self {
        Self {
            first: first.into(),
            rest: Vec::new(),
        }
    }

    pub fn with(mut self, entry: impl Into<PathBuf>) -> Self {
        self.rest.push(entry.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.first.as_path()).chain(self.rest.iter().map(PathBuf::as_path))
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    #[cfg(test)]
    pub fn first(&self) -> &Path {
        &self.first
    }
}

impl TryFrom<Vec<PathBuf>> for EntrySet {
    type Error = &'static str;

    fn try_from(mut entries: Vec<PathBuf>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err("entry set must contain at least one resource");
        }
        let first = entries.remove(0);
        Ok(Self { first, rest: entries })
    }
}

impl From<EntrySet> for Vec<PathBuf> {
    fn from(set: EntrySet) -> Self {
        let mut entries = Vec::with_capacity(set.len());
        entries.push(set.first);
        entries.extend(set.rest);
        entries
    }
}
