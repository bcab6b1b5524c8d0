//! Core type definitions

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::path::normalize;

/// Ordered header search path
///
/// Earlier directories take precedence when several contain a header with
/// the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Create an empty search path
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory unless it is already present
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    /// Directories in precedence order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut search_path = SearchPath::new();
        for dir in iter {
            search_path.push(dir);
        }
        search_path
    }
}

/// A translation unit to scan for includes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Create a source file; the path is lexically normalized
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: normalize(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension (`foo` for `src/foo.cpp`)
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Headers reachable from a file, unique and in first-seen order
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning `false` if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    /// Append every member of `other` not already present
    pub fn union_with(&mut self, other: &DependencySet) {
        for path in other.iter() {
            self.insert(path.clone());
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl PartialEq for DependencySet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for DependencySet {}

impl FromIterator<PathBuf> for DependencySet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
