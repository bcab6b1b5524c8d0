//! Header File Resolver
//!
//! Maps an include name to the header it refers to inside the tracked tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use incdeps_core::path::normalize;
use incdeps_core::{Config, SearchPath};

/// Header file resolver for C projects
///
/// Returned paths are lexically normalized and relative to the same base as
/// the configured directories. Existence is checked under `root`.
pub struct HeaderResolver {
    /// Project root directory
    root: PathBuf,
    /// Include search paths
    include_paths: SearchPath,
    /// Names that never resolve
    excluded: HashSet<String>,
}

impl HeaderResolver {
    /// Create a new header resolver with an empty search path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            include_paths: SearchPath::new(),
            excluded: HashSet::new(),
        }
    }

    /// Create a resolver from the configured search path and exclusions
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
            include_paths: config.search_path(),
            excluded: config.scan.excluded_headers.iter().cloned().collect(),
        }
    }

    /// Add an include path
    pub fn add_include_path(&mut self, path: PathBuf) {
        self.include_paths.push(path);
    }

    /// Never resolve `name`
    pub fn exclude(&mut self, name: impl Into<String>) {
        self.excluded.insert(name.into());
    }

    /// Include paths that are not directories under the root
    pub fn missing_include_paths(&self) -> Vec<PathBuf> {
        self.include_paths
            .iter()
            .filter(|p| !self.root.join(p).is_dir())
            .cloned()
            .collect()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a header file path
    ///
    /// Given the name from `#include "myheader.h"` or `#include <myheader.h>`,
    /// look in the directory of `from_file` first, then in each include path
    /// in order. The first existing candidate wins.
    pub fn resolve(&self, header: &str, from_file: Option<&Path>) -> Option<PathBuf> {
        if self.excluded.contains(header) {
            trace!("Skipping excluded header {}", header);
            return None;
        }

        let local_dir = from_file.map(|from| from.parent().unwrap_or_else(|| Path::new("")));

        for dir in local_dir.into_iter().chain(self.include_paths.iter().map(PathBuf::as_path)) {
            let candidate = normalize(&dir.join(header));
            if self.root.join(&candidate).is_file() {
                debug!("Resolved {} in {:?}", header, dir);
                return Some(candidate);
            }
        }

        trace!("Failed to resolve header: {}", header);
        None
    }
}
