//! Include Graph Walker
//!
//! Computes the transitive closure of a file's includes. Results are
//! memoized per path for the lifetime of the walker, so a header shared by
//! many translation units is read and scanned once.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

use incdeps_core::path::normalize;
use incdeps_core::{DependencySet, Error, Result};

use super::headers::HeaderResolver;
use super::text::IncludeScanner;

/// Counters collected during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Files read and scanned
    pub files_scanned: usize,
    /// Requests answered from the cache
    pub cache_hits: usize,
    /// Include directives that resolved to nothing
    pub unresolved: usize,
}

/// Memoizing include walker
pub struct IncludeWalker<'a> {
    resolver: &'a HeaderResolver,
    scanner: IncludeScanner,
    cache: HashMap<PathBuf, Arc<DependencySet>>,
    /// Files whose closure is being computed, in recursion order
    in_progress: Vec<PathBuf>,
    in_progress_set: HashSet<PathBuf>,
    stats: WalkStats,
}

impl<'a> IncludeWalker<'a> {
    pub fn new(resolver: &'a HeaderResolver) -> Self {
        Self {
            resolver,
            scanner: IncludeScanner::new(),
            cache: HashMap::new(),
            in_progress: Vec::new(),
            in_progress_set: HashSet::new(),
            stats: WalkStats::default(),
        }
    }

    /// All headers transitively included by `file`
    ///
    /// Direct includes come first, followed by each one's own closure in
    /// order; later duplicates are dropped. A file that includes itself,
    /// directly or through other headers, yields [`Error::IncludeCycle`].
    pub fn includes_of(&mut self, file: &Path) -> Result<Arc<DependencySet>> {
        let file = normalize(file);

        if let Some(cached) = self.cache.get(&file) {
            self.stats.cache_hits += 1;
            return Ok(Arc::clone(cached));
        }

        if self.in_progress_set.contains(&file) {
            let start = self
                .in_progress
                .iter()
                .position(|p| *p == file)
                .unwrap_or(0);
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(file);
            return Err(Error::IncludeCycle { chain });
        }

        self.in_progress.push(file.clone());
        self.in_progress_set.insert(file.clone());
        let result = self.walk(&file);
        self.in_progress.pop();
        self.in_progress_set.remove(&file);

        let deps = Arc::new(result?);
        self.cache.insert(file, Arc::clone(&deps));
        Ok(deps)
    }

    /// Headers named directly by `file`, resolved, in file order
    pub fn direct_includes(&mut self, file: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.resolver.root().join(file);
        let bytes = std::fs::read(&full_path).map_err(|source| Error::FileRead {
            path: full_path.clone(),
            source,
        })?;
        self.stats.files_scanned += 1;

        // Legacy sources carry Latin-1 comments; include names are ASCII
        let content = String::from_utf8_lossy(&bytes);
        let mut resolved = Vec::new();
        for name in self.scanner.scan(&content) {
            match self.resolver.resolve(&name, Some(file)) {
                Some(path) => resolved.push(path),
                None => {
                    trace!("Dropping unresolved include {} in {:?}", name, file);
                    self.stats.unresolved += 1;
                }
            }
        }
        Ok(resolved)
    }

    fn walk(&mut self, file: &Path) -> Result<DependencySet> {
        let direct = self.direct_includes(file)?;
        debug!("{:?} has {} direct includes", file, direct.len());

        let mut deps: DependencySet = direct.iter().cloned().collect();
        for header in &direct {
            let nested = self.includes_of(header)?;
            deps.union_with(&nested);
        }
        Ok(deps)
    }

    /// Whether `file` already has a cached result
    pub fn is_cached(&self, file: &Path) -> bool {
        self.cache.contains_key(&normalize(file))
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }
}
