//! Source file discovery
//!
//! Lists the translation units of each configured source directory. Only
//! the directory's immediate entries are considered; subdirectories are
//! configured separately.

use globset::{Glob, GlobMatcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use incdeps_core::{Config, Error, Result, SourceFile};

/// Finds source files by file-name pattern
pub struct SourceScanner {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl SourceScanner {
    /// Create a scanner matching file names against `pattern` (e.g. `*.c*`)
    pub fn new(root: PathBuf, pattern: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)
            .map_err(|e| Error::Pattern(e.to_string()))?
            .compile_matcher();
        Ok(Self { root, matcher })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.root.clone(), &config.scan.source_pattern)
    }

    /// Source files directly inside `dir`, sorted by name
    pub fn scan_dir(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        let full_dir = self.root.join(dir);
        let mut sources = Vec::new();

        for entry in WalkDir::new(&full_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::FileRead {
                path: full_dir.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if self.matcher.is_match(entry.file_name()) {
                sources.push(SourceFile::new(dir.join(entry.file_name())));
            }
        }

        debug!("Found {} sources in {:?}", sources.len(), dir);
        Ok(sources)
    }

    /// Source files of every directory, in directory order
    ///
    /// A file reachable through several configured directories (`src` and
    /// `./src`) is listed once, at its first position.
    pub fn scan_dirs(&self, dirs: &[PathBuf]) -> Result<Vec<SourceFile>> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();
        for dir in dirs {
            for source in self.scan_dir(dir)? {
                if seen.insert(source.clone()) {
                    sources.push(source);
                }
            }
        }
        info!("Found {} source files in {} directories", sources.len(), dirs.len());
        Ok(sources)
    }
}
