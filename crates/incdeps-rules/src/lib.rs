//! incdeps Rules
//!
//! Turns per-source dependency sets into makefile rules.
//!
//! ## Modules
//!
//! - `objects` - mapping from source directories to object directories
//! - `makefile` - rule lines and the generated file layout

pub mod makefile;
pub mod objects;

use incdeps_core::{Config, DependencySet, Result, SourceFile};
use incdeps_parser::{HeaderResolver, IncludeWalker, SourceScanner, WalkStats};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use makefile::{is_up_to_date, write_makefile, MakefileRenderer};
pub use objects::ObjectDirs;

/// A source file together with everything it includes
#[derive(Debug, Clone)]
pub struct DependencyEntry {
    pub source: SourceFile,
    pub deps: Arc<DependencySet>,
}

/// Walk every source and keep the ones with at least one dependency
pub fn build_dependency_list(
    walker: &mut IncludeWalker<'_>,
    sources: &[SourceFile],
) -> Result<Vec<DependencyEntry>> {
    let mut entries = Vec::new();
    for source in sources {
        let deps = walker.includes_of(source.path())?;
        if deps.is_empty() {
            debug!("{} has no tracked headers", source);
            continue;
        }
        entries.push(DependencyEntry {
            source: source.clone(),
            deps,
        });
    }
    Ok(entries)
}

/// Outcome of a full generation pass
#[derive(Debug)]
pub struct Generated {
    /// Complete file content, CRLF terminated
    pub content: String,
    /// Number of scanned source files
    pub sources: usize,
    /// Sources that produced rules
    pub entries: usize,
    /// Rule lines written
    pub rules: usize,
    pub stats: WalkStats,
}

/// Run the whole pipeline in memory: discover, walk, flatten, render
///
/// Nothing is written; any I/O failure aborts before output exists.
pub fn generate(config: &Config) -> Result<Generated> {
    config.validate()?;

    let scanner = SourceScanner::from_config(config)?;
    let sources = scanner.scan_dirs(&config.scan.source_dirs)?;

    let resolver = HeaderResolver::from_config(config);
    for dir in resolver.missing_include_paths() {
        warn!("Include directory {} does not exist", dir.display());
    }
    let mut walker = IncludeWalker::new(&resolver);
    let entries = build_dependency_list(&mut walker, &sources)?;

    let renderer = MakefileRenderer::from_config(config);
    let lines = renderer.flatten(&entries);
    let content = renderer.render(&lines);

    let stats = walker.stats();
    info!(
        "Generated {} rules for {} of {} sources ({} files scanned, {} cache hits, {} unresolved includes)",
        lines.len(),
        entries.len(),
        sources.len(),
        stats.files_scanned,
        stats.cache_hits,
        stats.unresolved
    );

    Ok(Generated {
        content,
        sources: sources.len(),
        entries: entries.len(),
        rules: lines.len(),
        stats,
    })
}

#[cfg(test)]
mod tests;
