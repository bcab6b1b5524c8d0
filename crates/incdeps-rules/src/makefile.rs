//! Makefile Rendering
//!
//! Generated layout:
//!
//! ```text
//! ## Header-dependencies for src\* and src\*\*
//! ### the list below is auto-generated by incdeps
//! B=$(BASEDIR)
//! $(OS)\main.obj: $B\src\a.h $B\src\b.h $B\src\c.h
//! $(OS)\main.obj: $B\src\d.h
//! ```
//!
//! Lines are sorted case-insensitively and terminated with `\r\n`, which
//! nmake expects.

use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use incdeps_core::path::to_backslashes;
use incdeps_core::{Config, Error, Result};

use crate::objects::ObjectDirs;
use crate::DependencyEntry;

const HEADER: &str = "## Header-dependencies for src\\* and src\\*\\*\n\
                      ### the list below is auto-generated by incdeps\n";

/// Renders dependency entries as makefile rules
pub struct MakefileRenderer {
    object_dirs: ObjectDirs,
    base_var: String,
    base_dir_value: String,
    per_line: usize,
    parent_segment: Regex,
}

impl MakefileRenderer {
    pub fn new(object_dirs: ObjectDirs, base_var: &str, base_dir_value: &str, per_line: usize) -> Self {
        Self {
            object_dirs,
            base_var: base_var.to_string(),
            base_dir_value: base_dir_value.to_string(),
            per_line: per_line.max(1),
            parent_segment: Regex::new(r"( |\\)[^.\\\s]+\\\.\.\\").expect("parent segment pattern"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ObjectDirs::from_config(config),
            &config.rules.base_var,
            &config.rules.base_dir_value,
            config.rules.dependencies_per_line,
        )
    }

    /// How header paths refer to the base variable: `$B` or `$(NAME)`
    fn base_ref(&self) -> String {
        if self.base_var.chars().count() == 1 {
            format!("${}", self.base_var)
        } else {
            format!("$({})", self.base_var)
        }
    }

    /// Rule lines for one source, headers chunked `per_line` at a time
    pub fn rules_for(&self, entry: &DependencyEntry) -> Vec<String> {
        let object_dir = self.object_dirs.object_dir_for(&entry.source);
        let target = format!("{}\\{}.obj", object_dir, entry.source.stem());
        let base = self.base_ref();

        let mut deps: Vec<String> = entry.deps.iter().map(|p| to_backslashes(p)).collect();
        deps.sort_by_key(|d| d.to_lowercase());

        deps.chunks(self.per_line)
            .map(|group| {
                let prereqs = group
                    .iter()
                    .map(|d| format!("{}\\{}", base, d))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{}: {}", target, prereqs)
            })
            .collect()
    }

    /// Rule lines for every entry; entries without headers contribute none
    pub fn flatten(&self, entries: &[DependencyEntry]) -> Vec<String> {
        entries.iter().flat_map(|entry| self.rules_for(entry)).collect()
    }

    /// Collapse `dir\..\` segments that follow a space or separator
    pub fn normalize_paths(&self, text: &str) -> String {
        let text = text.replace('/', "\\");
        self.parent_segment.replace_all(&text, "${1}").into_owned()
    }

    /// Full file content: header block, sorted rules, CRLF line endings
    pub fn render(&self, lines: &[String]) -> String {
        let mut sorted: Vec<&String> = lines.iter().collect();
        sorted.sort_by_key(|line| line.to_lowercase());
        let body = sorted
            .iter()
            .map(|line| line.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut content = String::from(HEADER);
        content.push_str(&format!("{}={}\n", self.base_var, self.base_dir_value));
        content.push_str(&self.normalize_paths(&body));
        content.push('\n');

        content.replace('\n', "\r\n")
    }
}

/// Replace the generated file with `content`
pub fn write_makefile(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Whether the file at `path` already holds exactly `content`
pub fn is_up_to_date(path: &Path, content: &str) -> Result<bool> {
    match std::fs::read(path) {
        Ok(existing) => Ok(existing == content.as_bytes()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            Ok(false)
        }
        Err(source) => Err(Error::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
