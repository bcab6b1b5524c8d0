//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::SearchPath;

/// incdeps configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root; all configured directories are relative to it
    pub root: PathBuf,

    /// Source scanning and header resolution
    pub scan: ScanConfig,

    /// Makefile rule generation
    pub rules: RulesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            scan: ScanConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Config {
    /// Load a YAML configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML configuration string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would otherwise fail late in a run
    pub fn validate(&self) -> Result<()> {
        if self.scan.source_dirs.is_empty() {
            return Err(Error::Config("no source directories configured".into()));
        }
        if self.rules.dependencies_per_line == 0 {
            return Err(Error::Config(
                "dependencies_per_line must be at least 1".into(),
            ));
        }
        if self.rules.base_var.is_empty() {
            return Err(Error::Config("base_var must not be empty".into()));
        }
        globset::Glob::new(&self.scan.source_pattern)
            .map_err(|e| Error::Pattern(e.to_string()))?;
        Ok(())
    }

    /// Header search path: the source directories followed by the extra
    /// include directories
    pub fn search_path(&self) -> SearchPath {
        self.scan
            .source_dirs
            .iter()
            .chain(self.scan.extra_include_dirs.iter())
            .cloned()
            .collect()
    }

    /// Output artifact location, resolved against the root
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.rules.output)
    }
}

/// Scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories whose immediate entries are scanned for sources
    pub source_dirs: Vec<PathBuf>,

    /// Additional header roots searched after the source directories
    pub extra_include_dirs: Vec<PathBuf>,

    /// Include names that never resolve
    pub excluded_headers: Vec<String>,

    /// Glob matched against file names in the source directories
    pub source_pattern: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_dirs: vec![PathBuf::from("src")],
            extra_include_dirs: vec![],
            // These also exist as mupdf/include/mupdf/fitz headers
            excluded_headers: vec!["string.h".into(), "math.h".into()],
            source_pattern: "*.c*".into(),
        }
    }
}

/// Rule generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Source path prefix (backslash separated) to object directory token
    pub object_dirs: BTreeMap<String, String>,

    /// Object directory token for sources matching no prefix
    pub default_object_dir: String,

    /// Make variable prefixed to every header path
    pub base_var: String,

    /// Value assigned to `base_var` in the generated file
    pub base_dir_value: String,

    /// Headers listed per rule line
    pub dependencies_per_line: usize,

    /// Generated file, relative to the root
    pub output: PathBuf,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            object_dirs: BTreeMap::new(),
            default_object_dir: "$(OS)".into(),
            base_var: "B".into(),
            base_dir_value: "$(BASEDIR)".into(),
            dependencies_per_line: 3,
            output: PathBuf::from("makefile.deps"),
        }
    }
}
