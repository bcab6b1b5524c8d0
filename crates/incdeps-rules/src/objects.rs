//! Object directory mapping

use incdeps_core::path::to_backslashes;
use incdeps_core::{Config, SourceFile};

/// Maps source directory prefixes to the make variable of their object
/// directory
#[derive(Debug, Clone)]
pub struct ObjectDirs {
    /// `(prefix, token)` pairs, longest prefix first
    prefixes: Vec<(String, String)>,
    default: String,
}

impl ObjectDirs {
    pub fn new<I>(prefixes: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut prefixes: Vec<(String, String)> = prefixes
            .into_iter()
            .map(|(prefix, token)| (prefix.replace('/', "\\"), token))
            .collect();
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Self {
            prefixes,
            default: default.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.rules.object_dirs.clone(),
            config.rules.default_object_dir.clone(),
        )
    }

    /// Object directory token for `source`
    ///
    /// A prefix only matches whole directories: `src\utils` covers
    /// `src\utils\a.cpp` but not `src\utilsx\a.cpp`.
    pub fn object_dir_for(&self, source: &SourceFile) -> &str {
        let path = to_backslashes(source.path());
        self.prefixes
            .iter()
            .find(|(prefix, _)| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('\\'))
            })
            .map(|(_, token)| token.as_str())
            .unwrap_or(self.default.as_str())
    }
}
