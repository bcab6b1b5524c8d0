//! Lexical path helpers
//!
//! Paths are never canonicalized through the filesystem: the generated
//! makefile must refer to headers the same way the source tree does.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and collapse `dir/..`.
///
/// Leading `..` components of a relative path are kept, and `..` directly
/// under the root is dropped. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Render a path with `\` as the only separator.
pub fn to_backslashes(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_parent() {
        assert_eq!(
            normalize(Path::new("src/utils/../base.h")),
            PathBuf::from("src/base.h")
        );
    }

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(normalize(Path::new("./src/./a.h")), PathBuf::from("src/a.h"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent() {
        assert_eq!(
            normalize(Path::new("../ext/zlib/zlib.h")),
            PathBuf::from("../ext/zlib/zlib.h")
        );
    }

    #[test]
    fn test_normalize_root_parent() {
        assert_eq!(normalize(Path::new("/../usr/a.h")), PathBuf::from("/usr/a.h"));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_to_backslashes() {
        assert_eq!(to_backslashes(Path::new("src/utils/a.h")), "src\\utils\\a.h");
    }
}
