//! Source Text Filter
//!
//! Best-effort textual cleanup before include extraction. This is not a
//! preprocessor: `#if 0` regions are matched line by line without nesting
//! awareness, so unusual conditional blocks may be under- or over-stripped.

use regex::Regex;

/// Extracts `#include` names from C/C++ source text
pub struct IncludeScanner {
    block_comment: Regex,
    disabled_block: Regex,
    include: Regex,
}

impl IncludeScanner {
    pub fn new() -> Self {
        Self {
            block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"),
            disabled_block: Regex::new(r"(?sm)^#if 0$.*?^#endif$").expect("#if 0 pattern"),
            include: Regex::new(r#"(?m)^#include ["<]([^">]+)[">]"#).expect("include pattern"),
        }
    }

    /// Normalize line endings, blank out block comments and drop
    /// `#if 0` ... `#endif` regions
    pub fn strip(&self, content: &str) -> String {
        let content = content.replace("\r\n", "\n");
        // Comments may carry example #include lines
        let content = self.block_comment.replace_all(&content, "/* */");
        self.disabled_block.replace_all(&content, "").into_owned()
    }

    /// Names of the `#include` directives at line start, in file order
    ///
    /// Quoted and angle-bracket forms are not distinguished. Expects text
    /// already passed through [`IncludeScanner::strip`].
    pub fn extract(&self, stripped: &str) -> Vec<String> {
        self.include
            .captures_iter(stripped)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// Strip and extract in one step
    pub fn scan(&self, content: &str) -> Vec<String> {
        self.extract(&self.strip(content))
    }
}

impl Default for IncludeScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_delimiters() {
        let scanner = IncludeScanner::new();
        let names = scanner.scan("#include \"base.h\"\n#include <vector>\nint x;\n");
        assert_eq!(names, vec!["base.h", "vector"]);
    }

    #[test]
    fn test_block_comment_suppressed() {
        let scanner = IncludeScanner::new();
        let source = "/* usage:\n#include \"example.h\"\n*/\n#include \"real.h\"\n";
        assert_eq!(scanner.scan(source), vec!["real.h"]);
    }

    #[test]
    fn test_comment_replaced_not_removed() {
        let scanner = IncludeScanner::new();
        assert_eq!(scanner.strip("a /* x\ny */ b"), "a /* */ b");
    }

    #[test]
    fn test_crlf_normalized() {
        let scanner = IncludeScanner::new();
        let source = "#if 0\r\n#include \"old.h\"\r\n#endif\r\n#include \"new.h\"\r\n";
        assert_eq!(scanner.scan(source), vec!["new.h"]);
    }

    #[test]
    fn test_disabled_block_removed() {
        let scanner = IncludeScanner::new();
        let source = "#include \"a.h\"\n#if 0\n#include \"b.h\"\n#endif\n#include \"c.h\"\n";
        assert_eq!(scanner.scan(source), vec!["a.h", "c.h"]);
    }

    #[test]
    fn test_disabled_block_needs_exact_lines() {
        let scanner = IncludeScanner::new();
        // "#if 0 // note" is not an exact match and is left alone
        let source = "#if 0 // note\n#include \"b.h\"\n#endif\n";
        assert_eq!(scanner.scan(source), vec!["b.h"]);
    }

    #[test]
    fn test_nested_conditional_is_approximate() {
        let scanner = IncludeScanner::new();
        // The inner #endif closes the match, so c.h survives
        let source = "#if 0\n#ifdef X\n#include \"b.h\"\n#endif\n#include \"c.h\"\n#endif\n";
        assert_eq!(scanner.scan(source), vec!["c.h"]);
    }

    #[test]
    fn test_indented_and_spaced_directives_ignored() {
        let scanner = IncludeScanner::new();
        let source = "  #include \"a.h\"\n#  include \"b.h\"\n#include  \"c.h\"\n";
        assert!(scanner.scan(source).is_empty());
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let scanner = IncludeScanner::new();
        let source = "#include \"a.h\"\n#include <b.h>\n#include \"a.h\"\n";
        assert_eq!(scanner.scan(source), vec!["a.h", "b.h", "a.h"]);
    }
}
