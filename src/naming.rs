use std::path::is_separator;

use regex_lite::Regex;

use crate::error::{HbscError, Result};

/// Compiled form of the `|`-separated extension list (e.g. `handlebars|hbs`).
///
/// Every entry is escaped, prefixed with a literal dot and anchored so that the
/// pattern only ever matches a trailing suffix. Built once per run.
#[derive(Debug, Clone)]
pub struct ExtensionPattern {
    list: String,
    regex: Regex,
}

impl ExtensionPattern {
    pub fn new(list: &str) -> Result<Self> {
        let alternatives: Vec<String> = list
            .split('|')
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(r"\.{}", regex_lite::escape(ext)))
            .collect();

        if alternatives.is_empty() {
            return Err(HbscError::InvalidExtension {
                extension: list.to_string(),
                reason: "no extensions given".into(),
            });
        }

        let pattern = format!("(?:{})$", alternatives.join("|"));
        let regex = Regex::new(&pattern).map_err(|e| HbscError::InvalidExtension {
            extension: list.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            list: list.to_string(),
            regex,
        })
    }

    /// The extension list this pattern was built from.
    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Remove the recognised extension from the end of `s`, if there is one.
    pub fn strip<'a>(&self, s: &'a str) -> &'a str {
        match self.regex.find(s) {
            Some(m) => &s[..m.start()],
            None => s,
        }
    }

    /// Replace the recognised extension with `replacement`.
    ///
    /// Names without a recognised extension get `replacement` appended so the
    /// result never equals the input.
    pub fn replace(&self, s: &str, replacement: &str) -> String {
        let stem = self.strip(s);
        format!("{stem}{replacement}")
    }
}

/// Derive the key a template is registered under from its input path.
///
/// Without a root only the final path segment is kept. With a root, a leading
/// `root` + separator is stripped and any other path is left alone, so a root
/// that itself ends in a separator never matches. A root of `""` keeps the
/// directories, unlike no root at all.
pub fn resolve_name(input: &str, root: Option<&str>, extension: &ExtensionPattern) -> String {
    let trimmed = match root {
        None => base_name(input),
        Some(root) => strip_root(input, root),
    };
    extension.strip(trimmed).to_string()
}

fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return path;
    }
    let Some(rest) = path.strip_prefix(root) else {
        return path;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if is_separator(c) => chars.as_str(),
        _ => path,
    }
}

/// Final path segment of `path`, split on the platform separators.
pub fn base_name(path: &str) -> &str {
    path.rsplit(is_separator).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn default_pattern() -> ExtensionPattern {
        ExtensionPattern::new("handlebars|hbs").unwrap()
    }

    #[rstest]
    #[case("a/b/c.hbs", None, "c")]
    #[case("a/b/c.handlebars", None, "c")]
    #[case("c.hbs", None, "c")]
    #[case("a/b/c.hbs", Some("a"), "b/c")]
    #[case("a/b/c.hbs", Some("a/"), "a/b/c")]
    #[case("a/b/c.hbs", Some("a/b"), "c")]
    #[case("a/b/c.hbs", Some(""), "a/b/c")]
    #[case("ab/c.hbs", Some("a"), "ab/c")]
    #[case("x/b/c.hbs", Some("a"), "x/b/c")]
    #[case("a/b/c.txt", None, "c.txt")]
    fn test_resolve_name(
        #[case] input: &str,
        #[case] root: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(resolve_name(input, root, &default_pattern()), expected);
    }

    #[test]
    fn test_root_with_trailing_separator_is_not_stripped() {
        let pattern = default_pattern();
        assert_eq!(resolve_name("a/b/c.hbs", Some("a/"), &pattern), "a/b/c");
        assert_eq!(resolve_name("a//b/c.hbs", Some("a/"), &pattern), "b/c");
    }

    #[test]
    fn test_resolve_name_keeps_special_characters() {
        let name = resolve_name("views/it's.hbs", None, &default_pattern());
        assert_eq!(name, "it's");
    }

    #[test]
    fn test_extension_only_matches_suffix() {
        let pattern = default_pattern();
        assert!(pattern.is_match("page.hbs"));
        assert!(!pattern.is_match("page.hbs.bak"));
        assert!(!pattern.is_match("page.handlebars.txt"));
        assert!(!pattern.is_match("pagehbs"));
        assert_eq!(pattern.strip("page.hbs.hbs"), "page.hbs");
    }

    #[test]
    fn test_extension_metacharacters_are_literal() {
        let pattern = ExtensionPattern::new("tpl.html|h+s").unwrap();
        assert!(pattern.is_match("index.tpl.html"));
        assert!(!pattern.is_match("index.tplxhtml"));
        assert!(pattern.is_match("index.h+s"));
        assert!(!pattern.is_match("index.hhs"));
    }

    #[test]
    fn test_extension_list_must_not_be_empty() {
        let result = ExtensionPattern::new("|");
        assert!(matches!(result, Err(HbscError::InvalidExtension { .. })));
    }

    #[test]
    fn test_replace_extension() {
        let pattern = default_pattern();
        assert_eq!(pattern.replace("page.handlebars", ".js"), "page.js");
        assert_eq!(pattern.replace("page.txt", ".js"), "page.txt.js");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.hbs"), "c.hbs");
        assert_eq!(base_name("c.hbs"), "c.hbs");
    }
}
