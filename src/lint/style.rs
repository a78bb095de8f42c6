// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Stylesheet lint rules
//!
//! Active rules: `no-ids` and `no-mergeable-selectors`. Indentation and
//! final-newline checks are deliberately not enforced.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use super::LintFinding;

fn id_selector() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[A-Za-z][-\w]*").expect("valid regex"))
}

/// Lint one indented-syntax stylesheet source
pub fn lint(path: &Path, source: &str) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut top_level_selectors: HashMap<&str, usize> = HashMap::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim_start();

        // no-ids: selectors addressing elements by id
        if id_selector().is_match(trimmed) {
            findings.push(LintFinding::new(
                path,
                line,
                "no-ids",
                "Avoid id selectors; prefer classes",
            ));
        }

        // no-mergeable-selectors: same top-level selector declared twice
        if is_top_level_selector(raw) {
            if let Some(&first) = top_level_selectors.get(raw.trim_end()) {
                findings.push(LintFinding::new(
                    path,
                    line,
                    "no-mergeable-selectors",
                    format!("Selector also declared on line {first}; merge the rules"),
                ));
            } else {
                top_level_selectors.insert(raw.trim_end(), line);
            }
        }
    }

    findings
}

/// A non-indented, non-empty line that is not a directive or variable
fn is_top_level_selector(raw: &str) -> bool {
    if raw.starts_with(char::is_whitespace) {
        return false;
    }
    let trimmed = raw.trim_end();
    if trimmed.is_empty() {
        return false;
    }
    !trimmed.starts_with('$')
        && !trimmed.starts_with('@')
        && !trimmed.starts_with("//")
        && !trimmed.starts_with("/*")
        && !trimmed.starts_with('=')
        && !trimmed.starts_with('+')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lint_str(source: &str) -> Vec<LintFinding> {
        lint(&PathBuf::from("src/sass/test.sass"), source)
    }

    #[test]
    fn flags_id_selectors() {
        let findings = lint_str("#header\n  color: red\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "no-ids");
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn hex_colors_are_not_id_selectors() {
        let findings = lint_str(".card\n  color: #ff0000\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn flags_mergeable_selectors() {
        let findings = lint_str(".card\n  color: red\n.card\n  margin: 0\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "no-mergeable-selectors");
        assert_eq!(findings[0].line, 3);
    }

    #[test]
    fn variables_and_directives_are_not_selectors() {
        let findings = lint_str("$accent: blue\n@use 'mixins'\n// note\n.card\n  color: $accent\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn indentation_is_not_checked() {
        // Mixed indentation depth is the compiler's problem, not the linter's
        let findings = lint_str(".card\n        color: red\n");
        assert!(findings.is_empty());
    }
}
