// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Script lint rules
//!
//! Style-level checks in the jshint tradition: loose equality, `eval`,
//! leftover debug statements.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use super::LintFinding;

struct Rule {
    name: &'static str,
    pattern: Regex,
    message: &'static str,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule {
                name: "eqeqeq",
                pattern: Regex::new(r"[^=!<>]==[^=]|[^!]!=[^=]").expect("valid regex"),
                message: "Use '===' and '!==' instead of loose equality",
            },
            Rule {
                name: "no-eval",
                pattern: Regex::new(r"\beval\s*\(").expect("valid regex"),
                message: "eval can be harmful",
            },
            Rule {
                name: "no-console",
                pattern: Regex::new(r"console\.(log|debug)\s*\(").expect("valid regex"),
                message: "Leftover console output",
            },
            Rule {
                name: "no-debugger",
                pattern: Regex::new(r"\bdebugger\b").expect("valid regex"),
                message: "Leftover debugger statement",
            },
        ]
    })
}

/// Lint one script source
pub fn lint(path: &Path, source: &str) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim_start();
        if trimmed.starts_with("//") {
            continue;
        }

        for rule in rules() {
            if rule.pattern.is_match(raw) {
                findings.push(LintFinding::new(path, line, rule.name, rule.message));
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lint_str(source: &str) -> Vec<LintFinding> {
        lint(&PathBuf::from("src/js/test.js"), source)
    }

    #[test]
    fn flags_loose_equality() {
        let findings = lint_str("if (a == b) { return; }\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "eqeqeq");
    }

    #[test]
    fn strict_equality_is_fine() {
        let findings = lint_str("if (a === b && c !== d) { return; }\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn flags_eval_and_debug_leftovers() {
        let findings = lint_str("eval(code);\nconsole.log(x);\ndebugger;\n");
        let rules: Vec<_> = findings.iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec!["no-eval", "no-console", "no-debugger"]);
    }

    #[test]
    fn line_comments_are_skipped() {
        let findings = lint_str("// console.log was here\nvar x = 1;\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn line_numbers_are_one_based() {
        let findings = lint_str("var a = 1;\nvar b = a == 1;\n");
        assert_eq!(findings[0].line, 2);
    }
}
