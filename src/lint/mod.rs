// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! In-process lint rules for stylesheet and script sources
//!
//! Findings are reported and never fail a step.

pub mod script;
pub mod style;

use std::fmt;
use std::path::PathBuf;

use crate::utils::colors::print_warning;

/// A single non-fatal lint finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    /// File the finding was raised in
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable message
    pub message: String,
}

impl LintFinding {
    pub fn new(file: &std::path::Path, line: usize, rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}  {}  {}",
            self.file.display(),
            self.line,
            self.rule,
            self.message
        )
    }
}

/// Print findings in a stylish-formatter-like list
pub fn report(findings: &[LintFinding]) {
    for finding in findings {
        print_warning(&finding.to_string());
    }
}
