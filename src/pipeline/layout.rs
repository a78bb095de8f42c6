// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Project layout
//!
//! The filesystem contract of the pipeline: where sources live, where
//! artifacts go, and which globs each transform step operates on. Artifact
//! names are fixed regardless of how many source files matched.

use std::path::{Path, PathBuf};

use crate::errors::{AssetflowError, AssetflowResult};

/// Name of the single stylesheet artifact
pub const STYLE_ARTIFACT: &str = "style.min.css";

/// Name of the single script bundle artifact
pub const SCRIPT_ARTIFACT: &str = "global.min.js";

/// Font family copied verbatim into the output tree
pub const FONT_FAMILY: &str = "fontawesome-webfont";

/// Source and destination roots plus the glob patterns derived from them
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Base directory for inputs
    pub source_root: PathBuf,
    /// Base directory for outputs
    pub dest_root: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("./src"),
            dest_root: PathBuf::from("./dest"),
        }
    }
}

impl ProjectLayout {
    /// Create a layout rooted at explicit source and destination directories
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    /// Fail early when the source tree is missing
    pub fn check_source_root(&self) -> AssetflowResult<()> {
        if !self.source_root.is_dir() {
            return Err(AssetflowError::SourceRootMissing {
                path: self.source_root.clone(),
            });
        }
        Ok(())
    }

    /// Recursive glob for stylesheet sources
    pub fn style_glob(&self) -> String {
        self.join_glob("sass/**/*.sass")
    }

    /// Sass directory, used as the compiler load path for partials
    pub fn sass_dir(&self) -> PathBuf {
        self.source_root.join("sass")
    }

    /// Recursive glob for script sources
    pub fn script_glob(&self) -> String {
        self.join_glob("js/**/*.js")
    }

    /// Non-recursive glob for page markup
    pub fn markup_glob(&self) -> String {
        self.join_glob("*.html")
    }

    /// Non-recursive glob for server templates
    pub fn template_glob(&self) -> String {
        self.join_glob("*.php")
    }

    /// Glob for the fixed font family
    pub fn font_glob(&self) -> String {
        self.join_glob(&format!("fonts/{}.*", FONT_FAMILY))
    }

    /// Output directory for the stylesheet artifact
    pub fn css_dir(&self) -> PathBuf {
        self.dest_root.join("assets/css")
    }

    /// Output directory for the script artifact
    pub fn js_dir(&self) -> PathBuf {
        self.dest_root.join("assets/js")
    }

    /// Output directory for copied fonts
    pub fn fonts_dir(&self) -> PathBuf {
        self.dest_root.join("fonts")
    }

    /// Patterns observed by the watcher, relative to the source root.
    ///
    /// Fonts are deliberately absent: a font change does not re-trigger
    /// the pipeline.
    pub fn watch_patterns(&self) -> Vec<String> {
        vec![
            "*.html".to_string(),
            "*.php".to_string(),
            "js/**/*.js".to_string(),
            "sass/**/*.sass".to_string(),
        ]
    }

    fn join_glob(&self, pattern: &str) -> String {
        self.source_root.join(pattern).to_string_lossy().into_owned()
    }
}

/// Resolve a glob pattern to a sorted list of files.
///
/// Zero matches is not an error: transforms with no inputs are a no-op.
/// Sorting pins concatenation order so artifacts are deterministic.
pub fn resolve_glob(pattern: &str) -> AssetflowResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Destination path that preserves an input file's relative name
pub fn preserve_name(dest_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => dest_dir.join(name),
        None => dest_dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots() {
        let layout = ProjectLayout::default();
        assert_eq!(layout.source_root, PathBuf::from("./src"));
        assert_eq!(layout.dest_root, PathBuf::from("./dest"));
    }

    #[test]
    fn globs_follow_the_contract() {
        let layout = ProjectLayout::new("site/src", "site/dest");
        assert!(layout.style_glob().ends_with("sass/**/*.sass"));
        assert!(layout.script_glob().ends_with("js/**/*.js"));
        assert!(layout.markup_glob().ends_with("*.html"));
        assert!(layout.template_glob().ends_with("*.php"));
        assert!(layout.font_glob().ends_with("fonts/fontawesome-webfont.*"));
    }

    #[test]
    fn artifact_dirs_are_under_dest() {
        let layout = ProjectLayout::new("src", "dest");
        assert_eq!(layout.css_dir(), PathBuf::from("dest/assets/css"));
        assert_eq!(layout.js_dir(), PathBuf::from("dest/assets/js"));
        assert_eq!(layout.fonts_dir(), PathBuf::from("dest/fonts"));
    }

    #[test]
    fn watch_set_excludes_fonts() {
        let layout = ProjectLayout::default();
        let patterns = layout.watch_patterns();
        assert_eq!(patterns.len(), 4);
        assert!(!patterns.iter().any(|p| p.contains("fonts")));
    }

    #[test]
    fn resolve_glob_with_no_matches_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.nothing").to_string_lossy().into_owned();
        let files = resolve_glob(&pattern).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn resolve_glob_sorts_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.js"), "b").unwrap();
        std::fs::write(dir.path().join("a.js"), "a").unwrap();
        let pattern = dir.path().join("*.js").to_string_lossy().into_owned();
        let files = resolve_glob(&pattern).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.js", "b.js"]);
    }

    #[test]
    fn preserve_name_keeps_the_file_name() {
        let out = preserve_name(Path::new("dest"), Path::new("src/index.html"));
        assert_eq!(out, PathBuf::from("dest/index.html"));
    }
}
