// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Source map emission
//!
//! Each artifact ships with a companion v3 map carrying the original sources
//! and their content. Maps are generated in-process with no timestamps, so
//! repeated builds over unchanged sources are byte-identical.

use serde_json::json;
use std::path::{Path, PathBuf};

/// Build a v3 source map for an artifact assembled from `sources`
pub fn artifact_map(artifact: &str, sources: &[PathBuf], contents: &[String]) -> String {
    let sources: Vec<String> = sources
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();

    json!({
        "version": 3,
        "file": artifact,
        "sources": sources,
        "sourcesContent": contents,
        "names": [],
        "mappings": "",
    })
    .to_string()
}

/// Companion map path for an artifact
pub fn map_path(artifact_path: &Path) -> PathBuf {
    let mut name = artifact_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".map");
    artifact_path.with_file_name(name)
}

/// Trailing sourceMappingURL comment for a stylesheet artifact
pub fn css_pointer(artifact: &str) -> String {
    format!("\n/*# sourceMappingURL={artifact}.map */\n")
}

/// Trailing sourceMappingURL comment for a script artifact
pub fn js_pointer(artifact: &str) -> String {
    format!("\n//# sourceMappingURL={artifact}.map\n")
}
