// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Script transform
//!
//! `src/js/**/*.js` → concatenate in sorted path order → lint → wrap in an
//! IIFE (bundling without global-scope shims) → minify with `minifier` →
//! write `dest/assets/js/global.min.js` plus its source map.

use async_trait::async_trait;
use std::fs;
use tracing::debug;

use super::{Transform, TransformOutcome};
use crate::errors::{AssetflowError, AssetflowResult};
use crate::lint;
use crate::pipeline::{resolve_glob, ProjectLayout, SCRIPT_ARTIFACT};
use crate::serve::{ReloadChannel, ReloadSignal};
use crate::sourcemap;

pub struct ScriptTransform;

#[async_trait]
impl Transform for ScriptTransform {
    fn name(&self) -> &'static str {
        "scripts"
    }

    async fn run(
        &self,
        layout: &ProjectLayout,
        reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome> {
        let sources = resolve_glob(&layout.script_glob())?;

        if sources.is_empty() {
            debug!("no script sources matched, skipping");
            return Ok(TransformOutcome::no_op());
        }

        let mut findings = Vec::new();
        let mut concatenated = String::new();
        let mut contents = Vec::new();

        for path in &sources {
            let text = fs::read_to_string(path).map_err(|e| AssetflowError::read_error(path, e))?;
            findings.extend(lint::script::lint(path, &text));

            concatenated.push_str(&text);
            if !text.ends_with('\n') {
                concatenated.push('\n');
            }
            contents.push(text);
        }

        let minified = bundle_and_minify(&concatenated)?;

        let js_dir = layout.js_dir();
        fs::create_dir_all(&js_dir).map_err(|e| AssetflowError::write_error(&js_dir, e))?;

        let artifact_path = js_dir.join(SCRIPT_ARTIFACT);
        let artifact = format!("{}{}", minified, sourcemap::js_pointer(SCRIPT_ARTIFACT));
        fs::write(&artifact_path, artifact)
            .map_err(|e| AssetflowError::write_error(&artifact_path, e))?;

        let map_path = sourcemap::map_path(&artifact_path);
        let map = sourcemap::artifact_map(SCRIPT_ARTIFACT, &sources, &contents);
        fs::write(&map_path, map).map_err(|e| AssetflowError::write_error(&map_path, e))?;

        if let Some(reload) = reload {
            reload.publish(ReloadSignal::Full);
        }

        Ok(TransformOutcome {
            inputs: sources.len(),
            outputs: vec![artifact_path, map_path],
            findings,
        })
    }
}

/// Wrap the concatenation in an IIFE and minify.
///
/// The wrapper keeps file-level declarations out of the page's global scope;
/// no process/global shims are injected.
fn bundle_and_minify(concatenated: &str) -> AssetflowResult<String> {
    let wrapped = format!("(function () {{\n{concatenated}}})();\n");
    let minified = minifier::js::minify(&wrapped).to_string();

    if minified.trim().is_empty() {
        return Err(AssetflowError::ScriptBundle {
            message: "minifier produced empty output".into(),
        });
    }

    Ok(minified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold(js: &[(&str, &str)]) -> (tempfile::TempDir, ProjectLayout) {
        let dir = tempfile::tempdir().unwrap();
        let js_dir = dir.path().join("src/js");
        fs::create_dir_all(&js_dir).unwrap();
        for (name, body) in js {
            fs::write(js_dir.join(name), body).unwrap();
        }
        let layout = ProjectLayout::new(dir.path().join("src"), dir.path().join("dest"));
        (dir, layout)
    }

    #[tokio::test]
    async fn produces_one_artifact_and_one_map() {
        let (_dir, layout) = scaffold(&[
            ("a.js", "function greet(name) { return \"Hi \" + name; }\n"),
            ("b.js", "function leave(name) { return \"Bye \" + name; }\n"),
        ]);

        let outcome = ScriptTransform.run(&layout, None).await.unwrap();
        assert_eq!(outcome.inputs, 2);

        let bundle = fs::read_to_string(layout.js_dir().join(SCRIPT_ARTIFACT)).unwrap();
        assert!(bundle.contains("greet"));
        assert!(bundle.contains("leave"));
        assert!(bundle.contains("sourceMappingURL=global.min.js.map"));
        assert!(layout.js_dir().join("global.min.js.map").exists());
    }

    #[tokio::test]
    async fn bundle_does_not_leak_globals() {
        let (_dir, layout) = scaffold(&[("a.js", "var counter = 0;\n")]);

        ScriptTransform.run(&layout, None).await.unwrap();

        let bundle = fs::read_to_string(layout.js_dir().join(SCRIPT_ARTIFACT)).unwrap();
        assert!(bundle.starts_with("(function"));
    }

    #[tokio::test]
    async fn zero_inputs_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/js")).unwrap();
        let layout = ProjectLayout::new(dir.path().join("src"), dir.path().join("dest"));

        let outcome = ScriptTransform.run(&layout, None).await.unwrap();
        assert_eq!(outcome.inputs, 0);
        assert!(!layout.js_dir().join(SCRIPT_ARTIFACT).exists());
    }

    #[tokio::test]
    async fn concatenation_order_is_sorted_path_order() {
        let (_dir, layout) = scaffold(&[
            ("z_last.js", "var last = true;\n"),
            ("a_first.js", "var first = true;\n"),
        ]);

        ScriptTransform.run(&layout, None).await.unwrap();

        let bundle = fs::read_to_string(layout.js_dir().join(SCRIPT_ARTIFACT)).unwrap();
        let first = bundle.find("first").unwrap();
        let last = bundle.find("last").unwrap();
        assert!(first < last);
    }

    #[tokio::test]
    async fn lint_findings_are_reported_not_fatal() {
        let (_dir, layout) = scaffold(&[("a.js", "if (a == 1) { console.log(a); }\n")]);

        let outcome = ScriptTransform.run(&layout, None).await.unwrap();
        let rules: Vec<_> = outcome.findings.iter().map(|f| f.rule).collect();
        assert!(rules.contains(&"eqeqeq"));
        assert!(rules.contains(&"no-console"));
        assert!(layout.js_dir().join(SCRIPT_ARTIFACT).exists());
    }

    #[tokio::test]
    async fn full_reload_is_published_in_dev_mode() {
        let (_dir, layout) = scaffold(&[("a.js", "var x = 1;\n")]);

        let channel = ReloadChannel::new();
        let mut rx = channel.subscribe();
        ScriptTransform.run(&layout, Some(&channel)).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ReloadSignal::Full);
    }

    #[test]
    fn minified_bundle_is_smaller() {
        let source = "function add(a, b) {\n    // sum\n    return a + b;\n}\n";
        let out = bundle_and_minify(source).unwrap();
        assert!(out.len() < format!("(function () {{\n{source}}})();\n").len());
    }
}
