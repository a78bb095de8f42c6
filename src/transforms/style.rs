// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Stylesheet transform
//!
//! `src/sass/**/*.sass` → lint → compile compressed with `grass` →
//! concatenate → vendor-prefix and minify with `lightningcss` → write
//! `dest/assets/css/style.min.css` plus its source map. Publishes a targeted
//! style signal so connected browsers swap the stylesheet without a reload.

use async_trait::async_trait;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{Transform, TransformOutcome};
use crate::errors::{AssetflowError, AssetflowResult};
use crate::lint;
use crate::pipeline::{resolve_glob, ProjectLayout, STYLE_ARTIFACT};
use crate::serve::{ReloadChannel, ReloadSignal};
use crate::sourcemap;

pub struct StyleTransform;

#[async_trait]
impl Transform for StyleTransform {
    fn name(&self) -> &'static str {
        "styles"
    }

    async fn run(
        &self,
        layout: &ProjectLayout,
        reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome> {
        let matched = resolve_glob(&layout.style_glob())?;

        // Partials are pulled in by the compiler through the load path,
        // never compiled standalone.
        let sources: Vec<_> = matched.into_iter().filter(|p| !is_partial(p)).collect();

        if sources.is_empty() {
            debug!("no stylesheet sources matched, skipping");
            return Ok(TransformOutcome::no_op());
        }

        let compile_options = grass::Options::default()
            .style(grass::OutputStyle::Compressed)
            .load_path(layout.sass_dir());

        let mut findings = Vec::new();
        let mut compiled = String::new();
        let mut contents = Vec::new();

        for path in &sources {
            let text = fs::read_to_string(path).map_err(|e| AssetflowError::read_error(path, e))?;
            findings.extend(lint::style::lint(path, &text));

            let css = grass::from_path(path, &compile_options).map_err(|e| {
                AssetflowError::StyleCompile {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?;
            compiled.push_str(&css);
            contents.push(text);
        }

        let minified = prefix_and_minify(&compiled)?;

        let css_dir = layout.css_dir();
        fs::create_dir_all(&css_dir).map_err(|e| AssetflowError::write_error(&css_dir, e))?;

        let artifact_path = css_dir.join(STYLE_ARTIFACT);
        let artifact = format!("{}{}", minified, sourcemap::css_pointer(STYLE_ARTIFACT));
        fs::write(&artifact_path, artifact)
            .map_err(|e| AssetflowError::write_error(&artifact_path, e))?;

        let map_path = sourcemap::map_path(&artifact_path);
        let map = sourcemap::artifact_map(STYLE_ARTIFACT, &sources, &contents);
        fs::write(&map_path, map).map_err(|e| AssetflowError::write_error(&map_path, e))?;

        if let Some(reload) = reload {
            reload.publish(ReloadSignal::Style);
        }

        Ok(TransformOutcome {
            inputs: sources.len(),
            outputs: vec![artifact_path, map_path],
            findings,
        })
    }
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('_'))
        .unwrap_or(false)
}

/// Autoprefix and minify compiled CSS
fn prefix_and_minify(css: &str) -> AssetflowResult<String> {
    let mut sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| AssetflowError::CssPostProcess { message: e.to_string() })?;

    sheet
        .minify(MinifyOptions {
            targets: targets(),
            ..MinifyOptions::default()
        })
        .map_err(|e| AssetflowError::CssPostProcess { message: e.to_string() })?;

    let result = sheet
        .to_css(PrinterOptions {
            minify: true,
            targets: targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| AssetflowError::CssPostProcess { message: e.to_string() })?;

    Ok(result.code)
}

/// Baseline browsers for vendor prefixing. Versions are encoded as
/// `major << 16 | minor << 8 | patch`.
fn targets() -> Targets {
    Targets {
        browsers: Some(Browsers {
            chrome: Some(90 << 16),
            edge: Some(90 << 16),
            firefox: Some(88 << 16),
            safari: Some(14 << 16),
            ios_saf: Some(14 << 16),
            ..Browsers::default()
        }),
        ..Targets::default()
    }
}
