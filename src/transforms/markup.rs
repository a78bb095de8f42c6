// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Markup and template transforms
//!
//! Page files directly under the source root are minified into the output
//! tree, preserving their relative names. The identical policy applies to
//! both HTML pages and PHP templates; PHP blocks survive because the
//! minifier leaves processing instructions intact. In dev mode the markup
//! transform injects the live-reload client snippet.

use async_trait::async_trait;
use minify_html::Cfg;
use std::fs;
use tracing::debug;

use super::{Transform, TransformOutcome};
use crate::errors::{AssetflowError, AssetflowResult};
use crate::pipeline::{preserve_name, resolve_glob, ProjectLayout};
use crate::serve::{reload_script_tag, ReloadChannel};

pub struct MarkupTransform {
    /// Inject the live-reload snippet into each page (dev mode)
    pub inject_reload: bool,
}

pub struct TemplateTransform;

#[async_trait]
impl Transform for MarkupTransform {
    fn name(&self) -> &'static str {
        "markup"
    }

    async fn run(
        &self,
        layout: &ProjectLayout,
        _reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome> {
        minify_pages(layout, &layout.markup_glob(), self.inject_reload).await
    }
}

#[async_trait]
impl Transform for TemplateTransform {
    fn name(&self) -> &'static str {
        "templates"
    }

    async fn run(
        &self,
        layout: &ProjectLayout,
        _reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome> {
        minify_pages(layout, &layout.template_glob(), false).await
    }
}

async fn minify_pages(
    layout: &ProjectLayout,
    pattern: &str,
    inject_reload: bool,
) -> AssetflowResult<TransformOutcome> {
    let sources = resolve_glob(pattern)?;

    if sources.is_empty() {
        debug!("no page sources matched {pattern}, skipping");
        return Ok(TransformOutcome::no_op());
    }

    fs::create_dir_all(&layout.dest_root)
        .map_err(|e| AssetflowError::write_error(&layout.dest_root, e))?;

    let cfg = minify_cfg();
    let mut outputs = Vec::with_capacity(sources.len());

    for path in &sources {
        let input = fs::read(path).map_err(|e| AssetflowError::read_error(path, e))?;
        let mut minified = minify_html::minify(&input, &cfg);

        if inject_reload {
            minified = inject_snippet(minified);
        }

        let out_path = preserve_name(&layout.dest_root, path);
        fs::write(&out_path, minified).map_err(|e| AssetflowError::write_error(&out_path, e))?;
        outputs.push(out_path);
    }

    Ok(TransformOutcome {
        inputs: sources.len(),
        outputs,
        findings: Vec::new(),
    })
}

/// Shared minification policy: collapse whitespace, strip comments,
/// deterministic output. Processing instructions (PHP blocks) are kept.
fn minify_cfg() -> Cfg {
    Cfg {
        keep_closing_tags: true,
        minify_css: true,
        minify_js: false,
        ..Cfg::default()
    }
}

/// Insert the live-reload script tag before `</body>`, or append if the page
/// has no body close tag. Works on raw bytes; pages are not required to be
/// valid UTF-8 and pass through unaltered around the splice.
fn inject_snippet(mut page: Vec<u8>) -> Vec<u8> {
    let tag = reload_script_tag().into_bytes();

    match rfind_bytes(&page, b"</body>") {
        Some(pos) => {
            page.splice(pos..pos, tag);
        }
        None => page.extend_from_slice(&tag),
    }

    page
}

fn rfind_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold(pages: &[(&str, &str)]) -> (tempfile::TempDir, ProjectLayout) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        for (name, body) in pages {
            fs::write(src.join(name), body).unwrap();
        }
        let layout = ProjectLayout::new(src, dir.path().join("dest"));
        (dir, layout)
    }

    const PAGE: &str = "<!doctype html>\n<html>\n  <head>\n    <title>Home</title>\n  </head>\n  <body>\n    <!-- navigation -->\n    <p>  Hello   world  </p>\n  </body>\n</html>\n";

    #[tokio::test]
    async fn file_names_are_preserved() {
        let (_dir, layout) = scaffold(&[("index.html", PAGE), ("about.html", PAGE)]);

        let outcome = MarkupTransform { inject_reload: false }
            .run(&layout, None)
            .await
            .unwrap();

        assert_eq!(outcome.inputs, 2);
        assert!(layout.dest_root.join("index.html").exists());
        assert!(layout.dest_root.join("about.html").exists());
    }

    #[tokio::test]
    async fn output_is_no_larger_and_comments_are_gone() {
        let (_dir, layout) = scaffold(&[("index.html", PAGE)]);

        MarkupTransform { inject_reload: false }
            .run(&layout, None)
            .await
            .unwrap();

        let out = fs::read_to_string(layout.dest_root.join("index.html")).unwrap();
        assert!(out.len() <= PAGE.len());
        assert!(!out.contains("navigation"));
        assert!(out.contains("Hello world"));
    }

    #[tokio::test]
    async fn nested_markup_is_not_matched() {
        let (dir, layout) = scaffold(&[("index.html", PAGE)]);
        let nested = dir.path().join("src/partials");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("nav.html"), PAGE).unwrap();

        let outcome = MarkupTransform { inject_reload: false }
            .run(&layout, None)
            .await
            .unwrap();

        assert_eq!(outcome.inputs, 1);
        assert!(!layout.dest_root.join("nav.html").exists());
    }

    #[tokio::test]
    async fn php_blocks_survive_minification() {
        let page = "<!doctype html>\n<html>\n  <body>\n    <!-- note -->\n    <p><?php echo \"hi\"; ?></p>\n  </body>\n</html>\n";
        let (_dir, layout) = scaffold(&[("contact.php", page)]);

        TemplateTransform.run(&layout, None).await.unwrap();

        let out = fs::read_to_string(layout.dest_root.join("contact.php")).unwrap();
        assert!(out.contains("<?php echo \"hi\"; ?>"));
        assert!(!out.contains("note"));
    }

    #[tokio::test]
    async fn dev_mode_injects_the_reload_snippet() {
        let (_dir, layout) = scaffold(&[("index.html", PAGE)]);

        MarkupTransform { inject_reload: true }
            .run(&layout, None)
            .await
            .unwrap();

        let out = fs::read_to_string(layout.dest_root.join("index.html")).unwrap();
        assert!(out.contains("/__livereload.js"));
        let script = out.find("/__livereload.js").unwrap();
        let body_close = out.rfind("</body>").unwrap();
        assert!(script < body_close);
    }

    #[test]
    fn snippet_appends_when_body_close_is_missing() {
        let out = inject_snippet(b"<p>fragment</p>".to_vec());
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("</script>"));
    }

    #[test]
    fn non_utf8_pages_survive_injection_byte_for_byte() {
        // Latin-1 "café" plus a stray 0xFF, neither valid UTF-8
        let mut page = b"<body><p>caf\xE9 \xFF</p></body>".to_vec();
        let out = inject_snippet(page.clone());

        let tag = reload_script_tag().into_bytes();
        let pos = rfind_bytes(&out, b"</body>").unwrap();
        assert_eq!(&out[pos - tag.len()..pos], tag.as_slice());

        // Removing the tag restores the original bytes exactly
        let mut restored = out.clone();
        restored.drain(pos - tag.len()..pos);
        assert_eq!(restored, page);

        // Injection into the tail-less variant appends instead
        page.truncate(page.len() - b"</body>".len());
        let out = inject_snippet(page.clone());
        assert!(out.starts_with(&page));
        assert!(out.ends_with(tag.as_slice()));
    }

    #[test]
    fn last_body_close_wins() {
        let page = b"</body><div></body>".to_vec();
        let out = inject_snippet(page);
        let pos = rfind_bytes(&out, b"</body>").unwrap();
        assert!(pos > b"</body><div>".len());
    }
}
