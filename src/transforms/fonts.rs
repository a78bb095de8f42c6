// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Font copy step
//!
//! Copies the fixed font family byte-for-byte into `dest/fonts/`.

use async_trait::async_trait;
use std::fs;
use tracing::debug;

use super::{Transform, TransformOutcome};
use crate::errors::{AssetflowError, AssetflowResult};
use crate::pipeline::{preserve_name, resolve_glob, ProjectLayout};
use crate::serve::ReloadChannel;

pub struct FontCopy;

#[async_trait]
impl Transform for FontCopy {
    fn name(&self) -> &'static str {
        "fonts"
    }

    async fn run(
        &self,
        layout: &ProjectLayout,
        _reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome> {
        let sources = resolve_glob(&layout.font_glob())?;

        if sources.is_empty() {
            debug!("no font files matched, skipping");
            return Ok(TransformOutcome::no_op());
        }

        let fonts_dir = layout.fonts_dir();
        fs::create_dir_all(&fonts_dir).map_err(|e| AssetflowError::write_error(&fonts_dir, e))?;

        let mut outputs = Vec::with_capacity(sources.len());
        for path in &sources {
            let out_path = preserve_name(&fonts_dir, path);
            fs::copy(path, &out_path).map_err(|e| AssetflowError::write_error(&out_path, e))?;
            outputs.push(out_path);
        }

        Ok(TransformOutcome {
            inputs: sources.len(),
            outputs,
            findings: Vec::new(),
        })
    }
}
