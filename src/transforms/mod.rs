// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Leaf transform steps
//!
//! Each transform maps a glob of source files to output files through a fixed
//! sequence of delegated library calls. Steps do not depend on each other's
//! output; the runner invokes them in declared order.

mod fonts;
mod markup;
mod script;
mod style;

pub use fonts::FontCopy;
pub use markup::{MarkupTransform, TemplateTransform};
pub use script::ScriptTransform;
pub use style::StyleTransform;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::errors::AssetflowResult;
use crate::lint::LintFinding;
use crate::pipeline::ProjectLayout;
use crate::serve::ReloadChannel;

/// What a transform step produced
#[derive(Debug, Clone, Default)]
pub struct TransformOutcome {
    /// Number of matched source files
    pub inputs: usize,
    /// Files written into the output tree
    pub outputs: Vec<PathBuf>,
    /// Non-fatal lint findings to report
    pub findings: Vec<LintFinding>,
}

impl TransformOutcome {
    /// Outcome of a step that matched no inputs
    pub fn no_op() -> Self {
        Self::default()
    }
}

/// A leaf pipeline stage
#[async_trait]
pub trait Transform: Send + Sync {
    /// Step name shown in progress output
    fn name(&self) -> &'static str;

    /// Run the step against the project layout.
    ///
    /// `reload` is present in dev mode; steps that publish update events do
    /// so through it.
    async fn run(
        &self,
        layout: &ProjectLayout,
        reload: Option<&ReloadChannel>,
    ) -> AssetflowResult<TransformOutcome>;
}
