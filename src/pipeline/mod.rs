// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Pipeline orchestration
//!
//! The filesystem layout contract and the runner that executes the transform
//! steps of a composite mode.

mod layout;
mod runner;

pub use layout::{
    preserve_name, resolve_glob, ProjectLayout, FONT_FAMILY, SCRIPT_ARTIFACT, STYLE_ARTIFACT,
};
pub use runner::{PipelineReport, PipelineRunner, StepReport};
