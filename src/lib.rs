// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! # assetflow - Front-End Asset Pipeline
//!
//! `assetflow` transforms a source asset tree (Sass stylesheets, scripts,
//! markup, fonts) into a deployable output tree, with an optional dev server
//! and watch/reload loop.
//!
//! ## Features
//!
//! - **Fixed pipeline** - styles, scripts, markup, templates and fonts, run
//!   strictly in declared order
//! - **Delegated heavy lifting** - Sass via `grass`, prefixing/minification
//!   via `lightningcss`, scripts via `minifier`, pages via `minify-html`
//! - **Step isolation** - a compile failure aborts its own step only
//! - **Live reload** - targeted stylesheet swaps, full reloads for the rest
//!
//! ## Quick Start
//!
//! ```bash
//! # Build ./src into ./dest
//! assetflow build
//!
//! # Build, serve ./dest and rebuild on change
//! assetflow dev
//! ```

pub mod cli;
pub mod errors;
pub mod lint;
pub mod pipeline;
pub mod serve;
pub mod sourcemap;
pub mod transforms;
pub mod utils;
pub mod watch;

// Re-export commonly used types
pub use errors::{AssetflowError, AssetflowResult};
pub use pipeline::{PipelineRunner, ProjectLayout};
pub use serve::{DevServer, ReloadChannel, ReloadSignal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
