// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! CLI command definitions and handlers

pub mod build;
pub mod dev;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front-end asset pipeline
///
/// Compiles Sass, bundles scripts, minifies pages and copies fonts into a
/// deployable output tree.
#[derive(Parser, Debug)]
#[clap(
    name = "assetflow",
    version,
    about = "Front-end asset pipeline with a dev server and watch mode",
    long_about = None,
    after_help = "Examples:\n\
        assetflow                       Build ./src into ./dest\n\
        assetflow build                 Same, explicitly\n\
        assetflow dev                   Build, serve ./dest and rebuild on change\n\n\
        See 'assetflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    /// Defaults to `build` when omitted
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every transform step once, no server, no watcher
    Build,

    /// Build once, then serve the output tree and rebuild on change
    Dev {
        /// Port for the dev server
        #[clap(short, long, default_value = "3000")]
        port: u16,
    },
}
