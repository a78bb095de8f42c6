// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Error types for the asset pipeline
//!
//! Lint findings are not errors: they are reported and the pipeline keeps
//! going. Compile failures are scoped to the step that produced them, so the
//! remaining steps of a run still execute. Filesystem and server errors
//! propagate and abort the run.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for assetflow operations
pub type AssetflowResult<T> = Result<T, AssetflowError>;

/// Main error type for assetflow
#[derive(Error, Debug, Diagnostic)]
pub enum AssetflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Filesystem Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(assetflow::source_missing),
        help("Expected a ./src tree with sass/, js/, fonts/ and page files")
    )]
    SourceRootMissing { path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(assetflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(assetflow::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(assetflow::glob_error))]
    GlobPattern { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Step-Scoped Compile Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Sass compilation failed for '{path}': {message}")]
    #[diagnostic(
        code(assetflow::style_compile),
        help("The remaining pipeline steps still run; fix the stylesheet and rebuild")
    )]
    StyleCompile { path: PathBuf, message: String },

    #[error("CSS post-processing failed: {message}")]
    #[diagnostic(code(assetflow::css_postprocess))]
    CssPostProcess { message: String },

    #[error("Script bundling failed: {message}")]
    #[diagnostic(code(assetflow::script_bundle))]
    ScriptBundle { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Server/Watcher Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to bind dev server on {addr}: {error}")]
    #[diagnostic(
        code(assetflow::server_bind),
        help("Is another dev server already running on this port?")
    )]
    ServerBind { addr: String, error: String },

    #[error("File watcher error: {message}")]
    #[diagnostic(code(assetflow::watch_error))]
    Watch { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(assetflow::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for AssetflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<glob::PatternError> for AssetflowError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl AssetflowError {
    /// Whether this error aborts only the step that produced it.
    ///
    /// Step-scoped errors (compile failures) mark the step failed and let the
    /// rest of the run continue; everything else aborts the whole run.
    pub fn is_step_scoped(&self) -> bool {
        matches!(
            self,
            Self::StyleCompile { .. } | Self::CssPostProcess { .. } | Self::ScriptBundle { .. }
        )
    }

    /// Create a file read error with context
    pub fn read_error(path: &Path, e: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
    }

    /// Create a file write error with context
    pub fn write_error(path: &Path, e: std::io::Error) -> Self {
        Self::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
    }
}
