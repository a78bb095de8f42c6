// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Build command - run every transform step once

use miette::Result;

use crate::pipeline::{PipelineRunner, ProjectLayout};
use crate::utils::colors::print_header;

/// Run the build command
pub async fn run(verbose: bool) -> Result<()> {
    let layout = ProjectLayout::default();

    print_header("assetflow build");
    println!();

    let runner = PipelineRunner::build_set(false);
    let report = runner.execute(&layout, None, verbose).await?;

    if !report.success {
        return Err(miette::miette!("One or more pipeline steps failed"));
    }

    Ok(())
}
