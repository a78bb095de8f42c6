// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Dev command - build once, serve the output tree, rebuild on change

use colored::Colorize;
use miette::Result;
use tracing::error;

use crate::pipeline::{PipelineRunner, ProjectLayout};
use crate::serve::{DevServer, ReloadChannel};
use crate::utils::colors::print_header;
use crate::watch;

/// Run the dev command
pub async fn run(port: u16, verbose: bool) -> Result<()> {
    let layout = ProjectLayout::default();
    let reload = ReloadChannel::new();

    print_header("assetflow dev");
    println!();

    // Initial full build, with the reload snippet injected into pages
    let report = PipelineRunner::build_set(true)
        .execute(&layout, Some(&reload), verbose)
        .await?;

    if !report.success {
        // Keep serving whatever did build; the watcher picks up fixes
        println!(
            "{}",
            "Some steps failed; serving partial output until the next change".yellow()
        );
    }

    // The server needs a root even when every step was a no-op
    std::fs::create_dir_all(&layout.dest_root)
        .map_err(|e| miette::miette!("Failed to create {}: {e}", layout.dest_root.display()))?;

    let server = DevServer::new(layout.dest_root.clone(), port, reload.clone());
    tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            error!("dev server stopped: {e}");
        }
    });

    println!();
    println!(
        "Serving {} at {}",
        layout.dest_root.display(),
        format!("http://127.0.0.1:{port}").cyan()
    );

    watch::watch(&layout, &reload, verbose).await?;

    Ok(())
}
