// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Pipeline runner
//!
//! Runs the transform steps of a composite mode strictly in declared order.
//! A compile failure marks its step failed and the remaining steps still
//! execute; any other error aborts the run.

use std::time::{Duration, Instant};

use colored::Colorize;
use tracing::error;

use crate::errors::AssetflowResult;
use crate::lint;
use crate::pipeline::ProjectLayout;
use crate::serve::ReloadChannel;
use crate::transforms::{
    FontCopy, MarkupTransform, ScriptTransform, StyleTransform, TemplateTransform, Transform,
};
use crate::utils::spinner::create_spinner;

/// Result of one transform step
#[derive(Debug)]
pub struct StepReport {
    pub name: &'static str,
    pub success: bool,
    pub duration: Duration,
    pub inputs: usize,
    pub outputs: Vec<std::path::PathBuf>,
    pub error: Option<String>,
}

/// Result of executing a composite run
#[derive(Debug)]
pub struct PipelineReport {
    pub steps: Vec<StepReport>,
    pub duration: Duration,
    pub success: bool,
}

/// Runs an ordered list of transform steps
pub struct PipelineRunner {
    transforms: Vec<Box<dyn Transform>>,
}

impl PipelineRunner {
    /// The `build` step set: styles, scripts, markup, templates, fonts.
    ///
    /// `dev` switches the markup step to inject the live-reload snippet.
    pub fn build_set(dev: bool) -> Self {
        Self {
            transforms: vec![
                Box::new(StyleTransform),
                Box::new(ScriptTransform),
                Box::new(MarkupTransform { inject_reload: dev }),
                Box::new(TemplateTransform),
                Box::new(FontCopy),
            ],
        }
    }

    /// The watcher's re-run set: the four transforms, no font copy.
    pub fn watch_set() -> Self {
        Self {
            transforms: vec![
                Box::new(StyleTransform),
                Box::new(ScriptTransform),
                Box::new(MarkupTransform { inject_reload: true }),
                Box::new(TemplateTransform),
            ],
        }
    }

    /// Execute all steps sequentially
    pub async fn execute(
        &self,
        layout: &ProjectLayout,
        reload: Option<&ReloadChannel>,
        verbose: bool,
    ) -> AssetflowResult<PipelineReport> {
        layout.check_source_root()?;

        let start = Instant::now();
        let mut steps = Vec::with_capacity(self.transforms.len());
        let mut all_success = true;

        for transform in &self.transforms {
            let step_start = Instant::now();
            let spinner = create_spinner(transform.name());

            match transform.run(layout, reload).await {
                Ok(outcome) => {
                    spinner.finish_and_clear();
                    let duration = step_start.elapsed();
                    println!(
                        "  {} {} ({:.2}s, {} file{})",
                        "✓".green(),
                        transform.name().bold(),
                        duration.as_secs_f64(),
                        outcome.inputs,
                        if outcome.inputs == 1 { "" } else { "s" }
                    );

                    if !outcome.findings.is_empty() {
                        lint::report(&outcome.findings);
                    }

                    if verbose {
                        for output in &outcome.outputs {
                            println!("    {}", output.display().to_string().dimmed());
                        }
                    }

                    steps.push(StepReport {
                        name: transform.name(),
                        success: true,
                        duration,
                        inputs: outcome.inputs,
                        outputs: outcome.outputs,
                        error: None,
                    });
                }
                Err(e) if e.is_step_scoped() => {
                    spinner.finish_and_clear();
                    println!("  {} {} failed", "✗".red(), transform.name().bold());
                    error!("{e}");

                    all_success = false;
                    steps.push(StepReport {
                        name: transform.name(),
                        success: false,
                        duration: step_start.elapsed(),
                        inputs: 0,
                        outputs: Vec::new(),
                        error: Some(e.to_string()),
                    });
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    println!("  {} {} aborted", "✗".red(), transform.name().bold());
                    return Err(e);
                }
            }
        }

        let duration = start.elapsed();

        println!();
        if all_success {
            println!(
                "{}",
                format!("Pipeline completed successfully in {:.2}s", duration.as_secs_f64())
                    .green()
            );
        } else {
            println!(
                "{}",
                format!("Pipeline finished with failures after {:.2}s", duration.as_secs_f64())
                    .red()
            );
        }

        Ok(PipelineReport {
            steps,
            duration,
            success: all_success,
        })
    }
}
