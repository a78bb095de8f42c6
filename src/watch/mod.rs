// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Watch mode - re-run the transforms on source changes
//!
//! Observes the source tree and, on any change matching the watch set,
//! re-runs styles, scripts, markup and templates in sequence, then signals a
//! full reload. Runs are serialized: debounced events arriving while a run
//! executes are drained and coalesced into at most one follow-up run.

use colored::Colorize;
use notify::{RecursiveMode, Watcher as _};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::errors::{AssetflowError, AssetflowResult};
use crate::pipeline::{PipelineRunner, ProjectLayout};
use crate::serve::{ReloadChannel, ReloadSignal};
use crate::utils::colors::print_error;

/// Debounce window for filesystem events
const DEBOUNCE_MS: u64 = 300;

/// Run the watch loop until the process exits
pub async fn watch(
    layout: &ProjectLayout,
    reload: &ReloadChannel,
    verbose: bool,
) -> AssetflowResult<()> {
    let source_root = layout
        .source_root
        .canonicalize()
        .map_err(|e| AssetflowError::read_error(&layout.source_root, e))?;

    let patterns = compile_patterns(&layout.watch_patterns())?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = new_debouncer(
        Duration::from_millis(DEBOUNCE_MS),
        move |result: DebounceEventResult| {
            let _ = tx.send(result);
        },
    )
    .map_err(|e| AssetflowError::Watch {
        message: format!("failed to create file watcher: {e}"),
    })?;

    debouncer
        .watcher()
        .watch(&source_root, RecursiveMode::Recursive)
        .map_err(|e| AssetflowError::Watch {
            message: format!("failed to start watching: {e}"),
        })?;

    println!(
        "Watching {} for changes (debounce: {}ms)",
        layout.source_root.display(),
        DEBOUNCE_MS
    );
    println!("Press {} to exit.", "Ctrl+C".cyan());
    println!();

    loop {
        let Some(batch) = rx.recv().await else {
            return Err(AssetflowError::Watch {
                message: "watch channel closed".into(),
            });
        };

        let events = match batch {
            Ok(events) => events,
            Err(e) => {
                print_error(&format!("watch error: {e:?}"));
                continue;
            }
        };

        let relevant = relevant_paths(&events, &source_root, &patterns);
        if relevant.is_empty() {
            continue;
        }

        println!();
        println!("{}", "─".repeat(50).dimmed());
        println!(
            "{}: {} file(s) changed",
            "Change detected".yellow(),
            relevant.len()
        );
        if verbose {
            for path in &relevant {
                println!("  {}", path.display());
            }
        }
        println!();

        // Serialize runs: events that landed mid-run are drained and
        // coalesced into at most one follow-up (latest wins).
        loop {
            run_once(layout, reload, verbose).await;
            reload.publish(ReloadSignal::Full);

            let pending = std::iter::from_fn(|| rx.try_recv().ok()).filter_map(|r| r.ok());
            if !coalesce_pending(pending, &source_root, &patterns) {
                break;
            }
        }
    }
}

/// Run the watch step set; failures are reported, never fatal to the loop
async fn run_once(layout: &ProjectLayout, reload: &ReloadChannel, verbose: bool) {
    let runner = PipelineRunner::watch_set();
    if let Err(e) = runner.execute(layout, Some(reload), verbose).await {
        print_error(&format!("pipeline run failed: {e}"));
    }
}

/// Decide whether event batches drained after a run warrant one follow-up.
///
/// Consumes every pending batch so a burst collapses into a single rerun;
/// returns true when any drained event falls inside the watch set.
fn coalesce_pending<I>(pending: I, source_root: &Path, patterns: &[glob::Pattern]) -> bool
where
    I: IntoIterator<Item = Vec<DebouncedEvent>>,
{
    let mut dirty = false;
    for events in pending {
        if !relevant_paths(&events, source_root, patterns).is_empty() {
            dirty = true;
        }
    }
    dirty
}

fn compile_patterns(patterns: &[String]) -> AssetflowResult<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(Into::into))
        .collect()
}

/// Changed paths that fall inside the watch set, relative to the source root
fn relevant_paths(
    events: &[DebouncedEvent],
    source_root: &Path,
    patterns: &[glob::Pattern],
) -> Vec<PathBuf> {
    events
        .iter()
        .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
        .filter_map(|e| e.path.strip_prefix(source_root).ok())
        .filter(|rel| matches_watch_set(rel, patterns))
        .map(Path::to_path_buf)
        .collect()
}

fn matches_watch_set(rel: &Path, patterns: &[glob::Pattern]) -> bool {
    // Literal separators keep the root globs non-recursive while `**`
    // still crosses directories.
    let options = glob::MatchOptions {
        require_literal_separator: true,
        ..glob::MatchOptions::default()
    };
    patterns.iter().any(|p| p.matches_path_with(rel, options))
}
