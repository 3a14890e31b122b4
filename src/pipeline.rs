use crate::error::{Result, StatsError};
use crate::git::{traverse, ObjectSource};
use crate::stats::{aggregate, AuthorStat};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub channel_capacity: usize,
    pub show_progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            channel_capacity: 1000,
            show_progress: false,
        }
    }
}

/// Runs traversal and aggregation concurrently over one bounded channel and
/// returns the per-author statistics.
///
/// On an enumeration failure the aggregated result is discarded, so callers
/// never see partial statistics.
pub async fn run<S: ObjectSource>(source: S, options: &PipelineOptions) -> Result<Vec<AuthorStat>> {
    let (commit_tx, commit_rx) = mpsc::channel(options.channel_capacity.max(1));
    let (result_tx, result_rx) = oneshot::channel();

    let progress = progress_bar(options.show_progress);

    info!("Starting object database traversal...");

    let traversal = {
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || traverse(source, commit_tx, &progress))
    };
    let aggregation = tokio::spawn(aggregate(commit_rx, result_tx));

    let stats = result_rx
        .await
        .map_err(|_| StatsError::StageFailed("aggregation stage exited without a result".into()))?;
    aggregation
        .await
        .map_err(|e| StatsError::StageFailed(format!("aggregation stage: {e}")))?;

    let traversed = traversal
        .await
        .map_err(|e| StatsError::StageFailed(format!("traversal stage: {e}")))?;

    let published = match traversed {
        Ok(published) => published,
        Err(e) => {
            progress.abandon_with_message("Traversal failed");
            return Err(e);
        }
    };

    progress.finish_with_message("done");

    let counted: usize = stats.iter().map(|s| s.commit_count).sum();
    debug!("{} commits published, {} aggregated", published, counted);
    debug_assert_eq!(counted, published);

    info!(
        "Pipeline complete: {} commits from {} authors",
        published,
        stats.len()
    );

    Ok(stats)
}

fn progress_bar(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} commits {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
