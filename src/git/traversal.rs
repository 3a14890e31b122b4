use super::{CommitRecord, ObjectSource, StoredObject};
use crate::error::{Result, StatsError};
use indicatif::ProgressBar;
use std::ops::ControlFlow;
use tokio::sync::mpsc::Sender;
use tracing::debug;

/// Traversal stage. Publishes every commit object the source yields and
/// returns how many were published.
///
/// Must run on a blocking thread: publishing suspends the thread while the
/// channel is full. The sender is consumed, so the channel closes exactly
/// once when this returns, whether enumeration succeeded or not.
pub fn traverse<S: ObjectSource>(
    source: S,
    sender: Sender<CommitRecord>,
    progress: &ProgressBar,
) -> Result<usize> {
    let mut published = 0usize;
    let mut skipped = 0usize;
    let mut receiver_gone = false;

    let walked = source.for_each_object(&mut |object: StoredObject| match object {
        StoredObject::Commit(record) => {
            if sender.blocking_send(record).is_err() {
                receiver_gone = true;
                return ControlFlow::Break(());
            }
            published += 1;
            progress.inc(1);
            ControlFlow::Continue(())
        }
        StoredObject::Undecodable { id, reason } => {
            debug!("Skipping undecodable commit {}: {}", id, reason);
            skipped += 1;
            ControlFlow::Continue(())
        }
        StoredObject::Tree | StoredObject::Blob | StoredObject::Tag => ControlFlow::Continue(()),
    });

    drop(sender);

    walked?;

    if receiver_gone {
        return Err(StatsError::StageFailed(
            "aggregation stage stopped receiving commits".to_string(),
        ));
    }

    debug!(
        "Traversal finished: {} commits published, {} skipped",
        published, skipped
    );

    Ok(published)
}
