use crate::git::{CommitRecord, User};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

pub mod ranking;

pub use ranking::{sort_stats, SortOrder};

const INITIAL_AUTHOR_CAPACITY: usize = 1000;

/// Running statistic for one author email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorStat {
    pub user: User,
    pub commit_count: usize,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    /// Always `last_seen - first_seen`.
    pub span: Duration,
}

impl AuthorStat {
    fn new(user: User, at: DateTime<Utc>) -> Self {
        Self {
            user,
            commit_count: 1,
            first_seen: at,
            last_seen: at,
            span: Duration::zero(),
        }
    }

    /// Only a new minimum or a new maximum moves a bound, and the minimum is
    /// checked first. Timestamps inside the current window leave both alone.
    fn record(&mut self, at: DateTime<Utc>) {
        self.commit_count += 1;
        if at < self.first_seen {
            self.first_seen = at;
        } else if at > self.last_seen {
            self.last_seen = at;
        }
        self.span = self.last_seen - self.first_seen;
    }
}

/// Folds commit records into per-author statistics keyed by exact email.
#[derive(Debug)]
pub struct Aggregator {
    by_email: HashMap<String, AuthorStat>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            by_email: HashMap::with_capacity(INITIAL_AUTHOR_CAPACITY),
        }
    }

    pub fn add(&mut self, commit: CommitRecord) {
        let at = commit.authored_at;
        match self.by_email.get_mut(&commit.author.email) {
            Some(stat) => stat.record(at),
            None => {
                let email = commit.author.email.clone();
                self.by_email.insert(email, AuthorStat::new(commit.author, at));
            }
        }
    }

    pub fn author_count(&self) -> usize {
        self.by_email.len()
    }

    pub fn finish(self) -> Vec<AuthorStat> {
        self.by_email.into_values().collect()
    }
}

/// Aggregation stage. Consumes records until the channel closes, then hands
/// the collection to `result` exactly once.
pub async fn aggregate(
    mut commits: mpsc::Receiver<CommitRecord>,
    result: oneshot::Sender<Vec<AuthorStat>>,
) {
    let mut aggregator = Aggregator::new();

    while let Some(commit) = commits.recv().await {
        aggregator.add(commit);
    }

    info!("Aggregated commits from {} authors", aggregator.author_count());

    // The caller only drops the receiver if it has already given up.
    let _ = result.send(aggregator.finish());
}
