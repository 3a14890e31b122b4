use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Failed to open repository at {}: {source}", path.display())]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    #[error("Object database enumeration failed: {0}")]
    Enumeration(#[from] git2::Error),
    #[error("Pipeline stage failed: {0}")]
    StageFailed(String),
}
