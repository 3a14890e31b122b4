use chrono::{DateTime, Utc};

pub mod store;
pub mod traversal;

pub use store::{GitObjectStore, ObjectSource, StoredObject};
pub use traversal::traverse;

/// Identity as recorded in a commit signature. Aggregation keys on `email`
/// only, compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One commit object decoded from the object database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub author: User,
    pub authored_at: DateTime<Utc>,
    pub committer: User,
    pub committed_at: DateTime<Utc>,
    pub message: String,
}
