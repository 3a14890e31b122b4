use super::{CommitRecord, User};
use crate::error::{Result, StatsError};
use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, ObjectType, Oid, Repository};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, info};

/// An object from the repository's object database, classified by type.
/// Only commits are decoded; other kinds carry no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredObject {
    Commit(CommitRecord),
    Tree,
    Blob,
    Tag,
    /// A commit-typed object that could not be decoded.
    Undecodable { id: String, reason: String },
}

/// Enumerates every object in a repository's object database.
///
/// Order is whatever the storage yields, and each object id is visited at
/// most once even when several backends hold a copy. The visitor can stop
/// the enumeration early by returning `ControlFlow::Break`, which is not an
/// error.
pub trait ObjectSource: Send + 'static {
    fn for_each_object(
        &self,
        visit: &mut dyn FnMut(StoredObject) -> ControlFlow<()>,
    ) -> Result<()>;
}

/// libgit2-backed object source.
pub struct GitObjectStore {
    repo: Repository,
}

impl GitObjectStore {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|source| StatsError::RepositoryOpen {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Opened Git repository at {}", path.display());

        Ok(Self { repo })
    }

    fn load(&self, oid: Oid, kind: ObjectType) -> StoredObject {
        match kind {
            ObjectType::Commit => self.decode_commit(oid),
            ObjectType::Tree => StoredObject::Tree,
            ObjectType::Blob => StoredObject::Blob,
            ObjectType::Tag => StoredObject::Tag,
            ObjectType::Any => StoredObject::Undecodable {
                id: oid.to_string(),
                reason: "object database reported no concrete type".to_string(),
            },
        }
    }

    fn decode_commit(&self, oid: Oid) -> StoredObject {
        let commit = match self.repo.find_commit(oid) {
            Ok(commit) => commit,
            Err(e) => {
                return StoredObject::Undecodable {
                    id: oid.to_string(),
                    reason: e.message().to_string(),
                }
            }
        };

        let author = commit.author();
        let committer = commit.committer();

        let (Some(authored_at), Some(committed_at)) = (
            to_utc(author.when().seconds()),
            to_utc(committer.when().seconds()),
        ) else {
            return StoredObject::Undecodable {
                id: oid.to_string(),
                reason: "signature timestamp out of range".to_string(),
            };
        };

        StoredObject::Commit(CommitRecord {
            id: commit.id().to_string(),
            author: User::new(
                String::from_utf8_lossy(author.name_bytes()),
                String::from_utf8_lossy(author.email_bytes()),
            ),
            authored_at,
            committer: User::new(
                String::from_utf8_lossy(committer.name_bytes()),
                String::from_utf8_lossy(committer.email_bytes()),
            ),
            committed_at,
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        })
    }
}

impl ObjectSource for GitObjectStore {
    fn for_each_object(
        &self,
        visit: &mut dyn FnMut(StoredObject) -> ControlFlow<()>,
    ) -> Result<()> {
        let odb = self.repo.odb()?;

        let mut failure: Option<git2::Error> = None;
        let mut stopped = false;
        let mut seen: HashSet<Oid> = HashSet::new();
        let mut duplicates = 0usize;

        // Loose and packed copies, or overlapping packs, report the same oid
        // once per backend.
        let walked = odb.foreach(|oid| {
            if !seen.insert(*oid) {
                duplicates += 1;
                return true;
            }

            let kind = match odb.read_header(*oid) {
                Ok((_, kind)) => kind,
                Err(e) => {
                    failure = Some(e);
                    return false;
                }
            };

            match visit(self.load(*oid, kind)) {
                ControlFlow::Continue(()) => true,
                ControlFlow::Break(()) => {
                    stopped = true;
                    false
                }
            }
        });

        if let Some(e) = failure {
            return Err(StatsError::Enumeration(e));
        }

        if duplicates > 0 {
            debug!("Skipped {} duplicate object copies", duplicates);
        }

        match walked {
            Ok(()) => Ok(()),
            Err(e) if stopped && e.code() == ErrorCode::User => {
                debug!("Object enumeration stopped by visitor");
                Ok(())
            }
            Err(e) => Err(StatsError::Enumeration(e)),
        }
    }
}

/// Signature seconds are already relative to the Unix epoch; the recorded
/// offset only affects local display, so it is dropped.
fn to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}
