//! core::assemble
//!
//! Collects repository metadata into an [`AssignmentMap`].
//!
//! # Steps
//!
//! 1. Resolve the symbol prefix from the last prefix directive, falling back
//!    to [`DEFAULT_PREFIX`](super::types::DEFAULT_PREFIX) when it is absent or
//!    malformed
//! 2. Query the repository for every git field, failing fast
//! 3. Escape the commit messages
//! 4. Resolve the version: directive first, then the `VERSION` file
//! 5. Stamp the build date in UTC
//!
//! Nothing is retried and no partial map is ever returned.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use super::escape::escape;
use super::types::{find_directive, AssignmentMap, Directive, DirectiveKey, Field, SymbolPrefix};
use super::version::version_from_file;
use crate::git::{Git, QueryError};

/// Errors that abort a collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A repository query failed.
    #[error("failed to get {field}")]
    Query {
        /// The field being collected
        field: Field,
        #[source]
        source: QueryError,
    },

    /// The version file exists but could not be read.
    #[error("failed to read version file {path}")]
    VersionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollectionError {
    /// The field or resource that failed, for reporting.
    pub fn subject(&self) -> String {
        match self {
            CollectionError::Query { field, .. } => field.name().to_string(),
            CollectionError::VersionFile { path, .. } => path.display().to_string(),
        }
    }
}

/// Collect metadata for the checkout at `dir`, stamped with the current time.
///
/// # Example
///
/// ```no_run
/// use buildstamp::core::assemble::collect;
/// use buildstamp::core::types::{Directive, DirectiveKey};
/// use std::path::Path;
///
/// let directives = [Directive::new(DirectiveKey::Version, "1.4.0")];
/// let map = collect(Path::new("."), &directives).unwrap();
/// assert_eq!(map.get("main.Version"), Some("1.4.0"));
/// ```
pub fn collect(dir: &Path, directives: &[Directive]) -> Result<AssignmentMap, CollectionError> {
    collect_at(dir, directives, Utc::now())
}

/// Collect metadata for the checkout at `dir` with an explicit build time.
pub fn collect_at(
    dir: &Path,
    directives: &[Directive],
    now: DateTime<Utc>,
) -> Result<AssignmentMap, CollectionError> {
    let prefix = resolve_prefix(directives);
    let git = Git::open(dir);

    let branch = git.branch();
    let commit = query(Field::GitCommit, git.commit())?;
    let commit_full = query(Field::GitCommitFull, git.commit_full())?;
    let commit_msg = query(Field::GitCommitMsg, git.commit_msg())?;
    let commit_msg_full = query(Field::GitCommitMsgFull, git.commit_full_msg())?;
    let state = query(Field::GitState, git.state())?;
    let summary = query(Field::GitSummary, git.summary())?;

    let mut map = AssignmentMap::new(&prefix);
    map.insert(Field::BuildDate, build_date(now));
    map.insert(Field::GitCommit, commit);
    map.insert(Field::GitCommitFull, commit_full);
    map.insert(Field::GitCommitMsg, escape(&commit_msg));
    map.insert(Field::GitCommitMsgFull, escape(&commit_msg_full));
    map.insert(Field::GitBranch, branch);
    map.insert(Field::GitState, state);
    map.insert(Field::GitSummary, summary);

    if let Some(version) = resolve_version(dir, directives)? {
        map.insert(Field::Version, version);
    }

    Ok(map)
}

fn query(field: Field, result: Result<String, QueryError>) -> Result<String, CollectionError> {
    result.map_err(|source| CollectionError::Query { field, source })
}

/// Resolve the symbol prefix from the directives.
///
/// Uses the last prefix directive if it is well-formed, the default otherwise.
pub fn resolve_prefix(directives: &[Directive]) -> SymbolPrefix {
    find_directive(directives, DirectiveKey::Prefix)
        .and_then(|value| SymbolPrefix::new(value).ok())
        .unwrap_or_default()
}

/// Resolve the version: a version directive always wins over the file.
pub fn resolve_version(
    dir: &Path,
    directives: &[Directive],
) -> Result<Option<String>, CollectionError> {
    match find_directive(directives, DirectiveKey::Version) {
        Some(value) => Ok(Some(value.to_string())),
        None => version_from_file(dir),
    }
}

/// Format a build time as RFC 3339 with second precision and a `Z` suffix.
pub fn build_date(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}
