//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all repository queries in
//! buildstamp. Every query is read-only and answers one question about the
//! checkout's HEAD commit or working tree, normalizing the result into a plain
//! string or a typed [`QueryError`].
//!
//! # Error Handling
//!
//! Every fallible query reports which query failed ([`Query`]) and why
//! ([`QueryFailure`]):
//! - [`QueryFailure::NotARepo`]: the directory is not inside a checkout
//! - [`QueryFailure::BareRepo`]: the repository has no working tree
//! - [`QueryFailure::NoCommit`]: HEAD does not point at a commit yet
//! - [`QueryFailure::Internal`]: any other git2 failure
//!
//! Opening a directory never fails. An invalid checkout is remembered and
//! reported by each fallible query, while [`Git::branch`] falls back to
//! [`DETACHED_BRANCH`].
//!
//! # Example
//!
//! ```ignore
//! use buildstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."));
//! println!("{} at {}", git.branch(), git.commit()?);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Branch name reported when HEAD is detached or the directory is not a
/// checkout.
pub const DETACHED_BRANCH: &str = "HEAD";

/// Suffix appended to the summary when tracked files have changes.
const DIRTY_SUFFIX: &str = "-dirty";

/// A fallible repository query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Abbreviated HEAD commit id.
    Commit,
    /// Full HEAD commit id.
    CommitFull,
    /// HEAD commit subject line.
    CommitMsg,
    /// Complete HEAD commit message.
    CommitFullMsg,
    /// Working tree and upstream state.
    State,
    /// Tag-based descriptive label.
    Summary,
}

impl Query {
    /// Get the query's display name.
    ///
    /// # Example
    ///
    /// ```
    /// use buildstamp::git::Query;
    ///
    /// assert_eq!(Query::CommitFull.name(), "full commit");
    /// assert_eq!(Query::Summary.name(), "repository summary");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Query::Commit => "commit",
            Query::CommitFull => "full commit",
            Query::CommitMsg => "commit message",
            Query::CommitFullMsg => "full commit message",
            Query::State => "repository state",
            Query::Summary => "repository summary",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a repository query could not be answered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryFailure {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository has no checkout")]
    BareRepo,

    /// HEAD is unborn (no commits yet).
    #[error("HEAD does not point at a commit")]
    NoCommit,

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for QueryFailure {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound => QueryFailure::NoCommit,
            _ => QueryFailure::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

/// A single repository query that could not be satisfied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{query} query failed")]
pub struct QueryError {
    /// The query that failed
    pub query: Query,
    /// Why it failed
    #[source]
    pub reason: QueryFailure,
}

impl QueryError {
    fn new(query: Query, reason: impl Into<QueryFailure>) -> Self {
        Self {
            query,
            reason: reason.into(),
        }
    }
}

/// How the current branch relates to its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    /// Local commits not on the upstream.
    Ahead,
    /// Upstream commits not on the local branch.
    Behind,
    /// Both sides have commits the other lacks.
    Diverged,
}

impl Divergence {
    /// Classify ahead/behind commit counts.
    ///
    /// Returns `None` when the branch and its upstream point at the same
    /// history.
    ///
    /// # Example
    ///
    /// ```
    /// use buildstamp::git::Divergence;
    ///
    /// assert_eq!(Divergence::from_counts(0, 0), None);
    /// assert_eq!(Divergence::from_counts(2, 0), Some(Divergence::Ahead));
    /// assert_eq!(Divergence::from_counts(1, 3), Some(Divergence::Diverged));
    /// ```
    pub fn from_counts(ahead: usize, behind: usize) -> Option<Self> {
        match (ahead > 0, behind > 0) {
            (false, false) => None,
            (true, false) => Some(Divergence::Ahead),
            (false, true) => Some(Divergence::Behind),
            (true, true) => Some(Divergence::Diverged),
        }
    }

    /// Token used in the state string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Divergence::Ahead => "ahead",
            Divergence::Behind => "behind",
            Divergence::Diverged => "diverged",
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Number of staged changes
    pub staged: usize,
    /// Number of unstaged changes to tracked files
    pub unstaged: usize,
    /// Number of untracked files
    pub untracked: usize,
    /// Whether there are unresolved conflicts
    pub has_conflicts: bool,
}

impl WorktreeStatus {
    /// Check if the worktree is completely clean.
    ///
    /// Untracked (non-ignored) files count as changes, matching what
    /// `git status --porcelain` reports.
    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.unstaged == 0 && self.untracked == 0 && !self.has_conflicts
    }

    /// Token used in the state string.
    pub fn token(&self) -> &'static str {
        if self.is_clean() {
            "clean"
        } else {
            "dirty"
        }
    }
}

/// The Git interface.
///
/// Answers read-only queries about one checkout. The repository is discovered
/// once, from the directory passed to [`Git::open`] upwards, and the handle is
/// held for the lifetime of the value.
pub struct Git {
    /// The directory the checkout was opened from
    path: PathBuf,
    /// The underlying git2 repository, or why it could not be opened
    repo: Result<git2::Repository, QueryFailure>,
}

impl fmt::Debug for Git {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.path)
            .field("checkout", &self.repo.is_ok())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening
    // =========================================================================

    /// Open the checkout containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the checkout. Never fails: if no usable checkout is found, the
    /// failure is reported by every fallible query instead.
    pub fn open(path: &Path) -> Self {
        let repo = match git2::Repository::discover(path) {
            Ok(repo) if repo.is_bare() => Err(QueryFailure::BareRepo),
            Ok(repo) => Ok(repo),
            Err(_) => Err(QueryFailure::NotARepo {
                path: path.to_path_buf(),
            }),
        };

        Self {
            path: path.to_path_buf(),
            repo,
        }
    }

    /// The directory this interface was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a usable checkout was found.
    pub fn is_checkout(&self) -> bool {
        self.repo.is_ok()
    }

    fn repo(&self, query: Query) -> Result<&git2::Repository, QueryError> {
        self.repo
            .as_ref()
            .map_err(|reason| QueryError::new(query, reason.clone()))
    }

    fn head_commit(&self, query: Query) -> Result<git2::Commit<'_>, QueryError> {
        let repo = self.repo(query)?;
        let head = repo.head().map_err(|e| QueryError::new(query, e))?;
        head.peel_to_commit().map_err(|e| QueryError::new(query, e))
    }

    // =========================================================================
    // Branch
    // =========================================================================

    /// Get the current branch name.
    ///
    /// Returns [`DETACHED_BRANCH`] if HEAD is detached or the directory is not
    /// a checkout. An unborn branch (no commits yet) still reports its name.
    pub fn branch(&self) -> String {
        let Ok(repo) = &self.repo else {
            return DETACHED_BRANCH.to_string();
        };

        match repo.find_reference("HEAD") {
            Ok(head) => head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_owned)
                .unwrap_or_else(|| DETACHED_BRANCH.to_string()),
            Err(_) => DETACHED_BRANCH.to_string(),
        }
    }

    // =========================================================================
    // Commit Information
    // =========================================================================

    /// Get the shortest unique abbreviation of the HEAD commit id.
    ///
    /// # Errors
    ///
    /// - [`QueryFailure::NoCommit`] if HEAD is unborn
    /// - [`QueryFailure::NotARepo`] if the directory is not a checkout
    pub fn commit(&self) -> Result<String, QueryError> {
        let commit = self.head_commit(Query::Commit)?;
        let short = commit
            .as_object()
            .short_id()
            .map_err(|e| QueryError::new(Query::Commit, e))?;

        short.as_str().map(str::to_owned).ok_or_else(|| {
            QueryError::new(
                Query::Commit,
                QueryFailure::Internal {
                    message: "abbreviated id is not valid UTF-8".to_string(),
                },
            )
        })
    }

    /// Get the full hex id of the HEAD commit.
    pub fn commit_full(&self) -> Result<String, QueryError> {
        let commit = self.head_commit(Query::CommitFull)?;
        Ok(commit.id().to_string())
    }

    /// Get the subject line of the HEAD commit message.
    ///
    /// The subject is the first paragraph of the message with its lines joined
    /// by spaces, the same text `git log --pretty=%s` shows.
    pub fn commit_msg(&self) -> Result<String, QueryError> {
        let commit = self.head_commit(Query::CommitMsg)?;
        let subject = commit
            .summary_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();
        Ok(subject)
    }

    /// Get the complete HEAD commit message, trimmed.
    pub fn commit_full_msg(&self) -> Result<String, QueryError> {
        let commit = self.head_commit(Query::CommitFullMsg)?;
        let message = String::from_utf8_lossy(commit.message_bytes()).trim().to_string();
        Ok(message)
    }

    // =========================================================================
    // State Detection
    // =========================================================================

    /// Get working tree status summary.
    ///
    /// Untracked files are counted; ignored files are not.
    pub fn worktree_status(&self) -> Result<WorktreeStatus, QueryError> {
        let repo = self.repo(Query::State)?;

        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);

        let statuses = repo
            .statuses(Some(&mut opts))
            .map_err(|e| QueryError::new(Query::State, e))?;

        let mut result = WorktreeStatus::default();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_conflicted() {
                result.has_conflicts = true;
            }

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                result.staged += 1;
            }

            if status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                result.unstaged += 1;
            }

            if status.is_wt_new() {
                result.untracked += 1;
            }
        }

        Ok(result)
    }

    /// Compare the current branch with its upstream tracking branch.
    ///
    /// Returns `None` when HEAD is detached, the branch has no upstream, or
    /// the two point at the same history.
    pub fn divergence(&self) -> Result<Option<Divergence>, QueryError> {
        let repo = self.repo(Query::State)?;
        let head = repo.head().map_err(|e| QueryError::new(Query::State, e))?;

        if !head.is_branch() {
            return Ok(None);
        }
        let (Some(name), Some(local)) = (head.shorthand(), head.target()) else {
            return Ok(None);
        };

        let branch = match repo.find_branch(name, git2::BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(QueryError::new(Query::State, e)),
        };

        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(QueryError::new(Query::State, e)),
        };

        let Some(remote) = upstream.get().target() else {
            return Ok(None);
        };

        let (ahead, behind) = repo
            .graph_ahead_behind(local, remote)
            .map_err(|e| QueryError::new(Query::State, e))?;

        Ok(Divergence::from_counts(ahead, behind))
    }

    /// Get the repository state token.
    ///
    /// The token is `clean` or `dirty`, followed by `+ahead`, `+behind` or
    /// `+diverged` when the current branch differs from its upstream.
    ///
    /// # Errors
    ///
    /// - [`QueryFailure::NoCommit`] if HEAD is unborn
    pub fn state(&self) -> Result<String, QueryError> {
        self.head_commit(Query::State)?;

        let mut token = self.worktree_status()?.token().to_string();
        if let Some(divergence) = self.divergence()? {
            token.push('+');
            token.push_str(divergence.as_str());
        }

        Ok(token)
    }

    // =========================================================================
    // Summary
    // =========================================================================

    /// Describe HEAD relative to the nearest reachable tag.
    ///
    /// Produces `v1.2.0` on a tagged commit, `v1.2.0-3-gabc1234` three commits
    /// later, and the abbreviated commit id when no tag is reachable. Each form
    /// gets a `-dirty` suffix when tracked files have changes.
    ///
    /// # Errors
    ///
    /// - [`QueryFailure::NoCommit`] if HEAD is unborn
    /// - [`QueryFailure::NotARepo`] if the directory is not a checkout
    pub fn summary(&self) -> Result<String, QueryError> {
        let repo = self.repo(Query::Summary)?;
        self.head_commit(Query::Summary)?;

        let mut opts = git2::DescribeOptions::new();
        opts.describe_tags().show_commit_oid_as_fallback(true);

        let describe = repo
            .describe(&opts)
            .map_err(|e| QueryError::new(Query::Summary, e))?;

        let mut format = git2::DescribeFormatOptions::new();
        format.dirty_suffix(DIRTY_SUFFIX);

        describe
            .format(Some(&format))
            .map_err(|e| QueryError::new(Query::Summary, e))
    }
}
