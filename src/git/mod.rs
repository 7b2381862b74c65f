//! git
//!
//! Single interface for all Git queries.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. No other module should import `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD commit id and message queries
//! - Working tree status and upstream divergence
//! - Tag-based description of HEAD
//!
//! # Invariants
//!
//! - Every query is read-only
//! - [`Git::branch`] never fails; every other query reports a [`QueryError`]
//!   naming itself
//!
//! # Example
//!
//! ```ignore
//! use buildstamp::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."));
//! let commit = git.commit()?;
//! let state = git.state()?;
//! ```

mod interface;

pub use interface::{
    Divergence, Git, Query, QueryError, QueryFailure, WorktreeStatus, DETACHED_BRANCH,
};
