//! buildstamp - Build-time version metadata from a git checkout
//!
//! buildstamp reads the current state of a checkout (commit, branch, tag
//! summary, cleanliness, commit message) plus an optional version, and renders
//! it as fully-qualified symbol assignments such as
//! `-X 'main.GitCommit=abc1234'` so a binary can report exactly which source
//! produced it.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, renders output)
//! - [`core`] - Domain types, the metadata assembler, rendering, config
//! - [`git`] - Single interface for all Git queries
//! - [`ui`] - Output utilities
//!
//! # Invariants
//!
//! 1. Every key is exactly one symbol prefix, a `.`, and one field name
//! 2. A failed query aborts the whole collection; no partial map is returned
//! 3. A missing tag, missing `VERSION` file, or detached HEAD is never an error
//! 4. The checkout is never modified

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
