//! core
//!
//! Core domain types and the metadata assembler.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Directive, SymbolPrefix, Field, AssignmentMap
//! - [`assemble`] - Collects repository metadata into an assignment map
//! - [`escape`] - Escaping of free-text values for command lines
//! - [`version`] - `VERSION` file fallback
//! - [`render`] - Output formats for the injection mechanism
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Collection is fail-fast; expected absences are not errors
//! - Every invocation recomputes everything from the checkout

pub mod assemble;
pub mod config;
pub mod escape;
pub mod render;
pub mod types;
pub mod version;
