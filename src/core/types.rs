//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Directive`] / [`DirectiveKey`] - Caller-supplied overrides
//! - [`SymbolPrefix`] - Validated namespace for injected symbols
//! - [`Field`] - The fixed set of metadata field names
//! - [`AssignmentMap`] - Fully-qualified key to value output
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use buildstamp::core::types::{Field, SymbolPrefix};
//!
//! let prefix = SymbolPrefix::new("github.com/acme/tool/version").unwrap();
//! assert_eq!(prefix.key(Field::GitCommit), "github.com/acme/tool/version.GitCommit");
//!
//! assert!(SymbolPrefix::new("has space").is_err());
//! assert!(SymbolPrefix::new("").is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Symbol prefix used when no override is given.
pub const DEFAULT_PREFIX: &str = "main";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid symbol prefix: {0}")]
    InvalidPrefix(String),

    #[error("invalid directive: {0}")]
    InvalidDirective(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

// =============================================================================
// Directives
// =============================================================================

/// The directive keys the assembler recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKey {
    /// Overrides the symbol prefix.
    Prefix,
    /// Overrides the version, skipping the version file.
    Version,
}

impl DirectiveKey {
    /// Look up a key by its textual name.
    ///
    /// `pkg` and `prefix` both name [`DirectiveKey::Prefix`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pkg" | "prefix" => Some(DirectiveKey::Prefix),
            "version" => Some(DirectiveKey::Version),
            _ => None,
        }
    }

    /// Canonical name of the key.
    pub fn name(&self) -> &'static str {
        match self {
            DirectiveKey::Prefix => "prefix",
            DirectiveKey::Version => "version",
        }
    }
}

impl fmt::Display for DirectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single caller-supplied override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: DirectiveKey,
    pub value: String,
}

impl Directive {
    pub fn new(key: DirectiveKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Parse `name=value` text.
    ///
    /// Returns `Ok(None)` for a well-formed directive whose name is not
    /// recognized; those are left to other layers.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDirective` if the text has no `=` or an
    /// empty name.
    ///
    /// # Example
    ///
    /// ```
    /// use buildstamp::core::types::{Directive, DirectiveKey};
    ///
    /// let d = Directive::parse("version=1.0.0").unwrap().unwrap();
    /// assert_eq!(d, Directive::new(DirectiveKey::Version, "1.0.0"));
    ///
    /// assert_eq!(Directive::parse("ldflags=-s").unwrap(), None);
    /// assert!(Directive::parse("version").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Option<Self>, TypeError> {
        let (name, value) = text.split_once('=').ok_or_else(|| {
            TypeError::InvalidDirective(format!("expected name=value, got '{text}'"))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(TypeError::InvalidDirective(format!(
                "missing name in '{text}'"
            )));
        }

        Ok(DirectiveKey::from_name(name).map(|key| Self::new(key, value)))
    }
}

/// Find the value of the last directive with the given key.
pub fn find_directive(directives: &[Directive], key: DirectiveKey) -> Option<&str> {
    directives
        .iter()
        .rev()
        .find(|d| d.key == key)
        .map(|d| d.value.as_str())
}

// =============================================================================
// Symbol Prefix
// =============================================================================

/// A validated symbol prefix.
///
/// Prefixes name the package or module the symbols are injected into, such
/// as `main` or `github.com/acme/tool/version`. A prefix must:
/// - Not be empty
/// - Not contain whitespace, control characters, `=`, `'` or `"`
/// - Not start or end with `.`, or contain `..`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPrefix(String);

impl SymbolPrefix {
    /// Create a new validated prefix.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPrefix` if the prefix is malformed.
    pub fn new(prefix: impl Into<String>) -> Result<Self, TypeError> {
        let prefix = prefix.into();
        Self::validate(&prefix)?;
        Ok(Self(prefix))
    }

    fn validate(prefix: &str) -> Result<(), TypeError> {
        if prefix.is_empty() {
            return Err(TypeError::InvalidPrefix("prefix cannot be empty".into()));
        }

        if let Some(c) = prefix
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '=' | '\'' | '"'))
        {
            return Err(TypeError::InvalidPrefix(format!(
                "prefix cannot contain {c:?}"
            )));
        }

        if prefix.starts_with('.') || prefix.ends_with('.') {
            return Err(TypeError::InvalidPrefix(
                "prefix cannot start or end with '.'".into(),
            ));
        }
        if prefix.contains("..") {
            return Err(TypeError::InvalidPrefix(
                "prefix cannot contain '..'".into(),
            ));
        }

        Ok(())
    }

    /// Get the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the fully-qualified key for a field.
    pub fn key(&self, field: Field) -> String {
        format!("{}.{}", self.0, field.name())
    }
}

impl Default for SymbolPrefix {
    fn default() -> Self {
        Self(DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Display for SymbolPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SymbolPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Fields
// =============================================================================

/// A metadata field injected into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    BuildDate,
    GitCommit,
    GitCommitFull,
    GitCommitMsg,
    GitCommitMsgFull,
    GitBranch,
    GitState,
    GitSummary,
    Version,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 9] = [
        Field::BuildDate,
        Field::GitCommit,
        Field::GitCommitFull,
        Field::GitCommitMsg,
        Field::GitCommitMsgFull,
        Field::GitBranch,
        Field::GitState,
        Field::GitSummary,
        Field::Version,
    ];

    /// The symbol name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::BuildDate => "BuildDate",
            Field::GitCommit => "GitCommit",
            Field::GitCommitFull => "GitCommitFull",
            Field::GitCommitMsg => "GitCommitMsg",
            Field::GitCommitMsgFull => "GitCommitMsgFull",
            Field::GitBranch => "GitBranch",
            Field::GitState => "GitState",
            Field::GitSummary => "GitSummary",
            Field::Version => "Version",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = TypeError;

    /// Parse a field name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Assignment Map
// =============================================================================

/// The collected assignments: fully-qualified key to string value.
///
/// Every key is the map's prefix, a `.`, and one [`Field`] name. Entries are
/// kept sorted by key so rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMap {
    prefix: String,
    entries: BTreeMap<String, String>,
}

impl AssignmentMap {
    /// Create an empty map for a prefix.
    pub fn new(prefix: &SymbolPrefix) -> Self {
        Self {
            prefix: prefix.as_str().to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// The prefix every key starts with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Set a field's value.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        let key = format!("{}.{}", self.prefix, field.name());
        self.entries.insert(key, value.into());
    }

    /// Look up a value by fully-qualified key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a value by field.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(&format!("{}.{}", self.prefix, field.name()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The underlying sorted entries.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod directive {
        use super::*;

        #[test]
        fn parses_known_names() {
            assert_eq!(
                Directive::parse("pkg=main").unwrap(),
                Some(Directive::new(DirectiveKey::Prefix, "main"))
            );
            assert_eq!(
                Directive::parse("prefix=buildinfo").unwrap(),
                Some(Directive::new(DirectiveKey::Prefix, "buildinfo"))
            );
            assert_eq!(
                Directive::parse("version=2.0.0-rc.1").unwrap(),
                Some(Directive::new(DirectiveKey::Version, "2.0.0-rc.1"))
            );
        }

        #[test]
        fn value_may_contain_equals() {
            let d = Directive::parse("version=a=b").unwrap().unwrap();
            assert_eq!(d.value, "a=b");
        }

        #[test]
        fn unknown_names_are_ignored() {
            assert_eq!(Directive::parse("tags=netgo").unwrap(), None);
        }

        #[test]
        fn malformed_text_fails() {
            assert!(Directive::parse("version").is_err());
            assert!(Directive::parse("=1.0").is_err());
        }

        #[test]
        fn last_directive_wins() {
            let directives = vec![
                Directive::new(DirectiveKey::Version, "1.0.0"),
                Directive::new(DirectiveKey::Prefix, "main"),
                Directive::new(DirectiveKey::Version, "2.0.0"),
            ];
            assert_eq!(
                find_directive(&directives, DirectiveKey::Version),
                Some("2.0.0")
            );
            assert_eq!(find_directive(&directives, DirectiveKey::Prefix), Some("main"));
            assert_eq!(find_directive(&[], DirectiveKey::Prefix), None);
        }
    }

    mod symbol_prefix {
        use super::*;

        #[test]
        fn default_is_main() {
            assert_eq!(SymbolPrefix::default().as_str(), DEFAULT_PREFIX);
        }

        #[test]
        fn accepts_package_paths() {
            assert!(SymbolPrefix::new("main").is_ok());
            assert!(SymbolPrefix::new("github.com/acme/tool/version").is_ok());
            assert!(SymbolPrefix::new("crate::build_info").is_ok());
        }

        #[test]
        fn rejects_malformed() {
            assert!(SymbolPrefix::new("").is_err());
            assert!(SymbolPrefix::new("two words").is_err());
            assert!(SymbolPrefix::new("a=b").is_err());
            assert!(SymbolPrefix::new("it's").is_err());
            assert!(SymbolPrefix::new(".main").is_err());
            assert!(SymbolPrefix::new("main.").is_err());
            assert!(SymbolPrefix::new("a..b").is_err());
            assert!(SymbolPrefix::new("tab\there").is_err());
        }

        #[test]
        fn builds_keys() {
            let prefix = SymbolPrefix::new("buildinfo").unwrap();
            assert_eq!(prefix.key(Field::GitState), "buildinfo.GitState");
        }
    }

    mod field {
        use super::*;

        #[test]
        fn names_round_trip() {
            for field in Field::ALL {
                assert_eq!(field.name().parse::<Field>().unwrap(), field);
            }
        }

        #[test]
        fn parse_ignores_case() {
            assert_eq!("gitcommit".parse::<Field>().unwrap(), Field::GitCommit);
            assert_eq!("VERSION".parse::<Field>().unwrap(), Field::Version);
        }

        #[test]
        fn parse_unknown_fails() {
            assert_eq!(
                "GitAuthor".parse::<Field>(),
                Err(TypeError::UnknownField("GitAuthor".to_string()))
            );
        }
    }

    mod assignment_map {
        use super::*;

        #[test]
        fn keys_are_prefixed() {
            let mut map = AssignmentMap::new(&SymbolPrefix::default());
            map.insert(Field::GitBranch, "main");
            map.insert(Field::GitCommit, "abc1234");

            assert_eq!(map.get("main.GitBranch"), Some("main"));
            assert_eq!(map.field(Field::GitCommit), Some("abc1234"));
            assert_eq!(map.field(Field::Version), None);
            assert_eq!(map.len(), 2);
        }

        #[test]
        fn iterates_in_key_order() {
            let mut map = AssignmentMap::new(&SymbolPrefix::default());
            map.insert(Field::GitSummary, "v1");
            map.insert(Field::BuildDate, "2024-01-15T10:30:00Z");

            let keys: Vec<_> = map.keys().collect();
            assert_eq!(keys, vec!["main.BuildDate", "main.GitSummary"]);
        }

        #[test]
        fn insert_replaces() {
            let mut map = AssignmentMap::new(&SymbolPrefix::default());
            map.insert(Field::Version, "1.0.0");
            map.insert(Field::Version, "2.0.0");
            assert_eq!(map.len(), 1);
            assert_eq!(map.field(Field::Version), Some("2.0.0"));
        }
    }
}
