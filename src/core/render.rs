//! core::render
//!
//! Rendering of an [`AssignmentMap`] for a build-time injection mechanism.
//!
//! # Formats
//!
//! - [`Format::LdFlags`]: `-X 'main.GitCommit=abc1234' -X ...` for a linker
//! - [`Format::Cargo`]: `cargo:rustc-env=MAIN_GIT_COMMIT=abc1234` lines for a
//!   build script
//! - [`Format::Env`]: `MAIN_GIT_COMMIT=abc1234` lines
//! - [`Format::Json`]: a JSON object of key to value
//!
//! The line-oriented formats cannot carry raw newlines, so multi-line values
//! (the full commit message) have their newlines written as `\n`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{AssignmentMap, TypeError};

/// Output format for collected assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    LdFlags,
    Cargo,
    Env,
    Json,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::LdFlags, Format::Cargo, Format::Env, Format::Json];

    pub fn name(&self) -> &'static str {
        match self {
            Format::LdFlags => "ldflags",
            Format::Cargo => "cargo",
            Format::Env => "env",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownFormat(s.to_string()))
    }
}

/// Render the assignments in the given format.
///
/// # Errors
///
/// Only [`Format::Json`] can fail, if serialization fails.
pub fn render(map: &AssignmentMap, format: Format) -> Result<String, serde_json::Error> {
    let rendered = match format {
        Format::LdFlags => map
            .iter()
            .map(|(key, value)| format!("-X '{key}={value}'"))
            .collect::<Vec<_>>()
            .join(" "),
        Format::Cargo => map
            .iter()
            .map(|(key, value)| {
                format!("cargo:rustc-env={}={}", env_name(key), single_line(value))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Env => map
            .iter()
            .map(|(key, value)| format!("{}={}", env_name(key), single_line(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Json => serde_json::to_string_pretty(map.entries())?,
    };

    Ok(rendered)
}

/// Turn a fully-qualified key into an environment variable name.
///
/// CamelCase words are split with `_`, every other non-alphanumeric character
/// becomes `_`, and the result is upper-cased.
///
/// # Example
///
/// ```
/// use buildstamp::core::render::env_name;
///
/// assert_eq!(env_name("main.GitCommitMsgFull"), "MAIN_GIT_COMMIT_MSG_FULL");
/// assert_eq!(env_name("github.com/acme/v.BuildDate"), "GITHUB_COM_ACME_V_BUILD_DATE");
/// ```
pub fn env_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            let boundary = c.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            if boundary {
                name.push('_');
            }
            name.push(c.to_ascii_uppercase());
        } else if !name.ends_with('_') {
            name.push('_');
        }
        prev = Some(c);
    }

    name
}

fn single_line(value: &str) -> String {
    value.replace("\r\n", "\\n").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Field, SymbolPrefix};

    fn sample() -> AssignmentMap {
        let mut map = AssignmentMap::new(&SymbolPrefix::default());
        map.insert(Field::GitCommit, "abc1234");
        map.insert(Field::GitCommitMsgFull, "Subject\n\nBody");
        map.insert(Field::GitBranch, "main");
        map
    }

    mod format {
        use super::*;

        #[test]
        fn parse_names() {
            for format in Format::ALL {
                assert_eq!(format.name().parse::<Format>().unwrap(), format);
            }
            assert_eq!("LDFLAGS".parse::<Format>().unwrap(), Format::LdFlags);
            assert!("yaml".parse::<Format>().is_err());
        }

        #[test]
        fn default_is_ldflags() {
            assert_eq!(Format::default(), Format::LdFlags);
        }
    }

    mod render {
        use super::*;

        #[test]
        fn ldflags() {
            let out = render(&sample(), Format::LdFlags).unwrap();
            assert_eq!(
                out,
                "-X 'main.GitBranch=main' -X 'main.GitCommit=abc1234' \
                 -X 'main.GitCommitMsgFull=Subject\n\nBody'"
            );
        }

        #[test]
        fn cargo_lines_are_single_line() {
            let out = render(&sample(), Format::Cargo).unwrap();
            let lines: Vec<_> = out.lines().collect();
            assert_eq!(
                lines,
                vec![
                    "cargo:rustc-env=MAIN_GIT_BRANCH=main",
                    "cargo:rustc-env=MAIN_GIT_COMMIT=abc1234",
                    r"cargo:rustc-env=MAIN_GIT_COMMIT_MSG_FULL=Subject\n\nBody",
                ]
            );
        }

        #[test]
        fn env_lines() {
            let out = render(&sample(), Format::Env).unwrap();
            assert!(out.starts_with("MAIN_GIT_BRANCH=main\n"));
        }

        #[test]
        fn json_object() {
            let out = render(&sample(), Format::Json).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(parsed["main.GitCommit"], "abc1234");
            assert_eq!(parsed["main.GitCommitMsgFull"], "Subject\n\nBody");
        }

        #[test]
        fn empty_map_renders_empty() {
            let map = AssignmentMap::new(&SymbolPrefix::default());
            assert_eq!(render(&map, Format::LdFlags).unwrap(), "");
            assert_eq!(render(&map, Format::Json).unwrap(), "{}");
        }
    }

    mod env_name {
        use super::*;

        #[test]
        fn splits_camel_case() {
            assert_eq!(env_name("main.BuildDate"), "MAIN_BUILD_DATE");
            assert_eq!(env_name("main.Version"), "MAIN_VERSION");
        }

        #[test]
        fn collapses_separators() {
            assert_eq!(env_name("crate::info.GitState"), "CRATE_INFO_GIT_STATE");
        }
    }
}
