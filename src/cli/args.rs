//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Collect from that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Suppress warnings

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::Format;
use crate::core::types::{Directive, DirectiveKey, Field, TypeError};

/// buildstamp - Render git build metadata as symbol assignments
#[derive(Parser, Debug)]
#[command(name = "buildstamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Collect metadata for this directory instead of the current one
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `print` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Overrides applied on top of the configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct DirectiveArgs {
    /// Symbol prefix for injected keys (default: main)
    #[arg(long = "pkg", visible_alias = "prefix", value_name = "PREFIX")]
    pub pkg: Option<String>,

    /// Version to inject instead of reading the VERSION file
    #[arg(long = "set-version", value_name = "VERSION")]
    pub set_version: Option<String>,

    /// Raw directive as NAME=VALUE (pkg, prefix, version); repeatable
    #[arg(short = 'D', long = "directive", value_name = "NAME=VALUE")]
    pub raw: Vec<String>,
}

impl DirectiveArgs {
    /// Convert to directives in precedence order.
    ///
    /// Raw `-D` directives come first so `--pkg` and `--set-version` win.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDirective` if a raw directive is not
    /// `NAME=VALUE`.
    pub fn to_directives(&self) -> Result<Vec<Directive>, TypeError> {
        let mut directives = Vec::new();

        for raw in &self.raw {
            if let Some(directive) = Directive::parse(raw)? {
                directives.push(directive);
            }
        }
        if let Some(pkg) = &self.pkg {
            directives.push(Directive::new(DirectiveKey::Prefix, pkg.as_str()));
        }
        if let Some(version) = &self.set_version {
            directives.push(Directive::new(DirectiveKey::Version, version.as_str()));
        }

        Ok(directives)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect metadata and print it as symbol assignments
    #[command(
        name = "print",
        long_about = "Collect metadata and print it as symbol assignments.\n\n\
            Reads the checkout's HEAD commit, branch, state and tag summary, the \
            VERSION file (unless a version is given), and the current UTC time, \
            then renders every value under the symbol prefix.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Linker flags for a Go build
    go build -ldflags \"$(buildstamp print)\"

    # Environment for a Rust build script
    buildstamp print --format cargo --pkg myapp

    # Pin the version regardless of the VERSION file
    buildstamp print --set-version 1.4.0"
    )]
    Print {
        /// Output format: ldflags, cargo, env or json
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<Format>,

        #[command(flatten)]
        directives: DirectiveArgs,
    },

    /// Print the value of a single field
    #[command(name = "get")]
    Get {
        /// Field name, e.g. GitCommit or Version
        field: Field,

        #[command(flatten)]
        directives: DirectiveArgs,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Print {
            format: None,
            directives: DirectiveArgs::default(),
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["buildstamp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn print_with_overrides() {
        let cli = Cli::try_parse_from([
            "buildstamp",
            "print",
            "--format",
            "json",
            "--pkg",
            "buildinfo",
            "--set-version",
            "1.2.3",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Print { format, directives }) => {
                assert_eq!(format, Some(Format::Json));
                assert_eq!(
                    directives.to_directives().unwrap(),
                    vec![
                        Directive::new(DirectiveKey::Prefix, "buildinfo"),
                        Directive::new(DirectiveKey::Version, "1.2.3"),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn explicit_flags_follow_raw_directives() {
        let args = DirectiveArgs {
            pkg: Some("explicit".to_string()),
            set_version: None,
            raw: vec!["pkg=raw".to_string(), "tags=netgo".to_string()],
        };

        let directives = args.to_directives().unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::new(DirectiveKey::Prefix, "raw"),
                Directive::new(DirectiveKey::Prefix, "explicit"),
            ]
        );
    }

    #[test]
    fn malformed_raw_directive_fails() {
        let args = DirectiveArgs {
            raw: vec!["version".to_string()],
            ..Default::default()
        };
        assert!(args.to_directives().is_err());
    }

    #[test]
    fn get_parses_field() {
        let cli = Cli::try_parse_from(["buildstamp", "get", "GitCommit"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Get {
                field: Field::GitCommit,
                ..
            })
        ));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["buildstamp", "print", "--format", "yaml"]).is_err());
    }
}
