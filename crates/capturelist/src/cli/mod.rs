//! Command-line interface for capturelist.
//!
//! This module provides the CLI structure for the `caplist` binary, which
//! manages the sample entries stored in the configured data directory.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ClearCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat,
    UpdateCommand,
};

use crate::logging::Verbosity;

/// caplist - Keep small lists of captured records on disk
///
/// Each record type lives in one JSON file that is rewritten in full on
/// every change.
#[derive(Debug, Parser)]
#[command(name = "caplist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored entries, newest first
    List(ListCommand),

    /// Capture a new entry
    Add(AddCommand),

    /// Change attributes of an existing entry
    Update(UpdateCommand),

    /// Delete one entry
    Delete(DeleteCommand),

    /// Delete every entry
    Clear(ClearCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "caplist");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["caplist", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["caplist", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["caplist", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["caplist", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_list_format() {
        let cli = parse(&["caplist", "list", "--format", "json"]);
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&["caplist", "add", "--favorite-color", "Blue", "--dog-name", "Daisy"]);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.favorite_color.as_deref(), Some("Blue"));
                assert_eq!(cmd.dog_name.as_deref(), Some("Daisy"));
                assert!(cmd.password_hint.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_requires_uuid() {
        assert!(Cli::try_parse_from(["caplist", "update", "not-a-uuid"]).is_err());

        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let cli = parse(&["caplist", "update", id, "--dog-name", "Rex"]);
        match cli.command {
            Command::Update(cmd) => {
                assert_eq!(cmd.id.to_string(), id);
                assert_eq!(cmd.dog_name.as_deref(), Some("Rex"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = parse(&["caplist", "delete", "67e55044-10b1-426f-9247-bb680e5fe0c8"]);
        assert!(matches!(cli.command, Command::Delete(_)));
    }

    #[test]
    fn test_parse_clear_yes() {
        let cli = parse(&["caplist", "clear", "--yes"]);
        assert!(matches!(cli.command, Command::Clear(ClearCommand { yes: true })));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["caplist", "-c", "/custom/config.toml", "config", "path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }
}
