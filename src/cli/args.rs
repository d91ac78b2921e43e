//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `merge`: Merge a translation table into a string catalog
//! - `import`: Import generated sticker images into an asset catalog
//! - `init`: Initialize xcmerge configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::catalog::{MissingKeyPolicy, TableLayout};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Merge(cmd)) => cmd.args.common.verbose,
            Some(Command::Import(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to start searching for the config file from
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct MergeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// String catalog to update (overrides config file)
    #[arg(long, env = "XCMERGE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Translation table file (overrides config file)
    #[arg(long, env = "XCMERGE_TABLE")]
    pub table: Option<PathBuf>,

    /// Layout of the translation table (overrides config file)
    #[arg(long, value_enum)]
    pub layout: Option<TableLayout>,

    /// What to do with keys missing from the catalog (overrides config file)
    #[arg(long, value_enum)]
    pub on_missing: Option<MissingKeyPolicy>,

    /// extractionState for newly created keys (overrides config file)
    #[arg(long)]
    pub extraction_state: Option<String>,

    /// Only merge these keys (default: every key in the table)
    /// Can be specified multiple times: --key Speichern --key Abbrechen
    #[arg(long = "key")]
    pub keys: Vec<String>,

    /// Report what would change without writing the catalog
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    #[command(flatten)]
    pub args: MergeArgs,
}

#[derive(Debug, Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Sticker names to import (default: `assets.stickers` from config)
    pub names: Vec<String>,

    /// Asset catalog directory (overrides config file)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Directory holding the generated images (overrides config file)
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Make near-white pixels transparent
    #[arg(long)]
    pub matte: bool,

    /// Channel value a pixel must exceed on R, G and B to be cleared
    #[arg(long)]
    pub threshold: Option<u8>,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[command(flatten)]
    pub args: ImportArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge translations into a string catalog (.xcstrings)
    Merge(MergeCommand),
    /// Import generated sticker images into an asset catalog (.xcassets)
    Import(ImportCommand),
    /// Initialize a new .xcmergerc.json configuration file
    Init,
}
