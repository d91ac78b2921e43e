use std::path::PathBuf;

use crate::assets::StickerOutcome;
use crate::catalog::{MergeStats, MissingKeyPolicy};

#[derive(Debug)]
pub enum CommandSummary {
    Merge(MergeSummary),
    Import(ImportSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct MergeSummary {
    pub catalog_path: PathBuf,
    pub table_path: PathBuf,
    pub on_missing: MissingKeyPolicy,
    pub stats: MergeStats,
    pub is_dry_run: bool,
    /// True if the catalog file was rewritten.
    pub saved: bool,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub assets_root: PathBuf,
    pub matte: bool,
    pub outcomes: Vec<StickerOutcome>,
}

impl ImportSummary {
    pub fn imported_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.imported_count()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// Set when the config file already existed.
    pub error: Option<String>,
}

/// Result of running xcmerge commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, a non-zero exit status is returned when error_count > 0.
    pub exit_on_errors: bool,
}
