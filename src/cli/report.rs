//! Report formatting and printing utilities.
//!
//! Kept separate from the command logic so xcmerge can be used as a library.
//! Every printer has a `_to` variant taking a writer, used by the tests.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ImportSummary, InitSummary, MergeSummary};
use crate::catalog::KeyOutcome;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Merge(summary) => {
            print_merge_to(summary, verbose, &mut io::stdout().lock());
        }
        CommandSummary::Import(summary) => {
            print_import_to(summary, verbose, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => match &summary.error {
            Some(_) => print_init_to(summary, &mut io::stderr().lock()),
            None => print_init_to(summary, &mut io::stdout().lock()),
        },
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn print_location<W: Write>(writer: &mut W, path: &Path) {
    let _ = writeln!(writer, "  {} {}", "-->".blue(), path.display());
}

pub fn print_merge_to<W: Write>(summary: &MergeSummary, verbose: bool, writer: &mut W) {
    let stats = &summary.stats;

    for key in stats.not_found_keys() {
        let _ = writeln!(
            writer,
            "{}: \"{}\" not found in catalog, skipped  {}",
            "warning".bold().yellow(),
            key,
            "missing-key".dimmed().cyan()
        );
        print_location(writer, &summary.catalog_path);
    }

    if verbose {
        let _ = writeln!(
            writer,
            "  {} {}",
            "table".dimmed(),
            summary.table_path.display()
        );
        for outcome in &stats.outcomes {
            match outcome {
                KeyOutcome::Updated { key, written } => {
                    let _ = writeln!(
                        writer,
                        "  {} \"{}\" ({} {})",
                        "updated".cyan(),
                        key,
                        written,
                        plural(*written, "localization", "localizations")
                    );
                }
                KeyOutcome::Created { key, written } => {
                    let _ = writeln!(
                        writer,
                        "  {} \"{}\" ({} {})",
                        "created".green(),
                        key,
                        written,
                        plural(*written, "localization", "localizations")
                    );
                }
                KeyOutcome::NotFound { .. } => {}
            }
        }
    }

    let language_count = stats.languages.len();
    let counts = format!(
        "{} {}, {} new {}, {} {} across {} {}",
        stats.keys_updated,
        plural(stats.keys_updated, "key updated", "keys updated"),
        stats.keys_created,
        plural(stats.keys_created, "key", "keys"),
        stats.localizations_written,
        plural(stats.localizations_written, "localization", "localizations"),
        language_count,
        plural(language_count, "language", "languages"),
    );

    if summary.is_dry_run && stats.is_modified() {
        let _ = writeln!(
            writer,
            "{} {} in {}",
            "Would write".yellow().bold(),
            counts,
            summary.catalog_path.display()
        );
        let _ = writeln!(
            writer,
            "Run without {} to update the catalog.",
            "--dry-run".cyan()
        );
    } else if summary.saved {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", counts).green()
        );
        print_location(writer, &summary.catalog_path);
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} is already up to date ({} {} checked)",
                summary.catalog_path.display(),
                stats.keys_touched(),
                plural(stats.keys_touched(), "key", "keys")
            )
            .green()
        );
    }

    if stats.keys_not_found > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} {} not in catalog (policy: {})",
            FAILURE_MARK.yellow(),
            stats.keys_not_found,
            plural(stats.keys_not_found, "key", "keys"),
            format!("{:?}", summary.on_missing).to_lowercase()
        );
    }
}

pub fn print_import_to<W: Write>(summary: &ImportSummary, verbose: bool, writer: &mut W) {
    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(sticker) => {
                if verbose {
                    let _ = writeln!(
                        writer,
                        "  {} \"{}\" <- {}",
                        "imported".green(),
                        sticker.name,
                        sticker.source.display()
                    );
                    print_location(writer, &sticker.imageset_dir);
                    if summary.matte {
                        let _ = writeln!(
                            writer,
                            "    {} {} {} transparent",
                            "=".blue(),
                            sticker.pixels_cleared,
                            plural(sticker.pixels_cleared, "pixel", "pixels")
                        );
                    }
                }
            }
            Err(err) => {
                let _ = writeln!(
                    writer,
                    "{}: \"{}\" {:#}",
                    "error".bold().red(),
                    outcome.name,
                    err
                );
            }
        }
    }

    let imported = summary.imported_count();
    let failed = summary.failed_count();

    if imported > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Imported {} {}",
                imported,
                plural(imported, "sticker", "stickers")
            )
            .green()
        );
        print_location(writer, &summary.assets_root);
    }

    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} failed",
            FAILURE_MARK.red(),
            failed,
            plural(failed, "sticker", "stickers")
        );
    }
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(writer, "Error: {}", error);
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path.display()).green()
            );
        }
    }
}

// ============================================================
// Tests
// ============================================================
