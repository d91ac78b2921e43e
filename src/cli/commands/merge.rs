use anyhow::Result;

use super::super::args::MergeCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, MergeSummary};
use crate::catalog::{CatalogFile, MergeOptions, TranslationTable, merge as merge_table};
use crate::config::{CONFIG_FILE_NAME, load_config};

pub fn merge(cmd: MergeCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let loaded = load_config(&args.common.path)?;
    let config = &loaded.config;

    // In verbose mode, inform user if using default config
    if args.common.verbose && !loaded.from_file {
        eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME);
    }

    let catalog_path = args
        .catalog
        .clone()
        .unwrap_or_else(|| loaded.resolve(&config.catalog));
    let table_path = args
        .table
        .clone()
        .unwrap_or_else(|| loaded.resolve(&config.translations));
    let layout = args.layout.unwrap_or(config.layout);
    let keys = if args.keys.is_empty() {
        &config.keys
    } else {
        &args.keys
    };
    let options = MergeOptions {
        on_missing: args.on_missing.unwrap_or(config.on_missing_key),
        extraction_state: args
            .extraction_state
            .clone()
            .unwrap_or_else(|| config.extraction_state.clone()),
    };

    // Both inputs are fully validated before the catalog is touched.
    let mut table = TranslationTable::load(&table_path, layout)?;
    table.retain_keys(keys);
    let mut file = CatalogFile::open(&catalog_path)?;

    let stats = merge_table(&mut file.catalog, &table, &options);

    let saved = !args.dry_run && stats.is_modified();
    if saved {
        file.save()?;
    }

    Ok(finish(
        CommandSummary::Merge(MergeSummary {
            catalog_path,
            table_path,
            on_missing: options.on_missing,
            stats,
            is_dry_run: args.dry_run,
            saved,
        }),
        true,
    ))
}
