use anyhow::{Result, bail};

use super::super::args::ImportCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, ImportSummary};
use crate::assets::{ImageProcessing, import_stickers};
use crate::config::{CONFIG_FILE_NAME, load_config};

pub fn import(cmd: ImportCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let loaded = load_config(&args.common.path)?;
    let assets_config = &loaded.config.assets;

    // In verbose mode, inform user if using default config
    if args.common.verbose && !loaded.from_file {
        eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME);
    }

    let assets_root = args
        .assets
        .clone()
        .unwrap_or_else(|| loaded.resolve(&assets_config.assets_root));
    let source_root = args
        .source
        .clone()
        .unwrap_or_else(|| loaded.resolve(&assets_config.source_root));
    let names = if args.names.is_empty() {
        assets_config.stickers.clone()
    } else {
        args.names.clone()
    };
    if names.is_empty() {
        bail!("No stickers to import. Pass sticker names or set 'assets.stickers' in the config.");
    }

    let matte = args.matte || assets_config.matte;
    let processing = if matte {
        ImageProcessing::Matte {
            threshold: args.threshold.unwrap_or(assets_config.threshold),
        }
    } else {
        ImageProcessing::Copy
    };

    let outcomes = import_stickers(&assets_root, &source_root, &names, processing)?;

    Ok(finish(
        CommandSummary::Import(ImportSummary {
            assets_root,
            matte,
            outcomes,
        }),
        true,
    ))
}
