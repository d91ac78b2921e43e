//! Sticker import into an Xcode asset catalog.

pub mod imageset;
pub mod matte;

use std::path::Path;

use anyhow::{Result, bail};

pub use imageset::{ImageProcessing, ImageSetContents, ImportedSticker, import_sticker};
pub use matte::{DEFAULT_THRESHOLD, matte_near_white};

/// Result of importing one named sticker.
#[derive(Debug)]
pub struct StickerOutcome {
    pub name: String,
    pub result: Result<ImportedSticker>,
}

/// Import every sticker in `names`. A failure for one sticker is recorded
/// and the remaining stickers are still processed; only a missing asset
/// catalog aborts the run.
pub fn import_stickers(
    assets_root: &Path,
    source_root: &Path,
    names: &[String],
    processing: ImageProcessing,
) -> Result<Vec<StickerOutcome>> {
    if !assets_root.is_dir() {
        bail!("Assets path not found: {}", assets_root.display());
    }

    Ok(names
        .iter()
        .map(|name| StickerOutcome {
            name: name.clone(),
            result: import_sticker(assets_root, source_root, name, processing),
        })
        .collect())
}
