//! Asset catalog image sets.
//!
//! Each sticker becomes `<assets>/<name>.imageset/` containing `<name>.png`
//! and a `Contents.json` descriptor listing the 1x/2x/3x variants (only 1x
//! has a file).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use image::ImageFormat;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::matte::matte_near_white;
use crate::utils::write_atomic;

pub const CONTENTS_FILE_NAME: &str = "Contents.json";
pub const IMAGESET_EXTENSION: &str = "imageset";

const IDIOM_UNIVERSAL: &str = "universal";
const SCALES: [&str; 3] = ["1x", "2x", "3x"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSetContents {
    pub images: Vec<ImageVariant>,
    pub info: AssetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub idiom: String,
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    pub author: String,
    pub version: u32,
}

impl Default for AssetInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

impl ImageSetContents {
    /// Descriptor for a single 1x image with empty 2x/3x slots.
    pub fn single_scale(filename: &str) -> Self {
        let images = SCALES
            .iter()
            .enumerate()
            .map(|(idx, scale)| ImageVariant {
                filename: (idx == 0).then(|| filename.to_string()),
                idiom: IDIOM_UNIVERSAL.to_string(),
                scale: scale.to_string(),
            })
            .collect();

        Self {
            images,
            info: AssetInfo::default(),
        }
    }

    /// Serialize with 4-space indentation, as Xcode writes it.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .context("Failed to serialize Contents.json")?;
        let mut content = String::from_utf8(buf).context("Contents.json is not valid UTF-8")?;
        content.push('\n');
        Ok(content)
    }
}

/// How the source image is written into the image set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProcessing {
    /// Byte-for-byte copy.
    Copy,
    /// Decode, clear near-white pixels, re-encode as PNG.
    Matte { threshold: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSticker {
    pub name: String,
    pub source: PathBuf,
    pub imageset_dir: PathBuf,
    /// Pixels made transparent; always 0 for a plain copy.
    pub pixels_cleared: usize,
}

/// Find the generated image for `name`: the first `<name>*.png` in
/// `source_root`, in lexical order.
pub fn find_source_image(source_root: &Path, name: &str) -> Result<Option<PathBuf>> {
    let pattern = format!(
        "{}/{}*.png",
        Pattern::escape(&source_root.to_string_lossy()),
        Pattern::escape(name)
    );

    let mut matches: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid source pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matches.sort();

    Ok(matches.into_iter().next())
}

pub fn imageset_dir(assets_root: &Path, name: &str) -> PathBuf {
    assets_root.join(format!("{}.{}", name, IMAGESET_EXTENSION))
}

/// Import one sticker into the asset catalog, replacing any existing image
/// set of the same name.
pub fn import_sticker(
    assets_root: &Path,
    source_root: &Path,
    name: &str,
    processing: ImageProcessing,
) -> Result<ImportedSticker> {
    let Some(source) = find_source_image(source_root, name)? else {
        bail!(
            "Could not find generated image for {} in {}",
            name,
            source_root.display()
        );
    };

    // Decode before touching the destination so a bad image leaves the
    // existing image set in place.
    let processed = match processing {
        ImageProcessing::Copy => None,
        ImageProcessing::Matte { threshold } => {
            let mut img = image::open(&source)
                .with_context(|| format!("Failed to decode image: {}", source.display()))?
                .to_rgba8();
            let cleared = matte_near_white(&mut img, threshold);
            Some((img, cleared))
        }
    };

    let dest_dir = imageset_dir(assets_root, name);
    if dest_dir.exists() {
        fs::remove_dir_all(&dest_dir)
            .with_context(|| format!("Failed to remove directory: {}", dest_dir.display()))?;
    }
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    let filename = format!("{}.png", name);
    let dest_file = dest_dir.join(&filename);

    let pixels_cleared = match processed {
        None => {
            fs::copy(&source, &dest_file).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    dest_file.display()
                )
            })?;
            0
        }
        Some((img, cleared)) => {
            img.save_with_format(&dest_file, ImageFormat::Png)
                .with_context(|| format!("Failed to write image: {}", dest_file.display()))?;
            cleared
        }
    };

    let contents = ImageSetContents::single_scale(&filename).to_json()?;
    write_atomic(&dest_dir.join(CONTENTS_FILE_NAME), contents.as_bytes())?;

    Ok(ImportedSticker {
        name: name.to_string(),
        source,
        imageset_dir: dest_dir,
        pixels_cleared,
    })
}
