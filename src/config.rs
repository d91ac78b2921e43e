use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::assets::DEFAULT_THRESHOLD;
use crate::catalog::{MissingKeyPolicy, TableLayout};

pub const CONFIG_FILE_NAME: &str = ".xcmergerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default = "default_translations")]
    pub translations: String,
    #[serde(default)]
    pub layout: TableLayout,
    #[serde(default)]
    pub on_missing_key: MissingKeyPolicy,
    #[serde(default = "default_extraction_state")]
    pub extraction_state: String,
    /// Restrict merges to these keys. Empty means every key in the table.
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsConfig {
    #[serde(default = "default_assets_root")]
    pub assets_root: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub stickers: Vec<String>,
    #[serde(default)]
    pub matte: bool,
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

fn default_catalog() -> String {
    "Localizable.xcstrings".to_string()
}

fn default_translations() -> String {
    "translations.json".to_string()
}

fn default_extraction_state() -> String {
    "manual".to_string()
}

fn default_assets_root() -> String {
    "Assets.xcassets".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            translations: default_translations(),
            layout: TableLayout::default(),
            on_missing_key: MissingKeyPolicy::default(),
            extraction_state: default_extraction_state(),
            keys: Vec::new(),
            assets: AssetsConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            source_root: default_source_root(),
            stickers: Vec::new(),
            matte: false,
            threshold: default_threshold(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.trim().is_empty() {
            bail!("'catalog' must not be empty");
        }
        if self.translations.trim().is_empty() {
            bail!("'translations' must not be empty");
        }
        if let Some(name) = self.assets.stickers.iter().find(|s| s.trim().is_empty()) {
            bail!("Invalid sticker name in 'assets.stickers': \"{}\"", name);
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    // A relative start such as "." cannot be walked upward.
    let mut current = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against: the config
    /// file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
