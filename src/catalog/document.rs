//! String catalog document (`.xcstrings`).
//!
//! The catalog is kept as an order-preserving JSON tree so that fields this
//! tool does not understand (`comment`, `variations`, `shouldTranslate`, ...)
//! survive a load/save cycle untouched. [`LocalizationUnit`] is only used
//! to build the values a merge writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::write_atomic;

/// State written for every localization produced by a merge.
pub const TRANSLATED_STATE: &str = "translated";

const STRINGS_FIELD: &str = "strings";
const LOCALIZATIONS_FIELD: &str = "localizations";
const EXTRACTION_STATE_FIELD: &str = "extractionState";

/// A single language's translated value plus its translation state.
///
/// Serialized in the catalog as `{"stringUnit": {"state": ..., "value": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationUnit {
    pub string_unit: StringUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringUnit {
    pub state: String,
    pub value: String,
}

impl LocalizationUnit {
    pub fn translated(value: impl Into<String>) -> Self {
        Self {
            string_unit: StringUnit {
                state: TRANSLATED_STATE.to_string(),
                value: value.into(),
            },
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "stringUnit": {
                "state": self.string_unit.state,
                "value": self.string_unit.value,
            }
        })
    }
}

/// Whether a key already existed when it was looked up for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Existing,
    Created,
}

/// The full localization resource document for an application.
#[derive(Debug, Clone, PartialEq)]
pub struct StringCatalog {
    /// Top-level fields. `strings` keeps its slot here (emptied) so the
    /// document's field order survives a rewrite.
    root: Map<String, Value>,
    strings: Map<String, Value>,
}

impl StringCatalog {
    /// Parse a catalog from JSON text, validating its shape.
    ///
    /// `origin` is only used in error messages.
    pub fn from_json(content: &str, origin: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse string catalog: {}", origin))?;
        let Value::Object(mut root) = value else {
            bail!("Root of string catalog must be an object: {}", origin);
        };

        let strings = match root.get_mut(STRINGS_FIELD) {
            Some(Value::Object(map)) => std::mem::take(map),
            Some(_) => bail!("\"strings\" must be an object: {}", origin),
            None => bail!("String catalog has no \"strings\" object: {}", origin),
        };

        for (key, entry) in &strings {
            let Some(entry) = entry.as_object() else {
                bail!("Entry \"strings.{}\" must be an object: {}", key, origin);
            };
            if let Some(localizations) = entry.get(LOCALIZATIONS_FIELD)
                && !localizations.is_object()
            {
                bail!(
                    "\"strings.{}.localizations\" must be an object: {}",
                    key,
                    origin
                );
            }
        }

        Ok(Self { root, strings })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut root = self.root.clone();
        root.insert(
            STRINGS_FIELD.to_string(),
            Value::Object(self.strings.clone()),
        );
        let content = serde_json::to_string_pretty(&root).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    /// Write the catalog back, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, self.to_json()?.as_bytes())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Raw JSON of one entry, exactly as it will be written.
    pub fn entry_json(&self, key: &str) -> Option<&Value> {
        self.strings.get(key)
    }

    /// Raw JSON of one localization, including any fields beyond `stringUnit`.
    pub fn raw_localization(&self, key: &str, lang: &str) -> Option<&Value> {
        self.entry_json(key)?.get(LOCALIZATIONS_FIELD)?.get(lang)
    }

    /// Insert `key` with an empty localization map if it does not exist.
    pub fn ensure_entry(&mut self, key: &str, extraction_state: &str) -> EntryAction {
        let strings = &mut self.strings;
        if strings.contains_key(key) {
            return EntryAction::Existing;
        }

        let mut entry = Map::new();
        entry.insert(
            EXTRACTION_STATE_FIELD.to_string(),
            Value::String(extraction_state.to_string()),
        );
        entry.insert(LOCALIZATIONS_FIELD.to_string(), Value::Object(Map::new()));
        strings.insert(key.to_string(), Value::Object(entry));
        EntryAction::Created
    }

    /// Set `key`'s localization for `lang`, replacing any previous value
    /// wholesale. Returns `false` if `key` is not in the catalog.
    pub fn set_localization(&mut self, key: &str, lang: &str, unit: &LocalizationUnit) -> bool {
        let Some(Value::Object(entry)) = self.strings.get_mut(key) else {
            return false;
        };

        let localizations = entry
            .entry(LOCALIZATIONS_FIELD)
            .or_insert_with(|| Value::Object(Map::new()));
        if !localizations.is_object() {
            *localizations = Value::Object(Map::new());
        }

        if let Value::Object(map) = localizations {
            map.insert(lang.to_string(), unit.to_value());
        }
        true
    }
}

/// A catalog together with the path it was loaded from.
#[derive(Debug)]
pub struct CatalogFile {
    pub path: PathBuf,
    pub catalog: StringCatalog,
}

impl CatalogFile {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            catalog: StringCatalog::load(path)?,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.catalog.save(&self.path)
    }
}
