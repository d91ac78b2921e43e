//! Translation table loading.
//!
//! A table maps a source key to its translations per language. Two on-disk
//! layouts are accepted:
//!
//! - by key: `{"Speichern": {"en": "Save", "fr": "Enregistrer"}}`
//! - by language: `{"en": {"Speichern": "Save"}, "fr": {"Speichern": "Enregistrer"}}`
//!
//! Both load into the same key-major [`TranslationTable`]. Key order is the
//! order of first appearance in the file.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TableLayout {
    /// `{key: {lang: value}}`
    #[default]
    ByKey,
    /// `{lang: {key: value}}`
    ByLanguage,
}

/// All translations supplied for one source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub key: String,
    /// (language code, translated value), unique by language.
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    rows: Vec<TranslationRow>,
    index: HashMap<String, usize>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one translation. A later value for the same (key, lang) replaces
    /// the earlier one in place.
    pub fn insert(&mut self, key: &str, lang: &str, value: &str) {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.rows.push(TranslationRow {
                    key: key.to_string(),
                    values: Vec::new(),
                });
                self.index.insert(key.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };

        let values = &mut self.rows[idx].values;
        match values.iter_mut().find(|(l, _)| l == lang) {
            Some((_, existing)) => *existing = value.to_string(),
            None => values.push((lang.to_string(), value.to_string())),
        }
    }

    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    /// Keep only the rows whose key is in `keys`. An empty list keeps everything.
    pub fn retain_keys(&mut self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        let allowed: HashSet<&str> = keys.iter().map(String::as_str).collect();
        self.rows.retain(|row| allowed.contains(row.key.as_str()));
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.key.clone(), idx))
            .collect();
    }

    /// Parse a table from JSON text in the given layout.
    ///
    /// `origin` is only used in error messages.
    pub fn from_json(content: &str, layout: TableLayout, origin: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse translation table: {}", origin))?;
        let Value::Object(outer) = value else {
            bail!("Root of translation table must be an object: {}", origin);
        };

        let mut table = Self::new();
        for (outer_key, inner) in &outer {
            let inner = as_string_map(inner, outer_key, origin)?;
            for (inner_key, text) in inner {
                match layout {
                    TableLayout::ByKey => table.insert(outer_key, inner_key, text),
                    TableLayout::ByLanguage => table.insert(inner_key, outer_key, text),
                }
            }
        }
        Ok(table)
    }

    pub fn load(path: &Path, layout: TableLayout) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_json(&content, layout, &path.display().to_string())
    }
}

fn as_string_map<'a>(
    value: &'a Value,
    path: &str,
    origin: &str,
) -> Result<Vec<(&'a str, &'a str)>> {
    let Some(map) = value.as_object() else {
        bail!("\"{}\" must be an object of strings: {}", path, origin);
    };

    map.iter()
        .map(|(k, v)| match v.as_str() {
            Some(text) => Ok((k.as_str(), text)),
            None => bail!("\"{}.{}\" must be a string: {}", path, k, origin),
        })
        .collect()
}
