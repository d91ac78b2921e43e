//! Translation merge.
//!
//! Applies a [`TranslationTable`] to a [`StringCatalog`]: every
//! (key, lang, value) in the table ends up as
//! `lang -> {state: "translated", value}` on the key's entry, replacing
//! whatever was there before. Catalog keys the table does not mention are
//! left untouched. Applying the same table twice yields the same catalog.

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::document::{EntryAction, LocalizationUnit, StringCatalog};
use super::table::TranslationTable;

/// What to do with a table key that the catalog does not contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum MissingKeyPolicy {
    /// Create the entry, then merge into it.
    #[default]
    Insert,
    /// Report the key as not found and skip it.
    Warn,
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub on_missing: MissingKeyPolicy,
    /// `extractionState` written on entries created by the merge.
    pub extraction_state: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            on_missing: MissingKeyPolicy::default(),
            extraction_state: "manual".to_string(),
        }
    }
}

/// Outcome for a single table key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Updated { key: String, written: usize },
    Created { key: String, written: usize },
    NotFound { key: String },
}

impl KeyOutcome {
    pub fn key(&self) -> &str {
        match self {
            KeyOutcome::Updated { key, .. }
            | KeyOutcome::Created { key, .. }
            | KeyOutcome::NotFound { key } => key,
        }
    }
}

/// Counts for reporting. Nothing here affects the merge itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub keys_updated: usize,
    pub keys_created: usize,
    pub keys_not_found: usize,
    pub localizations_written: usize,
    /// Writes whose value was already present and identical.
    pub localizations_unchanged: usize,
    pub languages: BTreeSet<String>,
    pub outcomes: Vec<KeyOutcome>,
}

impl MergeStats {
    pub fn keys_touched(&self) -> usize {
        self.keys_updated + self.keys_created
    }

    pub fn not_found_keys(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, KeyOutcome::NotFound { .. }))
            .map(KeyOutcome::key)
    }

    /// True if the merge changed the catalog.
    pub fn is_modified(&self) -> bool {
        self.keys_created > 0 || self.localizations_written > self.localizations_unchanged
    }
}

pub fn merge(
    catalog: &mut StringCatalog,
    table: &TranslationTable,
    options: &MergeOptions,
) -> MergeStats {
    let mut stats = MergeStats::default();

    for row in table.rows() {
        let action = match options.on_missing {
            MissingKeyPolicy::Insert => catalog.ensure_entry(&row.key, &options.extraction_state),
            MissingKeyPolicy::Warn if catalog.contains_key(&row.key) => EntryAction::Existing,
            MissingKeyPolicy::Warn => {
                stats.keys_not_found += 1;
                stats.outcomes.push(KeyOutcome::NotFound {
                    key: row.key.clone(),
                });
                continue;
            }
        };

        let mut written = 0;
        for (lang, value) in &row.values {
            let unit = LocalizationUnit::translated(value.as_str());
            // Compare the raw JSON: extra fields on the old unit count as a change.
            if catalog.raw_localization(&row.key, lang) == Some(&unit.to_value()) {
                stats.localizations_unchanged += 1;
            }
            if catalog.set_localization(&row.key, lang, &unit) {
                written += 1;
                stats.languages.insert(lang.clone());
            }
        }
        stats.localizations_written += written;

        let key = row.key.clone();
        match action {
            EntryAction::Existing => {
                stats.keys_updated += 1;
                stats.outcomes.push(KeyOutcome::Updated { key, written });
            }
            EntryAction::Created => {
                stats.keys_created += 1;
                stats.outcomes.push(KeyOutcome::Created { key, written });
            }
        }
    }

    stats
}
