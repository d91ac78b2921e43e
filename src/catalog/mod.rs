//! String catalog handling.
//!
//! - `document`: load/save `.xcstrings` files
//! - `table`: translation table files
//! - `merge`: apply a table to a catalog

pub mod document;
pub mod merge;
pub mod table;

pub use document::{CatalogFile, LocalizationUnit, StringCatalog, StringUnit};
pub use merge::{KeyOutcome, MergeOptions, MergeStats, MissingKeyPolicy, merge};
pub use table::{TableLayout, TranslationRow, TranslationTable};
