//! xcmerge - localization and asset maintenance for Xcode projects
//!
//! xcmerge is a CLI tool and library that merges translation tables into
//! Xcode string catalogs (`.xcstrings`) and imports generated sticker images
//! into asset catalogs (`.xcassets`).
//!
//! ## Module Structure
//!
//! - `assets`: Sticker import and near-white alpha matting
//! - `catalog`: String catalog model, translation tables and the merge
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `utils`: Shared utility functions

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod utils;
