//! Core Unicode table module
//!
//! # Module Organization
//!
//! - [`archive`]: ZIP container access and the archive's data root
//! - [`codec`]: Entry decompression and CRC-32 checks
//! - [`format`]: Line scanners for the range, symbol and block name files
//! - [`loader`]: Builds the name table and block index for one language
//! - [`index`]: [`UnicodeIndex`] and its queries
//! - [`search`]: Search modes and result sets

pub mod archive;
pub mod codec;
pub mod format;
pub mod index;
pub mod loader;
pub mod search;
pub mod types;
mod utils;

pub use archive::{Archive, ArchiveSource};
pub use index::UnicodeIndex;
pub use loader::available_languages;
pub use search::{SearchMode, SearchResults, MIN_SYMBOL_QUERY_LEN};
pub use types::error::{Result, UnicodeTableError};
